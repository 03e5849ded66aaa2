use crate::players;
use crate::shot::Shot;
use crate::teams;

pub const DEFAULT_MADE_COLOR: &str = "#ffd700";
pub const DEFAULT_MISSED_COLOR: &str = "#8c52ff";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotPalette {
    pub made: String,
    pub missed: String,
}

impl ShotPalette {
    pub fn color_for(&self, made: bool) -> &str {
        if made { &self.made } else { &self.missed }
    }
}

/// Team colours for the shot's team, then the player's colours, then the global pair.
pub fn palette_for(shot: &Shot, player: &str) -> ShotPalette {
    palette_for_team(&shot.team, player)
}

pub fn palette_for_team(team: &str, player: &str) -> ShotPalette {
    let colors = teams::palette_for_team(team).or_else(|| players::player_palette(player));
    match colors {
        Some(c) => ShotPalette {
            made: c.made.to_string(),
            missed: c.missed.to_string(),
        },
        None => ShotPalette {
            made: DEFAULT_MADE_COLOR.to_string(),
            missed: DEFAULT_MISSED_COLOR.to_string(),
        },
    }
}

pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.trim().strip_prefix('#')?;
    if h.len() != 6 || !h.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&h[0..2], 16).ok()?;
    let g = u8::from_str_radix(&h[2..4], 16).ok()?;
    let b = u8::from_str_radix(&h[4..6], 16).ok()?;
    Some((r, g, b))
}
