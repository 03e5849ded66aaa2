use std::collections::HashMap;

use crate::court::{FULL_COURT_LENGTH, HALF_COURT_LENGTH};
use crate::players;
use crate::teams;
use crate::zones;

pub type RawRecord = HashMap<String, String>;

const HIGHLIGHT_DESC_FIELDS: &[&str] = &[
    "HIGHLIGHT_DESC",
    "Highlight_Desc",
    "highlight_desc",
    "HIGHLIGHT DESC",
    "Highlight Desc",
    "highlight desc",
    "HIGHLIGHT_DESCRIPTION",
    "highlight_description",
    "highlightDesc",
];

const HIGHLIGHT_MEDIA_FIELDS: &[&str] = &[
    "HIGHLIGHT_URL",
    "Highlight_URL",
    "highlight_url",
    "HIGHLIGHT URL",
    "Highlight URL",
    "highlight url",
    "HIGHLIGHT_MEDIA",
    "highlight_media",
    "highlightMedia",
    "VIDEO_URL",
    "video_url",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub player: String,
    pub season: String,
    pub team: String,
    pub x: f64,
    pub y: f64,
    pub made: bool,
    pub playoffs: bool,
    pub mvp: bool,
    pub champion: bool,
    pub highlight_desc: Option<String>,
    pub highlight_media: Option<String>,
    pub has_highlight: bool,
    pub action_type: Option<String>,
    pub shot_zone_basic: Option<String>,
    pub shot_type: Option<String>,
    pub listed_distance: Option<f64>,
}

impl Shot {
    pub fn tooltip_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} {}", self.season, self.team),
            format!(
                "{}{}",
                if self.made { "Made" } else { "Missed" },
                if self.playoffs { " (playoffs)" } else { "" }
            ),
        ];
        let zone = zones::classify(self);
        let distance = self
            .listed_distance
            .unwrap_or_else(|| zones::distance_from_hoop(self));
        lines.push(format!("{} · {:.1} ft", zone.label(), distance));
        if let Some(action) = self.action_type.as_deref() {
            lines.push(action.to_string());
        }
        if let Some(desc) = self.highlight_desc.as_deref() {
            lines.push(desc.to_string());
        }
        if let Some(media) = self.highlight_media.as_deref() {
            lines.push(format!("▶ {media}"));
        }
        lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSchema {
    Legacy,
    Modern,
}

impl RowSchema {
    pub fn detect(record: &RawRecord) -> Self {
        if record.contains_key("X") || record.contains_key("Y") {
            RowSchema::Legacy
        } else {
            RowSchema::Modern
        }
    }
}

pub fn parse_row(record: &RawRecord, player: &str) -> Option<Shot> {
    let shot = match RowSchema::detect(record) {
        RowSchema::Legacy => parse_legacy(record, player)?,
        RowSchema::Modern => parse_modern(record, player)?,
    };
    Some(apply_achievements(shot, player))
}

pub fn parse_rows(records: &[RawRecord], player: &str) -> Vec<Shot> {
    records
        .iter()
        .filter_map(|record| parse_row(record, player))
        .collect()
}

fn parse_legacy(record: &RawRecord, player: &str) -> Option<Shot> {
    let x = number(record, "X")?;
    let y = number(record, "Y")?;
    let (x, y) = mirror_into_offensive_half(x, y)?;

    let made = match number(record, "SHOT_MADE") {
        Some(v) => v == 1.0,
        None => text(record, "SHOT_MADE").is_some_and(|v| v.eq_ignore_ascii_case("made")),
    };

    let highlight_desc = first_present(record, HIGHLIGHT_DESC_FIELDS);
    let highlight_media = first_present(record, HIGHLIGHT_MEDIA_FIELDS);
    let has_highlight = highlight_desc.is_some() || highlight_media.is_some();

    Some(Shot {
        player: text(record, "PLAYER").unwrap_or_default().to_string(),
        season: normalize_season(text(record, "SEASON").unwrap_or_default()),
        team: teams::resolve_team_code(text(record, "TEAM").unwrap_or_default(), player),
        x,
        y,
        made,
        playoffs: flag(record, "PLAYOFFS"),
        mvp: flag(record, "MVP"),
        champion: flag(record, "Champion") || flag(record, "CHAMPION"),
        highlight_desc,
        highlight_media,
        has_highlight,
        action_type: None,
        shot_zone_basic: None,
        shot_type: None,
        listed_distance: None,
    })
}

fn parse_modern(record: &RawRecord, player: &str) -> Option<Shot> {
    if number(record, "shot_attempted_flag") == Some(0.0) {
        return None;
    }
    let x = number(record, "loc_x")?;
    let y = number(record, "loc_y")?;
    let (x, y) = mirror_into_offensive_half(x, y)?;

    let made = text(record, "shot_made_flag").is_some_and(|v| v.eq_ignore_ascii_case("made"))
        || number(record, "shot_made_numeric") == Some(1.0);

    Some(Shot {
        player: text(record, "player_name").unwrap_or_default().to_string(),
        season: normalize_season(text(record, "season").unwrap_or_default()),
        team: teams::resolve_team_code(text(record, "team_name").unwrap_or_default(), player),
        x,
        y,
        made,
        playoffs: flag(record, "playoffs"),
        mvp: false,
        champion: false,
        highlight_desc: None,
        highlight_media: None,
        has_highlight: false,
        action_type: text(record, "action_type").map(str::to_string),
        shot_zone_basic: text(record, "shot_zone_basic").map(str::to_string),
        shot_type: text(record, "shot_type").map(str::to_string),
        listed_distance: number(record, "shot_distance"),
    })
}

// An explicit `false` in the row is indistinguishable from an absent value, so
// only an explicit `true` survives when the table disagrees.
fn apply_achievements(mut shot: Shot, player: &str) -> Shot {
    if let Some(profile) = players::profile(player) {
        shot.mvp = shot.mvp || profile.is_mvp_season(&shot.season);
        shot.champion = shot.champion || profile.is_champion_season(&shot.season);
    }
    shot
}

/// Folds a full-court coordinate into the offensive half `y ∈ [0, 47]`.
/// `None` when `y` is off the court entirely.
pub fn mirror_into_offensive_half(x: f64, y: f64) -> Option<(f64, f64)> {
    if !(0.0..=FULL_COURT_LENGTH).contains(&y) {
        return None;
    }
    if y > HALF_COURT_LENGTH {
        Some((-x, FULL_COURT_LENGTH - y))
    } else {
        Some((x, y))
    }
}

/// Normalizes `YYYY-YY`, `YYYY-YYYY` and bare `YYYY` into `YYYY-YY`.
/// Anything else is returned trimmed and otherwise untouched.
pub fn normalize_season(raw: &str) -> String {
    let s = raw.trim();
    let bytes = s.as_bytes();
    let all_digits = |part: &[u8]| part.iter().all(u8::is_ascii_digit);

    match bytes.len() {
        4 if all_digits(bytes) => {
            let year: u32 = s.parse().unwrap_or_default();
            format!("{s}-{:02}", (year + 1) % 100)
        }
        7 if bytes[4] == b'-' && all_digits(&bytes[..4]) && all_digits(&bytes[5..]) => {
            s.to_string()
        }
        9 if bytes[4] == b'-' && all_digits(&bytes[..4]) && all_digits(&bytes[5..]) => {
            format!("{}-{}", &s[..4], &s[7..])
        }
        _ => s.to_string(),
    }
}

fn text<'a>(record: &'a RawRecord, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn number(record: &RawRecord, key: &str) -> Option<f64> {
    text(record, key)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn flag(record: &RawRecord, key: &str) -> bool {
    let Some(value) = text(record, key) else {
        return false;
    };
    if let Ok(n) = value.parse::<f64>() {
        return n == 1.0;
    }
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "t"
    )
}

fn first_present(record: &RawRecord, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| text(record, key))
        .map(str::to_string)
}
