use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::teams::TeamColors;

#[derive(Debug, Clone)]
pub struct PlayerProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub default_team: &'static str,
    pub mvp_seasons: &'static [&'static str],
    pub champion_seasons: &'static [&'static str],
    pub files: &'static [&'static str],
    pub palette: TeamColors,
}

impl PlayerProfile {
    pub fn is_mvp_season(&self, season: &str) -> bool {
        self.mvp_seasons.contains(&season)
    }

    pub fn is_champion_season(&self, season: &str) -> bool {
        self.champion_seasons.contains(&season)
    }
}

static PROFILES: &[PlayerProfile] = &[
    PlayerProfile {
        id: "lebron_james",
        name: "LeBron James",
        default_team: "LAL",
        mvp_seasons: &["2008-09", "2009-10", "2011-12", "2012-13"],
        champion_seasons: &["2011-12", "2012-13", "2015-16", "2019-20"],
        files: &[
            "lebron_james/shots_2003_2010.csv",
            "lebron_james/shots_2010_2018.csv",
            "lebron_james/shots_2018_2024.csv",
        ],
        palette: TeamColors {
            made: "#FDB927",
            missed: "#552583",
        },
    },
    PlayerProfile {
        id: "stephen_curry",
        name: "Stephen Curry",
        default_team: "GSW",
        mvp_seasons: &["2014-15", "2015-16"],
        champion_seasons: &["2014-15", "2016-17", "2017-18", "2021-22"],
        files: &["stephen_curry/shots.csv"],
        palette: TeamColors {
            made: "#FFC72C",
            missed: "#1D428A",
        },
    },
    PlayerProfile {
        id: "kevin_durant",
        name: "Kevin Durant",
        default_team: "PHX",
        mvp_seasons: &["2013-14"],
        champion_seasons: &["2016-17", "2017-18"],
        files: &["kevin_durant/shots.csv", "kevin_durant/shots_recent.csv"],
        palette: TeamColors {
            made: "#EF3B24",
            missed: "#007AC1",
        },
    },
    PlayerProfile {
        id: "kobe_bryant",
        name: "Kobe Bryant",
        default_team: "LAL",
        mvp_seasons: &["2007-08"],
        champion_seasons: &["1999-00", "2000-01", "2001-02", "2008-09", "2009-10"],
        files: &["kobe_bryant/shots.csv"],
        palette: TeamColors {
            made: "#FDB927",
            missed: "#552583",
        },
    },
    PlayerProfile {
        id: "james_harden",
        name: "James Harden",
        default_team: "HOU",
        mvp_seasons: &["2017-18"],
        champion_seasons: &[],
        files: &["james_harden/shots.csv"],
        palette: TeamColors {
            made: "#CE1141",
            missed: "#C4CED4",
        },
    },
];

static BY_ID: Lazy<HashMap<&'static str, &'static PlayerProfile>> =
    Lazy::new(|| PROFILES.iter().map(|p| (p.id, p)).collect());

pub fn all() -> &'static [PlayerProfile] {
    PROFILES
}

pub fn profile(player: &str) -> Option<&'static PlayerProfile> {
    BY_ID.get(player).copied()
}

pub fn display_name(player: &str) -> String {
    profile(player)
        .map(|p| p.name.to_string())
        .unwrap_or_else(|| player.to_string())
}

pub fn default_team(player: &str) -> Option<&'static str> {
    profile(player).map(|p| p.default_team)
}

pub fn player_palette(player: &str) -> Option<TeamColors> {
    profile(player).map(|p| p.palette)
}
