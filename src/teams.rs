use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::players;

static TEAM_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("atlanta hawks", "ATL"),
        ("boston celtics", "BOS"),
        ("brooklyn nets", "BKN"),
        ("new jersey nets", "NJN"),
        ("charlotte hornets", "CHA"),
        ("charlotte bobcats", "CHA"),
        ("chicago bulls", "CHI"),
        ("cleveland cavaliers", "CLE"),
        ("dallas mavericks", "DAL"),
        ("denver nuggets", "DEN"),
        ("detroit pistons", "DET"),
        ("golden state warriors", "GSW"),
        ("houston rockets", "HOU"),
        ("indiana pacers", "IND"),
        ("los angeles clippers", "LAC"),
        ("la clippers", "LAC"),
        ("los angeles lakers", "LAL"),
        ("memphis grizzlies", "MEM"),
        ("vancouver grizzlies", "VAN"),
        ("miami heat", "MIA"),
        ("milwaukee bucks", "MIL"),
        ("minnesota timberwolves", "MIN"),
        ("new orleans pelicans", "NOP"),
        ("new orleans hornets", "NOH"),
        ("new orleans/oklahoma city hornets", "NOK"),
        ("new york knicks", "NYK"),
        ("oklahoma city thunder", "OKC"),
        ("seattle supersonics", "SEA"),
        ("orlando magic", "ORL"),
        ("philadelphia 76ers", "PHI"),
        ("phoenix suns", "PHX"),
        ("portland trail blazers", "POR"),
        ("sacramento kings", "SAC"),
        ("san antonio spurs", "SAS"),
        ("toronto raptors", "TOR"),
        ("utah jazz", "UTA"),
        ("washington wizards", "WAS"),
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamColors {
    pub made: &'static str,
    pub missed: &'static str,
}

static TEAM_PALETTES: Lazy<HashMap<&'static str, TeamColors>> = Lazy::new(|| {
    [
        ("LAL", TeamColors { made: "#FDB927", missed: "#552583" }),
        ("CLE", TeamColors { made: "#FDBB30", missed: "#860038" }),
        ("GSW", TeamColors { made: "#FFC72C", missed: "#1D428A" }),
        ("MIA", TeamColors { made: "#F9A01B", missed: "#98002E" }),
        ("OKC", TeamColors { made: "#EF3B24", missed: "#007AC1" }),
        ("SEA", TeamColors { made: "#FFC200", missed: "#00653A" }),
        ("BKN", TeamColors { made: "#FFFFFF", missed: "#777D84" }),
        ("PHX", TeamColors { made: "#E56020", missed: "#1D1160" }),
        ("HOU", TeamColors { made: "#CE1141", missed: "#C4CED4" }),
        ("PHI", TeamColors { made: "#006BB6", missed: "#ED174C" }),
        ("LAC", TeamColors { made: "#C8102E", missed: "#1D428A" }),
    ]
    .into_iter()
    .collect()
});

pub fn code_for_name(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    TEAM_CODES.get(key.as_str()).copied()
}

pub fn palette_for_team(code: &str) -> Option<TeamColors> {
    TEAM_PALETTES.get(code.trim().to_uppercase().as_str()).copied()
}

pub fn resolve_team_name(name: &str, player: &str) -> String {
    if let Some(code) = code_for_name(name) {
        return code.to_string();
    }
    if let Some(code) = players::default_team(player) {
        return code.to_string();
    }
    slug_code(name)
}

// Already-coded values pass straight through.
pub fn resolve_team_code(value: &str, player: &str) -> String {
    let trimmed = value.trim();
    if looks_like_code(trimmed) {
        return trimmed.to_uppercase();
    }
    resolve_team_name(trimmed, player)
}

fn looks_like_code(value: &str) -> bool {
    (2..=3).contains(&value.len()) && value.chars().all(|c| c.is_ascii_alphabetic())
}

fn slug_code(name: &str) -> String {
    let slug: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    if slug.is_empty() {
        "UNK".to_string()
    } else {
        slug
    }
}
