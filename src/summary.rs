use serde::Serialize;

use crate::players;
use crate::season::{SeasonBucket, SeasonIndex};
use crate::zones::ZoneCounts;

pub const MVP_MARK: &str = "👑";
pub const CHAMPION_MARK: &str = "🏆";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub season: String,
    pub team: String,
    pub made: usize,
    pub missed: usize,
    pub total: usize,
    pub fg_pct: u32,
    pub playoff_shots: usize,
    pub highlights: usize,
    pub mvp: bool,
    pub champion: bool,
    pub zones: ZoneCounts,
}

impl SeasonSummary {
    pub fn from_bucket(bucket: &SeasonBucket) -> Self {
        let total = bucket.shots.len();
        let made = bucket.made();
        let fg_pct = if total == 0 {
            0
        } else {
            ((made as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            season: bucket.season.clone(),
            team: bucket
                .shots
                .first()
                .map(|s| s.team.clone())
                .unwrap_or_default(),
            made,
            missed: total - made,
            total,
            fg_pct,
            playoff_shots: bucket.shots.iter().filter(|s| s.playoffs).count(),
            highlights: bucket.shots.iter().filter(|s| s.has_highlight).count(),
            mvp: bucket.shots.iter().any(|s| s.mvp),
            champion: bucket.shots.iter().any(|s| s.champion),
            zones: bucket.zone_counts(),
        }
    }

    pub fn trophies(&self) -> String {
        [
            if self.mvp { MVP_MARK } else { "" },
            if self.champion { CHAMPION_MARK } else { "" },
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub player: String,
    pub name: String,
    pub generated_at: String,
    pub total_shots: usize,
    pub total_made: usize,
    pub career_zones: ZoneCounts,
    pub seasons: Vec<SeasonSummary>,
}

pub fn build_report(player: &str, index: &SeasonIndex) -> PlayerReport {
    let seasons: Vec<SeasonSummary> = index
        .buckets()
        .iter()
        .map(|b| SeasonSummary::from_bucket(b))
        .collect();
    let mut career = ZoneCounts::default();
    for s in &seasons {
        career.rim += s.zones.rim;
        career.mid += s.zones.mid;
        career.three += s.zones.three;
    }
    PlayerReport {
        player: player.to_string(),
        name: players::display_name(player),
        generated_at: chrono::Utc::now().to_rfc3339(),
        total_shots: seasons.iter().map(|s| s.total).sum(),
        total_made: seasons.iter().map(|s| s.made).sum(),
        career_zones: career,
        seasons,
    }
}
