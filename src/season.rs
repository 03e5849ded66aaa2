use std::collections::HashMap;
use std::sync::Arc;

use crate::shot::Shot;
use crate::zones::{self, ZoneCounts};

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonBucket {
    pub season: String,
    pub shots: Vec<Shot>,
}

impl SeasonBucket {
    pub fn zone_counts(&self) -> ZoneCounts {
        zones::count_zones(&self.shots)
    }

    pub fn made(&self) -> usize {
        self.shots.iter().filter(|s| s.made).count()
    }
}

/// Chronologically ordered buckets plus a label lookup that shares the same allocations.
#[derive(Debug, Clone, Default)]
pub struct SeasonIndex {
    buckets: Vec<Arc<SeasonBucket>>,
    lookup: HashMap<String, Arc<SeasonBucket>>,
}

impl SeasonIndex {
    pub fn build(shots: Vec<Shot>) -> Self {
        let mut order: Vec<SeasonBucket> = Vec::new();
        let mut slot: HashMap<String, usize> = HashMap::new();
        for shot in shots {
            let idx = *slot.entry(shot.season.clone()).or_insert_with(|| {
                order.push(SeasonBucket {
                    season: shot.season.clone(),
                    shots: Vec::new(),
                });
                order.len() - 1
            });
            order[idx].shots.push(shot);
        }

        // Stable sort keeps first-seen order among labels with the same key.
        order.sort_by_key(|bucket| season_sort_key(&bucket.season));

        let buckets: Vec<Arc<SeasonBucket>> = order.into_iter().map(Arc::new).collect();
        let lookup = buckets
            .iter()
            .map(|bucket| (bucket.season.clone(), Arc::clone(bucket)))
            .collect();
        Self { buckets, lookup }
    }

    pub fn buckets(&self) -> &[Arc<SeasonBucket>] {
        &self.buckets
    }

    pub fn get(&self, season: &str) -> Option<&Arc<SeasonBucket>> {
        self.lookup.get(season)
    }

    pub fn position(&self, season: &str) -> Option<usize> {
        self.buckets.iter().position(|b| b.season == season)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_shots(&self) -> usize {
        self.buckets.iter().map(|b| b.shots.len()).sum()
    }
}

pub fn season_start_year(season: &str) -> Option<u32> {
    let head = season.trim().get(..4)?;
    if head.bytes().all(|b| b.is_ascii_digit()) {
        head.parse().ok()
    } else {
        None
    }
}

fn season_sort_key(season: &str) -> (bool, u32) {
    match season_start_year(season) {
        Some(year) => (false, year),
        None => (true, 0),
    }
}
