use serde::Serialize;

use crate::court::HOOP_Y;
use crate::shot::Shot;

pub const RIM_THRESHOLD_FT: f64 = 8.0;
pub const THREE_THRESHOLD_FT: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Rim,
    Mid,
    Three,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Rim, Zone::Mid, Zone::Three];

    pub fn key(self) -> &'static str {
        match self {
            Zone::Rim => "rim",
            Zone::Mid => "mid",
            Zone::Three => "three",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::Rim => "Layup / At Rim",
            Zone::Mid => "Jumper / Midrange",
            Zone::Three => "3PT Attempts",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Zone::Rim => "#ffb347",
            Zone::Mid => "#7ed0ff",
            Zone::Three => "#60f2c3",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneCounts {
    pub rim: usize,
    pub mid: usize,
    pub three: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneShare {
    pub zone: Zone,
    pub count: usize,
    pub percent: f64,
}

impl ZoneCounts {
    pub fn total(&self) -> usize {
        self.rim + self.mid + self.three
    }

    pub fn get(&self, zone: Zone) -> usize {
        match zone {
            Zone::Rim => self.rim,
            Zone::Mid => self.mid,
            Zone::Three => self.three,
        }
    }

    fn bump(&mut self, zone: Zone) {
        match zone {
            Zone::Rim => self.rim += 1,
            Zone::Mid => self.mid += 1,
            Zone::Three => self.three += 1,
        }
    }

    pub fn shares(&self) -> [ZoneShare; 3] {
        let total = self.total().max(1) as f64;
        Zone::ALL.map(|zone| {
            let count = self.get(zone);
            ZoneShare {
                zone,
                count,
                percent: count as f64 / total * 100.0,
            }
        })
    }
}

pub fn distance_from_hoop(shot: &Shot) -> f64 {
    distance_from_hoop_xy(shot.x, shot.y)
}

pub fn distance_from_hoop_xy(x: f64, y: f64) -> f64 {
    x.hypot(y - HOOP_Y)
}

pub fn classify(shot: &Shot) -> Zone {
    classify_distance(distance_from_hoop(shot))
}

pub fn classify_distance(distance: f64) -> Zone {
    if distance <= RIM_THRESHOLD_FT {
        Zone::Rim
    } else if distance >= THREE_THRESHOLD_FT {
        Zone::Three
    } else {
        Zone::Mid
    }
}

pub fn count_zones<'a>(shots: impl IntoIterator<Item = &'a Shot>) -> ZoneCounts {
    let mut counts = ZoneCounts::default();
    for shot in shots {
        counts.bump(classify(shot));
    }
    counts
}
