use crate::shot::Shot;
use crate::zones::{self, Zone};

// Real NBA half-court dimensions in feet. Shot data uses the same space:
// x runs sideline to sideline over [-25, 25], y runs baseline to half-court over [0, 47].
pub const COURT_HALF_WIDTH: f64 = 25.0;
pub const HALF_COURT_LENGTH: f64 = 47.0;
pub const FULL_COURT_LENGTH: f64 = 94.0;
pub const LANE_WIDTH: f64 = 16.0;
pub const LANE_HEIGHT: f64 = 19.0;
pub const HOOP_Y: f64 = 4.75;
pub const HOOP_RADIUS: f64 = 0.75;
pub const RESTRICTED_RADIUS: f64 = 4.0;
pub const FREE_THROW_RADIUS: f64 = 8.0;
pub const THREE_POINT_RADIUS: f64 = 23.75;
pub const CORNER_THREE_X: f64 = 22.0;

pub const COURT_WIDTH_PX: f64 = 900.0;
pub const COURT_HEIGHT_PX: f64 = 550.0;
pub const COURT_PADDING_PX: f64 = 40.0;

const ARC_STEPS: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn length(&self, feet: f64) -> f64 {
        (self.apply(feet) - self.apply(0.0)).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    ScreenDown,
    CartesianUp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl CourtScales {
    pub fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        (self.x.apply(x), self.y.apply(y))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShotMark {
    pub px: f64,
    pub py: f64,
    pub made: bool,
    pub zone: Zone,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct ShotLayer {
    marks: Vec<ShotMark>,
}

impl ShotLayer {
    pub fn marks(&self) -> &[ShotMark] {
        &self.marks
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

#[derive(Debug, Clone)]
pub struct CourtFrame {
    pub scales: CourtScales,
    pub layer: ShotLayer,
    pub width: f64,
    pub height: f64,
}

impl CourtFrame {
    pub fn plot<'a, I, F>(&mut self, shots: I, mut color_for: F)
    where
        I: IntoIterator<Item = &'a Shot>,
        F: FnMut(&Shot) -> String,
    {
        for shot in shots {
            let (px, py) = self.scales.to_px(shot.x, shot.y);
            self.layer.marks.push(ShotMark {
                px,
                py,
                made: shot.made,
                zone: zones::classify(shot),
                color: color_for(shot),
            });
        }
    }
}

pub fn draw_court(width: f64, height: f64, orientation: Orientation) -> CourtFrame {
    let pad = COURT_PADDING_PX.min(width / 4.0).min(height / 4.0);
    let x = LinearScale::new((-COURT_HALF_WIDTH, COURT_HALF_WIDTH), (pad, width - pad));
    let y_range = match orientation {
        Orientation::ScreenDown => (height - pad, pad),
        Orientation::CartesianUp => (pad, height - pad),
    };
    let y = LinearScale::new((0.0, HALF_COURT_LENGTH), y_range);
    CourtFrame {
        scales: CourtScales { x, y },
        layer: ShotLayer::default(),
        width,
        height,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

// Court markings as feet-space segments; arcs are flattened into short chords.
pub fn court_outline() -> Vec<CourtLine> {
    let mut lines = Vec::new();
    let w = COURT_HALF_WIDTH;
    let h = HALF_COURT_LENGTH;

    // Floor boundary.
    lines.push(seg(-w, 0.0, w, 0.0));
    lines.push(seg(-w, 0.0, -w, h));
    lines.push(seg(w, 0.0, w, h));
    lines.push(seg(-w, h, w, h));

    // Lane.
    let lane = LANE_WIDTH / 2.0;
    lines.push(seg(-lane, 0.0, -lane, LANE_HEIGHT));
    lines.push(seg(lane, 0.0, lane, LANE_HEIGHT));
    lines.push(seg(-lane, LANE_HEIGHT, lane, LANE_HEIGHT));

    // Backboard.
    lines.push(seg(-3.0, HOOP_Y - 1.0, 3.0, HOOP_Y - 1.0));

    lines.extend(arc(0.0, HOOP_Y, HOOP_RADIUS, 0.0, 360.0));
    lines.extend(arc(0.0, HOOP_Y, RESTRICTED_RADIUS, 0.0, 180.0));
    lines.extend(arc(0.0, LANE_HEIGHT, FREE_THROW_RADIUS, 0.0, 180.0));

    // Three-point line: straight corners up to where the arc meets x = ±22.
    let corner_y = HOOP_Y
        + (THREE_POINT_RADIUS.powi(2) - CORNER_THREE_X.powi(2))
            .max(0.0)
            .sqrt();
    lines.push(seg(-CORNER_THREE_X, 0.0, -CORNER_THREE_X, corner_y));
    lines.push(seg(CORNER_THREE_X, 0.0, CORNER_THREE_X, corner_y));
    let start = ((corner_y - HOOP_Y) / THREE_POINT_RADIUS).asin().to_degrees();
    lines.extend(arc(0.0, HOOP_Y, THREE_POINT_RADIUS, start, 180.0 - start));

    // Center circle, top half only.
    lines.extend(arc(0.0, h, 6.0, 180.0, 360.0));
    lines
}

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> CourtLine {
    CourtLine { x1, y1, x2, y2 }
}

fn arc(cx: f64, cy: f64, r: f64, start_deg: f64, end_deg: f64) -> Vec<CourtLine> {
    let mut out = Vec::with_capacity(ARC_STEPS);
    let span = end_deg - start_deg;
    let point = |i: usize| {
        let a = (start_deg + span * (i as f64) / (ARC_STEPS as f64)).to_radians();
        (cx + r * a.cos(), cy + r * a.sin())
    };
    for i in 0..ARC_STEPS {
        let (x1, y1) = point(i);
        let (x2, y2) = point(i + 1);
        out.push(seg(x1, y1, x2, y2));
    }
    out
}
