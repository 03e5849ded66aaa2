use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::loader::{LoadOutcome, PlayerLoad};
use crate::season::{SeasonBucket, SeasonIndex};
use crate::summary::SeasonSummary;
use crate::zones::ZoneCounts;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading { player: String },
    Ready,
    NoData { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub player: String,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub enum LoaderCommand {
    Load(LoadRequest),
}

#[derive(Debug, Clone)]
pub enum Delta {
    Loaded { generation: u64, load: PlayerLoad },
    LoadFailed {
        generation: u64,
        player: String,
        error: String,
    },
    Log(String),
}

/// Season playback timer. At most one deadline exists at a time.
#[derive(Debug, Clone)]
pub struct Playback {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Playback {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub files_loaded: usize,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

#[derive(Debug)]
pub struct AppState {
    pub players: Vec<String>,
    pub selected: usize,
    pub current_player: Option<String>,
    pub status: ViewStatus,
    pub load_stats: Option<LoadStats>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    generation: u64,
    seasons: Option<SeasonIndex>,
    displayed: Option<usize>,
    revealed: usize,
    season_cursor: Option<usize>,
    playback: Playback,
}

impl AppState {
    pub fn new(players: Vec<String>, playback_interval: Duration) -> Self {
        Self {
            players,
            selected: 0,
            current_player: None,
            status: ViewStatus::Idle,
            load_stats: None,
            logs: VecDeque::new(),
            help_overlay: false,
            generation: 0,
            seasons: None,
            displayed: None,
            revealed: 0,
            season_cursor: None,
            playback: Playback::new(playback_interval),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.players.get(self.selected).map(String::as_str)
    }

    pub fn select_next(&mut self) {
        if self.players.is_empty() {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1).min(self.players.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn begin_load(&mut self, player: &str) -> LoadRequest {
        self.discard_view();
        self.generation += 1;
        self.current_player = Some(player.to_string());
        self.status = ViewStatus::Loading {
            player: player.to_string(),
        };
        self.push_log(format!("[INFO] Loading shots for {player}"));
        LoadRequest {
            player: player.to_string(),
            generation: self.generation,
        }
    }

    // Clears the view; any load still in flight becomes stale.
    pub fn reset(&mut self) {
        self.discard_view();
        self.generation += 1;
        self.current_player = None;
        self.status = ViewStatus::Idle;
        self.push_log("[INFO] View reset");
    }

    fn discard_view(&mut self) {
        self.playback.stop();
        self.seasons = None;
        self.displayed = None;
        self.revealed = 0;
        self.season_cursor = None;
        self.load_stats = None;
    }

    pub fn seasons(&self) -> Option<&SeasonIndex> {
        self.seasons.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_running()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn displayed_index(&self) -> Option<usize> {
        self.displayed
    }

    pub fn displayed_bucket(&self) -> Option<&Arc<SeasonBucket>> {
        let idx = self.displayed?;
        self.seasons.as_ref()?.buckets().get(idx)
    }

    pub fn displayed_zone_counts(&self) -> Option<ZoneCounts> {
        self.displayed_bucket().map(|b| b.zone_counts())
    }

    pub fn revealed_summaries(&self) -> Vec<SeasonSummary> {
        let Some(index) = self.seasons.as_ref() else {
            return Vec::new();
        };
        index
            .buckets()
            .iter()
            .take(self.revealed)
            .map(|b| SeasonSummary::from_bucket(b))
            .collect()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        let len = match self.seasons.as_ref() {
            Some(index) => index.len(),
            None => {
                self.playback.stop();
                return false;
            }
        };
        if !self.playback.fire(now) {
            return false;
        }
        let next = self.displayed.map(|i| i + 1).unwrap_or(0);
        if next >= len {
            self.playback.stop();
            return false;
        }
        self.show_index(next);
        if next + 1 >= len {
            self.playback.stop();
        }
        true
    }

    pub fn toggle_playback(&mut self, now: Instant) {
        let Some(len) = self.seasons.as_ref().map(SeasonIndex::len) else {
            return;
        };
        if self.playback.is_running() {
            self.playback.stop();
            self.push_log("[INFO] Playback paused");
            return;
        }
        if self.displayed.is_some_and(|i| i + 1 >= len) {
            // Finished: replay from the first season.
            self.revealed = 0;
            self.show_index(0);
        }
        if len > 1 {
            self.playback.start(now);
            self.push_log("[INFO] Playback started");
        }
    }

    pub fn step_forward(&mut self) {
        self.playback.stop();
        let Some(len) = self.seasons.as_ref().map(SeasonIndex::len) else {
            return;
        };
        let next = self.displayed.map(|i| i + 1).unwrap_or(0);
        if next < len {
            self.show_index(next);
        }
    }

    pub fn step_back(&mut self) {
        self.playback.stop();
        if let Some(idx) = self.displayed {
            self.show_index(idx.saturating_sub(1));
        }
    }

    pub fn show_season(&mut self, season: &str) -> Option<Arc<SeasonBucket>> {
        let index = self.seasons.as_ref()?;
        let bucket = Arc::clone(index.get(season)?);
        let pos = index.position(season)?;
        self.playback.stop();
        self.show_index(pos);
        self.season_cursor = Some(pos);
        Some(bucket)
    }

    pub fn season_cursor(&self) -> Option<usize> {
        self.season_cursor
    }

    // The cursor only ranges over season cards that have been revealed.
    pub fn move_season_cursor(&mut self, forward: bool) {
        if self.revealed == 0 {
            self.season_cursor = None;
            return;
        }
        let last = self.revealed - 1;
        let cur = self.season_cursor.unwrap_or(0).min(last);
        self.season_cursor = Some(if forward {
            (cur + 1).min(last)
        } else {
            cur.saturating_sub(1)
        });
    }

    pub fn show_cursor_season(&mut self) -> Option<Arc<SeasonBucket>> {
        let idx = self.season_cursor?;
        let label = self.seasons.as_ref()?.buckets().get(idx)?.season.clone();
        let bucket = self.show_season(&label);
        if let Some(b) = &bucket {
            self.push_log(format!("[INFO] Showing {}", b.season));
        }
        bucket
    }

    fn show_index(&mut self, idx: usize) {
        self.displayed = Some(idx);
        self.revealed = self.revealed.max(idx + 1);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn commit_load(&mut self, load: PlayerLoad, now: Instant) {
        for warning in &load.warnings {
            self.push_log(format!("[WARN] {warning}"));
        }
        self.load_stats = Some(LoadStats {
            files_loaded: load.files_loaded,
            rows_read: load.rows_read,
            rows_dropped: load.rows_dropped,
        });
        match load.outcome {
            LoadOutcome::Shots(shots) => {
                let index = SeasonIndex::build(shots);
                if index.is_empty() {
                    self.status = ViewStatus::NoData {
                        message: "No shot data available".to_string(),
                    };
                    return;
                }
                self.push_log(format!(
                    "[INFO] Loaded {} shots across {} seasons for {}",
                    index.total_shots(),
                    index.len(),
                    load.player
                ));
                let len = index.len();
                self.seasons = Some(index);
                self.status = ViewStatus::Ready;
                self.show_index(0);
                self.season_cursor = Some(0);
                if len > 1 {
                    self.playback.start(now);
                }
            }
            LoadOutcome::NoData(reason) => {
                self.push_log(format!("[INFO] {} ({})", reason.message(), load.player));
                self.status = ViewStatus::NoData {
                    message: reason.message().to_string(),
                };
            }
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    apply_delta_at(state, delta, Instant::now());
}

pub fn apply_delta_at(state: &mut AppState, delta: Delta, now: Instant) {
    match delta {
        Delta::Loaded { generation, load } => {
            if !state.is_current(generation) {
                state.push_log(format!("[INFO] Discarded stale load for {}", load.player));
                return;
            }
            state.commit_load(load, now);
        }
        Delta::LoadFailed {
            generation,
            player,
            error,
        } => {
            if !state.is_current(generation) {
                state.push_log(format!("[INFO] Discarded stale failure for {player}"));
                return;
            }
            state.discard_view();
            state.status = ViewStatus::Failed {
                message: "Unable to load shot data".to_string(),
            };
            state.push_log(format!("[WARN] Load failed for {player}: {error}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
