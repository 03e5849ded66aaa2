use std::time::{Duration, Instant};

use shotchart_terminal::loader::{LoadOutcome, NoDataReason, PlayerLoad};
use shotchart_terminal::shot::Shot;
use shotchart_terminal::state::{AppState, Delta, ViewStatus, apply_delta_at};

const INTERVAL: Duration = Duration::from_millis(500);

fn shot(season: &str, player: &str) -> Shot {
    Shot {
        player: player.to_string(),
        season: season.to_string(),
        team: "TST".to_string(),
        x: 0.0,
        y: 10.0,
        made: true,
        playoffs: false,
        mvp: false,
        champion: false,
        highlight_desc: None,
        highlight_media: None,
        has_highlight: false,
        action_type: None,
        shot_zone_basic: None,
        shot_type: None,
        listed_distance: None,
    }
}

fn loaded(player: &str, seasons: &[&str]) -> PlayerLoad {
    PlayerLoad {
        player: player.to_string(),
        outcome: LoadOutcome::Shots(seasons.iter().map(|s| shot(s, player)).collect()),
        files_loaded: 1,
        rows_read: seasons.len(),
        rows_dropped: 0,
        warnings: Vec::new(),
    }
}

fn state() -> AppState {
    AppState::new(vec!["a".to_string(), "b".to_string()], INTERVAL)
}

#[test]
fn stale_load_is_discarded() {
    let mut state = state();
    let now = Instant::now();
    let first = state.begin_load("a");
    let second = state.begin_load("b");

    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: first.generation,
            load: loaded("a", &["2001-02"]),
        },
        now,
    );
    assert_eq!(state.status, ViewStatus::Loading { player: "b".to_string() });
    assert!(state.seasons().is_none());

    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: second.generation,
            load: loaded("b", &["2015-16", "2016-17"]),
        },
        now,
    );
    assert_eq!(state.status, ViewStatus::Ready);
    let bucket = state.displayed_bucket().unwrap();
    assert!(bucket.shots.iter().all(|s| s.player == "b"));
}

#[test]
fn stale_load_arriving_last_does_not_mix_in() {
    let mut state = state();
    let now = Instant::now();
    let first = state.begin_load("a");
    let second = state.begin_load("b");

    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: second.generation,
            load: loaded("b", &["2015-16"]),
        },
        now,
    );
    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: first.generation,
            load: loaded("a", &["2001-02"]),
        },
        now,
    );
    let index = state.seasons().unwrap();
    assert_eq!(index.len(), 1);
    assert!(index.get("2001-02").is_none());
    assert_eq!(state.current_player.as_deref(), Some("b"));
}

#[test]
fn new_load_clears_previous_view_and_timer() {
    let mut state = state();
    let now = Instant::now();
    let req = state.begin_load("a");
    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: req.generation,
            load: loaded("a", &["2001-02", "2002-03", "2003-04"]),
        },
        now,
    );
    assert!(state.is_playing());

    state.begin_load("b");
    assert!(!state.is_playing());
    assert!(state.seasons().is_none());
    assert!(state.displayed_bucket().is_none());
    assert!(state.revealed_summaries().is_empty());
    assert!(!state.tick(now + INTERVAL * 10));
}

#[test]
fn playback_advances_one_season_per_tick_and_stops_at_end() {
    let mut state = state();
    let start = Instant::now();
    let req = state.begin_load("a");
    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: req.generation,
            load: loaded("a", &["2003-04", "2001-02", "2002-03"]),
        },
        start,
    );
    assert_eq!(state.displayed_bucket().unwrap().season, "2001-02");
    assert_eq!(state.revealed(), 1);

    // Not due yet.
    assert!(!state.tick(start + INTERVAL / 2));

    let t1 = start + INTERVAL;
    assert!(state.tick(t1));
    assert_eq!(state.displayed_bucket().unwrap().season, "2002-03");
    // A second tick at the same instant is not due.
    assert!(!state.tick(t1));

    let t2 = t1 + INTERVAL;
    assert!(state.tick(t2));
    assert_eq!(state.displayed_bucket().unwrap().season, "2003-04");
    assert_eq!(state.revealed(), 3);
    assert!(!state.is_playing());
    assert!(!state.tick(t2 + INTERVAL * 5));
}

#[test]
fn show_season_uses_lookup_and_pauses() {
    let mut state = state();
    let now = Instant::now();
    let req = state.begin_load("a");
    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: req.generation,
            load: loaded("a", &["2001-02", "2002-03", "2003-04"]),
        },
        now,
    );
    let bucket = state.show_season("2003-04").unwrap();
    assert_eq!(bucket.season, "2003-04");
    assert!(!state.is_playing());
    assert_eq!(state.displayed_index(), Some(2));
    assert!(state.show_season("1990-91").is_none());
}

#[test]
fn no_data_and_failure_are_distinct() {
    let mut state = state();
    let req = state.begin_load("a");
    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: req.generation,
            load: PlayerLoad {
                player: "a".to_string(),
                outcome: LoadOutcome::NoData(NoDataReason::NoManifest),
                files_loaded: 0,
                rows_read: 0,
                rows_dropped: 0,
                warnings: Vec::new(),
            },
        },
        Instant::now(),
    );
    assert!(matches!(state.status, ViewStatus::NoData { .. }));

    let req = state.begin_load("b");
    apply_delta_at(
        &mut state,
        Delta::LoadFailed {
            generation: req.generation,
            player: "b".to_string(),
            error: "boom".to_string(),
        },
        Instant::now(),
    );
    assert_eq!(
        state.status,
        ViewStatus::Failed {
            message: "Unable to load shot data".to_string()
        }
    );
    assert!(state.seasons().is_none());
    assert!(state.logs.iter().any(|l| l.contains("boom")));
}

#[test]
fn reset_invalidates_in_flight_load() {
    let mut state = state();
    let req = state.begin_load("a");
    state.reset();
    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: req.generation,
            load: loaded("a", &["2001-02"]),
        },
        Instant::now(),
    );
    assert_eq!(state.status, ViewStatus::Idle);
    assert!(state.seasons().is_none());
}

#[test]
fn toggle_replays_after_finish() {
    let mut state = state();
    let start = Instant::now();
    let req = state.begin_load("a");
    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: req.generation,
            load: loaded("a", &["2001-02", "2002-03"]),
        },
        start,
    );
    assert!(state.tick(start + INTERVAL));
    assert!(!state.is_playing());

    let later = start + INTERVAL * 3;
    state.toggle_playback(later);
    assert!(state.is_playing());
    assert_eq!(state.displayed_index(), Some(0));
    assert_eq!(state.revealed(), 1);
}

#[test]
fn season_cursor_reaches_lookup_over_revealed_cards() {
    let mut state = state();
    let start = Instant::now();
    let req = state.begin_load("a");
    apply_delta_at(
        &mut state,
        Delta::Loaded {
            generation: req.generation,
            load: loaded("a", &["2001-02", "2002-03", "2003-04"]),
        },
        start,
    );
    assert_eq!(state.season_cursor(), Some(0));
    // Only one card is revealed so far.
    state.move_season_cursor(true);
    assert_eq!(state.season_cursor(), Some(0));

    assert!(state.tick(start + INTERVAL));
    assert!(state.tick(start + INTERVAL * 2));
    state.move_season_cursor(true);
    state.move_season_cursor(true);
    state.move_season_cursor(true);
    assert_eq!(state.season_cursor(), Some(2));
    state.move_season_cursor(false);

    let shown = state.show_cursor_season().unwrap();
    assert_eq!(shown.season, "2002-03");
    assert!(std::sync::Arc::ptr_eq(
        &shown,
        state.seasons().unwrap().get("2002-03").unwrap()
    ));
    assert_eq!(state.displayed_index(), Some(1));
    assert!(!state.is_playing());

    state.begin_load("b");
    assert_eq!(state.season_cursor(), None);
    assert!(state.show_cursor_season().is_none());
}
