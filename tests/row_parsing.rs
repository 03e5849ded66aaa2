use std::fs;
use std::path::PathBuf;

use shotchart_terminal::loader::read_records;
use shotchart_terminal::shot::{
    RawRecord, RowSchema, mirror_into_offensive_half, normalize_season, parse_row, parse_rows,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn record(pairs: &[(&str, &str)]) -> RawRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn legacy_row_in_far_half_is_mirrored() {
    let row = record(&[("X", "0"), ("Y", "50"), ("SHOT_MADE", "1")]);
    let shot = parse_row(&row, "nobody").expect("row should parse");
    assert_eq!(shot.x, 0.0);
    assert_eq!(shot.y, 44.0);
    assert!(shot.made);
}

#[test]
fn mirroring_flips_x_and_folds_y() {
    for (x, y) in [(3.0, 47.5), (-20.0, 60.0), (12.25, 94.0), (0.5, 80.0)] {
        let (mx, my) = mirror_into_offensive_half(x, y).unwrap();
        assert_eq!(mx, -x);
        assert_eq!(my, 94.0 - y);
        assert!((0.0..=47.0).contains(&my));
    }
    assert_eq!(mirror_into_offensive_half(4.0, 47.0), Some((4.0, 47.0)));
    assert_eq!(mirror_into_offensive_half(4.0, 0.0), Some((4.0, 0.0)));
}

#[test]
fn off_court_y_drops_the_row() {
    assert_eq!(mirror_into_offensive_half(0.0, 94.5), None);
    assert_eq!(mirror_into_offensive_half(0.0, -0.5), None);
    assert!(parse_row(&record(&[("X", "1"), ("Y", "120")]), "nobody").is_none());
    assert!(parse_row(&record(&[("loc_x", "1"), ("loc_y", "-3")]), "nobody").is_none());
}

#[test]
fn mirroring_is_the_same_for_both_schemas() {
    let legacy = record(&[("X", "-7"), ("Y", "70"), ("SHOT_MADE", "0")]);
    let modern = record(&[("loc_x", "-7"), ("loc_y", "70"), ("shot_made_flag", "Missed")]);
    let a = parse_row(&legacy, "nobody").unwrap();
    let b = parse_row(&modern, "nobody").unwrap();
    assert_eq!((a.x, a.y), (7.0, 24.0));
    assert_eq!((a.x, a.y), (b.x, b.y));
}

#[test]
fn schema_detection_uses_literal_x_or_y() {
    assert_eq!(RowSchema::detect(&record(&[("Y", "1")])), RowSchema::Legacy);
    assert_eq!(RowSchema::detect(&record(&[("X", "1")])), RowSchema::Legacy);
    assert_eq!(
        RowSchema::detect(&record(&[("x", "1"), ("loc_y", "2")])),
        RowSchema::Modern
    );
}

#[test]
fn unattempted_modern_row_is_dropped() {
    let row = record(&[
        ("loc_x", "1"),
        ("loc_y", "5"),
        ("shot_made_flag", "Made"),
        ("shot_attempted_flag", "0"),
    ]);
    assert!(parse_row(&row, "stephen_curry").is_none());
}

#[test]
fn non_finite_coordinates_drop_the_row() {
    assert!(parse_row(&record(&[("X", "abc"), ("Y", "3")]), "nobody").is_none());
    assert!(parse_row(&record(&[("X", "1"), ("Y", "inf")]), "nobody").is_none());
    assert!(parse_row(&record(&[("loc_x", "1")]), "nobody").is_none());
}

#[test]
fn legacy_made_accepts_number_or_word() {
    let made_word = record(&[("X", "0"), ("Y", "1"), ("SHOT_MADE", "MADE")]);
    let missed_num = record(&[("X", "0"), ("Y", "1"), ("SHOT_MADE", "0")]);
    let missed_word = record(&[("X", "0"), ("Y", "1"), ("SHOT_MADE", "missed")]);
    assert!(parse_row(&made_word, "nobody").unwrap().made);
    assert!(!parse_row(&missed_num, "nobody").unwrap().made);
    assert!(!parse_row(&missed_word, "nobody").unwrap().made);
}

#[test]
fn modern_made_accepts_flag_or_numeric() {
    let by_flag = record(&[("loc_x", "0"), ("loc_y", "1"), ("shot_made_flag", "made")]);
    let by_numeric = record(&[
        ("loc_x", "0"),
        ("loc_y", "1"),
        ("shot_made_flag", "Missed"),
        ("shot_made_numeric", "1"),
    ]);
    let missed = record(&[
        ("loc_x", "0"),
        ("loc_y", "1"),
        ("shot_made_flag", "Missed"),
        ("shot_made_numeric", "0"),
    ]);
    assert!(parse_row(&by_flag, "nobody").unwrap().made);
    assert!(parse_row(&by_numeric, "nobody").unwrap().made);
    assert!(!parse_row(&missed, "nobody").unwrap().made);
}

#[test]
fn modern_team_name_resolution_falls_back() {
    let known = record(&[("loc_x", "0"), ("loc_y", "1"), ("team_name", " miami heat ")]);
    let unknown = record(&[("loc_x", "0"), ("loc_y", "1"), ("team_name", "Davidson Wildcats")]);
    assert_eq!(parse_row(&known, "nobody").unwrap().team, "MIA");
    assert_eq!(parse_row(&unknown, "stephen_curry").unwrap().team, "GSW");
    assert_eq!(parse_row(&unknown, "nobody").unwrap().team, "DAV");
}

#[test]
fn modern_team_code_passes_through() {
    let row = record(&[
        ("loc_x", "0"),
        ("loc_y", "12"),
        ("team_name", "OKC"),
        ("season", "2013-14"),
    ]);
    let shot = parse_row(&row, "kevin_durant").unwrap();
    assert_eq!(shot.team, "OKC");

    let lower = record(&[("loc_x", "0"), ("loc_y", "12"), ("team_name", "gsw")]);
    assert_eq!(parse_row(&lower, "kevin_durant").unwrap().team, "GSW");
}

#[test]
fn season_labels_are_normalized() {
    assert_eq!(normalize_season("2015"), "2015-16");
    assert_eq!(normalize_season("2015-16"), "2015-16");
    assert_eq!(normalize_season("2015-2016"), "2015-16");
    assert_eq!(normalize_season(" 2009 "), "2009-10");
    assert_eq!(normalize_season("abc"), "abc");
}

#[test]
fn season_normalization_is_idempotent() {
    for raw in ["2015", "2015-16", "2015-2016", "1999", "1999-2000", "abc", "", "20-21"] {
        let once = normalize_season(raw);
        assert_eq!(normalize_season(&once), once, "input {raw:?}");
    }
}

#[test]
fn highlight_fields_accept_header_variants() {
    let row = record(&[
        ("X", "1"),
        ("Y", "2"),
        ("highlight_desc", ""),
        ("Highlight Desc", "Poster dunk"),
        ("video_url", "https://example.com/v.mp4"),
    ]);
    let shot = parse_row(&row, "nobody").unwrap();
    assert_eq!(shot.highlight_desc.as_deref(), Some("Poster dunk"));
    assert_eq!(shot.highlight_media.as_deref(), Some("https://example.com/v.mp4"));
    assert!(shot.has_highlight);

    let plain = parse_row(&record(&[("X", "1"), ("Y", "2")]), "nobody").unwrap();
    assert!(!plain.has_highlight);
    assert!(plain.highlight_desc.is_none());
}

#[test]
fn achievements_overlay_by_season() {
    let row = record(&[("X", "1"), ("Y", "2"), ("SEASON", "2012-13"), ("MVP", "0")]);
    let shot = parse_row(&row, "lebron_james").unwrap();
    assert!(shot.mvp);
    assert!(shot.champion);

    let other = record(&[("X", "1"), ("Y", "2"), ("SEASON", "2004-05")]);
    let shot = parse_row(&other, "lebron_james").unwrap();
    assert!(!shot.mvp);
    assert!(!shot.champion);

    let explicit = record(&[("X", "1"), ("Y", "2"), ("SEASON", "2004-05"), ("MVP", "1")]);
    assert!(parse_row(&explicit, "lebron_james").unwrap().mvp);
}

#[test]
fn legacy_fixture_parses() {
    let records = read_fixture_records("legacy_shots.csv");
    assert_eq!(records.len(), 6);
    let shots = parse_rows(&records, "lebron_james");
    assert_eq!(shots.len(), 5);

    assert_eq!(shots[0].season, "2015-16");
    assert_eq!(shots[0].team, "CLE");
    assert!(shots[0].champion);
    assert_eq!(shots[0].y, 44.0);

    assert!(shots[1].playoffs);
    assert!(shots[1].has_highlight);
    assert_eq!(shots[1].highlight_desc.as_deref(), Some("Game 7 block follow-up"));

    assert_eq!(shots[2].season, "2015-16");
    assert!(shots[2].made);

    assert_eq!(shots[3].team, "CLE");
    assert!(shots[3].mvp);
    assert_eq!(shots[4].season, "abc");
}

#[test]
fn modern_fixture_parses() {
    let records = read_fixture_records("modern_shots.csv");
    let shots = parse_rows(&records, "stephen_curry");
    assert_eq!(shots.len(), 3);

    assert_eq!(shots[0].team, "GSW");
    assert!(shots[0].made);
    assert!(shots[0].mvp);
    assert_eq!(shots[0].listed_distance, Some(24.0));
    assert_eq!(shots[0].action_type.as_deref(), Some("Pull-Up Jump Shot"));

    assert_eq!(shots[1].season, "2015-16");
    assert_eq!((shots[1].x, shots[1].y), (3.0, 3.75));
    assert!(!shots[1].made);

    assert_eq!(shots[2].season, "2016-17");
    assert!(shots[2].made);
    assert!(shots[2].champion);
}

fn read_fixture_records(name: &str) -> Vec<RawRecord> {
    read_records(&read_fixture(name)).expect("fixture should parse")
}
