//! Tests for participant classification and the drop rule

use super::row_with;
use crate::app::models::{ColumnSchema, RowFlags};
use crate::app::services::pipeline::classifier::{
    RowDecision, classify, decide, flags_for, has_missing_pick, parse_participant_id,
};

const FULL_PICKS: [&str; 5] = ["Ahri", "Jinx", "Thresh", "Lee Sin", "Gnar"];

#[test]
fn test_player_ids() {
    for id in 1..=10 {
        let flags = flags_for(Some(id));
        assert!(flags.is_player, "id {} should be a player", id);
        assert!(!flags.is_team);
    }
}

#[test]
fn test_team_ids() {
    for id in [100, 200] {
        let flags = flags_for(Some(id));
        assert!(flags.is_team);
        assert!(!flags.is_player);
    }
}

#[test]
fn test_other_ids_are_neither() {
    for id in [0, 11, 99, 101, 150, 199, 201, -1, 1000] {
        assert!(flags_for(Some(id)).is_neither(), "id {} should be neither", id);
    }
    assert!(flags_for(None).is_neither());
}

#[test]
fn test_player_and_team_never_both_set() {
    for id in -5..=300 {
        let flags = flags_for(Some(id));
        assert!(!(flags.is_player && flags.is_team), "id {} is both", id);
    }
}

#[test]
fn test_parse_participant_id() {
    assert_eq!(parse_participant_id("7"), Some(7));
    assert_eq!(parse_participant_id(" 200 "), Some(200));
    assert_eq!(parse_participant_id("+3"), Some(3));
    assert_eq!(parse_participant_id(""), None);
    assert_eq!(parse_participant_id("   "), None);
    assert_eq!(parse_participant_id("team"), None);
    assert_eq!(parse_participant_id("1.0"), None);
}

#[test]
fn test_classify_reads_participant_column() {
    let schema = ColumnSchema::standard();

    assert_eq!(
        classify(&row_with("4", FULL_PICKS), &schema),
        RowFlags {
            is_player: true,
            is_team: false
        }
    );
    assert_eq!(
        classify(&row_with("100", FULL_PICKS), &schema),
        RowFlags {
            is_player: false,
            is_team: true
        }
    );
    assert!(classify(&row_with("abc", FULL_PICKS), &schema).is_neither());
}

#[test]
fn test_missing_pick_detection() {
    let schema = ColumnSchema::standard();

    assert!(!has_missing_pick(&row_with("100", FULL_PICKS), &schema));
    for slot in 0..5 {
        let mut picks = FULL_PICKS;
        picks[slot] = "  ";
        assert!(has_missing_pick(&row_with("100", picks), &schema));
    }
}

#[test]
fn test_team_row_with_missing_pick_is_dropped() {
    let schema = ColumnSchema::standard();

    let row = row_with("200", ["Ahri", "", "Thresh", "Lee Sin", "Gnar"]);
    assert_eq!(decide(&row, &schema), RowDecision::Drop);
}

#[test]
fn test_non_team_rows_are_never_dropped_for_picks() {
    let schema = ColumnSchema::standard();

    for participant in ["1", "10", "", "x", "300"] {
        let row = row_with(participant, ["", "", "", "", ""]);
        assert!(
            matches!(decide(&row, &schema), RowDecision::Emit(_)),
            "participant '{}' should not be dropped",
            participant
        );
    }
}

#[test]
fn test_complete_team_row_is_emitted() {
    let schema = ColumnSchema::standard();

    let decision = decide(&row_with("100", FULL_PICKS), &schema);
    assert_eq!(
        decision,
        RowDecision::Emit(RowFlags {
            is_player: false,
            is_team: true
        })
    );
}
