//! Participant classification and the team-row drop rule

use crate::app::models::{ColumnSchema, Row, RowFlags};
use crate::constants::participant::{BLUE_TEAM, FIRST_PLAYER, LAST_PLAYER, RED_TEAM};

/// What to do with a materialized row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDecision {
    /// Team row with an incomplete draft; excluded from every output
    Drop,
    /// Emit to `all`, plus `players`/`teams` according to the flags
    Emit(RowFlags),
}

/// Parse a participant identifier; blank or non-integer values yield `None`
pub fn parse_participant_id(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse().ok()
}

/// Classification for a participant identifier
pub fn flags_for(participant_id: Option<i64>) -> RowFlags {
    match participant_id {
        Some(id) => RowFlags {
            is_player: (FIRST_PLAYER..=LAST_PLAYER).contains(&id),
            is_team: id == BLUE_TEAM || id == RED_TEAM,
        },
        None => RowFlags::default(),
    }
}

/// Classify a row by its participant identifier
pub fn classify(row: &Row, schema: &ColumnSchema) -> RowFlags {
    flags_for(parse_participant_id(row.get(schema.participant_position())))
}

/// True if any pick column is empty or blank
pub fn has_missing_pick(row: &Row, schema: &ColumnSchema) -> bool {
    schema
        .pick_positions()
        .iter()
        .any(|&position| row.get(position).trim().is_empty())
}

/// Classify a row and apply the drop rule
pub fn decide(row: &Row, schema: &ColumnSchema) -> RowDecision {
    let flags = classify(row, schema);
    if flags.is_team && has_missing_pick(row, schema) {
        RowDecision::Drop
    } else {
        RowDecision::Emit(flags)
    }
}
