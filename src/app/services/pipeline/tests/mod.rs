//! Tests for the classification and routing pipeline
//!
//! Shared fixtures build match-data CSV text in the standard column order.

pub mod classifier_tests;

use crate::app::models::Row;
use crate::constants::OUTPUT_COLUMNS;

/// Standard header line
pub fn header() -> String {
    OUTPUT_COLUMNS.join(",")
}

/// CSV line for a team row; `missing_pick` blanks that pick slot (1-5)
pub fn team_line(gameid: &str, participant: &str, missing_pick: Option<usize>) -> String {
    let picks: Vec<String> = (1..=5)
        .map(|i| {
            if Some(i) == missing_pick {
                String::new()
            } else {
                format!("PICK{}", i)
            }
        })
        .collect();

    let mut fields = vec![
        gameid.to_string(),
        "LCS".to_string(),
        "Spring".to_string(),
        "2025".to_string(),
        "2025-01-01 10:00:00".to_string(),
        "1".to_string(),
        "13.1".to_string(),
        participant.to_string(),
        "Blue".to_string(),
        "10".to_string(),
    ];
    fields.extend((1..=5).map(|i| format!("BAN{}", i)));
    fields.extend(picks);
    fields.join(",")
}

/// CSV line for a player row with empty ban and pick slots
pub fn player_line(gameid: &str, participant: &str) -> String {
    let mut fields = vec![
        gameid.to_string(),
        "LCS".to_string(),
        "Spring".to_string(),
        "2025".to_string(),
        "2025-01-01 10:00:00".to_string(),
        "1".to_string(),
        "13.1".to_string(),
        participant.to_string(),
        "Blue".to_string(),
        "10".to_string(),
    ];
    fields.extend(std::iter::repeat_n(String::new(), 10));
    fields.join(",")
}

/// Join a header and data lines into file content
pub fn csv_content(lines: &[String]) -> String {
    let mut content = header();
    for line in lines {
        content.push('\n');
        content.push_str(line);
    }
    content.push('\n');
    content
}

/// Row in schema order built from explicit values
pub fn row_with(participant: &str, picks: [&str; 5]) -> Row {
    let mut values: Vec<String> = vec![String::new(); OUTPUT_COLUMNS.len()];
    values[7] = participant.to_string();
    for (i, pick) in picks.iter().enumerate() {
        values[15 + i] = pick.to_string();
    }
    Row::new(values)
}
