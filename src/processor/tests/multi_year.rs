//! Runs spanning several yearly exports

use super::{Workspace, read_lines};
use crate::app::services::pipeline::tests::{player_line, team_line};
use crate::processor::ProcessorJob;
use std::fs;

fn first_fields(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .skip(1)
        .map(|line| line.split(',').next().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_two_years_concatenate_in_order() {
    let workspace = Workspace::new();
    workspace.write_year(
        2024,
        &[team_line("g2024", "100", None), player_line("p2024", "3")],
    );
    workspace.write_year(
        2025,
        &[team_line("g2025", "200", None), player_line("p2025", "8")],
    );

    let summary = ProcessorJob::new(workspace.config(&[2024, 2025]))
        .run()
        .unwrap();

    let teams = read_lines(&summary.outputs.teams);
    assert_eq!(first_fields(&teams), vec!["g2024", "g2025"]);

    let players = read_lines(&summary.outputs.players);
    assert_eq!(first_fields(&players), vec!["p2024", "p2025"]);

    let all = read_lines(&summary.outputs.all);
    assert_eq!(first_fields(&all), vec!["g2024", "p2024", "g2025", "p2025"]);
    assert_eq!(summary.stats.files_processed, 2);
}

#[test]
fn test_explicit_years_keep_configured_order() {
    let workspace = Workspace::new();
    workspace.write_year(2024, &[player_line("early", "1")]);
    workspace.write_year(2025, &[player_line("late", "1")]);

    let summary = ProcessorJob::new(workspace.config(&[2025, 2024]))
        .run()
        .unwrap();

    let players = read_lines(&summary.outputs.players);
    assert_eq!(first_fields(&players), vec!["late", "early"]);
}

#[test]
fn test_scan_mode_sorts_by_year_and_ignores_other_files() {
    let workspace = Workspace::new();
    workspace.write_year(2025, &[player_line("y2025", "1")]);
    workspace.write_year(2019, &[player_line("y2019", "1")]);
    workspace.write_year(2022, &[player_line("y2022", "1")]);
    fs::write(workspace.input_dir.join("notes.csv"), "gameid\n1\n").unwrap();
    fs::write(
        workspace
            .input_dir
            .join("20255_LoL_esports_match_data_from_OraclesElixir.csv"),
        "garbage",
    )
    .unwrap();

    let summary = ProcessorJob::new(workspace.config(&[])).run().unwrap();

    let players = read_lines(&summary.outputs.players);
    assert_eq!(first_fields(&players), vec!["y2019", "y2022", "y2025"]);
    assert_eq!(summary.stats.files_processed, 3);
}

#[test]
fn test_files_may_order_columns_differently() {
    let workspace = Workspace::new();
    workspace.write_year(2024, &[player_line("standard", "2")]);

    let mut columns: Vec<&str> = crate::constants::OUTPUT_COLUMNS.to_vec();
    columns.swap(0, 7);
    columns.push("kills");
    let mut values: Vec<String> = columns
        .iter()
        .map(|c| match *c {
            "gameid" => "shuffled".to_string(),
            "participantid" => "9".to_string(),
            _ => String::new(),
        })
        .collect();
    values[20] = "4".to_string();
    fs::write(
        workspace
            .input_dir
            .join(crate::constants::input_file_name(2025)),
        format!("{}\n{}\n", columns.join(","), values.join(",")),
    )
    .unwrap();

    let summary = ProcessorJob::new(workspace.config(&[2024, 2025]))
        .run()
        .unwrap();

    let players = read_lines(&summary.outputs.players);
    assert_eq!(first_fields(&players), vec!["standard", "shuffled"]);
    assert!(players[2].starts_with("shuffled,,,,,,,9,"));
}
