//! Per-file and run-wide row counters
//!
//! Counters are observational only. They must stay internally consistent:
//! every emitted row is counted in `all_rows`, and `all_rows` equals
//! players + teams + rows classified as neither.

use crate::app::models::RowFlags;
use serde::Serialize;
use std::path::PathBuf;

/// Row counts for one input file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub file: PathBuf,
    pub all_rows: u64,
    pub player_rows: u64,
    pub team_rows: u64,
    pub dropped_team_rows: u64,
    pub neither_rows: u64,
}

impl FileStats {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    /// Record an emitted row
    pub fn record_emitted(&mut self, flags: RowFlags) {
        self.all_rows += 1;
        if flags.is_player {
            self.player_rows += 1;
        }
        if flags.is_team {
            self.team_rows += 1;
        }
        if flags.is_neither() {
            self.neither_rows += 1;
        }
    }

    /// Record a dropped team row
    pub fn record_dropped(&mut self) {
        self.dropped_team_rows += 1;
    }

    /// Rows read from the file, emitted or dropped
    pub fn rows_read(&self) -> u64 {
        self.all_rows + self.dropped_team_rows
    }

    pub fn is_consistent(&self) -> bool {
        self.all_rows == self.player_rows + self.team_rows + self.neither_rows
    }

    /// Single-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "all={}, players={}, teams={}, droppedTeamRows={}",
            self.all_rows, self.player_rows, self.team_rows, self.dropped_team_rows
        )
    }
}

/// Aggregate row counts for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub files_processed: usize,
    pub all_rows: u64,
    pub player_rows: u64,
    pub team_rows: u64,
    pub dropped_team_rows: u64,
    pub neither_rows: u64,
    pub files: Vec<FileStats>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's counts into the run totals
    pub fn add_file(&mut self, file: FileStats) {
        self.files_processed += 1;
        self.all_rows += file.all_rows;
        self.player_rows += file.player_rows;
        self.team_rows += file.team_rows;
        self.dropped_team_rows += file.dropped_team_rows;
        self.neither_rows += file.neither_rows;
        self.files.push(file);
    }

    pub fn is_consistent(&self) -> bool {
        self.all_rows == self.player_rows + self.team_rows + self.neither_rows
            && self.files.iter().all(FileStats::is_consistent)
    }

    /// Single-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "all={}, players={}, teams={}, droppedTeamRows={}",
            self.all_rows, self.player_rows, self.team_rows, self.dropped_team_rows
        )
    }
}
