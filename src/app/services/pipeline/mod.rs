//! Row classifier and processing pipeline
//!
//! Streams every input file once, in the given order, and routes each
//! materialized row to the `all`, `players` and `teams` outputs.
//!
//! ## Architecture
//!
//! - [`reader`] - header validation and the lazy per-file row sequence
//! - [`classifier`] - participant classification and the team drop rule
//! - [`stats`] - per-file and run-wide counters
//!
//! Output is pushed into a [`RowSink`]. The publisher implements it for
//! real runs; tests use an in-memory sink.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use prodata_processor::{ColumnSchema, InputFile, Pipeline};
//! use prodata_processor::app::services::pipeline::MemorySink;
//!
//! # fn example() -> prodata_processor::Result<()> {
//! let schema = ColumnSchema::standard();
//! let pipeline = Pipeline::new(&schema);
//! let mut sink = MemorySink::default();
//! let inputs = vec![InputFile::new(2025, "2025_LoL_esports_match_data_from_OraclesElixir.csv")];
//!
//! let stats = pipeline.process_files(&inputs, &mut sink, |_| {})?;
//! println!("{} rows, {} dropped", stats.all_rows, stats.dropped_team_rows);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod reader;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use classifier::{RowDecision, classify, decide, has_missing_pick};
pub use reader::FileRows;
pub use stats::{FileStats, RunStats};

use crate::app::models::{ColumnSchema, Dataset, InputFile, Row};
use crate::{Error, Result};
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

/// Destination for routed rows
pub trait RowSink {
    /// Append one row to a dataset
    fn accept(&mut self, dataset: Dataset, row: &Row) -> Result<()>;
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn accept(&mut self, dataset: Dataset, row: &Row) -> Result<()> {
        (**self).accept(dataset, row)
    }
}

/// Sink that keeps every routed row in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub all: Vec<Row>,
    pub players: Vec<Row>,
    pub teams: Vec<Row>,
}

impl MemorySink {
    pub fn rows(&self, dataset: Dataset) -> &[Row] {
        match dataset {
            Dataset::All => &self.all,
            Dataset::Players => &self.players,
            Dataset::Teams => &self.teams,
        }
    }
}

impl RowSink for MemorySink {
    fn accept(&mut self, dataset: Dataset, row: &Row) -> Result<()> {
        match dataset {
            Dataset::All => self.all.push(row.clone()),
            Dataset::Players => self.players.push(row.clone()),
            Dataset::Teams => self.teams.push(row.clone()),
        }
        Ok(())
    }
}

/// Sequential single-pass pipeline over input files
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    schema: &'a ColumnSchema,
}

impl<'a> Pipeline<'a> {
    pub fn new(schema: &'a ColumnSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &ColumnSchema {
        self.schema
    }

    /// Process every input file in order, stopping at the first failure
    ///
    /// `on_file_done` is called after each file completes. Any failure is
    /// attributed to the file being processed when it occurred.
    pub fn process_files<S, F>(
        &self,
        inputs: &[InputFile],
        sink: &mut S,
        mut on_file_done: F,
    ) -> Result<RunStats>
    where
        S: RowSink + ?Sized,
        F: FnMut(&FileStats),
    {
        let mut run_stats = RunStats::new();

        for input in inputs {
            info!("Processing {}", input.path.display());
            let file_stats = self
                .process_file(&input.path, sink)
                .map_err(|e| Error::in_file(&input.path, e))?;

            info!(
                "Processed {} ({})",
                input.display_name(),
                file_stats.summary()
            );
            on_file_done(&file_stats);
            run_stats.add_file(file_stats);
        }

        Ok(run_stats)
    }

    /// Process one input file from disk
    pub fn process_file<S: RowSink + ?Sized>(&self, path: &Path, sink: &mut S) -> Result<FileStats> {
        let rows = FileRows::open(path, self.schema)?;
        self.route(rows, sink)
    }

    /// Process one input already opened as a buffered reader
    pub fn process_reader<R: BufRead, S: RowSink + ?Sized>(
        &self,
        path: &Path,
        reader: R,
        sink: &mut S,
    ) -> Result<FileStats> {
        let rows = FileRows::from_reader(path, reader, self.schema)?;
        self.route(rows, sink)
    }

    fn route<R: BufRead, S: RowSink + ?Sized>(
        &self,
        rows: FileRows<'_, R>,
        sink: &mut S,
    ) -> Result<FileStats> {
        debug!(
            "Header of {} has {} columns",
            rows.path().display(),
            rows.header_index().len()
        );

        let mut stats = FileStats::new(rows.path());
        for row in rows {
            let row = row?;
            match decide(&row, self.schema) {
                RowDecision::Drop => stats.record_dropped(),
                RowDecision::Emit(flags) => {
                    sink.accept(Dataset::All, &row)?;
                    if flags.is_player {
                        sink.accept(Dataset::Players, &row)?;
                    }
                    if flags.is_team {
                        sink.accept(Dataset::Teams, &row)?;
                    }
                    stats.record_emitted(flags);
                }
            }
        }

        Ok(stats)
    }
}
