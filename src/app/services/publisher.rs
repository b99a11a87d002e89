//! Atomic publication of the `all`, `players` and `teams` outputs
//!
//! Every output is written to a temporary file in its final directory,
//! so the closing rename never crosses a filesystem. Nothing becomes
//! visible until [`Publisher::commit`] has closed all three writers.
//! The renames themselves run one after another; if a later rename fails,
//! outputs already renamed by this run are removed again and the remaining
//! temporaries are deleted. A crash between renames can still leave a
//! partial set behind.

use crate::app::models::{ColumnSchema, Dataset, Row};
use crate::app::services::pipeline::RowSink;
use crate::constants::{OUTPUT_EXTENSION, RUN_ID_FORMAT, TEMP_FILE_PREFIX};
use crate::{Error, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::{debug, info, warn};

/// Run identifier for the current UTC time
pub fn run_id_now() -> String {
    Utc::now().format(RUN_ID_FORMAT).to_string()
}

/// Final locations of a run's outputs under the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    output_root: PathBuf,
    run_id: String,
}

impl OutputLayout {
    pub fn new(output_root: impl Into<PathBuf>, run_id: impl Into<String>) -> Self {
        Self {
            output_root: output_root.into(),
            run_id: run_id.into(),
        }
    }

    /// Layout named after the current UTC time
    pub fn for_now(output_root: impl Into<PathBuf>) -> Self {
        Self::new(output_root, run_id_now())
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Stable per-dataset directory, e.g. `<root>/players`
    pub fn dataset_dir(&self, dataset: Dataset) -> PathBuf {
        self.output_root.join(dataset.name())
    }

    /// Final file, e.g. `<root>/players/players_20250101_120000.csv`
    pub fn final_path(&self, dataset: Dataset) -> PathBuf {
        self.dataset_dir(dataset).join(format!(
            "{}_{}.{}",
            dataset.name(),
            self.run_id,
            OUTPUT_EXTENSION
        ))
    }

    /// Final paths for every dataset
    pub fn outputs(&self) -> PublishedOutputs {
        PublishedOutputs {
            all: self.final_path(Dataset::All),
            players: self.final_path(Dataset::Players),
            teams: self.final_path(Dataset::Teams),
        }
    }
}

/// Final file locations of a committed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedOutputs {
    pub all: PathBuf,
    pub players: PathBuf,
    pub teams: PathBuf,
}

impl PublishedOutputs {
    pub fn path(&self, dataset: Dataset) -> &Path {
        match dataset {
            Dataset::All => &self.all,
            Dataset::Players => &self.players,
            Dataset::Teams => &self.teams,
        }
    }
}

/// One in-flight output: a CSV writer over a temporary file
struct StagedOutput {
    dataset: Dataset,
    writer: Option<csv::Writer<BufWriter<File>>>,
    temp_path: Option<TempPath>,
    final_path: PathBuf,
    rows_written: u64,
}

impl StagedOutput {
    fn create(layout: &OutputLayout, dataset: Dataset, schema: &ColumnSchema) -> Result<Self> {
        let dir = layout.dataset_dir(dataset);
        fs::create_dir_all(&dir)
            .map_err(|e| Error::publish(&dir, "Failed to create output directory", e))?;

        let prefix = format!("{}{}_", TEMP_FILE_PREFIX, dataset.name());
        let suffix = format!(".{}", OUTPUT_EXTENSION);
        let temp_file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(&dir)
            .map_err(|e| Error::publish(&dir, "Failed to create temporary output", e))?;

        let (file, temp_path) = temp_file.into_parts();
        debug!("Staging {} output at {}", dataset, temp_path.display());

        // RFC 4180 record separators
        let writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(BufWriter::new(file));

        let mut output = Self {
            dataset,
            writer: Some(writer),
            temp_path: Some(temp_path),
            final_path: layout.final_path(dataset),
            rows_written: 0,
        };
        output.write_fields(schema.columns())?;
        Ok(output)
    }

    fn staging_path(&self) -> PathBuf {
        self.temp_path
            .as_deref()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.final_path.clone())
    }

    fn write_fields(&mut self, fields: &[String]) -> Result<()> {
        let path = self.staging_path();
        let writer = self.writer.as_mut().ok_or_else(|| {
            Error::publish(&path, "Output is already closed", closed_error())
        })?;
        writer
            .write_record(fields)
            .map_err(|e| Error::publish(&path, "Failed to write record", e.into()))
    }

    fn write_row(&mut self, row: &Row) -> Result<()> {
        self.write_fields(row.values())?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush, sync and close the temporary file
    fn finish(&mut self) -> Result<()> {
        let path = self.staging_path();
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };

        writer
            .flush()
            .map_err(|e| Error::publish(&path, "Failed to flush output", e))?;
        let buffered = writer.into_inner().map_err(|e| {
            let source = io::Error::new(e.error().kind(), e.error().to_string());
            Error::publish(&path, "Failed to flush output", source)
        })?;
        let file = buffered
            .into_inner()
            .map_err(|e| Error::publish(&path, "Failed to flush output", e.into_error()))?;
        file.sync_all()
            .map_err(|e| Error::publish(&path, "Failed to sync output", e))?;
        Ok(())
    }

    /// Rename the closed temporary file onto its final name
    fn persist(&mut self) -> Result<PathBuf> {
        let Some(temp_path) = self.temp_path.take() else {
            return Err(Error::publish(
                &self.final_path,
                "Temporary output no longer exists",
                closed_error(),
            ));
        };

        match temp_path.persist(&self.final_path) {
            Ok(()) => {
                debug!("Published {} output to {}", self.dataset, self.final_path.display());
                Ok(self.final_path.clone())
            }
            Err(e) => {
                self.temp_path = Some(e.path);
                Err(Error::publish(
                    &self.final_path,
                    "Atomic move failed",
                    e.error,
                ))
            }
        }
    }

    /// Close the writer and delete the temporary file, logging failures
    fn discard(&mut self) {
        drop(self.writer.take());
        if let Some(temp_path) = self.temp_path.take() {
            let temp_file = temp_path.to_path_buf();
            if let Err(e) = temp_path.close() {
                warn!("Failed to delete temp file {}: {}", temp_file.display(), e);
            } else {
                debug!("Deleted temp file {}", temp_file.display());
            }
        }
    }
}

fn closed_error() -> io::Error {
    io::Error::other("output is closed")
}

/// Writes the three outputs to temporaries and publishes them together
pub struct Publisher {
    layout: OutputLayout,
    outputs: Vec<StagedOutput>,
}

impl Publisher {
    /// Create the dataset directories and open one temporary output per dataset
    ///
    /// Each temporary output starts with the schema header.
    pub fn open(layout: OutputLayout, schema: &ColumnSchema) -> Result<Self> {
        let mut publisher = Self {
            layout,
            outputs: Vec::with_capacity(Dataset::ALL.len()),
        };
        for dataset in Dataset::ALL {
            let output = StagedOutput::create(&publisher.layout, dataset, schema)?;
            publisher.outputs.push(output);
        }
        Ok(publisher)
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Rows written so far to a dataset, excluding the header
    pub fn rows_written(&self, dataset: Dataset) -> u64 {
        self.outputs[dataset.index()].rows_written
    }

    /// Temporary file currently backing a dataset, if still staged
    pub fn staging_path(&self, dataset: Dataset) -> Option<&Path> {
        self.outputs[dataset.index()].temp_path.as_deref()
    }

    /// Close every output, then rename each into place
    pub fn commit(mut self) -> Result<PublishedOutputs> {
        for output in self.outputs.iter_mut() {
            if let Err(e) = output.finish() {
                self.discard_all();
                return Err(e);
            }
        }

        let mut published = Vec::with_capacity(self.outputs.len());
        let mut failure = None;
        for output in self.outputs.iter_mut() {
            match output.persist() {
                Ok(path) => published.push(path),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if let Some(error) = failure {
            remove_published(&published);
            self.discard_all();
            return Err(error);
        }

        info!(
            "Published run {} under {}",
            self.layout.run_id(),
            self.layout.output_root().display()
        );
        Ok(self.layout.outputs())
    }

    /// Delete every temporary output without publishing anything
    pub fn discard(mut self) {
        self.discard_all();
    }

    fn discard_all(&mut self) {
        for output in self.outputs.iter_mut() {
            output.discard();
        }
    }
}

impl RowSink for Publisher {
    fn accept(&mut self, dataset: Dataset, row: &Row) -> Result<()> {
        self.outputs[dataset.index()].write_row(row)
    }
}

impl Drop for Publisher {
    fn drop(&mut self) {
        self.discard_all();
    }
}

/// Undo renames that already happened in a failed commit
fn remove_published(published: &[PathBuf]) {
    for path in published {
        match fs::remove_file(path) {
            Ok(()) => warn!("Rolled back published output {}", path.display()),
            Err(e) => warn!(
                "Failed to roll back published output {}: {}",
                path.display(),
                e
            ),
        }
    }
}
