//! Processing job for one run
//!
//! Ties the pieces together in a fixed order: resolve the yearly inputs,
//! open the publisher, stream every file through the pipeline, then commit
//! the three outputs. Inputs are resolved before any output directory or
//! temporary file is created, so a missing year leaves the output root
//! untouched. Any failure after the publisher opens discards its
//! temporaries before the error propagates.

#[cfg(test)]
pub mod tests;

use crate::app::models::{ColumnSchema, InputFile};
use crate::app::services::input_resolver::resolve_input_files;
use crate::app::services::pipeline::{Pipeline, RunStats};
use crate::app::services::publisher::{OutputLayout, PublishedOutputs, Publisher, run_id_now};
use crate::config::Config;
use crate::Result;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of a committed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: RunStats,
    pub outputs: PublishedOutputs,
    pub output_root: PathBuf,
    pub run_id: String,
    pub elapsed: Duration,
}

/// What a run would read and write, computed without touching the output root
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub inputs: Vec<InputFile>,
    pub layout: OutputLayout,
}

impl RunPlan {
    pub fn outputs(&self) -> PublishedOutputs {
        self.layout.outputs()
    }
}

/// One end-to-end processing run
#[derive(Debug)]
pub struct ProcessorJob {
    config: Config,
    schema: ColumnSchema,
    progress: Option<ProgressBar>,
    run_id: Option<String>,
}

impl ProcessorJob {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            schema: ColumnSchema::standard(),
            progress: None,
            run_id: None,
        }
    }

    /// Report per-file progress on a progress bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Use a fixed run identifier instead of the current UTC time
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve inputs and compute output locations
    pub fn plan(&self) -> Result<RunPlan> {
        let inputs = resolve_input_files(&self.config.input_dir, &self.config.years)?;
        for input in &inputs {
            debug!("Resolved input {} ({})", input.path.display(), input.year);
        }

        let run_id = self.run_id.clone().unwrap_or_else(run_id_now);
        let layout = OutputLayout::new(&self.config.output_dir, run_id);
        Ok(RunPlan { inputs, layout })
    }

    /// Run the job and publish all three outputs
    pub fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let plan = self.plan()?;
        info!(
            "Processing {} input files into run {}",
            plan.inputs.len(),
            plan.layout.run_id()
        );

        if let Some(pb) = &self.progress {
            pb.set_length(plan.inputs.len() as u64);
            pb.set_position(0);
        }

        let mut publisher = Publisher::open(plan.layout.clone(), &self.schema)?;
        let pipeline = Pipeline::new(&self.schema);
        let progress = self.progress.as_ref();

        let result = pipeline.process_files(&plan.inputs, &mut publisher, |file| {
            if let Some(pb) = progress {
                let name = file
                    .file
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                pb.set_message(format!("Processed {}", name));
                pb.inc(1);
            }
        });

        let stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                publisher.discard();
                if let Some(pb) = progress {
                    pb.abandon_with_message("Processing failed");
                }
                return Err(e);
            }
        };

        let outputs = publisher.commit()?;
        if let Some(pb) = progress {
            pb.finish_with_message(format!("Processed {} files", stats.files_processed));
        }

        info!(
            "Pro data processing complete (files={}, {}) -> {}",
            stats.files_processed,
            stats.summary(),
            self.config.output_dir.display()
        );

        Ok(RunSummary {
            stats,
            outputs,
            output_root: self.config.output_dir.clone(),
            run_id: plan.layout.run_id().to_string(),
            elapsed: start_time.elapsed(),
        })
    }
}
