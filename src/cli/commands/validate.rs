//! Validate command implementation
//!
//! Resolves the configured inputs exactly as a processing run would and
//! checks each file's header against the required columns. Nothing is
//! written to the output directory.

use super::shared::{load_configuration, setup_logging};
use crate::app::models::{ColumnSchema, InputFile};
use crate::app::services::header_validator::HeaderValidator;
use crate::app::services::input_resolver::resolve_input_files;
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, info, warn};

/// Header check result for one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileCheck {
    pub year: i32,
    pub path: std::path::PathBuf,
    /// Number of header columns when valid
    pub columns: Option<usize>,
    /// Failure message when invalid
    pub error: Option<String>,
}

impl FileCheck {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Validate command runner
pub fn run_validate(args: ValidateArgs) -> Result<()> {
    setup_logging(&args.input)?;

    info!("Starting header validation");
    debug!("Validation arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(args.input.config_file.as_deref(), &args.config_layer())?;

    let inputs = resolve_input_files(&config.input_dir, &config.years)?;
    let schema = ColumnSchema::standard();
    let checks = check_headers(&inputs, &schema);

    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, args.input.output_format, &checks)
        .map_err(|e| Error::io("Failed to write report", e))?;

    let failed = checks.iter().filter(|check| !check.is_valid()).count();
    if failed > 0 {
        return Err(Error::schema(format!(
            "{} of {} input files have invalid headers",
            failed,
            checks.len()
        )));
    }

    info!("All {} input headers are valid", checks.len());
    Ok(())
}

/// Check every input's header, continuing past failures
pub fn check_headers(inputs: &[InputFile], schema: &ColumnSchema) -> Vec<FileCheck> {
    let validator = HeaderValidator::new(schema);

    inputs
        .iter()
        .map(|input| match validator.validate_path(&input.path) {
            Ok(index) => FileCheck {
                year: input.year,
                path: input.path.clone(),
                columns: Some(index.len()),
                error: None,
            },
            Err(e) => {
                warn!("Invalid header in {}: {}", input.path.display(), e);
                FileCheck {
                    year: input.year,
                    path: input.path.clone(),
                    columns: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect()
}

fn write_report<W: Write>(out: &mut W, format: OutputFormat, checks: &[FileCheck]) -> io::Result<()> {
    match format {
        OutputFormat::Human => {
            writeln!(out, "\n{}", "Header Validation".bright_green().bold())?;
            for check in checks {
                match (&check.columns, &check.error) {
                    (Some(columns), _) => writeln!(
                        out,
                        "  {} {} ({} columns)",
                        "ok".bright_green(),
                        check.path.display(),
                        columns
                    )?,
                    (None, error) => writeln!(
                        out,
                        "  {} {}: {}",
                        "FAIL".bright_red().bold(),
                        check.path.display(),
                        error.as_deref().unwrap_or_default()
                    )?,
                }
            }
            writeln!(out)
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(checks)?)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["year", "path", "valid", "columns", "error"])?;
            for check in checks {
                writer.write_record([
                    check.year.to_string(),
                    check.path.display().to_string(),
                    check.is_valid().to_string(),
                    check.columns.map(|c| c.to_string()).unwrap_or_default(),
                    check.error.clone().unwrap_or_default(),
                ])?;
            }
            writer.flush()
        }
    }
}
