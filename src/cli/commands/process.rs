//! Process command implementation
//!
//! Loads the layered configuration, runs one [`ProcessorJob`] and reports
//! the outcome in the requested format.

use super::shared::{create_progress_bar, file_size, format_size, load_configuration, setup_logging};
use crate::app::models::Dataset;
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::config::Config;
use crate::processor::{ProcessorJob, RunPlan, RunSummary};
use crate::{Error, Result};
use colored::*;
use indicatif::HumanDuration;
use std::io::{self, Write};
use tracing::{debug, error, info};

/// Process command runner
///
/// 1. Set up logging and configuration
/// 2. Resolve inputs (dry run stops here)
/// 3. Run the job with progress reporting
/// 4. Report the summary
pub fn run_process(args: ProcessArgs) -> Result<()> {
    setup_logging(&args.input)?;

    info!("Starting pro data processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(args.input.config_file.as_deref(), &args.config_layer())?;
    debug!("Loaded configuration: {:?}", config);

    if args.dry_run {
        return run_dry_run(&args, config);
    }

    let mut job = ProcessorJob::new(config);
    if args.input.show_progress() {
        job = job.with_progress(create_progress_bar(0, "Processing match data")?);
    }

    let summary = job.run().inspect_err(|e| {
        error!("Pro data processing failed: {}", e);
    })?;

    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, args.input.output_format, &summary)
        .map_err(|e| Error::io("Failed to write report", e))
}

/// Resolve inputs and show what would be published
fn run_dry_run(args: &ProcessArgs, config: Config) -> Result<()> {
    info!("Performing dry run - no files will be created");

    let plan = ProcessorJob::new(config).plan()?;

    let mut stdout = io::stdout().lock();
    write_dry_run(&mut stdout, args.input.output_format, &plan)
        .map_err(|e| Error::io("Failed to write report", e))
}

fn write_dry_run<W: Write>(out: &mut W, format: OutputFormat, plan: &RunPlan) -> io::Result<()> {
    let outputs = plan.outputs();
    match format {
        OutputFormat::Human => {
            writeln!(out, "\n{}", "Dry Run".bright_yellow().bold())?;
            writeln!(out, "  {}", "Would process:".bright_cyan())?;
            for input in &plan.inputs {
                writeln!(out, "    {} {}", input.year, input.path.display())?;
            }
            writeln!(out, "  {}", "Would create:".bright_cyan())?;
            for dataset in Dataset::ALL {
                writeln!(out, "    {}", outputs.path(dataset).display())?;
            }
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "dry_run": true,
                "run_id": plan.layout.run_id(),
                "inputs": plan.inputs,
                "outputs": outputs,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "kind,year,path")?;
            for input in &plan.inputs {
                writeln!(out, "input,{},{}", input.year, input.path.display())?;
            }
            for dataset in Dataset::ALL {
                writeln!(out, "output,,{}", outputs.path(dataset).display())?;
            }
        }
    }
    Ok(())
}

/// Write the run summary in the requested format
fn write_report<W: Write>(out: &mut W, format: OutputFormat, summary: &RunSummary) -> io::Result<()> {
    match format {
        OutputFormat::Human => write_human_report(out, summary),
        OutputFormat::Json => write_json_report(out, summary),
        OutputFormat::Csv => write_csv_report(out, summary),
    }
}

fn write_human_report<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    let stats = &summary.stats;

    writeln!(out, "\n{}", "Processing Summary".bright_green().bold())?;
    writeln!(
        out,
        "  {} {}",
        "Run:".bright_cyan(),
        summary.run_id.bright_white()
    )?;
    writeln!(
        out,
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    )?;
    writeln!(
        out,
        "  {} {} (players {}, teams {})",
        "Rows written:".bright_cyan(),
        stats.all_rows.to_string().bright_white().bold(),
        stats.player_rows,
        stats.team_rows
    )?;
    if stats.dropped_team_rows > 0 {
        writeln!(
            out,
            "  {} {}",
            "Team rows dropped:".bright_yellow(),
            stats.dropped_team_rows.to_string().bright_yellow().bold()
        )?;
    }
    writeln!(
        out,
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(summary.elapsed)
    )?;

    writeln!(out, "\n{}", "Output Files".bright_green().bold())?;
    for dataset in Dataset::ALL {
        let path = summary.outputs.path(dataset);
        writeln!(
            out,
            "  {} {} ({})",
            format!("{}:", dataset).bright_cyan(),
            path.display(),
            format_size(file_size(path))
        )?;
    }
    writeln!(out)
}

fn write_json_report<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    let stats = &summary.stats;
    let report = serde_json::json!({
        "run_id": summary.run_id,
        "output_root": summary.output_root,
        "files_processed": stats.files_processed,
        "all_rows": stats.all_rows,
        "player_rows": stats.player_rows,
        "team_rows": stats.team_rows,
        "dropped_team_rows": stats.dropped_team_rows,
        "neither_rows": stats.neither_rows,
        "processing_time_seconds": summary.elapsed.as_secs_f64(),
        "files": stats.files,
        "outputs": Dataset::ALL.iter().map(|dataset| {
            let path = summary.outputs.path(*dataset);
            serde_json::json!({
                "dataset": dataset,
                "path": path,
                "size_bytes": file_size(path),
            })
        }).collect::<Vec<_>>(),
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)
}

fn write_csv_report<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    let stats = &summary.stats;
    writeln!(out, "metric,value")?;
    writeln!(out, "run_id,{}", summary.run_id)?;
    writeln!(out, "files_processed,{}", stats.files_processed)?;
    writeln!(out, "all_rows,{}", stats.all_rows)?;
    writeln!(out, "player_rows,{}", stats.player_rows)?;
    writeln!(out, "team_rows,{}", stats.team_rows)?;
    writeln!(out, "dropped_team_rows,{}", stats.dropped_team_rows)?;
    writeln!(out, "neither_rows,{}", stats.neither_rows)?;
    writeln!(
        out,
        "processing_time_seconds,{}",
        summary.elapsed.as_secs_f64()
    )?;
    Ok(())
}
