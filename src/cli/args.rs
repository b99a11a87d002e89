//! Command-line argument definitions for the pro data processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::{ConfigLayer, parse_years};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the pro data processor
///
/// Splits yearly Oracle's Elixir match-history exports into `all`,
/// `players` and `teams` CSV datasets.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "prodata-processor",
    version,
    about = "Split Oracle's Elixir LoL esports match data into all/players/teams CSV datasets",
    long_about = "Reads the yearly Oracle's Elixir League of Legends esports match-history \
                  exports, keeps the 20 draft columns, drops team rows with an incomplete \
                  draft, and publishes all, players and teams CSV files atomically under a \
                  per-run identifier."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process the yearly exports and publish the three datasets
    Process(ProcessArgs),
    /// Check the header of every resolved input file without writing output
    Validate(ValidateArgs),
}

/// Input selection flags shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InputArgs {
    /// Directory containing `<year>_LoL_esports_match_data_from_OraclesElixir.csv` files
    ///
    /// Defaults to build/prodata. A blank value also selects the default.
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input_dir: Option<String>,

    /// Years to process, comma-separated, in processing order
    ///
    /// Every listed year must have an export. Without this flag every
    /// export found in the input directory is processed, oldest first.
    #[arg(short = 'y', long = "years", value_name = "LIST")]
    pub years: Option<YearList>,

    /// Path to configuration file (YAML format)
    ///
    /// If not specified, looks for prodata-processor/config.yaml under the
    /// user config directory.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Arguments for the process command
#[derive(Debug, Clone, Default, Parser)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Root directory for the all/, players/ and teams/ outputs
    ///
    /// Defaults to build/prodata-processed. A blank value also selects the default.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Perform a dry run without actual processing
    ///
    /// Shows which inputs would be read and which files would be published.
    #[arg(
        long = "dry-run",
        help = "Show what would be processed without creating output files"
    )]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Default, Parser)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Wrapper for parsing comma-separated year lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearList {
    pub years: Vec<i32>,
}

impl FromStr for YearList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let years = parse_years(s)?;
        if years.is_empty() {
            return Err(Error::configuration("Year list cannot be empty"));
        }
        Ok(YearList { years })
    }
}

impl InputArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode or machine output)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Validate the input flags for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Configuration layer built from the command line
    pub fn config_layer(&self) -> ConfigLayer {
        ConfigLayer {
            input_dir: self.input_dir.clone(),
            output_dir: None,
            years: self.years.as_ref().map(|list| list.years.clone()),
        }
    }
}

impl ProcessArgs {
    pub fn validate(&self) -> Result<()> {
        self.input.validate()
    }

    pub fn config_layer(&self) -> ConfigLayer {
        ConfigLayer {
            output_dir: self.output_dir.clone(),
            ..self.input.config_layer()
        }
    }
}

impl ValidateArgs {
    pub fn validate(&self) -> Result<()> {
        self.input.validate()
    }

    pub fn config_layer(&self) -> ConfigLayer {
        self.input.config_layer()
    }
}
