//! Command implementations for the pro data processor CLI
//!
//! Each subcommand lives in its own module:
//! - `process`: resolve inputs, split them into the three datasets, publish
//! - `validate`: header check of every resolved input, no output written

pub mod process;
pub mod shared;
pub mod validate;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the handler for the parsed subcommand
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Process(process_args)) => process::run_process(process_args),
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args),
        None => Err(Error::configuration("No command given")),
    }
}
