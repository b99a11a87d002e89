use clap::Parser;
use prodata_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Print the error with its full cause chain
            eprintln!("Error: {:#}", anyhow::Error::from(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Pro Data Processor - Oracle's Elixir Match Data Splitter");
    println!("========================================================");
    println!();
    println!("Split yearly League of Legends esports match-history exports into");
    println!("all, players and teams CSV datasets, published atomically per run.");
    println!();
    println!("USAGE:");
    println!("    prodata-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process the yearly exports and publish the three datasets");
    println!("    validate    Check input headers without writing any output");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Process every export found in build/prodata:");
    println!("    prodata-processor process");
    println!();
    println!("    # Process specific years with custom paths:");
    println!("    prodata-processor process --input /data/oe --output /data/processed \\");
    println!("                              --years 2024,2025");
    println!();
    println!("    # Check headers and print a JSON report:");
    println!("    prodata-processor validate --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    prodata-processor <COMMAND> --help");
}
