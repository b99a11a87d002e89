//! Pro Data Processor Library
//!
//! A Rust library for republishing yearly Oracle's Elixir League of Legends
//! esports match-history CSV exports as three narrow, pre-split datasets.
//!
//! This library provides tools for:
//! - Resolving the yearly input exports from an input directory
//! - Validating each export's header against the required 20-column schema
//! - Classifying rows as player or team participant rows
//! - Dropping team rows with an incomplete draft (missing picks)
//! - Publishing `all`, `players` and `teams` CSV outputs atomically

use std::path::PathBuf;

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod header_validator;
        pub mod input_resolver;
        pub mod pipeline;
        pub mod publisher;
    }
}

pub mod processor;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ColumnSchema, Dataset, InputFile, Row, RowFlags};
pub use app::services::header_validator::{HeaderIndex, HeaderValidator};
pub use app::services::pipeline::{FileStats, Pipeline, RowSink, RunStats};
pub use app::services::publisher::{OutputLayout, PublishedOutputs, Publisher};
pub use config::Config;
pub use processor::{ProcessorJob, RunSummary};

/// Result type alias for the pro data processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pro data processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Header missing, blank, or lacking required columns
    #[error("Schema error{}: {message}", file_suffix(.file))]
    Schema {
        file: Option<PathBuf>,
        message: String,
    },

    /// Input directory or configured input file could not be resolved
    #[error("Input resolution error: {message}")]
    Resolution { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Creating, writing, or renaming an output file failed
    #[error("Publish error for '{}': {message}", .path.display())]
    Publish {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Failure attributed to the input file being processed at the time
    #[error("Failed to process '{}'", .file.display())]
    InputFile {
        file: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

fn file_suffix(file: &Option<PathBuf>) -> String {
    file.as_ref()
        .map(|path| format!(" in '{}'", path.display()))
        .unwrap_or_default()
}

impl Error {
    /// Create a schema error not yet tied to a file
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            file: None,
            message: message.into(),
        }
    }

    /// Create a schema error for a specific file
    pub fn schema_in(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Schema {
            file: Some(file.into()),
            message: message.into(),
        }
    }

    /// Create an input resolution error
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a publish error
    pub fn publish(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Publish {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Attribute an error to the input file being processed
    pub fn in_file(file: impl Into<PathBuf>, source: Error) -> Self {
        Self::InputFile {
            file: file.into(),
            source: Box::new(source),
        }
    }

    /// The error with any input-file attribution removed
    pub fn root(&self) -> &Error {
        match self {
            Self::InputFile { source, .. } => source.root(),
            other => other,
        }
    }

    /// The input file this error is attributed to, if any
    pub fn input_file(&self) -> Option<&PathBuf> {
        match self {
            Self::InputFile { file, .. } => Some(file),
            Self::Schema { file, .. } => file.as_ref(),
            _ => None,
        }
    }

    pub fn is_schema_error(&self) -> bool {
        matches!(self.root(), Self::Schema { .. })
    }

    pub fn is_resolution_error(&self) -> bool {
        matches!(self.root(), Self::Resolution { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
