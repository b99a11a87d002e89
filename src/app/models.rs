//! Core data structures for pro data processing
//!
//! Defines the output column schema, materialized rows and their
//! participant classification, the three published datasets, and the
//! resolved input file descriptor.

use crate::constants::{
    DATASET_ALL, DATASET_PLAYERS, DATASET_TEAMS, OUTPUT_COLUMNS, PARTICIPANT_COLUMN, PICK_COLUMNS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;

/// Ordered output schema with the derived lookups used by the pipeline
///
/// The column order defines both the output header and the positional
/// layout of every [`Row`]. Build it once and pass it by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
    required: HashSet<String>,
    positions: HashMap<String, usize>,
    pick_positions: Vec<usize>,
    participant_position: usize,
}

impl ColumnSchema {
    /// Create a schema from column names, pick columns and the participant column
    pub fn new<S: AsRef<str>>(columns: &[S], picks: &[S], participant: &str) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::configuration("Column schema cannot be empty"));
        }

        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let mut positions = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if positions.insert(column.clone(), position).is_some() {
                return Err(Error::configuration(format!(
                    "Duplicate column '{}' in schema",
                    column
                )));
            }
        }

        let lookup = |name: &str| {
            positions.get(name).copied().ok_or_else(|| {
                Error::configuration(format!("Column '{}' is not part of the schema", name))
            })
        };

        let pick_positions = picks
            .iter()
            .map(|pick| lookup(pick.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let participant_position = lookup(participant)?;

        Ok(Self {
            required: columns.iter().cloned().collect(),
            columns,
            positions,
            pick_positions,
            participant_position,
        })
    }

    /// The standard 20-column match-data schema
    pub fn standard() -> Self {
        Self {
            columns: OUTPUT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            required: OUTPUT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            positions: OUTPUT_COLUMNS
                .iter()
                .enumerate()
                .map(|(i, c)| (c.to_string(), i))
                .collect(),
            pick_positions: PICK_COLUMNS
                .iter()
                .filter_map(|pick| OUTPUT_COLUMNS.iter().position(|c| c == pick))
                .collect(),
            participant_position: OUTPUT_COLUMNS
                .iter()
                .position(|c| *c == PARTICIPANT_COLUMN)
                .unwrap_or_default(),
        }
    }

    /// Column names in output order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of output columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Set of column names every input header must contain
    pub fn required(&self) -> &HashSet<String> {
        &self.required
    }

    /// Output position of a column
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Output positions of the pick columns
    pub fn pick_positions(&self) -> &[usize] {
        &self.pick_positions
    }

    /// Output position of the participant identifier
    pub fn participant_position(&self) -> usize {
        self.participant_position
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::standard()
    }
}

/// One materialized output row, values in schema order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    values: Vec<String>,
}

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Value at an output position; missing positions read as empty
    pub fn get(&self, position: usize) -> &str {
        self.values.get(position).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Participant classification derived from the participant identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowFlags {
    pub is_player: bool,
    pub is_team: bool,
}

impl RowFlags {
    /// Neither a player nor a team row
    pub fn is_neither(&self) -> bool {
        !self.is_player && !self.is_team
    }
}

/// Published output datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    All,
    Players,
    Teams,
}

impl Dataset {
    /// All datasets in publication order
    pub const ALL: [Dataset; 3] = [Dataset::All, Dataset::Players, Dataset::Teams];

    /// Directory and file stem used for this dataset
    pub fn name(&self) -> &'static str {
        match self {
            Dataset::All => DATASET_ALL,
            Dataset::Players => DATASET_PLAYERS,
            Dataset::Teams => DATASET_TEAMS,
        }
    }

    /// Index into per-dataset arrays, matching [`Dataset::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Dataset::All => 0,
            Dataset::Players => 1,
            Dataset::Teams => 2,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved yearly input export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFile {
    pub year: i32,
    pub path: PathBuf,
}

impl InputFile {
    pub fn new(year: i32, path: impl Into<PathBuf>) -> Self {
        Self {
            year,
            path: path.into(),
        }
    }

    /// File name for log messages
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
