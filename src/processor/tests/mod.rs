//! End-to-end tests for the processing job
//!
//! Inputs are written into a temporary directory laid out like a real
//! input directory; outputs land in a sibling directory.

pub mod multi_year;

use crate::app::services::pipeline::tests::csv_content;
use crate::config::Config;
use crate::constants::input_file_name;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Input and output directories inside one temp dir
pub struct Workspace {
    pub temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("prodata");
        let output_dir = temp_dir.path().join("prodata-processed");
        fs::create_dir_all(&input_dir).unwrap();
        Self {
            temp_dir,
            input_dir,
            output_dir,
        }
    }

    /// Write a yearly export with the standard header and the given lines
    pub fn write_year(&self, year: i32, lines: &[String]) -> PathBuf {
        let path = self.input_dir.join(input_file_name(year));
        fs::write(&path, csv_content(lines)).unwrap();
        path
    }

    pub fn config(&self, years: &[i32]) -> Config {
        Config::new(&self.input_dir, &self.output_dir).with_years(years.to_vec())
    }
}

/// Sorted file names in a directory; empty if it does not exist
pub fn dir_entries(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
