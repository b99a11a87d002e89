//! Input file resolution for yearly match-data exports
//!
//! Turns an input directory plus an optional list of years into the
//! ordered list of exports to process. Configured years are resolved to
//! their exact file names; otherwise the directory is scanned and matches
//! are ordered by year, then path.

use crate::app::models::InputFile;
use crate::constants::{INPUT_FILE_GLOB, INPUT_FILE_PATTERN, input_file_name};
use crate::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

fn file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(INPUT_FILE_PATTERN).expect("input file pattern is valid"))
}

/// Extract the year prefix from an export file name
pub fn year_from_file_name(file_name: &str) -> Option<i32> {
    file_pattern()
        .captures(file_name)
        .and_then(|captures| captures.name("year"))
        .and_then(|year| year.as_str().parse().ok())
}

/// Resolve the exports to process, in processing order
pub fn resolve_input_files(input_dir: &Path, years: &[i32]) -> Result<Vec<InputFile>> {
    if years.is_empty() {
        scan_input_dir(input_dir)
    } else {
        resolve_configured_years(input_dir, years)
    }
}

fn resolve_configured_years(input_dir: &Path, years: &[i32]) -> Result<Vec<InputFile>> {
    let mut resolved = Vec::with_capacity(years.len());

    for &year in years {
        let candidate = input_dir.join(input_file_name(year));
        if !candidate.is_file() {
            return Err(Error::resolution(format!(
                "Missing input CSV for year {}: {}",
                year,
                candidate.display()
            )));
        }
        debug!("Resolved year {} to {}", year, candidate.display());
        resolved.push(InputFile::new(year, candidate));
    }

    Ok(resolved)
}

fn scan_input_dir(input_dir: &Path) -> Result<Vec<InputFile>> {
    if !input_dir.is_dir() {
        return Err(Error::resolution(format!(
            "Input directory does not exist: {}",
            input_dir.display()
        )));
    }

    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&input_dir.to_string_lossy()),
        INPUT_FILE_GLOB
    );
    debug!("Searching for input CSVs with pattern: {}", pattern);

    let entries = glob::glob(&pattern).map_err(|e| {
        Error::resolution(format!("Invalid search pattern '{}': {}", pattern, e))
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        let path: PathBuf = entry.map_err(|e| {
            Error::io(
                format!("Failed to read entry in {}", input_dir.display()),
                e.into(),
            )
        })?;

        if !path.is_file() {
            continue;
        }
        let year = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(year_from_file_name);
        if let Some(year) = year {
            matches.push(InputFile::new(year, path));
        }
    }

    if matches.is_empty() {
        return Err(Error::resolution(format!(
            "No Oracle's Elixir CSVs found in {}",
            input_dir.display()
        )));
    }

    matches.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.path.cmp(&b.path)));

    debug!("Discovered {} input CSVs", matches.len());
    for input in &matches {
        debug!("  Found: {}", input.path.display());
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "gameid\n").unwrap();
        path
    }

    #[test]
    fn test_year_from_file_name() {
        assert_eq!(
            year_from_file_name("2019_LoL_esports_match_data_from_OraclesElixir.csv"),
            Some(2019)
        );
        assert_eq!(year_from_file_name("LoL_esports_match_data.csv"), None);
        assert_eq!(
            year_from_file_name("x2019_LoL_esports_match_data_from_OraclesElixir.csv"),
            None
        );
    }

    #[test]
    fn test_configured_years_keep_configured_order() {
        let temp_dir = TempDir::new().unwrap();
        let p2025 = touch(temp_dir.path(), &input_file_name(2025));
        let p2024 = touch(temp_dir.path(), &input_file_name(2024));

        let resolved = resolve_input_files(temp_dir.path(), &[2025, 2024]).unwrap();
        assert_eq!(
            resolved,
            vec![InputFile::new(2025, p2025), InputFile::new(2024, p2024)]
        );
    }

    #[test]
    fn test_configured_year_missing_fails() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), &input_file_name(2024));

        let error = resolve_input_files(temp_dir.path(), &[2024, 2025]).unwrap_err();
        assert!(error.is_resolution_error());
        assert!(error.to_string().contains("year 2025"));
    }

    #[test]
    fn test_scan_sorts_by_year() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), &input_file_name(2023));
        touch(temp_dir.path(), &input_file_name(2014));
        touch(temp_dir.path(), &input_file_name(2021));
        touch(temp_dir.path(), "notes.csv");
        touch(temp_dir.path(), "2022_LoL_esports_match_data_from_OraclesElixir.csv.tmp");
        fs::create_dir(temp_dir.path().join(input_file_name(2030))).unwrap();

        let resolved = resolve_input_files(temp_dir.path(), &[]).unwrap();
        let years: Vec<i32> = resolved.iter().map(|f| f.year).collect();
        assert_eq!(years, vec![2014, 2021, 2023]);
    }

    #[test]
    fn test_scan_without_matches_fails() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "other.csv");

        let error = resolve_input_files(temp_dir.path(), &[]).unwrap_err();
        assert!(error.is_resolution_error());
        assert!(error.to_string().contains("No Oracle's Elixir CSVs"));
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let error = resolve_input_files(&missing, &[]).unwrap_err();
        assert!(error.is_resolution_error());
        assert!(error.to_string().contains("does not exist"));
    }
}
