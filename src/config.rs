//! Configuration management for the pro data processor
//!
//! Settings are layered, lowest precedence first: built-in defaults, an
//! optional YAML config file, `PRODATA_*` environment variables, then
//! command-line flags. A blank directory value at any layer falls back to
//! the default directory.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, ENV_INPUT_DIR,
    ENV_OUTPUT_DIR, ENV_YEARS, MAX_YEAR, MIN_YEAR,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved settings for one processing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the yearly input exports
    pub input_dir: PathBuf,
    /// Root directory for the `all`, `players` and `teams` outputs
    pub output_dir: PathBuf,
    /// Explicit years to process, in order; empty means scan the input directory
    pub years: Vec<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            years: Vec::new(),
        }
    }
}

/// One layer of optional overrides
///
/// Used for the config file, the environment and the command line alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
    pub years: Option<Vec<i32>>,
}

impl ConfigLayer {
    /// Load a layer from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load a layer from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load a layer using a custom variable lookup
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let years = match lookup(ENV_YEARS) {
            Some(value) => Some(parse_years(&value).map_err(|e| {
                Error::configuration(format!("Invalid {}: {}", ENV_YEARS, e))
            })?),
            None => None,
        };

        Ok(Self {
            input_dir: lookup(ENV_INPUT_DIR),
            output_dir: lookup(ENV_OUTPUT_DIR),
            years,
        })
    }

    /// Apply this layer on top of an existing configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(input_dir) = &self.input_dir {
            config.input_dir = dir_or_default(input_dir, DEFAULT_INPUT_DIR);
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = dir_or_default(output_dir, DEFAULT_OUTPUT_DIR);
        }
        if let Some(years) = &self.years {
            config.years = years.clone();
        }
    }
}

fn dir_or_default(value: &str, default: &str) -> PathBuf {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PathBuf::from(default)
    } else {
        PathBuf::from(trimmed)
    }
}

/// Parse a comma-separated year list such as `2024,2025`
///
/// A blank list yields no years.
pub fn parse_years(value: &str) -> Result<Vec<i32>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| Error::configuration(format!("Invalid year '{}'", part)))
        })
        .collect()
}

impl Config {
    /// Create a configuration with explicit directories and no years
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            years: Vec::new(),
        }
    }

    /// Restrict the run to explicit years
    pub fn with_years(mut self, years: Vec<i32>) -> Self {
        self.years = years;
        self
    }

    /// Default config file location under the user's config directory
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user config directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Build a configuration from every layer
    ///
    /// `config_file` must exist when given. Without it, the default config
    /// file is used only if present.
    pub fn load_layered(config_file: Option<&Path>, cli: &ConfigLayer) -> Result<Self> {
        let env = ConfigLayer::from_env()?;
        Self::load_from_layers(config_file, &env, cli)
    }

    /// Same as [`Config::load_layered`] with an explicit environment layer
    pub fn load_from_layers(
        config_file: Option<&Path>,
        env: &ConfigLayer,
        cli: &ConfigLayer,
    ) -> Result<Self> {
        let mut config = Self::default();

        let file_layer = match config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Some(ConfigLayer::from_yaml_file(path)?)
            }
            None => match Self::default_config_path() {
                Ok(path) if path.is_file() => {
                    debug!("Using default config file {}", path.display());
                    Some(ConfigLayer::from_yaml_file(&path)?)
                }
                _ => None,
            },
        };

        if let Some(layer) = file_layer {
            layer.apply_to(&mut config);
        }
        env.apply_to(&mut config);
        cli.apply_to(&mut config);

        config.resolve_paths()?;
        config.validate()?;
        Ok(config)
    }

    /// Make both directories absolute against the current directory
    pub fn resolve_paths(&mut self) -> Result<()> {
        self.input_dir = absolute(&self.input_dir)?;
        self.output_dir = absolute(&self.output_dir)?;
        Ok(())
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for &year in &self.years {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(Error::configuration(format!(
                    "Year {} is outside {}..={}",
                    year, MIN_YEAR, MAX_YEAR
                )));
            }
            if !seen.insert(year) {
                return Err(Error::configuration(format!(
                    "Year {} is listed more than once",
                    year
                )));
            }
        }

        if self.input_dir.as_os_str().is_empty() || self.output_dir.as_os_str().is_empty() {
            return Err(Error::configuration("Directories must not be empty"));
        }

        Ok(())
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| Error::io(format!("Failed to resolve path '{}'", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env() -> ConfigLayer {
        ConfigLayer::default()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.input_dir, PathBuf::from("build/prodata"));
        assert_eq!(config.output_dir, PathBuf::from("build/prodata-processed"));
        assert!(config.years.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("2024,2025").unwrap(), vec![2024, 2025]);
        assert_eq!(parse_years(" 2025 , 2023 ").unwrap(), vec![2025, 2023]);
        assert!(parse_years("").unwrap().is_empty());
        assert!(parse_years("2024,abc").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_years() {
        let config = Config::new("in", "out").with_years(vec![2024, 2024]);
        assert!(config.validate().is_err());

        let config = Config::new("in", "out").with_years(vec![999]);
        assert!(config.validate().is_err());

        let config = Config::new("in", "out").with_years(vec![10000]);
        assert!(config.validate().is_err());

        let config = Config::new("in", "out").with_years(vec![2025, 2014]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_directories_fall_back_to_defaults() {
        let layer = ConfigLayer {
            input_dir: Some("   ".to_string()),
            output_dir: Some(String::new()),
            years: None,
        };
        let mut config = Config::new("/custom/in", "/custom/out");
        layer.apply_to(&mut config);

        assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_env_layer() {
        let vars: HashMap<&str, &str> = [
            (ENV_INPUT_DIR, "/env/in"),
            (ENV_YEARS, "2023, 2024"),
        ]
        .into_iter()
        .collect();

        let layer =
            ConfigLayer::from_env_with(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(layer.input_dir.as_deref(), Some("/env/in"));
        assert_eq!(layer.output_dir, None);
        assert_eq!(layer.years, Some(vec![2023, 2024]));

        let bad = ConfigLayer::from_env_with(|key| {
            (key == ENV_YEARS).then(|| "twenty".to_string())
        });
        assert!(bad.is_err());
    }

    #[test]
    fn test_yaml_file_layer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "input_dir: /data/in\nyears: [2025]\n").unwrap();

        let layer = ConfigLayer::from_yaml_file(&path).unwrap();
        assert_eq!(layer.input_dir.as_deref(), Some("/data/in"));
        assert_eq!(layer.years, Some(vec![2025]));

        fs::write(&path, "inputdir: /typo\n").unwrap();
        assert!(ConfigLayer::from_yaml_file(&path).is_err());

        fs::write(&path, "").unwrap();
        assert_eq!(
            ConfigLayer::from_yaml_file(&path).unwrap(),
            ConfigLayer::default()
        );
    }

    #[test]
    fn test_layer_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(
            &path,
            "input_dir: /file/in\noutput_dir: /file/out\nyears: [2020]\n",
        )
        .unwrap();

        let env = ConfigLayer {
            output_dir: Some("/env/out".to_string()),
            years: Some(vec![2021]),
            ..Default::default()
        };
        let cli = ConfigLayer {
            years: Some(vec![2022, 2023]),
            ..Default::default()
        };

        let config = Config::load_from_layers(Some(&path), &env, &cli).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/file/in"));
        assert_eq!(config.output_dir, PathBuf::from("/env/out"));
        assert_eq!(config.years, vec![2022, 2023]);
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.yaml");

        let result = Config::load_from_layers(Some(&missing), &no_env(), &no_env());
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_paths_are_made_absolute() {
        let mut config = Config::new("relative/in", "relative/out");
        config.resolve_paths().unwrap();
        assert!(config.input_dir.is_absolute());
        assert!(config.input_dir.ends_with("relative/in"));
        assert!(config.output_dir.is_absolute());
    }
}
