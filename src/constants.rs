//! Application constants for the pro data processor
//!
//! This module contains the output schema, input file naming rules,
//! output layout names, and the default values used throughout the
//! application.

// =============================================================================
// Output Schema
// =============================================================================

/// Output columns, in the order they are written
pub const OUTPUT_COLUMNS: &[&str] = &[
    "gameid",
    "league",
    "split",
    "year",
    "date",
    "game",
    "patch",
    "participantid",
    "side",
    "teamid",
    "ban1",
    "ban2",
    "ban3",
    "ban4",
    "ban5",
    "pick1",
    "pick2",
    "pick3",
    "pick4",
    "pick5",
];

/// Draft pick columns that must all be present on a team row
pub const PICK_COLUMNS: &[&str] = &["pick1", "pick2", "pick3", "pick4", "pick5"];

/// Column carrying the participant identifier
pub const PARTICIPANT_COLUMN: &str = "participantid";

/// Participant identifier values
pub mod participant {
    /// First individual player slot
    pub const FIRST_PLAYER: i64 = 1;

    /// Last individual player slot
    pub const LAST_PLAYER: i64 = 10;

    /// Blue-side team aggregate row
    pub const BLUE_TEAM: i64 = 100;

    /// Red-side team aggregate row
    pub const RED_TEAM: i64 = 200;
}

/// UTF-8 byte-order mark as it appears after decoding
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

// =============================================================================
// Input Files
// =============================================================================

/// Suffix shared by every yearly export
pub const INPUT_FILE_SUFFIX: &str = "_LoL_esports_match_data_from_OraclesElixir.csv";

/// Full-name pattern for yearly exports; `year` captures the four-digit prefix
pub const INPUT_FILE_PATTERN: &str = r"^(?P<year>\d{4})_LoL_esports_match_data_from_OraclesElixir\.csv$";

/// Glob used to enumerate candidate exports in the input directory
pub const INPUT_FILE_GLOB: &str = "*_LoL_esports_match_data_from_OraclesElixir.csv";

/// Expected export file name for a given year
pub fn input_file_name(year: i32) -> String {
    format!("{}{}", year, INPUT_FILE_SUFFIX)
}

// =============================================================================
// Output Layout
// =============================================================================

/// Dataset directory and file stem names
pub const DATASET_ALL: &str = "all";
pub const DATASET_PLAYERS: &str = "players";
pub const DATASET_TEAMS: &str = "teams";

/// Extension of every output file
pub const OUTPUT_EXTENSION: &str = "csv";

/// Prefix for in-flight temporary outputs
pub const TEMP_FILE_PREFIX: &str = "tmp_";

/// chrono format of the UTC run identifier embedded in output names
pub const RUN_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

// =============================================================================
// Configuration Defaults
// =============================================================================

pub const DEFAULT_INPUT_DIR: &str = "build/prodata";
pub const DEFAULT_OUTPUT_DIR: &str = "build/prodata-processed";

/// Config file looked up under the user config directory
pub const CONFIG_DIR_NAME: &str = "prodata-processor";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable overrides
pub const ENV_INPUT_DIR: &str = "PRODATA_INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "PRODATA_OUTPUT_DIR";
pub const ENV_YEARS: &str = "PRODATA_YEARS";

/// Accepted range for configured years
pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 9999;
