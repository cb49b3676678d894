//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tripsync/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::search::{DEFAULT_PAGE_SIZE_NARROW, DEFAULT_PAGE_SIZE_WIDE, MIN_PARTY_SIZE};
use crate::core::state::{DEFAULT_SEARCH_LATENCY, SearchSettings};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TripSyncConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub trip: TripConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    pub latency_ms: Option<u64>,
    pub page_size_wide: Option<usize>,
    pub page_size_narrow: Option<usize>,
    /// Terminal width (columns) at or below which the layout counts as narrow.
    pub narrow_breakpoint: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TripConfig {
    /// ISO dates offered by the "Add to trip" dropdown.
    pub dates: Option<Vec<String>>,
    pub default_people: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NARROW_BREAKPOINT: u16 = 100;
pub const DEFAULT_PEOPLE: u32 = 2;
pub const DEFAULT_LOG_FILE: &str = "tripsync.log";
pub const DEFAULT_TRIP_DATES: [&str; 5] = [
    "2025-09-01",
    "2025-09-02",
    "2025-09-03",
    "2025-09-04",
    "2025-09-05",
];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub latency: Duration,
    pub page_size_wide: usize,
    pub page_size_narrow: usize,
    pub narrow_breakpoint: u16,
    pub trip_dates: Vec<String>,
    pub default_people: u32,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl ResolvedConfig {
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            latency: self.latency,
            page_size_wide: self.page_size_wide,
            page_size_narrow: self.page_size_narrow,
            trip_dates: self.trip_dates.clone(),
        }
    }
}

/// Values from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub latency_ms: Option<u64>,
    pub narrow_breakpoint: Option<u16>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tripsync/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tripsync").join("config.toml"))
}

/// Load config from `~/.tripsync/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TripSyncConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TripSyncConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(TripSyncConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<TripSyncConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TripSyncConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TripSyncConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# TripSync Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [search]
# latency_ms = 350                 # Simulated search latency (or TRIPSYNC_LATENCY_MS)
# page_size_wide = 30
# page_size_narrow = 15
# narrow_breakpoint = 100          # Columns at or below which the narrow page size applies

# [trip]
# dates = ["2025-09-01", "2025-09-02", "2025-09-03", "2025-09-04", "2025-09-05"]
# default_people = 2

# [logging]
# level = "debug"                  # "error", "warn", "info", "debug", "trace", "off"
# file = "tripsync.log"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TripSyncConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &TripSyncConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Latency: CLI → env → config → default
    let latency = cli
        .latency_ms
        .or_else(|| env("TRIPSYNC_LATENCY_MS").and_then(|v| v.trim().parse().ok()))
        .or(config.search.latency_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_SEARCH_LATENCY);

    let narrow_breakpoint = cli
        .narrow_breakpoint
        .or(config.search.narrow_breakpoint)
        .unwrap_or(DEFAULT_NARROW_BREAKPOINT);

    let trip_dates = config
        .trip
        .dates
        .clone()
        .unwrap_or_else(|| DEFAULT_TRIP_DATES.iter().map(|d| d.to_string()).collect());

    // Log level: env → config → debug
    let log_level = env("TRIPSYNC_LOG_LEVEL")
        .or_else(|| config.logging.level.clone())
        .map(|level| parse_level(&level))
        .unwrap_or(LevelFilter::Debug);

    let log_file = env("TRIPSYNC_LOG_FILE")
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        latency,
        page_size_wide: config
            .search
            .page_size_wide
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE_WIDE),
        page_size_narrow: config
            .search
            .page_size_narrow
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE_NARROW),
        narrow_breakpoint,
        trip_dates,
        default_people: config
            .trip
            .default_people
            .unwrap_or(DEFAULT_PEOPLE)
            .max(MIN_PARTY_SIZE),
        log_level,
        log_file: PathBuf::from(log_file),
    }
}

fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or_else(|_| {
        warn!("Unknown log level {:?}, using debug", level);
        LevelFilter::Debug
    })
}
