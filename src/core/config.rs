//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wayfare/config.toml` (or `$WAYFARE_CONFIG`). If missing
//! on first run, a commented-out default is generated so users can discover
//! every option, including the rate table.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::interpolator::{DEFAULT_ANIMATION_DURATION, DEFAULT_FRAME_RATE};
use crate::core::pricing::PricingTable;
use crate::core::trip::{TripConfiguration, clamp_duration_days};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WayfareConfig {
    #[serde(default)]
    pub trip: TripDefaults,
    #[serde(default)]
    pub pricing: PricingOverrides,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TripDefaults {
    pub destination: Option<String>,
    pub duration_days: Option<i64>,
    pub include_flights: Option<bool>,
    pub include_hotel: Option<bool>,
    pub hotel_tier: Option<u8>,
    pub include_ground_transport: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PricingOverrides {
    pub base_daily_rate: Option<u64>,
    pub flight_flat_fee: Option<u64>,
    pub ground_transport_daily_rate: Option<u64>,
    /// Keyed by star rating as a string (`"3" = 80`); TOML keys are always strings.
    pub hotel_daily_rates: Option<BTreeMap<String, u64>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnimationConfig {
    pub duration_ms: Option<u64>,
    pub frame_rate: Option<u32>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub trip: TripConfiguration,
    pub table: PricingTable,
    pub animation_duration: Duration,
    pub frame_rate: u32,
}

/// Values that came in on the command line. `None` = not given.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub destination: Option<String>,
    pub duration_days: Option<i64>,
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

/// `$WAYFARE_CONFIG` if set, else `~/.wayfare/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    std::env::var("WAYFARE_CONFIG")
        .ok()
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".wayfare").join("config.toml")))
}

/// Load config from the default location. See `load_config_from`.
pub fn load_config() -> Result<WayfareConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(WayfareConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WayfareConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<WayfareConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WayfareConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WayfareConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Wayfare Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [trip]
# destination = "Jaipur"
# duration_days = 7                  # 1 to 30
# include_flights = true
# include_hotel = true
# hotel_tier = 3                     # 3, 4 or 5 stars
# include_ground_transport = false

# [pricing]
# base_daily_rate = 50
# flight_flat_fee = 400
# ground_transport_daily_rate = 40

# [pricing.hotel_daily_rates]
# "3" = 80
# "4" = 150
# "5" = 250

# [animation]
# duration_ms = 800                  # Or set WAYFARE_ANIMATION_MS
# frame_rate = 60                    # Or set WAYFARE_FRAME_RATE
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WayfareConfig, cli: &CliOverrides) -> ResolvedConfig {
    let defaults = TripConfiguration::default();
    let file = &config.trip;

    let trip = TripConfiguration {
        destination: cli
            .destination
            .clone()
            .or_else(|| file.destination.clone())
            .unwrap_or(defaults.destination),
        duration_days: cli
            .duration_days
            .or(file.duration_days)
            .map(clamp_duration_days)
            .unwrap_or(defaults.duration_days),
        include_flights: file.include_flights.unwrap_or(defaults.include_flights),
        include_hotel: file.include_hotel.unwrap_or(defaults.include_hotel),
        hotel_tier: file.hotel_tier.unwrap_or(defaults.hotel_tier),
        include_ground_transport: file
            .include_ground_transport
            .unwrap_or(defaults.include_ground_transport),
    };

    // Animation: env → config → default
    let duration_ms = env_number::<u64>("WAYFARE_ANIMATION_MS").or(config.animation.duration_ms);
    let frame_rate = env_number::<u32>("WAYFARE_FRAME_RATE")
        .or(config.animation.frame_rate)
        .unwrap_or(DEFAULT_FRAME_RATE)
        .max(1);

    ResolvedConfig {
        trip,
        table: resolve_table(&config.pricing),
        animation_duration: duration_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ANIMATION_DURATION),
        frame_rate,
    }
}

/// Layers the file's rate overrides on top of the standard table.
fn resolve_table(pricing: &PricingOverrides) -> PricingTable {
    let mut table = PricingTable::default();
    if let Some(rate) = pricing.base_daily_rate {
        table.base_daily_rate = rate;
    }
    if let Some(fee) = pricing.flight_flat_fee {
        table.flight_flat_fee = fee;
    }
    if let Some(rate) = pricing.ground_transport_daily_rate {
        table.ground_transport_daily_rate = rate;
    }
    if let Some(ref rates) = pricing.hotel_daily_rates {
        for (key, rate) in rates {
            match key.trim().parse::<u8>() {
                Ok(tier) => {
                    table.hotel_daily_rate_by_tier.insert(tier, *rate);
                }
                Err(_) => warn!("Ignoring hotel rate with non-numeric tier '{}'", key),
            }
        }
    }
    table
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a number", name, raw);
            None
        }
    }
}
