//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.flowpilot/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The resolved motion settings become a [`MotionPreferences`], which plugs
//! into any router coordinator as its transition delegate.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::router::{Transition, TransitionDelegate};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FlowpilotConfig {
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MotionConfig {
    pub animations: Option<bool>,
    pub respect_reduce_motion: Option<bool>,
    pub reduce_motion: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ANIMATIONS: bool = true;
pub const DEFAULT_RESPECT_REDUCE_MOTION: bool = true;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_FILE: &str = "flowpilot.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub animations: bool,
    pub respect_reduce_motion: bool,
    pub reduce_motion: bool,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl ResolvedConfig {
    pub fn motion(&self) -> MotionPreferences {
        MotionPreferences {
            animations: self.animations,
            respect_reduce_motion: self.respect_reduce_motion,
            reduce_motion: self.reduce_motion,
        }
    }
}

/// Settings that only the command line can supply.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub reduce_motion: bool,
    pub no_animations: bool,
    pub log_level: Option<LevelFilter>,
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

/// Returns the path to `~/.flowpilot/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".flowpilot"))
}

/// Returns the path to `~/.flowpilot/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.flowpilot/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FlowpilotConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FlowpilotConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FlowpilotConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<FlowpilotConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(FlowpilotConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FlowpilotConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Flowpilot Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [motion]
# animations = true                  # Or set FLOWPILOT_ANIMATIONS
# respect_reduce_motion = true       # Honour the reduce-motion setting below
# reduce_motion = false              # Or set FLOWPILOT_REDUCE_MOTION / --reduce-motion

# [logging]
# level = "info"                     # "off", "error", "warn", "info", "debug", "trace"
# file = "flowpilot.log"             # Relative paths land in ~/.flowpilot/
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FlowpilotConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &FlowpilotConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Animations: CLI can only turn them off → env → config → default
    let animations = !cli.no_animations
        && env_bool(&env, "FLOWPILOT_ANIMATIONS")
            .or(config.motion.animations)
            .unwrap_or(DEFAULT_ANIMATIONS);

    let respect_reduce_motion = config
        .motion
        .respect_reduce_motion
        .unwrap_or(DEFAULT_RESPECT_REDUCE_MOTION);

    // Reduce motion: CLI → env → config → default
    let reduce_motion = cli.reduce_motion
        || env_bool(&env, "FLOWPILOT_REDUCE_MOTION")
            .or(config.motion.reduce_motion)
            .unwrap_or(false);

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .or_else(|| env("FLOWPILOT_LOG_LEVEL").and_then(|s| parse_level(&s)))
        .or_else(|| config.logging.level.as_deref().and_then(parse_level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default, relative paths under ~/.flowpilot/
    let log_file = env("FLOWPILOT_LOG_FILE")
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        animations,
        respect_reduce_motion,
        reduce_motion,
        log_level,
        log_file: resolve_log_path(&log_file),
    }
}

fn env_bool(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let raw = env(key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("Ignoring {}={:?}: expected a boolean", key, raw);
            None
        }
    }
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().parse() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Ignoring unknown log level {:?}", raw);
            None
        }
    }
}

fn resolve_log_path(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

// ============================================================================
// Motion
// ============================================================================

/// Animation policy derived from configuration.
///
/// A transition animates only if the caller asked for it, animations are on,
/// and reduce-motion is not both set and respected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionPreferences {
    pub animations: bool,
    pub respect_reduce_motion: bool,
    pub reduce_motion: bool,
}

impl MotionPreferences {
    pub fn allows_animation(&self) -> bool {
        self.animations && !(self.respect_reduce_motion && self.reduce_motion)
    }
}

impl Default for MotionPreferences {
    fn default() -> Self {
        Self {
            animations: DEFAULT_ANIMATIONS,
            respect_reduce_motion: DEFAULT_RESPECT_REDUCE_MOTION,
            reduce_motion: false,
        }
    }
}

impl TransitionDelegate for MotionPreferences {
    fn should_animate(&self, _transition: &Transition<'_>, requested: bool) -> bool {
        requested && self.allows_animation()
    }
}
