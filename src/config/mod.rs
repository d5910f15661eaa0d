use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::gesture::GestureConfig;

const APP_DIR: &str = "presslock";
const APP_CONFIG_FILE: &str = "config.json";
const MAX_RETURN_ANIMATION_MS: u64 = 10_000;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read config: {path}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("failed to parse config")]
    ParseConfig(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// Raw `config.json` contents; every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub travel_fraction: Option<f64>,
    pub lock_tolerance: Option<f64>,
    pub return_animation_ms: Option<u64>,
    pub shimmer_period_ms: Option<u64>,
    pub element_diameter: Option<f64>,
}

/// Resolved settings for the gesture core and the frontend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub gesture: GestureConfig,
    pub shimmer_period: Duration,
    pub element_diameter: f64,
}

impl AppConfig {
    pub const DEFAULT_SHIMMER_PERIOD: Duration = Duration::from_millis(1500);
    pub const DEFAULT_ELEMENT_DIAMETER: f64 = 100.0;

    /// Invalid fields fall back to their defaults one by one.
    pub fn from_file(file: &ConfigFile) -> Self {
        Self::resolve(file, false).unwrap_or_default()
    }

    /// Like [`AppConfig::from_file`] but rejects the first invalid field.
    pub fn try_from_file(file: &ConfigFile) -> ConfigResult<Self> {
        Self::resolve(file, true)
    }

    fn resolve(file: &ConfigFile, strict: bool) -> ConfigResult<Self> {
        let defaults = Self::default();
        let travel_fraction = resolve_field(
            "travel_fraction",
            file.travel_fraction,
            defaults.gesture.travel_fraction,
            validate_travel_fraction,
            strict,
        )?;
        let lock_tolerance = resolve_field(
            "lock_tolerance",
            file.lock_tolerance,
            defaults.gesture.lock_tolerance,
            validate_lock_tolerance,
            strict,
        )?;
        let return_duration = resolve_field(
            "return_animation_ms",
            file.return_animation_ms,
            defaults.gesture.return_duration,
            validate_return_animation,
            strict,
        )?;
        let shimmer_period = resolve_field(
            "shimmer_period_ms",
            file.shimmer_period_ms,
            defaults.shimmer_period,
            validate_shimmer_period,
            strict,
        )?;
        let element_diameter = resolve_field(
            "element_diameter",
            file.element_diameter,
            defaults.element_diameter,
            validate_element_diameter,
            strict,
        )?;

        Ok(Self {
            gesture: GestureConfig {
                travel_fraction,
                lock_tolerance,
                return_duration,
            },
            shimmer_period,
            element_diameter,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            shimmer_period: Self::DEFAULT_SHIMMER_PERIOD,
            element_diameter: Self::DEFAULT_ELEMENT_DIAMETER,
        }
    }
}

fn resolve_field<R, T>(
    field: &'static str,
    raw: Option<R>,
    default: T,
    validate: fn(R) -> Result<T, &'static str>,
    strict: bool,
) -> ConfigResult<T> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match validate(raw) {
        Ok(value) => Ok(value),
        Err(reason) => {
            let err = ConfigError::InvalidValue { field, reason };
            if strict {
                return Err(err);
            }
            tracing::warn!(%err, "ignoring config value; using default");
            Ok(default)
        }
    }
}

fn validate_travel_fraction(value: f64) -> Result<f64, &'static str> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err("must be within (0, 1]")
    }
}

fn validate_lock_tolerance(value: f64) -> Result<f64, &'static str> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err("must be a non-negative number")
    }
}

fn validate_return_animation(ms: u64) -> Result<Duration, &'static str> {
    if ms <= MAX_RETURN_ANIMATION_MS {
        Ok(Duration::from_millis(ms))
    } else {
        Err("must be at most 10000 ms")
    }
}

fn validate_shimmer_period(ms: u64) -> Result<Duration, &'static str> {
    if ms > 0 {
        Ok(Duration::from_millis(ms))
    } else {
        Err("must be greater than zero")
    }
}

fn validate_element_diameter(value: f64) -> Result<f64, &'static str> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err("must be a positive number")
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    match read_config_file(xdg_config_home, home) {
        Ok(Some(file)) => AppConfig::from_file(&file),
        Ok(None) => AppConfig::default(),
        Err(err) => {
            tracing::warn!(%err, "failed to load config.json; using defaults");
            AppConfig::default()
        }
    }
}

/// Strict variant used by `--check-config`: any read, parse or value error
/// is returned instead of being replaced by defaults.
pub fn check_app_config() -> ConfigResult<AppConfig> {
    let (xdg_config_home, home) = config_env_dirs();
    check_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn check_app_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<AppConfig> {
    match read_config_file(xdg_config_home, home)? {
        Some(file) => AppConfig::try_from_file(&file),
        None => Ok(AppConfig::default()),
    }
}

/// `Ok(None)` when no config file exists.
pub fn read_config_file(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<Option<ConfigFile>> {
    let path = app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home)?;
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    let file = parse_config(&contents)?;
    tracing::info!(?path, "loaded config");
    Ok(Some(file))
}

pub fn parse_config(contents: &str) -> ConfigResult<ConfigFile> {
    Ok(serde_json::from_str(contents)?)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<PathBuf> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(xdg_config_home: Option<&Path>, home: Option<&Path>) -> ConfigResult<PathBuf> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
