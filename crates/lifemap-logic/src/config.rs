//! Tuning for the camera and fog model.
//!
//! Loaded from `map_config.json`, with a builtin copy compiled in and an
//! optional `LIFEMAP_CONFIG` environment override. Every field defaults to
//! the values in [`crate::constants`], so a partial file only overrides
//! what it names.
//!
//! ```
//! use lifemap_logic::config::{validate_config, MapConfig};
//!
//! let config = MapConfig::from_json_str(r#"{ "camera": { "max_scale": 2.5 } }"#).unwrap();
//! assert_eq!(config.camera.max_scale, 2.5);
//! assert_eq!(config.camera.min_scale, 0.4);
//! assert!(validate_config(&config).is_empty());
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::constants::{camera, fog};
use crate::error::ConfigLoadError;

pub const BUILTIN_MAP_CONFIG: &str = include_str!("../../../data/map_config.json");

/// Environment variable naming a config file to load instead of the builtin.
pub const CONFIG_PATH_ENV: &str = "LIFEMAP_CONFIG";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub camera: CameraConfig,
    pub fog: FogConfig,
    /// Seed for node placement and fog draws (None = seeded from entropy).
    pub seed: Option<u64>,
}

/// Camera limits and sensitivities. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_scale: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Scale change per unit of wheel delta.
    pub zoom_factor: f32,
    /// Degrees of rotation per pixel of pointer travel.
    pub rotate_sensitivity: f32,
    pub default_tilt: f32,
    pub min_tilt: f32,
    pub max_tilt: f32,
    pub default_spin: f32,
    pub min_spin: f32,
    pub max_spin: f32,
    pub focus_scale: f32,
    pub focus_tilt: f32,
    pub focus_spin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_scale: camera::DEFAULT_SCALE,
            min_scale: camera::MIN_SCALE,
            max_scale: camera::MAX_SCALE,
            zoom_factor: camera::ZOOM_FACTOR,
            rotate_sensitivity: camera::ROTATE_SENSITIVITY,
            default_tilt: camera::DEFAULT_TILT,
            min_tilt: camera::MIN_TILT,
            max_tilt: camera::MAX_TILT,
            default_spin: camera::DEFAULT_SPIN,
            min_spin: camera::MIN_SPIN,
            max_spin: camera::MAX_SPIN,
            focus_scale: camera::FOCUS_SCALE,
            focus_tilt: camera::FOCUS_TILT,
            focus_spin: camera::FOCUS_SPIN,
        }
    }
}

impl CameraConfig {
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    pub fn clamp_tilt(&self, tilt: f32) -> f32 {
        tilt.clamp(self.min_tilt, self.max_tilt)
    }

    pub fn clamp_spin(&self, spin: f32) -> f32 {
        spin.clamp(self.min_spin, self.max_spin)
    }
}

/// Fog level tuning. All levels are on the 0–100 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    /// Lower bound (inclusive) of the startup draw.
    pub initial_min: u8,
    /// Upper bound (exclusive) of the startup draw.
    pub initial_max: u8,
    pub relief_amount: u8,
    /// Levels strictly above this hide a node's identity.
    pub foggy_threshold: u8,
    /// Levels at or above this draw a fog cloud.
    pub cloud_threshold: u8,
    /// Amount the developer raise/lower controls shift every level by.
    pub dev_step: i32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            initial_min: fog::INITIAL_MIN,
            initial_max: fog::INITIAL_MAX,
            relief_amount: fog::RELIEF_AMOUNT,
            foggy_threshold: fog::FOGGY_THRESHOLD,
            cloud_threshold: fog::CLOUD_THRESHOLD,
            dev_step: fog::DEV_STEP,
        }
    }
}

impl MapConfig {
    pub fn builtin() -> Self {
        serde_json::from_str(BUILTIN_MAP_CONFIG).expect("builtin map config should parse")
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = MapConfig::from_json_str(&contents)?;
        Ok(config)
    }
}

/// Load the config named by `LIFEMAP_CONFIG`, falling back to the builtin.
///
/// Returns the path actually loaded, or `None` for the builtin. A file
/// that fails to load or validate is logged and skipped.
pub fn load_config_from_env() -> (MapConfig, Option<PathBuf>) {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) {
        match MapConfig::from_file(&path) {
            Ok(config) => {
                let errors = validate_config(&config);
                if errors.is_empty() {
                    log::info!("map config loaded from {}", path.display());
                    return (config, Some(path));
                }
                log::warn!(
                    "map config at {} rejected: {:?}",
                    path.display(),
                    errors
                );
            }
            Err(err) => {
                log::warn!("map config load failed: {}", err);
            }
        }
    }

    log::info!("map config loaded from builtin");
    (MapConfig::builtin(), None)
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min_scale` is not positive or exceeds `max_scale`.
    InvalidScaleRange(f32, f32),
    /// A default or focus scale lies outside the scale range.
    ScaleOutOfRange(f32),
    InvalidTiltRange(f32, f32),
    TiltOutOfRange(f32),
    InvalidSpinRange(f32, f32),
    SpinOutOfRange(f32),
    /// A sensitivity is negative or not finite.
    InvalidSensitivity(f32),
    /// Initial fog draw is empty or exceeds the 0–100 scale.
    InvalidInitialFogRange(u8, u8),
    /// A fog threshold exceeds 100.
    FogThresholdOutOfRange(u8),
    /// The developer fog step is not in `1..=100`.
    InvalidDevStep(i32),
}

fn ordered(lo: f32, hi: f32) -> bool {
    lo.is_finite() && hi.is_finite() && lo <= hi
}

/// Validate camera limits alone, returning all errors found.
///
/// A config that passes is safe to clamp against.
pub fn validate_camera_config(cam: &CameraConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !(ordered(cam.min_scale, cam.max_scale) && cam.min_scale > 0.0) {
        errors.push(ConfigError::InvalidScaleRange(cam.min_scale, cam.max_scale));
    } else {
        for scale in [cam.default_scale, cam.focus_scale] {
            if !(cam.min_scale..=cam.max_scale).contains(&scale) {
                errors.push(ConfigError::ScaleOutOfRange(scale));
            }
        }
    }

    if !ordered(cam.min_tilt, cam.max_tilt) {
        errors.push(ConfigError::InvalidTiltRange(cam.min_tilt, cam.max_tilt));
    } else {
        for tilt in [cam.default_tilt, cam.focus_tilt] {
            if !(cam.min_tilt..=cam.max_tilt).contains(&tilt) {
                errors.push(ConfigError::TiltOutOfRange(tilt));
            }
        }
    }

    if !ordered(cam.min_spin, cam.max_spin) {
        errors.push(ConfigError::InvalidSpinRange(cam.min_spin, cam.max_spin));
    } else {
        for spin in [cam.default_spin, cam.focus_spin] {
            if !(cam.min_spin..=cam.max_spin).contains(&spin) {
                errors.push(ConfigError::SpinOutOfRange(spin));
            }
        }
    }

    for sensitivity in [cam.zoom_factor, cam.rotate_sensitivity] {
        if !sensitivity.is_finite() || sensitivity < 0.0 {
            errors.push(ConfigError::InvalidSensitivity(sensitivity));
        }
    }

    errors
}

/// Validate a config, returning all errors found.
pub fn validate_config(config: &MapConfig) -> Vec<ConfigError> {
    let mut errors = validate_camera_config(&config.camera);

    let levels = &config.fog;
    if levels.initial_min >= levels.initial_max || levels.initial_max > fog::MAX_LEVEL + 1 {
        errors.push(ConfigError::InvalidInitialFogRange(
            levels.initial_min,
            levels.initial_max,
        ));
    }
    for threshold in [levels.foggy_threshold, levels.cloud_threshold] {
        if threshold > fog::MAX_LEVEL {
            errors.push(ConfigError::FogThresholdOutOfRange(threshold));
        }
    }
    if !(1..=fog::MAX_LEVEL as i32).contains(&levels.dev_step) {
        errors.push(ConfigError::InvalidDevStep(levels.dev_step));
    }

    errors
}
