//! Application configuration
//!
//! Read once at startup from a JSON file. Every field has a default so the
//! file may be partial or missing entirely.
//!
//! Lookup order for the file:
//! - `COPY_STAND_CONFIG` environment variable
//! - Linux: ~/.config/copy-stand/config.json
//! - macOS: ~/Library/Application Support/copy-stand/config.json
//! - Windows: %APPDATA%\copy-stand\config.json
//!
//! `COPY_STAND_CAMERAS` overrides `cameras_path` from the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::calc::lighting::PlacementRatios;
use crate::error::CalcResult;
use crate::units::Unit;

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "COPY_STAND_CONFIG";

/// Environment variable pointing at an alternative camera table
pub const CAMERAS_ENV: &str = "COPY_STAND_CAMERAS";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Camera table to use instead of the embedded one
    pub cameras_path: Option<PathBuf>,
    /// Lens focal lengths offered in the form (mm)
    pub focal_lengths: Vec<u32>,
    /// Initial form values
    pub defaults: FormDefaults,
    /// Light placement layout
    pub placement: PlacementRatios,
}

/// Values the form starts with
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FormDefaults {
    /// Camera selected at startup; first in the table when unset
    pub camera: Option<String>,
    pub focal_length_mm: u32,
    pub unit: Unit,
    pub subject_width: f64,
    pub subject_height: f64,
    pub target_ppi: u32,
    pub radius_multiplier: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cameras_path: None,
            focal_lengths: vec![24, 45, 50, 55, 85, 90, 100, 105, 110, 120, 135, 150, 200, 240],
            defaults: FormDefaults::default(),
            placement: PlacementRatios::default(),
        }
    }
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            camera: None,
            focal_length_mm: 105,
            unit: Unit::Inches,
            subject_width: 10.0,
            subject_height: 8.0,
            target_ppi: 300,
            radius_multiplier: 1.2,
        }
    }
}

impl AppConfig {
    /// Load the config from the standard location, applying env overrides
    ///
    /// A missing file is not an error; an unreadable or malformed one is
    /// logged and the defaults are used.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
                Self::default()
            }),
            _ => Self::default(),
        };

        if let Some(cameras) = std::env::var_os(CAMERAS_ENV) {
            config.cameras_path = Some(PathBuf::from(cameras));
        }

        config
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> CalcResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_json(json: &str) -> CalcResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.placement.validate()?;
        Ok(config)
    }

    /// Get the path where the config file should be
    fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("copy-stand");
        path.push("config.json");
        Some(path)
    }
}
