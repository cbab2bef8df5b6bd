//! Camera sensor descriptions
//!
//! This module handles:
//! - The physical/pixel description of a sensor (this file)
//! - The named table of camera bodies and digital backs (registry.rs)
//! - Reading that table from disk in the background (loader.rs)

pub mod loader;
pub mod registry;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, CalcError, CalcResult};

/// Physical size and pixel dimensions of a camera sensor
///
/// Accepts both the field names below and the camera table's
/// `sensor_w_mm` / `sensor_h_mm` / `sensor_w_px` / `sensor_h_px` keys.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Sensor {
    /// Active area width in millimeters
    #[serde(alias = "sensor_w_mm")]
    pub width_mm: f64,
    /// Active area height in millimeters
    #[serde(alias = "sensor_h_mm")]
    pub height_mm: f64,
    /// Image width in pixels
    #[serde(alias = "sensor_w_px")]
    pub width_px: u32,
    /// Image height in pixels
    #[serde(alias = "sensor_h_px")]
    pub height_px: u32,
}

impl Sensor {
    /// Create a sensor, rejecting zero or negative dimensions
    pub fn new(width_mm: f64, height_mm: f64, width_px: u32, height_px: u32) -> CalcResult<Self> {
        let sensor = Self {
            width_mm,
            height_mm,
            width_px,
            height_px,
        };
        sensor.validate()?;
        Ok(sensor)
    }

    /// Check that every dimension can safely be divided by
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("sensor width (mm)", self.width_mm)?;
        ensure_positive("sensor height (mm)", self.height_mm)?;
        if self.width_px == 0 {
            return Err(CalcError::dimension("sensor width (px)", 0.0));
        }
        if self.height_px == 0 {
            return Err(CalcError::dimension("sensor height (px)", 0.0));
        }
        Ok(())
    }

    /// Pixel aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f64 {
        self.width_px as f64 / self.height_px as f64
    }

    /// Total resolution in megapixels
    pub fn megapixels(&self) -> f64 {
        self.width_px as f64 * self.height_px as f64 / 1_000_000.0
    }
}
