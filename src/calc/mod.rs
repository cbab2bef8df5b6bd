//! Calculation engine
//!
//! This module handles:
//! - Subject sizes and their normalization to inches (subject.rs)
//! - Pixel footprint, sensor fill and maximum resolution (framing.rs)
//! - Camera distance from the thin-lens relation (distance.rs)
//! - Key light placement and coverage check (lighting.rs)
//!
//! [`calculate`] chains them for one request from the presentation layer.

pub mod distance;
pub mod framing;
pub mod lighting;
pub mod subject;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::error::CalcResult;
use crate::sensor::registry::SensorRegistry;
use crate::sensor::Sensor;
use crate::units::Unit;

use distance::camera_distance;
use framing::{compute_framing, FramingRequest, FramingResult};
use lighting::{place_lights, LightingPlacement, LightingRequest, PlacementRatios};
use subject::Subject;

/// Everything the user enters for one calculation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalculationInput {
    /// Camera body / digital back name in the sensor registry
    pub sensor_id: String,
    pub subject_width: f64,
    pub subject_height: f64,
    /// "mm", "cm" or "inches"
    pub subject_unit: String,
    pub target_ppi: u32,
    pub focal_length_mm: f64,
    pub radius_multiplier: f64,
}

/// Result of a full calculation run
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub sensor_name: String,
    pub sensor: Sensor,
    /// Subject size in inches
    pub subject: Subject,
    pub target_ppi: u32,
    pub focal_length_mm: f64,
    pub radius_multiplier: f64,
    pub framing: FramingResult,
    /// Camera-to-subject distance in inches
    pub distance_inches: f64,
    /// Width of the captured frame in inches
    pub frame_width_in: f64,
    /// Height of the captured frame in inches
    pub frame_height_in: f64,
    pub lighting: LightingPlacement,
}

/// Advisory conditions; the calculation still succeeds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warning {
    /// Subject width overflows the sensor at the requested resolution
    WidthDoesNotFit,
    /// Subject height overflows the sensor at the requested resolution
    HeightDoesNotFit,
    /// Lights do not cover the full captured frame
    InsufficientCoverage { suggested_multiplier: f64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::WidthDoesNotFit => write!(f, "Warning! The object width does not fit in frame."),
            Warning::HeightDoesNotFit => write!(f, "Warning! The object height does not fit in frame."),
            Warning::InsufficientCoverage { suggested_multiplier } => write!(
                f,
                "Warning! Light coverage does not reach the edges of the frame. Try a coverage of at least {:.2}.",
                suggested_multiplier
            ),
        }
    }
}

impl Calculation {
    /// Advisory warnings for the presentation layer, in display order
    pub fn warnings(&self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if !self.framing.width_fits() {
            warnings.push(Warning::WidthDoesNotFit);
        }
        if !self.framing.height_fits() {
            warnings.push(Warning::HeightDoesNotFit);
        }
        if let Some(suggested_multiplier) = self.lighting.min_required_multiplier {
            warnings.push(Warning::InsufficientCoverage { suggested_multiplier });
        }
        warnings
    }
}

/// Run framing, distance and lighting for one request
pub fn calculate(
    registry: &SensorRegistry,
    input: &CalculationInput,
    ratios: &PlacementRatios,
) -> CalcResult<Calculation> {
    let sensor = *registry.get(&input.sensor_id)?;
    let unit: Unit = input.subject_unit.parse()?;
    let subject = Subject::new(input.subject_width, input.subject_height, unit)?;

    let request = FramingRequest::new(sensor, subject, input.target_ppi, input.focal_length_mm)?;
    let framing = compute_framing(&request)?;

    let distance_inches = camera_distance(
        request.focal_length_mm,
        request.subject.width,
        framing.projected_width_mm,
    )?;

    let (frame_width_in, frame_height_in) = framing.captured_frame_in(&sensor)?;

    let lighting = place_lights(
        &LightingRequest {
            subject_width: request.subject.width,
            subject_height: request.subject.height,
            radius_multiplier: input.radius_multiplier,
            camera_distance: distance_inches,
            max_frame_width: frame_width_in,
            max_frame_height: frame_height_in,
        },
        ratios,
    )?;

    if !framing.fits_in_frame {
        warn!(
            camera = %input.sensor_id,
            fill_w = framing.sensor_fill_width_pct,
            fill_h = framing.sensor_fill_height_pct,
            "Subject does not fit in frame"
        );
    }

    debug!(camera = %input.sensor_id, distance = distance_inches, "Calculation complete");

    Ok(Calculation {
        sensor_name: input.sensor_id.clone(),
        sensor,
        subject: request.subject,
        target_ppi: request.target_ppi,
        focal_length_mm: request.focal_length_mm,
        radius_multiplier: input.radius_multiplier,
        framing,
        distance_inches,
        frame_width_in,
        frame_height_in,
        lighting,
    })
}
