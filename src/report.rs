//! Plain-text summaries of a calculation
//!
//! These are the blocks the results panel shows next to the diagrams.

use crate::calc::framing::Axis;
use crate::calc::Calculation;
use crate::format::format_measurement;
use crate::units::Measurement;

/// Camera, sensor, lens and distances
pub fn setup_summary(calc: &Calculation) -> String {
    let sensor = &calc.sensor;
    let lights = &calc.lighting;

    [
        format!("Camera: {}", calc.sensor_name),
        format!(
            "Sensor size: {:?} x {:?}mm / {} x {} pixels ({:.1} MP)",
            sensor.width_mm,
            sensor.height_mm,
            sensor.width_px,
            sensor.height_px,
            sensor.megapixels()
        ),
        format!("Focal length: {}mm", calc.focal_length_mm),
        format!(
            "Camera distance: {}",
            format_measurement(&Measurement::from_inches(calc.distance_inches))
        ),
        format!(
            "Lights distance x: {}",
            format_measurement(&Measurement::from_inches(lights.light1.x))
        ),
        format!(
            "Lights distance y: {}",
            format_measurement(&Measurement::from_inches(lights.light1.y))
        ),
    ]
    .join("\n")
}

/// Sensor usage and resolution figures
pub fn resolution_summary(calc: &Calculation) -> String {
    let framing = &calc.framing;
    let axis = match framing.binding_axis {
        Axis::Width => "width",
        Axis::Height => "height",
    };

    [
        format!(
            "Using {:.2}% of sensor's width and {:.2}% of height",
            framing.sensor_fill_width_pct, framing.sensor_fill_height_pct
        ),
        format!("MAX PPI: {} (limited by {})", framing.max_ppi, axis),
        format!("5% Fit PPI: {:.2}", framing.margin_ppi),
        format!(
            "Dimensions: {} x {} pixels",
            framing.pixel_width, framing.pixel_height
        ),
        format!("PPI: {:.2}", framing.effective_ppi),
    ]
    .join("\n")
}
