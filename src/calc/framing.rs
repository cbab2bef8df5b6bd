//! Sensor framing calculations
//!
//! Maps a requested print resolution back onto the physical sensor:
//! how many pixels the subject needs, how many millimeters of the sensor
//! that footprint covers, and the highest resolution the sensor can reach
//! before the subject overflows the frame.

use tracing::debug;

use super::subject::Subject;
use crate::error::{ensure_positive, CalcError, CalcResult};
use crate::sensor::Sensor;

/// Lowest resolution accepted for a request (ppi)
pub const MIN_PPI: u32 = 72;

/// Highest resolution accepted for a request (ppi)
pub const MAX_PPI: u32 = 3200;

/// Share of the frame left free by the "fit" resolution
pub const FIT_MARGIN: f64 = 0.05;

/// Sensor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

/// Inputs for one framing calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingRequest {
    pub sensor: Sensor,
    /// Subject size, always in inches
    pub subject: Subject,
    pub target_ppi: u32,
    pub focal_length_mm: f64,
}

impl FramingRequest {
    /// Build a validated request; the subject is normalized to inches
    pub fn new(sensor: Sensor, subject: Subject, target_ppi: u32, focal_length_mm: f64) -> CalcResult<Self> {
        let request = Self {
            sensor,
            subject: subject.to_inches(),
            target_ppi,
            focal_length_mm,
        };
        request.validate()?;
        Ok(request)
    }

    /// Check every precondition of [`compute_framing`]
    pub fn validate(&self) -> CalcResult<()> {
        self.sensor.validate()?;
        self.subject.to_inches().ensure_measurable()?;
        if !(MIN_PPI..=MAX_PPI).contains(&self.target_ppi) {
            return Err(CalcError::dimension("target ppi", self.target_ppi as f64));
        }
        ensure_positive("focal length (mm)", self.focal_length_mm)?;
        Ok(())
    }
}

/// Everything derived from a framing request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingResult {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Width of the subject's pixel footprint on the sensor
    pub projected_width_mm: f64,
    /// Height of the subject's pixel footprint on the sensor
    pub projected_height_mm: f64,
    /// Resolution actually achieved after truncating to whole pixels
    pub effective_ppi: f64,
    pub sensor_fill_width_pct: f64,
    pub sensor_fill_height_pct: f64,
    /// Highest whole ppi before the subject exceeds the frame
    pub max_ppi: u32,
    /// Axis that limits `max_ppi`
    pub binding_axis: Axis,
    /// Unrounded maximum ppi with a 5% margin left around the subject
    pub margin_ppi: f64,
    pub fits_in_frame: bool,
}

impl FramingResult {
    /// Physical width and height (inches) of the whole captured frame
    ///
    /// This is the area the camera actually sees at the achieved resolution,
    /// used to check light coverage.
    pub fn captured_frame_in(&self, sensor: &Sensor) -> CalcResult<(f64, f64)> {
        let ppi = ensure_positive("effective ppi", self.effective_ppi)?;
        Ok((sensor.width_px as f64 / ppi, sensor.height_px as f64 / ppi))
    }

    pub fn width_fits(&self) -> bool {
        self.sensor_fill_width_pct <= 100.0
    }

    pub fn height_fits(&self) -> bool {
        self.sensor_fill_height_pct <= 100.0
    }
}

/// Run the framing calculation
pub fn compute_framing(request: &FramingRequest) -> CalcResult<FramingResult> {
    request.validate()?;

    let sensor = &request.sensor;
    let subject = request.subject.to_inches();
    let ppi = request.target_ppi as f64;

    // Truncate, never round: a partial pixel is not captured
    let pixel_width = whole_pixels("subject width", ppi * subject.width, subject.width)?;
    let pixel_height = whole_pixels("subject height", ppi * subject.height, subject.height)?;

    let projected_width_mm = sensor.width_mm * pixel_width as f64 / sensor.width_px as f64;
    let projected_height_mm = sensor.height_mm * pixel_height as f64 / sensor.height_px as f64;

    let effective_ppi = pixel_width as f64 / subject.width;

    let sensor_fill_width_pct = projected_width_mm / sensor.width_mm * 100.0;
    let sensor_fill_height_pct = projected_height_mm / sensor.height_mm * 100.0;

    let (binding_axis, exact_max_ppi) = binding_max_ppi(sensor, &subject);
    let max_ppi = match binding_axis {
        Axis::Width => whole_pixels("subject width", exact_max_ppi, subject.width)?,
        Axis::Height => whole_pixels("subject height", exact_max_ppi, subject.height)?,
    };

    let result = FramingResult {
        pixel_width,
        pixel_height,
        projected_width_mm,
        projected_height_mm,
        effective_ppi,
        sensor_fill_width_pct,
        sensor_fill_height_pct,
        max_ppi,
        binding_axis,
        margin_ppi: exact_max_ppi * (1.0 - FIT_MARGIN),
        fits_in_frame: sensor_fill_width_pct <= 100.0 && sensor_fill_height_pct <= 100.0,
    };

    debug!(
        pixels = %format!("{}x{}", pixel_width, pixel_height),
        fill_w = sensor_fill_width_pct,
        fill_h = sensor_fill_height_pct,
        max_ppi = result.max_ppi,
        "Computed framing"
    );

    Ok(result)
}

/// Truncate a count to a whole `u32`, rejecting the subject dimension behind it
/// when the count does not fit
fn whole_pixels(field: &'static str, count: f64, dimension: f64) -> CalcResult<u32> {
    let whole = count.floor();
    if !(whole.is_finite() && whole <= u32::MAX as f64) {
        return Err(CalcError::dimension(field, dimension));
    }
    Ok(whole as u32)
}

/// Pick the binding axis by comparing the subject's shape to the sensor's
///
/// A subject wider than the sensor's aspect ratio runs out of width pixels
/// first; otherwise height is the limit.
fn binding_max_ppi(sensor: &Sensor, subject: &Subject) -> (Axis, f64) {
    if subject.width >= subject.height * sensor.aspect_ratio() {
        (Axis::Width, sensor.width_px as f64 / subject.width)
    } else {
        (Axis::Height, sensor.height_px as f64 / subject.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Unit;

    fn full_frame() -> Sensor {
        Sensor::new(36.0, 24.0, 8256, 5504).unwrap()
    }

    fn request(width: f64, height: f64, ppi: u32) -> FramingRequest {
        FramingRequest::new(full_frame(), Subject::inches(width, height).unwrap(), ppi, 105.0).unwrap()
    }

    #[test]
    fn test_ten_by_eight_at_300() {
        let result = compute_framing(&request(10.0, 8.0, 300)).unwrap();

        assert_eq!(result.pixel_width, 3000);
        assert_eq!(result.pixel_height, 2400);
        assert!((result.projected_width_mm - 13.0814).abs() < 1e-3);
        assert!((result.projected_height_mm - 24.0 * 2400.0 / 5504.0).abs() < 1e-9);
        assert!((result.effective_ppi - 300.0).abs() < 1e-9);
        assert!(result.fits_in_frame);
    }

    #[test]
    fn test_fill_percentages() {
        let result = compute_framing(&request(10.0, 8.0, 300)).unwrap();
        assert!((result.sensor_fill_width_pct - 3000.0 / 8256.0 * 100.0).abs() < 1e-9);
        assert!((result.sensor_fill_height_pct - 2400.0 / 5504.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixels_truncate() {
        // 300 * 10.005 = 3001.5 -> 3001, not 3002
        let result = compute_framing(&request(10.005, 8.0, 300)).unwrap();
        assert_eq!(result.pixel_width, 3001);
        assert!(result.effective_ppi < 300.0);
    }

    #[test]
    fn test_wide_subject_binds_on_width() {
        let result = compute_framing(&request(12.0, 8.0, 300)).unwrap();
        assert_eq!(result.binding_axis, Axis::Width);
        assert_eq!(result.max_ppi, 688);
        assert!((result.margin_ppi - 688.0 * 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_tall_subject_binds_on_height() {
        let result = compute_framing(&request(8.0, 10.0, 300)).unwrap();
        assert_eq!(result.binding_axis, Axis::Height);
        assert_eq!(result.max_ppi, 550);
    }

    #[test]
    fn test_binding_axis_is_the_smaller_limit() {
        let sensor = full_frame();
        for (w, h) in [(10.0, 8.0), (12.0, 8.0), (8.0, 12.0), (30.0, 4.0), (4.0, 30.0), (17.3, 11.9)] {
            let max = compute_framing(&request(w, h, 300)).unwrap().max_ppi;
            let by_width = (sensor.width_px as f64 / w).floor() as u32;
            let by_height = (sensor.height_px as f64 / h).floor() as u32;
            assert_eq!(max, by_width.min(by_height), "subject {}x{}", w, h);
        }
    }

    #[test]
    fn test_does_not_fit() {
        // 12 in at 800 ppi needs 9600 px, more than the 8256 available
        let result = compute_framing(&request(12.0, 8.0, 800)).unwrap();
        assert!(result.sensor_fill_width_pct > 100.0);
        assert!(!result.width_fits());
        assert!(!result.fits_in_frame);
    }

    #[test]
    fn test_fits_iff_both_fills_within_sensor() {
        for ppi in [72, 300, 600, 688, 689, 1000, 3200] {
            let result = compute_framing(&request(12.0, 8.0, ppi)).unwrap();
            let over = result.sensor_fill_width_pct > 100.0 || result.sensor_fill_height_pct > 100.0;
            assert_eq!(result.fits_in_frame, !over, "ppi {}", ppi);
        }
    }

    #[test]
    fn test_effective_ppi_monotonic() {
        let mut previous = 0.0;
        for ppi in (MIN_PPI..=MAX_PPI).step_by(37) {
            let result = compute_framing(&request(9.37, 6.11, ppi)).unwrap();
            assert!(result.effective_ppi >= previous);
            previous = result.effective_ppi;
        }
    }

    #[test]
    fn test_metric_subject_is_normalized() {
        let subject = Subject::new(254.0, 203.2, Unit::Mm).unwrap();
        let request = FramingRequest::new(full_frame(), subject, 300, 105.0).unwrap();
        assert_eq!(request.subject.unit, Unit::Inches);
        assert!((request.subject.width - 254.0 * 0.0393701).abs() < 1e-12);
    }

    #[test]
    fn test_zero_width_rejected() {
        let subject = Subject::inches(0.0, 8.0).unwrap();
        let err = FramingRequest::new(full_frame(), subject, 300, 105.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDimension { field: "subject width", .. }));
    }

    #[test]
    fn test_unvalidated_request_still_checked() {
        let request = FramingRequest {
            sensor: full_frame(),
            subject: Subject { width: 10.0, height: 0.0, unit: Unit::Inches },
            target_ppi: 300,
            focal_length_mm: 105.0,
        };
        assert!(compute_framing(&request).is_err());
    }

    #[test]
    fn test_ppi_range() {
        let subject = Subject::inches(10.0, 8.0).unwrap();
        assert!(FramingRequest::new(full_frame(), subject, 71, 105.0).is_err());
        assert!(FramingRequest::new(full_frame(), subject, 3201, 105.0).is_err());
        assert!(FramingRequest::new(full_frame(), subject, 72, 105.0).is_ok());
    }

    #[test]
    fn test_pixel_count_beyond_u32_rejected() {
        // 2e6 in at 3200 ppi is 6.4e9 px
        let err = compute_framing(&request(2.0e6, 8.0, 3200)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDimension { field: "subject width", .. }));

        let err = compute_framing(&request(8.0, 2.0e6, 3200)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDimension { field: "subject height", .. }));
    }

    #[test]
    fn test_largest_countable_subject_is_exact() {
        // 1.3e6 in at 3200 ppi is 4.16e9 px, still below u32::MAX
        let result = compute_framing(&request(1.3e6, 8.0, 3200)).unwrap();
        assert_eq!(result.pixel_width, 4_160_000_000);
        assert!((result.effective_ppi - 3200.0).abs() < 1e-6);
    }

    #[test]
    fn test_captured_frame() {
        let result = compute_framing(&request(10.0, 8.0, 300)).unwrap();
        let (w, h) = result.captured_frame_in(&full_frame()).unwrap();
        assert!((w - 8256.0 / 300.0).abs() < 1e-9);
        assert!((h - 5504.0 / 300.0).abs() < 1e-9);
    }
}
