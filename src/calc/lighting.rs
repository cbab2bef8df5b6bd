//! Two-light symmetric placement
//!
//! Lights sit left and right of the camera axis at a fixed ratio of the
//! coverage radius. This is a layout heuristic for a copy stand, not an
//! illumination model: the numbers give a consistent triangle between
//! subject, camera and lights that scales with the artwork.

use cgmath::Point2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ensure_non_negative, ensure_positive, CalcError, CalcResult};

/// Smallest allowed coverage multiplier
pub const MIN_RADIUS_MULTIPLIER: f64 = 1.0;

/// Granularity of the suggested multiplier (0.05)
const MULTIPLIER_STEPS_PER_UNIT: f64 = 20.0;

/// Absorbs float noise when the required multiplier is already on a step
const STEP_SLACK: f64 = 1e-9;

/// Largest step count at which adding one step still changes the value (2^53)
const MAX_EXACT_STEPS: f64 = 9_007_199_254_740_992.0;

/// Extra steps tried when float rounding leaves the radius just short
const MAX_GUARD_STEPS: u32 = 3;

/// Light position as multiples of the coverage radius
///
/// The default (2.5 across, 2.0 out, coverage checked) is the standard
/// layout. Other layouts only change these numbers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PlacementRatios {
    /// Horizontal offset of each light from the centerline
    pub lateral: f64,
    /// Distance of the lights out from the subject plane
    pub depth: f64,
    /// Whether to check that the radius covers the whole captured frame
    pub check_coverage: bool,
}

impl Default for PlacementRatios {
    fn default() -> Self {
        Self {
            lateral: 2.5,
            depth: 2.0,
            check_coverage: true,
        }
    }
}

impl PlacementRatios {
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("lateral placement ratio", self.lateral)?;
        ensure_positive("depth placement ratio", self.depth)?;
        Ok(())
    }
}

/// Inputs for a lighting calculation (all lengths in inches)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingRequest {
    pub subject_width: f64,
    pub subject_height: f64,
    pub radius_multiplier: f64,
    pub camera_distance: f64,
    /// Physical width the camera captures at the achieved resolution
    pub max_frame_width: f64,
    /// Physical height the camera captures at the achieved resolution
    pub max_frame_height: f64,
}

impl LightingRequest {
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("subject width", self.subject_width)?;
        ensure_non_negative("subject height", self.subject_height)?;
        if !(self.radius_multiplier.is_finite() && self.radius_multiplier >= MIN_RADIUS_MULTIPLIER) {
            return Err(CalcError::dimension("coverage multiplier", self.radius_multiplier));
        }
        ensure_positive("camera distance", self.camera_distance)?;
        ensure_non_negative("frame width", self.max_frame_width)?;
        ensure_non_negative("frame height", self.max_frame_height)?;
        Ok(())
    }
}

/// Where the two lights go and whether they cover the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingPlacement {
    pub coverage_radius: f64,
    /// Right-hand light
    pub light1: Point2<f64>,
    /// Left-hand light, mirror of `light1` across the camera axis
    pub light2: Point2<f64>,
    pub feasible: bool,
    /// Smallest multiplier (0.05 steps) that covers the frame; advisory only
    pub min_required_multiplier: Option<f64>,
}

/// Compute the light placement for a request
pub fn place_lights(request: &LightingRequest, ratios: &PlacementRatios) -> CalcResult<LightingPlacement> {
    request.validate()?;
    ratios.validate()?;

    let coverage_radius = coverage_radius(request.subject_width, request.radius_multiplier);

    let light1 = Point2::new(coverage_radius * ratios.lateral, coverage_radius * ratios.depth);
    let light2 = Point2::new(-light1.x, light1.y);

    let half_frame = request.max_frame_width / 2.0;
    let feasible = !ratios.check_coverage || coverage_radius >= half_frame;

    let min_required_multiplier = if feasible {
        None
    } else {
        let suggested = min_required_multiplier(request.subject_width, request.max_frame_width)?;
        warn!(
            radius = coverage_radius,
            half_frame,
            suggested_multiplier = suggested,
            "Light coverage does not reach the frame edges"
        );
        Some(suggested)
    };

    debug!(radius = coverage_radius, x = light1.x, y = light1.y, feasible, "Placed lights");

    Ok(LightingPlacement {
        coverage_radius,
        light1,
        light2,
        feasible,
        min_required_multiplier,
    })
}

/// Half-width of the area the lights are presumed to cover
#[inline]
pub fn coverage_radius(subject_width: f64, radius_multiplier: f64) -> f64 {
    subject_width * radius_multiplier / 2.0
}

/// Smallest multiplier on the 0.05 grid whose radius covers `max_frame_width`
///
/// Closed form of `frame / subject` rounded up to the next step. A float
/// result a hair under the target gets at most `MAX_GUARD_STEPS` extra steps.
/// Step counts past 2^53 can no longer be incremented, so they are rejected.
fn min_required_multiplier(subject_width: f64, max_frame_width: f64) -> CalcResult<f64> {
    let half_frame = max_frame_width / 2.0;
    let exact = max_frame_width / subject_width;

    let mut steps = (exact * MULTIPLIER_STEPS_PER_UNIT - STEP_SLACK).ceil();
    if !steps.is_finite() || steps > MAX_EXACT_STEPS {
        return Err(CalcError::dimension("frame width", max_frame_width));
    }

    for _ in 0..MAX_GUARD_STEPS {
        if coverage_radius(subject_width, steps / MULTIPLIER_STEPS_PER_UNIT) >= half_frame {
            return Ok(steps / MULTIPLIER_STEPS_PER_UNIT);
        }
        steps += 1.0;
    }

    Err(CalcError::dimension("frame width", max_frame_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(subject_width: f64, multiplier: f64, frame_width: f64) -> LightingRequest {
        LightingRequest {
            subject_width,
            subject_height: 8.0,
            radius_multiplier: multiplier,
            camera_distance: 80.0,
            max_frame_width: frame_width,
            max_frame_height: frame_width * 2.0 / 3.0,
        }
    }

    #[test]
    fn test_default_placement() {
        let placement = place_lights(&request(10.0, 1.2, 12.0), &PlacementRatios::default()).unwrap();

        assert!((placement.coverage_radius - 6.0).abs() < 1e-12);
        assert!((placement.light1.x - 15.0).abs() < 1e-12);
        assert!((placement.light1.y - 12.0).abs() < 1e-12);
        assert_eq!(placement.light2, Point2::new(-placement.light1.x, placement.light1.y));
        assert!(placement.feasible);
        assert_eq!(placement.min_required_multiplier, None);
    }

    #[test]
    fn test_insufficient_coverage() {
        // radius 5 < half frame 10
        let placement = place_lights(&request(10.0, 1.0, 20.0), &PlacementRatios::default()).unwrap();

        assert!((placement.coverage_radius - 5.0).abs() < 1e-12);
        assert!(!placement.feasible);
        assert_eq!(placement.min_required_multiplier, Some(2.0));
    }

    #[test]
    fn test_suggestion_rounds_up_to_step() {
        // 27.52 / 10 = 2.752 -> 2.8
        let placement = place_lights(&request(10.0, 1.2, 27.52), &PlacementRatios::default()).unwrap();
        let suggested = placement.min_required_multiplier.unwrap();
        assert!((suggested - 2.8).abs() < 1e-9);
    }

    #[test]
    fn test_suggestion_makes_layout_feasible() {
        let ratios = PlacementRatios::default();
        for (width, multiplier, frame) in [(10.0, 1.0, 20.0), (7.3, 1.2, 27.52), (3.0, 1.95, 41.0), (13.37, 1.0, 13.5)] {
            let first = place_lights(&request(width, multiplier, frame), &ratios).unwrap();
            assert!(!first.feasible);

            let suggested = first.min_required_multiplier.unwrap();
            assert!(suggested > multiplier);

            let second = place_lights(&request(width, suggested, frame), &ratios).unwrap();
            assert!(second.feasible, "{} x {} over {}", width, suggested, frame);
        }
    }

    #[test]
    fn test_feasible_iff_radius_covers_half_frame() {
        let ratios = PlacementRatios::default();
        for frame in [5.0, 10.0, 11.99, 12.0, 12.01, 30.0] {
            let placement = place_lights(&request(10.0, 1.2, frame), &ratios).unwrap();
            assert_eq!(placement.feasible, placement.coverage_radius >= frame / 2.0, "frame {}", frame);
        }
    }

    #[test]
    fn test_custom_ratios_without_coverage_check() {
        let ratios = PlacementRatios {
            lateral: 2.0,
            depth: 3.0,
            check_coverage: false,
        };
        let placement = place_lights(&request(10.0, 1.0, 100.0), &ratios).unwrap();
        assert_eq!(placement.light1, Point2::new(10.0, 15.0));
        assert!(placement.feasible);
        assert_eq!(placement.min_required_multiplier, None);
    }

    #[test]
    fn test_zero_subject_width_rejected() {
        let err = place_lights(&request(0.0, 1.2, 20.0), &PlacementRatios::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDimension { field: "subject width", .. }));
    }

    #[test]
    fn test_multiplier_below_one_rejected() {
        let err = place_lights(&request(10.0, 0.99, 20.0), &PlacementRatios::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDimension { field: "coverage multiplier", .. }));
    }

    #[test]
    fn test_suggestion_out_of_float_range_fails() {
        // 5.5e7 / 2.2e-9 needs more 0.05 steps than an f64 can count exactly
        let err = place_lights(&request(2.2e-9, 1.0, 5.5e7), &PlacementRatios::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDimension { field: "frame width", .. }));
    }

    #[test]
    fn test_large_but_exact_suggestion() {
        let placement = place_lights(&request(1.0, 1.0, 1.0e6), &PlacementRatios::default()).unwrap();
        let suggested = placement.min_required_multiplier.unwrap();
        assert!((suggested - 1.0e6).abs() < 1e-6);

        let second = place_lights(&request(1.0, suggested, 1.0e6), &PlacementRatios::default()).unwrap();
        assert!(second.feasible);
    }

    #[test]
    fn test_ratios_deserialize_with_defaults() {
        let ratios: PlacementRatios = serde_json::from_str(r#"{"lateral": 3.0}"#).unwrap();
        assert_eq!(ratios.lateral, 3.0);
        assert_eq!(ratios.depth, 2.0);
        assert!(ratios.check_coverage);
    }
}
