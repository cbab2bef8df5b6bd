use crate::error::{ensure_positive, CalcResult};

/// Camera-to-subject distance in inches
///
/// Thin-lens magnification: projected / actual = focal length / distance,
/// so `distance = subject_width * focal_length / projected_width`.
/// Subject width is in inches, focal length and projected width in mm;
/// the mm cancel out and the result is in inches.
pub fn camera_distance(focal_length_mm: f64, subject_width_in: f64, projected_width_mm: f64) -> CalcResult<f64> {
    ensure_positive("focal length (mm)", focal_length_mm)?;
    ensure_positive("subject width", subject_width_in)?;
    // Zero when the requested resolution rounds the subject down to no pixels
    ensure_positive("projected width (mm)", projected_width_mm)?;

    Ok(subject_width_in * focal_length_mm / projected_width_mm)
}
