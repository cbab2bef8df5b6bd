//! Human readable rendering of lengths
//!
//! Example output: "4088.90 mm / 408.89 cm / 160.98 in / 13 ft 4 49/50 in"

use crate::units::Measurement;

/// Hundredths of an inch in one foot
const HUNDREDTHS_PER_FOOT: u64 = 1200;

/// Hundredths of an inch in one inch
const HUNDREDTHS_PER_INCH: u64 = 100;

/// Render a measurement as "<mm> mm / <cm> cm / <in> in / <ft> ft <in> <fraction> in"
pub fn format_measurement(measurement: &Measurement) -> String {
    format!(
        "{:.2} mm / {:.2} cm / {:.2} in / {}",
        measurement.mm,
        measurement.cm,
        measurement.inches,
        feet_and_inches(measurement.inches),
    )
}

/// Render a length in inches as feet, whole inches and a vulgar fraction
///
/// The length is rounded to the nearest hundredth first, so a remainder
/// such as 0.996 carries into the next whole inch (and foot) instead of
/// showing up as a "1" fraction. Whether a fraction is shown at all depends
/// on the unrounded remainder rounding to a nonzero tenth.
pub fn feet_and_inches(inches: f64) -> String {
    let hundredths = (inches.abs() * 100.0).round() as u64;
    let feet = hundredths / HUNDREDTHS_PER_FOOT;
    let remainder = hundredths % HUNDREDTHS_PER_FOOT;
    let whole_inches = remainder / HUNDREDTHS_PER_INCH;
    let fraction = remainder % HUNDREDTHS_PER_INCH;

    let nonzero_tenth = (inches.abs().fract() * 10.0).round() > 0.0;

    let mut inch_parts = Vec::new();
    if whole_inches > 0 {
        inch_parts.push(whole_inches.to_string());
    }
    if nonzero_tenth && fraction > 0 {
        inch_parts.push(vulgar_fraction(fraction, HUNDREDTHS_PER_INCH));
    }

    let sign = if inches < 0.0 && hundredths > 0 { "-" } else { "" };
    let body = match (feet, inch_parts.is_empty()) {
        (0, true) => "0 in".to_string(),
        (0, false) => format!("{} in", inch_parts.join(" ")),
        (_, true) => format!("{} ft", feet),
        (_, false) => format!("{} ft {} in", feet, inch_parts.join(" ")),
    };

    format!("{}{}", sign, body)
}

/// Reduce `numerator/denominator` and render it as "n/d"
fn vulgar_fraction(numerator: u64, denominator: u64) -> String {
    let divisor = gcd(numerator, denominator).max(1);
    format!("{}/{}", numerator / divisor, denominator / divisor)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}
