//! Length unit conversion
//!
//! Subject sizes can be entered in millimeters, centimeters or inches.
//! Everything downstream works in inches, so every length is first
//! converted to inches with a fixed factor and then mm/cm are derived
//! back from the inch value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CalcError, CalcResult};

/// Inches per millimeter
pub const MM_TO_IN: f64 = 0.0393701;

/// Inches per centimeter
pub const CM_TO_IN: f64 = 0.393701;

/// Unit of measurement for a physical length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mm,
    Cm,
    #[default]
    Inches,
}

impl Unit {
    /// All units, in the order they are offered to the user
    pub const ALL: [Unit; 3] = [Unit::Mm, Unit::Cm, Unit::Inches];

    /// Tag used for this unit in input and output
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::Inches => "inches",
        }
    }

    /// Convert a length in this unit to inches
    #[inline]
    pub fn to_inches(&self, length: f64) -> f64 {
        match self {
            Unit::Mm => length * MM_TO_IN,
            Unit::Cm => length * CM_TO_IN,
            Unit::Inches => length,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Unit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Ok(Unit::Mm),
            "cm" => Ok(Unit::Cm),
            "inches" | "in" => Ok(Unit::Inches),
            _ => Err(CalcError::InvalidUnit(s.to_string())),
        }
    }
}

/// One physical length expressed in all three units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub mm: f64,
    pub cm: f64,
    pub inches: f64,
}

impl Measurement {
    /// Build a measurement from a length given in `unit`
    pub fn new(length: f64, unit: Unit) -> Self {
        let inches = unit.to_inches(length);
        Self {
            mm: inches / MM_TO_IN,
            cm: inches / CM_TO_IN,
            inches,
        }
    }

    /// Build a measurement from a length in inches
    pub fn from_inches(inches: f64) -> Self {
        Self::new(inches, Unit::Inches)
    }
}

/// Convert a length given with a textual unit tag into mm, cm and inches
///
/// No rounding is applied; that is left to [`crate::format`].
pub fn convert(length: f64, from_unit: &str) -> CalcResult<Measurement> {
    let unit: Unit = from_unit.parse()?;
    Ok(Measurement::new(length, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPSILON, "{} != {}", a, b);
    }

    #[test]
    fn test_inches_passthrough() {
        let m = convert(10.0, "inches").unwrap();
        assert_close(m.inches, 10.0);
        assert_close(m.mm, 10.0 / 0.0393701);
        assert_close(m.cm, 10.0 / 0.393701);
    }

    #[test]
    fn test_cm_to_inches() {
        let m = convert(25.4, "cm").unwrap();
        assert_close(m.inches, 25.4 * 0.393701);
        // cm is derived back from inches and lands on the input
        assert_close(m.cm, 25.4);
    }

    #[test]
    fn test_mm_to_inches() {
        let m = convert(254.0, "mm").unwrap();
        assert_close(m.inches, 254.0 * 0.0393701);
        assert_close(m.mm, 254.0);
    }

    #[test]
    fn test_round_trip_through_inches() {
        for unit in Unit::ALL {
            for length in [0.5, 1.0, 12.0, 297.0, 1189.0] {
                let first = convert(length, unit.as_str()).unwrap();
                let second = convert(first.inches, "inches").unwrap();
                assert_close(first.mm, second.mm);
                assert_close(first.cm, second.cm);
                assert_close(first.inches, second.inches);
            }
        }
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("MM".parse::<Unit>().unwrap(), Unit::Mm);
        assert_eq!(" cm ".parse::<Unit>().unwrap(), Unit::Cm);
        assert_eq!("in".parse::<Unit>().unwrap(), Unit::Inches);
        assert_eq!("inches".parse::<Unit>().unwrap(), Unit::Inches);
    }

    #[test]
    fn test_invalid_unit() {
        let err = convert(1.0, "furlongs").unwrap_err();
        assert!(matches!(err, CalcError::InvalidUnit(tag) if tag == "furlongs"));
    }

    #[test]
    fn test_unit_serde_tags() {
        let json = serde_json::to_string(&Unit::Inches).unwrap();
        assert_eq!(json, "\"inches\"");
        let unit: Unit = serde_json::from_str("\"cm\"").unwrap();
        assert_eq!(unit, Unit::Cm);
    }
}
