use crate::error::{ensure_non_negative, ensure_positive, CalcResult};
use crate::units::Unit;

/// Physical size of the artwork being copied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subject {
    pub width: f64,
    pub height: f64,
    pub unit: Unit,
}

impl Subject {
    /// Create a subject from user input; zero is allowed here, negatives are not
    pub fn new(width: f64, height: f64, unit: Unit) -> CalcResult<Self> {
        ensure_non_negative("subject width", width)?;
        ensure_non_negative("subject height", height)?;
        Ok(Self { width, height, unit })
    }

    /// Create a subject already measured in inches
    pub fn inches(width: f64, height: f64) -> CalcResult<Self> {
        Self::new(width, height, Unit::Inches)
    }

    /// The same subject with both sides converted to inches
    pub fn to_inches(&self) -> Self {
        Self {
            width: self.unit.to_inches(self.width),
            height: self.unit.to_inches(self.height),
            unit: Unit::Inches,
        }
    }

    /// Check that both sides can be divided by
    pub(crate) fn ensure_measurable(&self) -> CalcResult<()> {
        ensure_positive("subject width", self.width)?;
        ensure_positive("subject height", self.height)?;
        Ok(())
    }
}
