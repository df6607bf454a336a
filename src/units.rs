//! Length units and conversion.
//!
//! TikZ coordinates are centimeters, so cm is the canonical unit; every
//! other unit is defined by its ratio to cm.

use std::fmt;

use crate::error::PlotError;

/// TeX point ("pt"), 72.27 per inch.
const CM_PER_PT: f64 = 2.54 / 72.27;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    Pt,
    Mm,
    #[default]
    Cm,
    In,
}

impl Unit {
    /// Parse a unit name as it appears in a style configuration.
    pub fn parse(name: &str) -> Result<Self, PlotError> {
        match name {
            "pt" => Ok(Unit::Pt),
            "mm" => Ok(Unit::Mm),
            "cm" => Ok(Unit::Cm),
            "in" => Ok(Unit::In),
            other => Err(PlotError::InvalidUnit(other.to_string())),
        }
    }

    fn to_cm(self) -> f64 {
        match self {
            Unit::Pt => CM_PER_PT,
            Unit::Mm => 0.1,
            Unit::Cm => 1.0,
            Unit::In => 2.54,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Pt => "pt",
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::In => "in",
        };
        write!(f, "{}", name)
    }
}

/// Convert a length between units. Pure.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    value * from.to_cm() / to.to_cm()
}
