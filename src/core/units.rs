// FILE: src/core/units.rs

use serde::Serialize;
use std::f32::consts::PI;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// A number without unit.
    Scalar,
    Percent,
    Ex,
    Em,
    Ch,
    Rem,
    Px,
    Pt,
    Pc,
    In,
    Cm,
    Mm,
    Q,
    Rad,
    Turn,
    Deg,
    Grad,
    Fr,
    Dppx,
}

impl Unit {
    /// Parses a length unit, font-relative units included.
    pub fn length(unit: &str) -> Option<Self> {
        Some(match unit {
            "ex" => Unit::Ex,
            "em" => Unit::Em,
            "ch" => Unit::Ch,
            "rem" => Unit::Rem,
            "px" => Unit::Px,
            "pt" => Unit::Pt,
            "pc" => Unit::Pc,
            "in" => Unit::In,
            "cm" => Unit::Cm,
            "mm" => Unit::Mm,
            "q" => Unit::Q,
            _ => return None,
        })
    }

    pub fn angle(unit: &str) -> Option<Self> {
        Some(match unit {
            "rad" => Unit::Rad,
            "turn" => Unit::Turn,
            "deg" => Unit::Deg,
            "grad" => Unit::Grad,
            _ => return None,
        })
    }

    /// CSS pixels per unit, for absolute length units.
    pub fn to_pixels(self) -> Option<f32> {
        Some(match self {
            Unit::Px => 1.0,
            Unit::Pt => 1.0 / 0.75,
            Unit::Pc => 16.0,
            Unit::In => 96.0,
            Unit::Cm => 96.0 / 2.54,
            Unit::Mm => 96.0 / 25.4,
            Unit::Q => 96.0 / 25.4 / 4.0,
            _ => return None,
        })
    }

    /// Radians per unit, for angle units.
    pub fn to_radians(self) -> Option<f32> {
        Some(match self {
            Unit::Rad => 1.0,
            Unit::Turn => 2.0 * PI,
            Unit::Deg => PI / 180.0,
            Unit::Grad => PI / 200.0,
            _ => return None,
        })
    }

    pub fn is_length(self) -> bool {
        matches!(
            self,
            Unit::Ex
                | Unit::Em
                | Unit::Ch
                | Unit::Rem
                | Unit::Px
                | Unit::Pt
                | Unit::Pc
                | Unit::In
                | Unit::Cm
                | Unit::Mm
                | Unit::Q
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Scalar => "",
            Unit::Percent => "%",
            Unit::Ex => "ex",
            Unit::Em => "em",
            Unit::Ch => "ch",
            Unit::Rem => "rem",
            Unit::Px => "px",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Q => "q",
            Unit::Rad => "rad",
            Unit::Turn => "turn",
            Unit::Deg => "deg",
            Unit::Grad => "grad",
            Unit::Fr => "fr",
            Unit::Dppx => "dppx",
        }
    }
}

/// Dots per pixel for each resolution unit.
pub fn resolution_to_dppx(unit: &str) -> Option<f32> {
    match unit {
        "dppx" => Some(1.0),
        "dpi" => Some(1.0 / 96.0),
        "dpcm" => Some(2.54 / 96.0),
        _ => None,
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_units() {
        assert_eq!(Unit::length("q"), Some(Unit::Q));
        assert_eq!(Unit::length("deg"), None);
        assert_eq!(Unit::In.to_pixels(), Some(96.0));
        assert_eq!(Unit::Pc.to_pixels(), Some(16.0));
        assert!(Unit::Em.to_pixels().is_none());
        let mm = Unit::Mm.to_pixels().unwrap();
        assert!((Unit::Q.to_pixels().unwrap() * 4.0 - mm).abs() < 1e-6);
    }

    #[test]
    fn test_angle_units() {
        assert_eq!(Unit::angle("turn").and_then(Unit::to_radians), Some(2.0 * PI));
        assert!((Unit::Deg.to_radians().unwrap() * 180.0 - PI).abs() < 1e-6);
        assert_eq!(resolution_to_dppx("dpi"), Some(1.0 / 96.0));
    }
}
