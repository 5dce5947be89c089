//! Point-based unit conversion and standard page sizes
//!
//! PDF dimensions are in points (1 point = 1/72 inch).

use serde::{Deserialize, Serialize};

/// Display unit for page dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Pt,
    In,
    Mm,
    /// CSS pixels at 96 DPI
    Px,
}

impl Unit {
    /// Map a UI unit code ("in", "mm", "px", "pt") to a unit.
    /// Unrecognised codes mean points.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "in" => Unit::In,
            "mm" => Unit::Mm,
            "px" => Unit::Px,
            _ => Unit::Pt,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Unit::Pt => "pt",
            Unit::In => "in",
            Unit::Mm => "mm",
            Unit::Px => "px",
        }
    }

    fn from_points(self, points: f64) -> f64 {
        match self {
            Unit::Pt => points,
            Unit::In => points / 72.0,
            // 1 inch = 25.4 mm
            Unit::Mm => points / 72.0 * 25.4,
            Unit::Px => points * (96.0 / 72.0),
        }
    }
}

/// Convert points to `unit`, formatted with two decimals.
///
/// # Example
///
/// ```
/// use pdfkit_core::format::{convert_points, Unit};
///
/// assert_eq!(convert_points(72.0, Unit::In), "1.00");
/// assert_eq!(convert_points(72.0, Unit::Mm), "25.40");
/// ```
pub fn convert_points(points: f64, unit: Unit) -> String {
    format!("{:.2}", unit.from_points(points))
}

/// Inverse of the conversion: a value in `unit` back to points.
pub fn to_points(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Pt => value,
        Unit::In => value * 72.0,
        Unit::Mm => value / 25.4 * 72.0,
        Unit::Px => value * (72.0 / 96.0),
    }
}

/// Named paper sizes in points, portrait orientation
const STANDARD_SIZES: &[(&str, f64, f64)] = &[
    ("A4", 595.28, 841.89),
    ("Letter", 612.0, 792.0),
    ("Legal", 612.0, 1008.0),
    ("Tabloid", 792.0, 1224.0),
    ("A3", 841.89, 1190.55),
    ("A5", 419.53, 595.28),
];

/// Allowed absolute difference in points when matching a size
const SIZE_TOLERANCE: f64 = 1.0;

/// Name of the standard paper size matching `width` x `height` in either
/// orientation, or "Custom".
pub fn standard_page_name(width: f64, height: f64) -> &'static str {
    let close = |a: f64, b: f64| (a - b).abs() < SIZE_TOLERANCE;

    STANDARD_SIZES
        .iter()
        .find(|(_, w, h)| (close(width, *w) && close(height, *h)) || (close(width, *h) && close(height, *w)))
        .map(|(name, _, _)| *name)
        .unwrap_or("Custom")
}
