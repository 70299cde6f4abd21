//! # Quantity Primitives
//!
//! Reading heterogeneous quantity notations into numbers, writing numbers back
//! as cooking-friendly text, and rounding scaled values to a granularity a
//! cook would actually measure.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_normalizer::quantity::{format_quantity, parse_quantity_str, round_to_sensible};
//!
//! assert_eq!(parse_quantity_str("1 1/2"), Some(1.5));
//! assert_eq!(format_quantity(1.5), "1½");
//! assert_eq!(round_to_sensible(2.37, Some("cups")), 2.25);
//! ```

use crate::config::DEFAULT_FRACTION_TOLERANCE;
use crate::measurement_patterns::{
    DECIMAL_PREFIX_REGEX, GLYPH_FRACTION_REGEX, MIXED_FRACTION_REGEX, SIMPLE_FRACTION_REGEX,
};
use crate::recipe_model::QuantityValue;
use log::trace;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Standard eighths with their glyphs, in ascending order
const FRACTION_GLYPHS: [(f64, &str); 9] = [
    (1.0 / 8.0, "⅛"),
    (1.0 / 4.0, "¼"),
    (1.0 / 3.0, "⅓"),
    (3.0 / 8.0, "⅜"),
    (1.0 / 2.0, "½"),
    (5.0 / 8.0, "⅝"),
    (2.0 / 3.0, "⅔"),
    (3.0 / 4.0, "¾"),
    (7.0 / 8.0, "⅞"),
];

/// Measurement granularity of a unit class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingClass {
    /// Spoons and cups: nearest quarter
    Quarter,
    /// Ounces: nearest half
    Half,
    /// Grams and milliliters: nearest 5
    Five,
    /// Discrete items: nearest whole number
    Whole,
    /// Anything else: 2 decimal places
    Hundredth,
}

/// Unit spellings and their rounding class
static UNIT_ROUNDING: LazyLock<HashMap<&'static str, RoundingClass>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Spoons and cups
    for unit in [
        "tsp", "tsps", "teaspoon", "teaspoons", "tbsp", "tbsps", "tablespoon", "tablespoons",
        "cup", "cups",
    ] {
        map.insert(unit, RoundingClass::Quarter);
    }

    // Ounces
    for unit in ["oz", "ounce", "ounces", "fl oz"] {
        map.insert(unit, RoundingClass::Half);
    }

    // Metric mass and volume
    for unit in [
        "g", "gram", "grams", "gramme", "grammes", "ml", "milliliter", "milliliters",
        "millilitre", "millilitres",
    ] {
        map.insert(unit, RoundingClass::Five);
    }

    // Discrete items
    for unit in [
        "piece", "pieces", "clove", "cloves", "slice", "slices", "egg", "eggs",
    ] {
        map.insert(unit, RoundingClass::Whole);
    }

    map
});

impl RoundingClass {
    /// Round `value` to this class's granularity
    pub fn round(&self, value: f64) -> f64 {
        match self {
            RoundingClass::Quarter => (value * 4.0).round() / 4.0,
            RoundingClass::Half => (value * 2.0).round() / 2.0,
            RoundingClass::Five => (value / 5.0).round() * 5.0,
            RoundingClass::Whole => value.round(),
            RoundingClass::Hundredth => (value * 100.0).round() / 100.0,
        }
    }
}

/// Rounding class for a unit (case-insensitive, a trailing period is ignored)
pub fn rounding_class(unit: &str) -> RoundingClass {
    let unit = unit.trim().trim_end_matches('.').to_lowercase();
    UNIT_ROUNDING
        .get(unit.as_str())
        .copied()
        .unwrap_or(RoundingClass::Hundredth)
}

/// Round a scaled value to a granularity that suits its unit
///
/// Proportional scaling produces values nobody measures (2.37 cups); this
/// snaps them to quarters for spoons and cups, halves for ounces, fives for
/// grams and milliliters and whole numbers for discrete items. Unknown or
/// missing units keep 2 decimal places.
pub fn round_to_sensible(value: f64, unit: Option<&str>) -> f64 {
    let class = unit.map(rounding_class).unwrap_or(RoundingClass::Hundredth);
    let rounded = class.round(value);
    trace!("Rounded {} ({:?}) to {}", value, class, rounded);
    rounded
}

/// Parse a quantity into a number
///
/// Numbers pass through. Text may be a simple fraction ("1/2"), a mixed
/// fraction ("1 1/2"), a fraction glyph with an optional whole part ("1½") or a
/// decimal, read from its leading digits the way a lenient float reader does
/// ("2.5 cups" is 2.5). Absent values, empty text, zero denominators and text
/// without a leading number yield `None`.
pub fn parse_quantity(quantity: Option<&QuantityValue>) -> Option<f64> {
    match quantity? {
        QuantityValue::Number(n) if n.is_finite() => Some(*n),
        QuantityValue::Number(_) => None,
        QuantityValue::Text(text) => parse_quantity_str(text),
    }
}

/// Parse a textual quantity, see [`parse_quantity`]
pub fn parse_quantity_str(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(captures) = MIXED_FRACTION_REGEX.captures(text) {
        let whole: f64 = captures[1].parse().ok()?;
        let numerator: f64 = captures[2].parse().ok()?;
        let denominator: f64 = captures[3].parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(whole + numerator / denominator);
    }

    if let Some(captures) = SIMPLE_FRACTION_REGEX.captures(text) {
        let numerator: f64 = captures[1].parse().ok()?;
        let denominator: f64 = captures[2].parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }

    if let Some(captures) = GLYPH_FRACTION_REGEX.captures(text) {
        let whole: f64 = match captures.get(1) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0.0,
        };
        let fraction = glyph_value(&captures[2])?;
        return Some(whole + fraction);
    }

    let value: f64 = DECIMAL_PREFIX_REGEX.find(text)?.as_str().parse().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

fn glyph_value(glyph: &str) -> Option<f64> {
    FRACTION_GLYPHS
        .iter()
        .find(|(_, g)| *g == glyph)
        .map(|(value, _)| *value)
}

/// Format a quantity for a cook, using the default fraction tolerance
pub fn format_quantity(value: f64) -> String {
    format_quantity_with_tolerance(value, DEFAULT_FRACTION_TOLERANCE)
}

/// Format a quantity for a cook
///
/// A fractional part within `tolerance` of a standard eighth is written as its
/// glyph ("1½", "¾"). Other non-integral values below 10 get one decimal
/// place without a trailing ".0"; everything else is rounded to an integer.
pub fn format_quantity_with_tolerance(value: f64, tolerance: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_quantity_with_tolerance(-value, tolerance));
    }

    let whole = value.floor();
    let fraction = value - whole;

    if let Some((_, glyph)) = FRACTION_GLYPHS
        .iter()
        .find(|(eighth, _)| (fraction - eighth).abs() <= tolerance)
    {
        return if whole == 0.0 {
            glyph.to_string()
        } else {
            format!("{}{}", whole as i64, glyph)
        };
    }

    if value < 10.0 && fraction != 0.0 {
        let text = format!("{:.1}", value);
        return text.strip_suffix(".0").map(str::to_string).unwrap_or(text);
    }

    format!("{}", value.round() as i64)
}
