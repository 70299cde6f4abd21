//! # Servings Utilities
//!
//! Scale factor calculation and servings label parsing/formatting.

use crate::measurement_patterns::SERVINGS_INTEGER_REGEX;
use log::debug;

/// Unit used when a servings count is formatted without one
pub const DEFAULT_SERVINGS_UNIT: &str = "servings";

/// Ratio between the target and the original yield
///
/// A non-positive (or non-finite) original yields 1, so callers never see an
/// infinite or NaN factor.
pub fn calculate_scale_factor(original: f64, target: f64) -> f64 {
    if !original.is_finite() || original <= 0.0 || !target.is_finite() {
        debug!(
            "Cannot scale from {} to {} servings, using factor 1",
            original, target
        );
        return 1.0;
    }
    target / original
}

/// First integer in a servings label
///
/// "4 servings" gives 4, "Serves 6-8" gives 6 (lower bound of a range) and
/// "varies" gives `None`.
pub fn parse_servings(label: &str) -> Option<u32> {
    SERVINGS_INTEGER_REGEX
        .find(label)
        .and_then(|m| m.as_str().parse().ok())
}

/// Render `<count> <unit>`, the unit defaulting to "servings"
pub fn format_servings(count: u32, unit: Option<&str>) -> String {
    let unit = unit
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_SERVINGS_UNIT);
    format!("{} {}", count, unit)
}
