//! # Measurement Patterns Module
//!
//! This module contains the regex patterns used to read quantity notations,
//! servings labels and ISO-8601 storage durations.

use lazy_static::lazy_static;
use regex::Regex;

/// Mixed fraction such as "1 1/2" (whole part, numerator, denominator)
pub const MIXED_FRACTION_PATTERN: &str = r"^(\d+)\s+(\d+)\s*[/⁄]\s*(\d+)$";

/// Simple fraction such as "1/2" or "1.5/2"
pub const SIMPLE_FRACTION_PATTERN: &str = r"^(\d+(?:\.\d+)?)\s*[/⁄]\s*(\d+(?:\.\d+)?)$";

/// Optional whole part followed by a vulgar fraction glyph ("½", "1½", "2 ¾")
pub const GLYPH_FRACTION_PATTERN: &str = r"^(?:(\d+)\s*)?([¼½¾⅓⅔⅛⅜⅝⅞])$";

/// Leading decimal number, the way a lenient float reader consumes "2.5 cups"
pub const DECIMAL_PREFIX_PATTERN: &str = r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?";

/// First integer in a servings label ("Serves 6-8" -> "6")
pub const SERVINGS_INTEGER_PATTERN: &str = r"\d+";

// ISO-8601 duration atoms, in the order they are tried
pub const ISO_DAYS_PATTERN: &str = r"(?i)P(\d+)D";
pub const ISO_WEEKS_PATTERN: &str = r"(?i)P(\d+)W";
pub const ISO_MONTHS_PATTERN: &str = r"(?i)P(\d+)M";
pub const ISO_HOURS_PATTERN: &str = r"(?i)PT(\d+)H";

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref MIXED_FRACTION_REGEX: Regex =
        Regex::new(MIXED_FRACTION_PATTERN).expect("Mixed fraction pattern should be valid");
    pub static ref SIMPLE_FRACTION_REGEX: Regex =
        Regex::new(SIMPLE_FRACTION_PATTERN).expect("Simple fraction pattern should be valid");
    pub static ref GLYPH_FRACTION_REGEX: Regex =
        Regex::new(GLYPH_FRACTION_PATTERN).expect("Glyph fraction pattern should be valid");
    pub static ref DECIMAL_PREFIX_REGEX: Regex =
        Regex::new(DECIMAL_PREFIX_PATTERN).expect("Decimal prefix pattern should be valid");
    pub static ref SERVINGS_INTEGER_REGEX: Regex =
        Regex::new(SERVINGS_INTEGER_PATTERN).expect("Servings pattern should be valid");
    pub static ref ISO_DAYS_REGEX: Regex =
        Regex::new(ISO_DAYS_PATTERN).expect("ISO days pattern should be valid");
    pub static ref ISO_WEEKS_REGEX: Regex =
        Regex::new(ISO_WEEKS_PATTERN).expect("ISO weeks pattern should be valid");
    pub static ref ISO_MONTHS_REGEX: Regex =
        Regex::new(ISO_MONTHS_PATTERN).expect("ISO months pattern should be valid");
    pub static ref ISO_HOURS_REGEX: Regex =
        Regex::new(ISO_HOURS_PATTERN).expect("ISO hours pattern should be valid");
}
