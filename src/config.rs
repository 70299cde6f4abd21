//! # Configuration Module
//!
//! This module defines the configuration used by the normalizer and the scaler,
//! including display defaults and the fraction matching tolerance.

use std::env;

use crate::recipe_errors::RecipeError;

// Constants for recipe configuration
pub const DEFAULT_TITLE: &str = "Untitled Recipe";
pub const DEFAULT_UNSPECIFIED_STORAGE_TEXT: &str = "unspecified";
pub const DEFAULT_FRACTION_TOLERANCE: f64 = 0.02;
pub const DEFAULT_INGREDIENT_ID_PREFIX: &str = "ing";
pub const DEFAULT_STEP_ID_PREFIX: &str = "step";

// Environment variables read by `RecipeConfig::from_env`
pub const ENV_DEFAULT_TITLE: &str = "RECIPE_DEFAULT_TITLE";
pub const ENV_UNSPECIFIED_STORAGE_TEXT: &str = "RECIPE_UNSPECIFIED_STORAGE_TEXT";
pub const ENV_FRACTION_TOLERANCE: &str = "RECIPE_FRACTION_TOLERANCE";

/// Configuration shared by the normalizer and the scaler
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeConfig {
    /// Title used when a recipe has no usable name
    pub default_title: String,
    /// Storage text used when neither a duration nor a note can be shown
    pub unspecified_storage_text: String,
    /// Maximum distance between a fractional part and a standard eighth
    /// for the eighth's glyph to be used
    pub fraction_tolerance: f64,
    /// Prefix of the positional ingredient identifiers ("ing-0", "ing-1", ...)
    pub ingredient_id_prefix: String,
    /// Prefix of the positional instruction identifiers ("step-0", ...)
    pub step_id_prefix: String,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            unspecified_storage_text: DEFAULT_UNSPECIFIED_STORAGE_TEXT.to_string(),
            fraction_tolerance: DEFAULT_FRACTION_TOLERANCE,
            ingredient_id_prefix: DEFAULT_INGREDIENT_ID_PREFIX.to_string(),
            step_id_prefix: DEFAULT_STEP_ID_PREFIX.to_string(),
        }
    }
}

impl RecipeConfig {
    /// Build a configuration from the defaults overlaid with environment variables
    ///
    /// Unset variables keep their default. A tolerance that is not a number
    /// in `[0, 0.5)` is rejected.
    pub fn from_env() -> Result<Self, RecipeError> {
        let mut config = Self::default();

        if let Ok(title) = env::var(ENV_DEFAULT_TITLE) {
            if !title.trim().is_empty() {
                config.default_title = title;
            }
        }

        if let Ok(text) = env::var(ENV_UNSPECIFIED_STORAGE_TEXT) {
            if !text.trim().is_empty() {
                config.unspecified_storage_text = text;
            }
        }

        if let Ok(raw) = env::var(ENV_FRACTION_TOLERANCE) {
            config.fraction_tolerance = parse_tolerance(&raw)?;
        }

        Ok(config)
    }

    /// Identifier of the ingredient at `index`
    pub fn ingredient_id(&self, index: usize) -> String {
        format!("{}-{}", self.ingredient_id_prefix, index)
    }

    /// Identifier of the instruction at `index`
    pub fn step_id(&self, index: usize) -> String {
        format!("{}-{}", self.step_id_prefix, index)
    }
}

fn parse_tolerance(raw: &str) -> Result<f64, RecipeError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        RecipeError::Config(format!("{ENV_FRACTION_TOLERANCE} is not a number: '{raw}'"))
    })?;

    if !(0.0..0.5).contains(&value) {
        return Err(RecipeError::Config(format!(
            "{ENV_FRACTION_TOLERANCE} must be in [0, 0.5), got {value}"
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RecipeConfig::default();
        assert_eq!(config.default_title, "Untitled Recipe");
        assert_eq!(config.unspecified_storage_text, "unspecified");
        assert_eq!(config.fraction_tolerance, 0.02);
    }

    #[test]
    fn test_positional_ids() {
        let config = RecipeConfig::default();
        assert_eq!(config.ingredient_id(0), "ing-0");
        assert_eq!(config.step_id(3), "step-3");
    }

    #[test]
    fn test_parse_tolerance() {
        assert_eq!(parse_tolerance("0.05").unwrap(), 0.05);
        assert!(parse_tolerance("abc").is_err());
        assert!(parse_tolerance("0.5").is_err());
        assert!(parse_tolerance("-0.1").is_err());
    }
}
