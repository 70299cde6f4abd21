//! # Recipe Error Types Module
//!
//! Errors raised at the input boundary: reading a recipe file, decoding JSON
//! text and reading configuration. Normalization and scaling never fail.

/// Custom error types for recipe loading
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeError {
    /// Recipe source could not be read
    Io(String),
    /// Recipe source is not valid JSON
    Json(String),
    /// Configuration value is invalid
    Config(String),
}

impl std::fmt::Display for RecipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeError::Io(msg) => write!(f, "I/O error: {msg}"),
            RecipeError::Json(msg) => write!(f, "JSON error: {msg}"),
            RecipeError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for RecipeError {}

impl From<std::io::Error> for RecipeError {
    fn from(err: std::io::Error) -> Self {
        RecipeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::Json(err.to_string())
    }
}
