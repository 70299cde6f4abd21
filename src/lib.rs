//! # Recipe Normalizer
//!
//! Turns loosely-structured recipe data, as extracted from web pages across
//! several schema revisions, into one render-ready display record, and scales
//! ingredient quantities to a different yield.

pub mod config;
pub mod display_types;
pub mod measurement_patterns;
pub mod normalizer;
pub mod quantity;
pub mod recipe_errors;
pub mod recipe_ingest;
pub mod recipe_integration;
pub mod recipe_model;
pub mod scaler;
pub mod servings;
pub mod time_format;
