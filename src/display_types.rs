//! # Display Types Module
//!
//! Render-ready output of the normalizer and the scaler. All fields are
//! derived from the input; consumers treat them as read-only.

use serde::{Deserialize, Serialize};

use crate::recipe_model::QuantityValue;

/// Canonical display record for one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecipe {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// Yield text ("4 servings", "Makes 24")
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub servings: Option<String>,
    /// Mise-en-place tasks in order
    pub prep_tasks: Vec<String>,
    pub ingredients: Vec<DisplayIngredient>,
    pub instructions: Vec<DisplayInstruction>,
    /// Absent when no storage location produced any text
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub storage: Option<StorageDisplay>,
    /// "1 hr 15 min"; absent when no positive total is known
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_time: Option<String>,
    pub stats: ExtractionStats,
}

/// An ingredient ready to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayIngredient {
    /// Positional identifier ("ing-0")
    pub id: String,
    /// Pre-joined line ("2 cups flour (sifted) — for dusting")
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantity: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unit: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub preparation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    pub to_taste: bool,
    /// Whether extraction found more than a bare line or name
    pub is_structured: bool,
}

/// An instruction step ready to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInstruction {
    /// Positional identifier ("step-0")
    pub id: String,
    pub text: String,
    /// Formatted timing ("1h 30m (passive)", "until golden")
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timing: Option<String>,
    pub is_passive: bool,
    pub has_timing: bool,
}

/// Storage text per location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageDisplay {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub refrigerated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub frozen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub room_temp: Option<String>,
}

/// How much structure extraction produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub structured_ingredients: usize,
    pub total_ingredients: usize,
    pub timed_steps: usize,
    pub total_steps: usize,
    pub has_mise: bool,
    pub has_storage: bool,
}

/// One ingredient after scaling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledIngredient {
    pub display: String,
    /// True when the displayed value differs from the unscaled one
    pub scaled: bool,
}

/// One row of a scaled ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledIngredientView {
    pub id: String,
    pub original: String,
    pub scaled: String,
    pub is_scaled: bool,
    /// Proportional mode with a parseable quantity
    pub is_scalable: bool,
}

/// A whole ingredient list scaled to a target yield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledIngredientList {
    pub scale_factor: f64,
    /// Servings read from the original label, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub original_servings: Option<u32>,
    pub target_servings: u32,
    /// "8 servings"
    pub target_label: String,
    pub ingredients: Vec<ScaledIngredientView>,
}

impl StorageDisplay {
    pub fn is_empty(&self) -> bool {
        self.refrigerated.is_none() && self.frozen.is_none() && self.room_temp.is_none()
    }

    /// Number of locations with text
    pub fn len(&self) -> usize {
        [&self.refrigerated, &self.frozen, &self.room_temp]
            .iter()
            .filter(|entry| entry.is_some())
            .count()
    }
}

impl ExtractionStats {
    /// Share of ingredients that came out structured, 1.0 for an empty list
    pub fn ingredient_structure_rate(&self) -> f32 {
        if self.total_ingredients == 0 {
            return 1.0;
        }
        self.structured_ingredients as f32 / self.total_ingredients as f32
    }

    /// Share of steps with timing, 1.0 for an empty list
    pub fn timing_rate(&self) -> f32 {
        if self.total_steps == 0 {
            return 1.0;
        }
        self.timed_steps as f32 / self.total_steps as f32
    }
}
