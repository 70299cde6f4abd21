//! # Recipe Data Model
//!
//! Canonical, typed representation of a recipe record. Every schema revision
//! accepted by [`crate::recipe_ingest`] is converted into these types once, so
//! the normalizer and the scaler never inspect raw input shapes.
//!
//! ## Core Concepts
//!
//! - **IngredientEntry**: either an opaque display line or a structured [`Ingredient`]
//! - **QuantityValue**: a number or a textual notation ("1/2", "1 1/2", "½")
//! - **ScalingMode**: how an ingredient reacts to a yield change
//! - **InstructionEntry**: either an opaque line or a structured [`Step`] with timing
//! - **StoragePlan**: ISO-8601 shelf life per storage location
//!
//! ## Usage
//!
//! ```rust
//! use recipe_normalizer::recipe_model::{Ingredient, IngredientEntry, QuantityValue};
//!
//! let flour = Ingredient::new("flour")
//!     .with_quantity(QuantityValue::Number(2.0))
//!     .with_unit("cups");
//!
//! let salt = Ingredient::new("salt").to_taste();
//!
//! let entries = vec![IngredientEntry::Structured(flour), IngredientEntry::Structured(salt)];
//! assert_eq!(entries.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipe record after schema reconciliation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe name, if the source had a usable one
    pub name: Option<String>,

    /// Optional free-text description
    pub description: Option<String>,

    /// Yield, already resolved to the preferred schema form
    pub recipe_yield: Option<RecipeYield>,

    /// Explicit total time in minutes
    pub total_time_minutes: Option<f64>,

    /// Ingredients in source order
    pub ingredients: Vec<IngredientEntry>,

    /// Instructions in source order
    pub instructions: Vec<InstructionEntry>,

    /// Prep tasks to complete before cooking
    pub mise_en_place: Vec<MiseItem>,

    /// Storage guidance per location
    pub storage: Option<StoragePlan>,
}

/// Yield of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecipeYield {
    /// Current schema: `{amount, unit}`
    Structured {
        amount: Option<QuantityValue>,
        unit: Option<String>,
    },
    /// Legacy schema: free-form servings label ("4 servings", "Makes 24")
    Legacy(String),
}

/// A quantity as written by the extraction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityValue {
    /// Plain number (e.g. `2`, `0.5`)
    Number(f64),
    /// Textual notation (e.g. "1/2", "1 1/2", "2.5", "½")
    Text(String),
}

/// How an ingredient quantity reacts to a change of yield
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalingMode {
    /// Scales linearly with the yield ratio
    #[default]
    #[serde(alias = "linear")]
    Proportional,
    /// Quantity left to the cook, never scaled
    ToTaste,
    /// Quantity that stays the same whatever the yield
    Fixed,
}

/// An ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IngredientEntry {
    /// Opaque display text, nothing could be extracted
    PlainText(String),
    /// Structured ingredient
    Structured(Ingredient),
}

/// Structured ingredient with optional quantity, unit and annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// The name of the ingredient (e.g., "flour", "olive oil")
    pub name: String,

    /// Quantity, structured amount preferred over the legacy bare quantity
    pub quantity: Option<QuantityValue>,

    /// Unit, structured unit preferred over the legacy standalone unit
    pub unit: Option<String>,

    /// Preparation note (e.g., "diced", "softened")
    pub preparation: Option<String>,

    /// Free-text note shown after the ingredient
    pub notes: Option<String>,

    /// Scaling behaviour; the legacy to-taste flag maps to `ScalingMode::ToTaste`
    pub scaling: ScalingMode,
}

/// An instruction line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InstructionEntry {
    /// Opaque step text without timing
    PlainText(String),
    /// Structured step
    Structured(Step),
}

/// Structured instruction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Step text
    pub text: String,
    /// Optional timing information
    pub timing: Option<Timing>,
}

/// Timing attached to a step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub duration: Option<StepDuration>,
    pub activity: Option<Activity>,
    /// Sensory cue used when no numeric duration exists ("until golden")
    pub completion_cue: Option<String>,
}

/// Duration of a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepDuration {
    /// Single minutes value
    Minutes(f64),
    /// Minutes range
    Range { min_minutes: f64, max_minutes: f64 },
    /// Legacy `{hours, minutes}` pair
    HoursMinutes {
        hours: Option<f64>,
        minutes: Option<f64>,
    },
}

/// Whether the cook is busy during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Activity {
    Active,
    Passive,
}

/// A mise-en-place item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MiseItem {
    PlainText(String),
    Structured { text: Option<String> },
}

/// Shelf life for one storage location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageMethod {
    /// ISO-8601 duration ("P3D", "P1W", "P2M", "PT4H")
    pub duration: Option<String>,
    /// Human note, shown instead of the duration when it says something else
    pub notes: Option<String>,
}

/// Storage guidance keyed by location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePlan {
    pub refrigerated: Option<StorageMethod>,
    pub frozen: Option<StorageMethod>,
    pub room_temp: Option<StorageMethod>,
}

impl QuantityValue {
    /// Text shown for this quantity, `None` for values that display as nothing
    /// (an empty string or a zero)
    pub fn display_text(&self) -> Option<String> {
        match self {
            QuantityValue::Number(n) if *n == 0.0 || !n.is_finite() => None,
            QuantityValue::Number(n) => Some(n.to_string()),
            QuantityValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityValue::Number(n) => write!(f, "{}", n),
            QuantityValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for QuantityValue {
    fn from(value: f64) -> Self {
        QuantityValue::Number(value)
    }
}

impl From<&str> for QuantityValue {
    fn from(value: &str) -> Self {
        QuantityValue::Text(value.to_string())
    }
}

impl ScalingMode {
    /// Read a scaling mode label; `None` for unknown labels
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "totaste" | "to_taste" | "to taste" => Some(ScalingMode::ToTaste),
            "fixed" => Some(ScalingMode::Fixed),
            "linear" | "proportional" => Some(ScalingMode::Proportional),
            _ => None,
        }
    }

    /// Whether quantities in this mode follow the scale factor
    pub fn is_scalable(&self) -> bool {
        matches!(self, ScalingMode::Proportional)
    }
}

impl Ingredient {
    /// Create a new ingredient with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: None,
            unit: None,
            preparation: None,
            notes: None,
            scaling: ScalingMode::Proportional,
        }
    }

    /// Add a quantity to this ingredient
    pub fn with_quantity(mut self, quantity: impl Into<QuantityValue>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Add a unit to this ingredient
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Add a preparation note
    pub fn with_preparation(mut self, preparation: &str) -> Self {
        self.preparation = Some(preparation.to_string());
        self
    }

    /// Add notes to this ingredient
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Set the scaling mode
    pub fn with_scaling(mut self, scaling: ScalingMode) -> Self {
        self.scaling = scaling;
        self
    }

    /// Mark as to taste
    pub fn to_taste(self) -> Self {
        self.with_scaling(ScalingMode::ToTaste)
    }

    pub fn is_to_taste(&self) -> bool {
        self.scaling == ScalingMode::ToTaste
    }

    /// Whether extraction found anything beyond a bare name
    ///
    /// True when a quantity, a unit, a to-taste marker or a preparation note is
    /// present. A scaling mode other than to-taste and a free-text note do not count.
    pub fn is_structured(&self) -> bool {
        self.quantity.is_some()
            || self.unit.is_some()
            || self.is_to_taste()
            || self.preparation.is_some()
    }
}

impl Step {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            timing: None,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = Some(timing);
        self
    }
}

impl Timing {
    /// Timing with only a duration
    pub fn of(duration: StepDuration) -> Self {
        Self {
            duration: Some(duration),
            ..Default::default()
        }
    }

    pub fn passive(mut self) -> Self {
        self.activity = Some(Activity::Passive);
        self
    }

    pub fn with_cue(mut self, cue: &str) -> Self {
        self.completion_cue = Some(cue.to_string());
        self
    }

    pub fn is_passive(&self) -> bool {
        self.activity == Some(Activity::Passive)
    }
}

impl MiseItem {
    /// Display text, `None` when the item has no usable text
    pub fn display_text(&self) -> Option<&str> {
        let text = match self {
            MiseItem::PlainText(text) => text.as_str(),
            MiseItem::Structured { text } => text.as_deref()?,
        };
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl StorageMethod {
    pub fn new(duration: &str) -> Self {
        Self {
            duration: Some(duration.to_string()),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_creation() {
        let ingredient = Ingredient::new("flour")
            .with_quantity(2.0)
            .with_unit("cups")
            .with_preparation("sifted");

        assert_eq!(ingredient.name, "flour");
        assert_eq!(ingredient.quantity, Some(QuantityValue::Number(2.0)));
        assert_eq!(ingredient.unit.as_deref(), Some("cups"));
        assert!(ingredient.is_structured());
        assert!(!ingredient.is_to_taste());
    }

    #[test]
    fn test_structured_flag_rule() {
        assert!(!Ingredient::new("eggs").is_structured());
        assert!(!Ingredient::new("eggs").with_notes("large").is_structured());
        assert!(!Ingredient::new("eggs").with_scaling(ScalingMode::Fixed).is_structured());
        assert!(Ingredient::new("salt").to_taste().is_structured());
        assert!(Ingredient::new("milk").with_unit("cup").is_structured());
        assert!(Ingredient::new("onion").with_preparation("diced").is_structured());
    }

    #[test]
    fn test_quantity_display_text() {
        assert_eq!(QuantityValue::Number(2.0).display_text().as_deref(), Some("2"));
        assert_eq!(QuantityValue::Number(0.5).display_text().as_deref(), Some("0.5"));
        assert_eq!(QuantityValue::Number(0.0).display_text(), None);
        assert_eq!(QuantityValue::from(" 1/2 ").display_text().as_deref(), Some("1/2"));
        assert_eq!(QuantityValue::from("").display_text(), None);
    }

    #[test]
    fn test_scaling_mode_labels() {
        assert_eq!(ScalingMode::from_label("toTaste"), Some(ScalingMode::ToTaste));
        assert_eq!(ScalingMode::from_label("linear"), Some(ScalingMode::Proportional));
        assert_eq!(ScalingMode::from_label("FIXED"), Some(ScalingMode::Fixed));
        assert_eq!(ScalingMode::from_label("sometimes"), None);
        assert!(ScalingMode::default().is_scalable());
        assert!(!ScalingMode::Fixed.is_scalable());
    }

    #[test]
    fn test_mise_item_text() {
        let plain = MiseItem::PlainText("Preheat oven".into());
        assert_eq!(plain.display_text(), Some("Preheat oven"));

        let structured = MiseItem::Structured {
            text: Some("Dice onion".into()),
        };
        assert_eq!(structured.display_text(), Some("Dice onion"));
        assert_eq!(MiseItem::Structured { text: None }.display_text(), None);
        assert_eq!(MiseItem::PlainText("  ".into()).display_text(), None);
    }

    #[test]
    fn test_scaling_mode_serde_alias() {
        let mode: ScalingMode = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(mode, ScalingMode::Proportional);
        let mode: ScalingMode = serde_json::from_str("\"toTaste\"").unwrap();
        assert_eq!(mode, ScalingMode::ToTaste);
    }
}
