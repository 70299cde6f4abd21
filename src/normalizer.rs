//! # Recipe Normalizer
//!
//! Turns a [`Recipe`] into the canonical [`DisplayRecipe`]: title, yield text,
//! prep tasks, display ingredients and steps, storage text, total time and
//! extraction stats. Every field degrades to an empty or absent value instead
//! of failing.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_normalizer::normalizer::normalize_recipe_value;
//! use serde_json::json;
//!
//! let display = normalize_recipe_value(&json!({
//!     "name": "Soup",
//!     "ingredients": [{"name": "stock", "quantity": {"amount": 1, "unit": "l"}}],
//!     "instructions": [{"text": "Simmer", "timing": {"duration": {"minutes": 45}}}]
//! }));
//!
//! assert_eq!(display.ingredients[0].display, "1 l stock");
//! assert_eq!(display.total_time.as_deref(), Some("45 min"));
//! ```

use crate::config::RecipeConfig;
use crate::display_types::{
    DisplayIngredient, DisplayInstruction, DisplayRecipe, ExtractionStats, StorageDisplay,
};
use crate::recipe_ingest::parse_recipe;
use crate::recipe_model::{
    Ingredient, IngredientEntry, InstructionEntry, MiseItem, QuantityValue, Recipe, RecipeYield,
    StorageMethod, StoragePlan,
};
use crate::time_format::{
    format_minutes, format_storage_duration_with, format_timing, total_instruction_minutes,
    total_minutes,
};
use log::{debug, info, trace};
use serde_json::Value;

const TO_TASTE_MARKER: &str = "(to taste)";
const NOTES_SEPARATOR: &str = " — ";

/// Normalizer configured with a [`RecipeConfig`]
#[derive(Debug, Clone, Default)]
pub struct RecipeNormalizer {
    config: RecipeConfig,
}

impl RecipeNormalizer {
    /// Create a normalizer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with a custom configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_normalizer::config::RecipeConfig;
    /// use recipe_normalizer::normalizer::RecipeNormalizer;
    /// use recipe_normalizer::recipe_model::Recipe;
    ///
    /// let config = RecipeConfig {
    ///     default_title: "Mystery Dish".to_string(),
    ///     ..Default::default()
    /// };
    /// let display = RecipeNormalizer::with_config(config).normalize(&Recipe::default());
    /// assert_eq!(display.title, "Mystery Dish");
    /// ```
    pub fn with_config(config: RecipeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecipeConfig {
        &self.config
    }

    /// Build the display record for `recipe`
    pub fn normalize(&self, recipe: &Recipe) -> DisplayRecipe {
        let title = self.title(recipe.name.as_deref());
        let prep_tasks = normalize_mise(&recipe.mise_en_place);
        let ingredients = self.normalize_ingredients(&recipe.ingredients);
        let instructions = self.normalize_instructions(&recipe.instructions);
        let storage = self.normalize_storage(recipe.storage.as_ref());

        let stats = ExtractionStats {
            structured_ingredients: ingredients.iter().filter(|i| i.is_structured).count(),
            total_ingredients: ingredients.len(),
            timed_steps: instructions.iter().filter(|s| s.has_timing).count(),
            total_steps: instructions.len(),
            has_mise: !prep_tasks.is_empty(),
            has_storage: storage.is_some(),
        };

        info!(
            "Normalized recipe '{}': {}/{} structured ingredients, {}/{} timed steps",
            title,
            stats.structured_ingredients,
            stats.total_ingredients,
            stats.timed_steps,
            stats.total_steps
        );

        DisplayRecipe {
            title,
            description: recipe.description.clone(),
            servings: servings_text(recipe.recipe_yield.as_ref()),
            prep_tasks,
            ingredients,
            instructions,
            storage,
            total_time: total_time_text(recipe),
            stats,
        }
    }

    fn title(&self, name: Option<&str>) -> String {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => {
                debug!("Recipe has no name, using '{}'", self.config.default_title);
                self.config.default_title.clone()
            }
        }
    }

    /// Display ingredients with positional identifiers
    pub fn normalize_ingredients(&self, entries: &[IngredientEntry]) -> Vec<DisplayIngredient> {
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let id = self.config.ingredient_id(index);
                match entry {
                    IngredientEntry::PlainText(text) => DisplayIngredient {
                        id,
                        display: text.clone(),
                        quantity: None,
                        unit: None,
                        name: text.clone(),
                        preparation: None,
                        notes: None,
                        to_taste: false,
                        is_structured: false,
                    },
                    IngredientEntry::Structured(ingredient) => DisplayIngredient {
                        id,
                        display: ingredient_display_line(ingredient),
                        quantity: ingredient.quantity.clone(),
                        unit: ingredient.unit.clone(),
                        name: ingredient.name.clone(),
                        preparation: ingredient.preparation.clone(),
                        notes: ingredient.notes.clone(),
                        to_taste: ingredient.is_to_taste(),
                        is_structured: ingredient.is_structured(),
                    },
                }
            })
            .collect()
    }

    /// Display steps with positional identifiers and formatted timing
    pub fn normalize_instructions(&self, entries: &[InstructionEntry]) -> Vec<DisplayInstruction> {
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let id = self.config.step_id(index);
                match entry {
                    InstructionEntry::PlainText(text) => DisplayInstruction {
                        id,
                        text: text.clone(),
                        timing: None,
                        is_passive: false,
                        has_timing: false,
                    },
                    InstructionEntry::Structured(step) => {
                        let timing = step.timing.as_ref().and_then(format_timing);
                        trace!("Step {} timing: {:?}", index, timing);
                        DisplayInstruction {
                            id,
                            text: step.text.clone(),
                            has_timing: timing.is_some(),
                            timing,
                            is_passive: step.timing.as_ref().is_some_and(|t| t.is_passive()),
                        }
                    }
                }
            })
            .collect()
    }

    /// Storage text for every location that carries a duration
    ///
    /// `None` when no location produced text.
    pub fn normalize_storage(&self, plan: Option<&StoragePlan>) -> Option<StorageDisplay> {
        let plan = plan?;
        let text = |method: Option<&StorageMethod>| {
            method
                .filter(|m| m.duration.is_some())
                .map(|m| format_storage_duration_with(m, &self.config.unspecified_storage_text))
        };

        let storage = StorageDisplay {
            refrigerated: text(plan.refrigerated.as_ref()),
            frozen: text(plan.frozen.as_ref()),
            room_temp: text(plan.room_temp.as_ref()),
        };

        if storage.is_empty() {
            debug!("No storage location carries a duration, omitting storage");
            None
        } else {
            Some(storage)
        }
    }
}

/// Normalize with the default configuration
pub fn normalize_recipe(recipe: &Recipe) -> DisplayRecipe {
    RecipeNormalizer::default().normalize(recipe)
}

/// Ingest a recipe JSON value of any schema revision and normalize it
pub fn normalize_recipe_value(value: &Value) -> DisplayRecipe {
    normalize_recipe(&parse_recipe(value))
}

/// Yield text: "<amount> <unit>" for a structured yield, the label otherwise
pub fn servings_text(recipe_yield: Option<&RecipeYield>) -> Option<String> {
    match recipe_yield? {
        RecipeYield::Structured { amount, unit } => {
            let parts: Vec<String> = [
                amount.as_ref().and_then(QuantityValue::display_text),
                unit.clone(),
            ]
            .into_iter()
            .flatten()
            .collect();

            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        }
        RecipeYield::Legacy(label) => Some(label.clone()),
    }
}

/// Prep task texts, empty items dropped
pub fn normalize_mise(items: &[MiseItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(MiseItem::display_text)
        .map(str::to_string)
        .collect()
}

/// The pre-joined display line of a structured ingredient
///
/// Order: quantity, unit, name, "(to taste)", "(preparation)", then
/// " — notes".
pub fn ingredient_display_line(ingredient: &Ingredient) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(quantity) = ingredient.quantity.as_ref().and_then(QuantityValue::display_text) {
        parts.push(quantity);
    }
    if let Some(unit) = ingredient.unit.as_deref().filter(|u| !u.trim().is_empty()) {
        parts.push(unit.trim().to_string());
    }
    if !ingredient.name.trim().is_empty() {
        parts.push(ingredient.name.trim().to_string());
    }
    if ingredient.is_to_taste() {
        parts.push(TO_TASTE_MARKER.to_string());
    }
    if let Some(preparation) = ingredient.preparation.as_deref() {
        parts.push(format!("({})", preparation));
    }

    let mut line = parts.join(" ");
    if let Some(notes) = ingredient.notes.as_deref() {
        line.push_str(NOTES_SEPARATOR);
        line.push_str(notes);
    }
    line
}

/// Total time text, explicit total first, then the sum of step timings
pub fn total_time_text(recipe: &Recipe) -> Option<String> {
    let explicit = recipe.total_time_minutes.and_then(total_minutes);

    if explicit.is_some() {
        trace!("Using explicit total time {:?}", explicit);
    }

    explicit
        .or_else(|| total_instruction_minutes(&recipe.instructions))
        .map(format_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::{ScalingMode, Step, StepDuration, Timing};

    #[test]
    fn test_ingredient_display_line() {
        let ingredient = Ingredient::new("butter")
            .with_quantity("1/2")
            .with_unit("cup")
            .with_preparation("softened")
            .with_notes("or margarine");
        assert_eq!(
            ingredient_display_line(&ingredient),
            "1/2 cup butter (softened) — or margarine"
        );

        let salt = Ingredient::new("salt").to_taste();
        assert_eq!(ingredient_display_line(&salt), "salt (to taste)");
    }

    #[test]
    fn test_plain_and_structured_ingredients() {
        let normalizer = RecipeNormalizer::new();
        let display = normalizer.normalize_ingredients(&[
            IngredientEntry::PlainText("a few sprigs of thyme".into()),
            IngredientEntry::Structured(Ingredient::new("eggs").with_quantity(2.0)),
            IngredientEntry::Structured(Ingredient::new("water").with_notes("cold")),
        ]);

        assert_eq!(display[0].id, "ing-0");
        assert!(!display[0].is_structured);
        assert_eq!(display[0].display, "a few sprigs of thyme");

        assert_eq!(display[1].display, "2 eggs");
        assert!(display[1].is_structured);

        assert_eq!(display[2].display, "water — cold");
        assert!(!display[2].is_structured);
    }

    #[test]
    fn test_instruction_flags() {
        let normalizer = RecipeNormalizer::new();
        let steps = normalizer.normalize_instructions(&[
            InstructionEntry::PlainText("Preheat".into()),
            InstructionEntry::Structured(
                Step::new("Proof").with_timing(Timing::of(StepDuration::Minutes(60.0)).passive()),
            ),
            InstructionEntry::Structured(Step::new("Serve")),
        ]);

        assert_eq!(steps[0].id, "step-0");
        assert!(!steps[0].has_timing);

        assert_eq!(steps[1].timing.as_deref(), Some("1h (passive)"));
        assert!(steps[1].is_passive);
        assert!(steps[1].has_timing);

        assert!(!steps[2].has_timing);
        assert!(steps[2].timing.is_none());
    }

    #[test]
    fn test_servings_text() {
        let structured = RecipeYield::Structured {
            amount: Some(QuantityValue::Number(12.0)),
            unit: Some("cookies".into()),
        };
        assert_eq!(servings_text(Some(&structured)).as_deref(), Some("12 cookies"));
        assert_eq!(
            servings_text(Some(&RecipeYield::Legacy("Serves 4".into()))).as_deref(),
            Some("Serves 4")
        );
        assert_eq!(servings_text(None), None);
    }

    #[test]
    fn test_storage_needs_a_duration() {
        let normalizer = RecipeNormalizer::new();
        let plan = StoragePlan {
            refrigerated: Some(StorageMethod::new("P3D")),
            frozen: Some(StorageMethod {
                duration: None,
                notes: Some("not recommended".into()),
            }),
            room_temp: None,
        };
        let storage = normalizer.normalize_storage(Some(&plan)).unwrap();
        assert_eq!(storage.refrigerated.as_deref(), Some("3 days"));
        assert!(storage.frozen.is_none());

        let notes_only = StoragePlan {
            frozen: plan.frozen.clone(),
            ..Default::default()
        };
        assert!(normalizer.normalize_storage(Some(&notes_only)).is_none());
    }

    #[test]
    fn test_total_time_prefers_explicit_value() {
        let mut recipe = Recipe {
            instructions: vec![InstructionEntry::Structured(
                Step::new("Bake").with_timing(Timing::of(StepDuration::Minutes(45.0))),
            )],
            ..Default::default()
        };
        assert_eq!(total_time_text(&recipe).as_deref(), Some("45 min"));

        recipe.total_time_minutes = Some(75.0);
        assert_eq!(total_time_text(&recipe).as_deref(), Some("1 hr 15 min"));
    }

    #[test]
    fn test_out_of_range_explicit_total_is_omitted() {
        let recipe = Recipe {
            total_time_minutes: Some(1e300),
            ..Default::default()
        };
        assert_eq!(total_time_text(&recipe), None);
    }

    #[test]
    fn test_stats_and_title_fallback() {
        let recipe = Recipe {
            name: Some("   ".into()),
            ingredients: vec![
                IngredientEntry::Structured(
                    Ingredient::new("salt").with_scaling(ScalingMode::ToTaste),
                ),
                IngredientEntry::PlainText("pepper".into()),
            ],
            mise_en_place: vec![MiseItem::PlainText("Chop onions".into())],
            ..Default::default()
        };

        let display = normalize_recipe(&recipe);
        assert_eq!(display.title, "Untitled Recipe");
        assert_eq!(display.stats.structured_ingredients, 1);
        assert_eq!(display.stats.total_ingredients, 2);
        assert!(display.stats.has_mise);
        assert!(!display.stats.has_storage);
        assert_eq!(display.prep_tasks, vec!["Chop onions".to_string()]);
        assert_eq!(display.total_time, None);
    }
}
