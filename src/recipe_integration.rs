//! # Recipe Pipeline
//!
//! Glue between the input boundary and the two transformations: load recipe
//! JSON, normalize it, optionally scale its ingredients, and summarise how
//! much structure the extraction step produced.

use crate::config::RecipeConfig;
use crate::display_types::{DisplayRecipe, ScaledIngredientList};
use crate::normalizer::RecipeNormalizer;
use crate::recipe_errors::RecipeError;
use crate::recipe_ingest::parse_recipe_str;
use crate::recipe_model::Recipe;
use crate::scaler::{RecipeScaler, ScalableIngredient};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Display record plus the optional scaled ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub recipe: DisplayRecipe,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scaled: Option<ScaledIngredientList>,
}

/// Read and ingest a recipe JSON file
pub fn load_recipe_file(path: impl AsRef<Path>) -> Result<Recipe, RecipeError> {
    let path = path.as_ref();
    info!("Loading recipe from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_recipe_str(&text)
}

/// Scaler input for every ingredient of a recipe
pub fn scalable_ingredients(recipe: &Recipe) -> Vec<ScalableIngredient> {
    recipe
        .ingredients
        .iter()
        .map(ScalableIngredient::from)
        .collect()
}

/// Normalize a recipe and, when `target_servings` is given, scale its ingredients
pub fn process_recipe(
    recipe: &Recipe,
    target_servings: Option<u32>,
    config: &RecipeConfig,
) -> RecipeView {
    let display = RecipeNormalizer::with_config(config.clone()).normalize(recipe);

    let scaled = target_servings.map(|target| {
        let label = display.servings.as_deref().unwrap_or_default();
        RecipeScaler::with_config(config.clone()).scale_ingredients(
            label,
            &scalable_ingredients(recipe),
            target,
        )
    });

    RecipeView {
        recipe: display,
        scaled,
    }
}

/// Parse recipe JSON text and run [`process_recipe`]
pub fn process_recipe_json(
    text: &str,
    target_servings: Option<u32>,
    config: &RecipeConfig,
) -> Result<RecipeView, RecipeError> {
    let recipe = parse_recipe_str(text)?;
    Ok(process_recipe(&recipe, target_servings, config))
}

/// Human-readable summary of how much structure was extracted
pub fn generate_extraction_summary(display: &DisplayRecipe) -> String {
    let stats = &display.stats;
    let mut summary = String::new();

    summary.push_str(&format!("📊 **{}**\n\n", display.title));
    summary.push_str(&format!(
        "🥕 **Ingredients:** {}/{} structured ({:.0}%)\n",
        stats.structured_ingredients,
        stats.total_ingredients,
        stats.ingredient_structure_rate() * 100.0
    ));
    summary.push_str(&format!(
        "⏱️ **Steps:** {}/{} timed\n",
        stats.timed_steps, stats.total_steps
    ));

    if let Some(total_time) = &display.total_time {
        summary.push_str(&format!("🕒 **Total time:** {}\n", total_time));
    }
    if stats.has_mise {
        summary.push_str(&format!(
            "🔪 **Mise en place:** {} tasks\n",
            display.prep_tasks.len()
        ));
    }
    if let Some(storage) = &display.storage {
        summary.push_str(&format!("🧊 **Storage:** {} locations\n", storage.len()));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PANCAKES: &str = r#"{
        "name": "Pancakes",
        "servings": "4 servings",
        "ingredients": [
            {"name": "flour", "quantity": 2, "unit": "cups"},
            {"name": "salt", "toTaste": true},
            "butter for the pan"
        ],
        "instructions": [
            "Whisk everything",
            {
                "text": "Rest the batter",
                "timing": {"duration": {"minutes": 30}, "activity": "passive"}
            }
        ],
        "miseEnPlace": ["Melt the butter"]
    }"#;

    #[test]
    fn test_load_recipe_file() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(PANCAKES.as_bytes())?;

        let recipe = load_recipe_file(file.path())?;
        assert_eq!(recipe.name.as_deref(), Some("Pancakes"));
        assert_eq!(recipe.ingredients.len(), 3);
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_recipe_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RecipeError::Io(_)));
    }

    #[test]
    fn test_process_with_scaling() -> anyhow::Result<()> {
        let view = process_recipe_json(PANCAKES, Some(8), &RecipeConfig::default())?;

        assert_eq!(view.recipe.title, "Pancakes");
        let scaled = view.scaled.expect("scaling requested");
        assert_eq!(scaled.scale_factor, 2.0);
        assert_eq!(scaled.ingredients[0].scaled, "4 cups flour");
        assert_eq!(scaled.ingredients[1].scaled, "salt (to taste)");
        assert_eq!(scaled.ingredients[2].scaled, "butter for the pan");
        Ok(())
    }

    #[test]
    fn test_extraction_summary() -> anyhow::Result<()> {
        let view = process_recipe_json(PANCAKES, None, &RecipeConfig::default())?;
        assert!(view.scaled.is_none());

        let summary = generate_extraction_summary(&view.recipe);
        assert!(summary.contains("Pancakes"));
        assert!(summary.contains("2/3 structured"));
        assert!(summary.contains("1/2 timed"));
        assert!(summary.contains("30 min"));
        assert!(summary.contains("Mise en place"));
        assert!(!summary.contains("Storage"));
        Ok(())
    }
}
