use anyhow::{Context, Result};
use log::info;
use recipe_normalizer::config::RecipeConfig;
use recipe_normalizer::recipe_integration::{
    generate_extraction_summary, load_recipe_file, process_recipe,
};
use std::env;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    info!("Starting recipe normalizer");

    let mut args = env::args().skip(1);

    // Positional arguments override the environment
    let recipe_path = args
        .next()
        .or_else(|| env::var("RECIPE_FILE").ok())
        .context("Usage: recipe-normalizer <recipe.json> [target-servings] (or set RECIPE_FILE)")?;

    let target_servings = match args.next().or_else(|| env::var("TARGET_SERVINGS").ok()) {
        Some(raw) => Some(
            raw.trim()
                .parse::<u32>()
                .ok()
                .filter(|target| *target >= 1)
                .with_context(|| {
                    format!("Target servings must be a whole number >= 1, got '{raw}'")
                })?,
        ),
        None => None,
    };

    let config = RecipeConfig::from_env().context("Invalid configuration")?;

    let recipe = load_recipe_file(&recipe_path)
        .with_context(|| format!("Failed to load recipe from {recipe_path}"))?;

    let view = process_recipe(&recipe, target_servings, &config);

    info!("{}", generate_extraction_summary(&view.recipe));

    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
