//! # Recipe Normalization Example
//!
//! This example walks a recipe record through the pipeline: ingestion of
//! loosely-shaped JSON, normalization into a display record, and scaling of the
//! ingredient list to a different number of servings. It mixes current-schema
//! and legacy-schema fields on purpose.

use recipe_normalizer::config::RecipeConfig;
use recipe_normalizer::recipe_integration::{generate_extraction_summary, process_recipe_json};
use recipe_normalizer::recipe_model::ScalingMode;
use recipe_normalizer::scaler::{scale_ingredient, ScalableIngredient};

const SHAKSHUKA: &str = r#"{
    "name": "Shakshuka",
    "description": "Eggs poached in spiced tomato sauce",
    "servings": "Serves 4",
    "miseEnPlace": ["Slice the peppers", {"text": "Crack the eggs into a bowl"}],
    "ingredients": [
        {"name": "olive oil", "quantity": {"amount": 3, "unit": "tbsp"}},
        {"name": "red peppers", "quantity": 2, "preparation": "sliced"},
        {"name": "garlic", "quantity": "3", "unit": "cloves", "prep": "minced"},
        {"name": "crushed tomatoes", "quantity": {"amount": 800, "unit": "g"}},
        {"name": "cumin", "quantity": "1 1/2", "unit": "tsp"},
        {"name": "eggs", "quantity": 6},
        {"name": "salt", "toTaste": true},
        {"name": "bay leaf", "quantity": 1, "scaling": {"mode": "fixed"}},
        "Crusty bread, to serve"
    ],
    "instructions": [
        {
            "text": "Soften the peppers in the oil",
            "timing": {"duration": {"minMinutes": 8, "maxMinutes": 10}}
        },
        {
            "text": "Add garlic and spices",
            "timing": {"duration": {"minutes": 1}, "completionCue": "until fragrant"}
        },
        {
            "text": "Simmer the tomatoes",
            "timing": {"duration": {"minutes": 15}, "activity": "passive"}
        },
        {"text": "Poach the eggs", "timing": {"completionCue": "until the whites set"}},
        "Serve straight from the pan"
    ],
    "storage": {
        "refrigerated": {"duration": {"iso8601": "P3D"}, "notes": "sauce only, without eggs"}
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("🍳 Recipe Normalization Example");
    println!("===============================\n");

    // Example 1: Normalize a recipe into a display record
    println!("📖 Example 1: Display Record");
    println!("----------------------------");

    let config = RecipeConfig::default();
    let view = process_recipe_json(SHAKSHUKA, Some(6), &config)?;
    let recipe = &view.recipe;

    println!("{}", recipe.title);
    if let Some(servings) = &recipe.servings {
        println!("  Servings: {}", servings);
    }
    if let Some(total_time) = &recipe.total_time {
        println!("  Total time: {}", total_time);
    }

    println!("\nPrep:");
    for task in &recipe.prep_tasks {
        println!("  - {}", task);
    }

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        let marker = if ingredient.is_structured { "✓" } else { " " };
        println!("  [{}] {}", marker, ingredient.display);
    }

    println!("\nInstructions:");
    for (i, step) in recipe.instructions.iter().enumerate() {
        match &step.timing {
            Some(timing) => println!("  {}. {} [{}]", i + 1, step.text, timing),
            None => println!("  {}. {}", i + 1, step.text),
        }
    }

    if let Some(storage) = &recipe.storage {
        println!("\nStorage:");
        if let Some(text) = &storage.refrigerated {
            println!("  Fridge: {}", text);
        }
        if let Some(text) = &storage.frozen {
            println!("  Freezer: {}", text);
        }
        if let Some(text) = &storage.room_temp {
            println!("  Room temperature: {}", text);
        }
    }

    println!("\n");

    // Example 2: Scaled ingredient list
    println!("⚖️ Example 2: Scaling to 6 Servings");
    println!("-----------------------------------");

    if let Some(scaled) = &view.scaled {
        println!(
            "Factor {:.2} ({:?} → {})",
            scaled.scale_factor, scaled.original_servings, scaled.target_label
        );
        for row in &scaled.ingredients {
            if row.is_scaled {
                println!("  {} → {}", row.original, row.scaled);
            } else {
                println!("  {} (unchanged)", row.original);
            }
        }
    }

    println!("\n");

    // Example 3: Scaling single ingredients by hand
    println!("🧂 Example 3: Scaling Modes");
    println!("---------------------------");

    let samples = [
        ScalableIngredient::new("flour").with_quantity("2 1/4").with_unit("cups"),
        ScalableIngredient::new("butter").with_quantity(113.0).with_unit("g"),
        ScalableIngredient::new("pepper").with_scaling(ScalingMode::ToTaste),
        ScalableIngredient::new("vanilla pod")
            .with_quantity(1.0)
            .with_scaling(ScalingMode::Fixed),
    ];

    for factor in [0.5, 3.0] {
        println!("Factor {}:", factor);
        for sample in &samples {
            let result = scale_ingredient(sample, factor);
            println!("  {} (scaled: {})", result.display, result.scaled);
        }
    }

    println!("\n");

    // Example 4: Extraction summary
    println!("📊 Example 4: Extraction Summary");
    println!("-------------------------------");
    println!("{}", generate_extraction_summary(recipe));

    println!("📦 Display record as JSON:");
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
