//! # Recipe Ingestion
//!
//! Converts loosely-structured recipe JSON, as produced by the extraction step
//! across its schema revisions, into the typed [`Recipe`] model. All the
//! "old shape or new shape" decisions are made here, once.
//!
//! ## Features
//!
//! - Ingredients and instructions as plain strings or structured objects
//! - Quantities as numbers, strings or `{amount, unit}` objects
//! - Legacy `toTaste` flag and current `scaling.mode` annotation
//! - Step durations as minutes, `{minMinutes, maxMinutes}` or `{hours, minutes}`
//! - Structured `{amount, unit}` yields and legacy `servings` labels
//! - Never fails on a JSON value: unusable fields are dropped with a warning
//!
//! ## Usage
//!
//! ```rust
//! use recipe_normalizer::recipe_ingest::parse_recipe;
//! use serde_json::json;
//!
//! let recipe = parse_recipe(&json!({
//!     "name": "Pancakes",
//!     "servings": "4 servings",
//!     "ingredients": ["2 eggs", {"name": "flour", "quantity": {"amount": 1.5, "unit": "cups"}}],
//!     "instructions": ["Mix", {"text": "Cook", "timing": {"duration": {"minutes": 10}}}]
//! }));
//!
//! assert_eq!(recipe.ingredients.len(), 2);
//! assert_eq!(recipe.instructions.len(), 2);
//! ```

use crate::recipe_errors::RecipeError;
use crate::recipe_model::{
    Activity, Ingredient, IngredientEntry, InstructionEntry, MiseItem, QuantityValue, Recipe,
    RecipeYield, ScalingMode, Step, StepDuration, StorageMethod, StoragePlan, Timing,
};
use log::{debug, info, trace, warn};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// Parse recipe JSON text
///
/// Only malformed JSON is an error; any JSON value is accepted and degraded.
pub fn parse_recipe_str(text: &str) -> Result<Recipe, RecipeError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(parse_recipe(&value))
}

/// Convert a recipe JSON value of any supported schema revision
pub fn parse_recipe(value: &Value) -> Recipe {
    let Some(obj) = value.as_object() else {
        warn!("Recipe input is not a JSON object, using an empty recipe");
        return Recipe::default();
    };

    let recipe = Recipe {
        name: text_field(obj, &["name", "title"]),
        description: text_field(obj, &["description"]),
        recipe_yield: parse_yield(obj),
        total_time_minutes: parse_total_time(obj),
        ingredients: array_field(obj, &["ingredients"])
            .iter()
            .filter_map(parse_ingredient)
            .collect(),
        instructions: array_field(obj, &["instructions", "steps"])
            .iter()
            .filter_map(parse_instruction)
            .collect(),
        mise_en_place: array_field(obj, &["miseEnPlace", "mise"])
            .iter()
            .filter_map(parse_mise_item)
            .collect(),
        storage: obj.get("storage").and_then(parse_storage),
    };

    info!(
        "Ingested recipe {:?}: {} ingredients, {} instructions, {} mise items",
        recipe.name,
        recipe.ingredients.len(),
        recipe.instructions.len(),
        recipe.mise_en_place.len()
    );

    recipe
}

/// Convert one ingredient item; `None` for items that are neither text nor objects
pub fn parse_ingredient(value: &Value) -> Option<IngredientEntry> {
    match value {
        Value::String(text) => non_empty(text).map(IngredientEntry::PlainText),
        Value::Object(obj) => Some(IngredientEntry::Structured(parse_structured_ingredient(obj))),
        other => {
            warn!("Skipping ingredient that is neither text nor an object: {}", other);
            None
        }
    }
}

fn parse_structured_ingredient(obj: &Object) -> Ingredient {
    let name = text_field(obj, &["name", "item", "ingredient"]).unwrap_or_default();

    // Current schema nests the unit in the quantity object, legacy puts it alongside
    let (raw_amount, structured_unit) = match obj.get("quantity").or_else(|| obj.get("amount")) {
        Some(Value::Object(measure)) => (measure.get("amount"), text_field(measure, &["unit"])),
        Some(raw) => (Some(raw), None),
        None => (None, None),
    };
    let quantity = raw_amount.and_then(quantity_value);
    let unit = structured_unit.or_else(|| text_field(obj, &["unit"]));

    // A zero or blank amount leaves nothing for the unit to measure
    let unit = match raw_amount {
        Some(amount) if quantity.is_none() && !amount.is_null() => {
            debug!("Dropping unit {:?} of '{}', its quantity {} is empty", unit, name, amount);
            None
        }
        _ => unit,
    };

    let to_taste_flag = ["toTaste", "to_taste"]
        .iter()
        .any(|key| obj.get(*key).and_then(Value::as_bool).unwrap_or(false));

    let annotated_mode = match obj.get("scaling") {
        Some(Value::Object(scaling)) => scaling
            .get("mode")
            .and_then(Value::as_str)
            .and_then(ScalingMode::from_label),
        Some(Value::String(label)) => ScalingMode::from_label(label),
        _ => None,
    };

    let scaling = if to_taste_flag {
        ScalingMode::ToTaste
    } else {
        annotated_mode.unwrap_or_default()
    };

    trace!(
        "Ingredient '{}': quantity={:?}, unit={:?}, scaling={:?}",
        name,
        quantity,
        unit,
        scaling
    );

    Ingredient {
        name,
        quantity,
        unit,
        preparation: text_field(obj, &["preparation", "prep"]),
        notes: text_field(obj, &["notes", "note"]),
        scaling,
    }
}

/// Convert one instruction item; `None` for items that are neither text nor objects
pub fn parse_instruction(value: &Value) -> Option<InstructionEntry> {
    match value {
        Value::String(text) => non_empty(text).map(InstructionEntry::PlainText),
        Value::Object(obj) => {
            let text = text_field(obj, &["text", "step", "instruction", "description"])
                .unwrap_or_default();
            let timing = match obj.get("timing") {
                Some(Value::Object(timing)) => parse_timing(timing),
                _ => None,
            };
            Some(InstructionEntry::Structured(Step { text, timing }))
        }
        other => {
            warn!("Skipping instruction that is neither text nor an object: {}", other);
            None
        }
    }
}

fn parse_timing(obj: &Object) -> Option<Timing> {
    let timing = Timing {
        duration: obj.get("duration").and_then(parse_step_duration),
        activity: obj
            .get("activity")
            .and_then(Value::as_str)
            .and_then(|label| match label.trim().to_lowercase().as_str() {
                "passive" => Some(Activity::Passive),
                "active" => Some(Activity::Active),
                _ => None,
            }),
        completion_cue: text_field(obj, &["completionCue", "cue"]),
    };

    if timing == Timing::default() {
        None
    } else {
        Some(timing)
    }
}

/// Read a step duration: bare minutes, `{minutes}`, `{minMinutes, maxMinutes}`
/// or the legacy `{hours, minutes}` pair
pub fn parse_step_duration(value: &Value) -> Option<StepDuration> {
    let obj = match value {
        Value::Object(obj) => obj,
        other => return number_value(other).map(StepDuration::Minutes),
    };

    let min = number_field(obj, &["minMinutes", "min"]);
    let max = number_field(obj, &["maxMinutes", "max"]);
    if min.is_some() || max.is_some() {
        let min_minutes = min.or(max)?;
        let max_minutes = max.or(min)?;
        return Some(StepDuration::Range {
            min_minutes,
            max_minutes,
        });
    }

    let minutes = number_field(obj, &["minutes"]);
    if obj.contains_key("hours") {
        return Some(StepDuration::HoursMinutes {
            hours: number_field(obj, &["hours"]),
            minutes,
        });
    }

    minutes.map(StepDuration::Minutes)
}

fn parse_mise_item(value: &Value) -> Option<MiseItem> {
    match value {
        Value::String(text) => Some(MiseItem::PlainText(text.clone())),
        Value::Object(obj) => Some(MiseItem::Structured {
            text: text_field(obj, &["text", "task"]),
        }),
        _ => None,
    }
}

fn parse_yield(obj: &Object) -> Option<RecipeYield> {
    let candidates: Vec<RecipeYield> = ["yield", "recipeYield", "servings"]
        .iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(yield_value)
        .collect();

    let structured = candidates
        .iter()
        .find(|y| matches!(y, RecipeYield::Structured { .. }));

    match structured {
        Some(structured) => {
            if candidates.len() > 1 {
                debug!("Structured yield takes precedence over legacy servings");
            }
            Some(structured.clone())
        }
        None => candidates.into_iter().next(),
    }
}

fn yield_value(value: &Value) -> Option<RecipeYield> {
    match value {
        Value::Object(obj) => {
            let amount = obj.get("amount").and_then(quantity_value);
            let unit = text_field(obj, &["unit"]);
            if amount.is_none() && unit.is_none() {
                return None;
            }
            Some(RecipeYield::Structured { amount, unit })
        }
        Value::String(text) => non_empty(text).map(RecipeYield::Legacy),
        Value::Number(n) => Some(RecipeYield::Legacy(n.to_string())),
        _ => None,
    }
}

fn parse_total_time(obj: &Object) -> Option<f64> {
    let minutes = match obj.get("totalTime") {
        Some(Value::Object(time)) => {
            match (number_field(time, &["hours"]), number_field(time, &["minutes"])) {
                (None, None) => None,
                (hours, minutes) => Some(hours.unwrap_or(0.0) * 60.0 + minutes.unwrap_or(0.0)),
            }
        }
        Some(other) => number_value(other),
        None => None,
    }
    .or_else(|| number_field(obj, &["totalTimeMinutes"]));

    minutes.filter(|m| *m > 0.0)
}

fn parse_storage(value: &Value) -> Option<StoragePlan> {
    let Some(obj) = value.as_object() else {
        warn!("Storage is not an object, ignoring it");
        return None;
    };

    let plan = StoragePlan {
        refrigerated: storage_method(obj, &["refrigerated", "fridge"]),
        frozen: storage_method(obj, &["frozen", "freezer"]),
        room_temp: storage_method(obj, &["roomTemp", "room_temp", "roomTemperature"]),
    };

    if plan == StoragePlan::default() {
        None
    } else {
        Some(plan)
    }
}

fn storage_method(obj: &Object, keys: &[&str]) -> Option<StorageMethod> {
    keys.iter()
        .find_map(|key| obj.get(*key))
        .and_then(parse_storage_method)
}

fn parse_storage_method(value: &Value) -> Option<StorageMethod> {
    match value {
        Value::String(duration) => non_empty(duration).map(|d| StorageMethod {
            duration: Some(d),
            notes: None,
        }),
        Value::Object(obj) => {
            let duration = match obj.get("duration") {
                Some(Value::Object(duration)) => text_field(duration, &["iso8601", "iso"]),
                Some(Value::String(duration)) => non_empty(duration),
                _ => None,
            };
            let notes = text_field(obj, &["notes", "note"]);
            if duration.is_none() && notes.is_none() {
                None
            } else {
                Some(StorageMethod { duration, notes })
            }
        }
        _ => None,
    }
}

fn quantity_value(value: &Value) -> Option<QuantityValue> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|n| *n != 0.0 && n.is_finite())
            .map(QuantityValue::Number),
        Value::String(text) => non_empty(text).map(QuantityValue::Text),
        _ => None,
    }
}

fn number_value(value: &Value) -> Option<f64> {
    let number: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn number_field(obj: &Object, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| obj.get(*key).and_then(number_value))
}

fn text_field(obj: &Object, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str).and_then(non_empty))
}

fn array_field<'a>(obj: &'a Object, keys: &[&str]) -> &'a [Value] {
    match keys.iter().find_map(|key| obj.get(*key)) {
        Some(Value::Array(items)) => items.as_slice(),
        Some(Value::Null) | None => &[],
        Some(other) => {
            warn!("Expected a list for {:?}, got {}; treating it as empty", keys, other);
            &[]
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
