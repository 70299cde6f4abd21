//! # Ingredient Scaler
//!
//! Scales ingredient quantities to a different yield. Works on a minimal
//! projection of an ingredient ([`ScalableIngredient`]) so it can run on raw
//! ingredient lists without going through the normalizer.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_normalizer::scaler::{scale_ingredient, ScalableIngredient};
//!
//! let flour = ScalableIngredient::new("flour").with_quantity(2.0).with_unit("cups");
//! let result = scale_ingredient(&flour, 2.0);
//!
//! assert_eq!(result.display, "4 cups flour");
//! assert!(result.scaled);
//! ```

use crate::config::RecipeConfig;
use crate::display_types::{ScaledIngredient, ScaledIngredientList, ScaledIngredientView};
use crate::quantity::{format_quantity_with_tolerance, parse_quantity, round_to_sensible};
use crate::recipe_ingest::parse_ingredient;
use crate::recipe_model::{Ingredient, IngredientEntry, QuantityValue, ScalingMode};
use crate::servings::{calculate_scale_factor, format_servings, parse_servings};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TO_TASTE_MARKER: &str = "(to taste)";

/// The part of an ingredient the scaler needs
///
/// Deserializes from any ingredient shape [`parse_ingredient`] accepts, so a
/// raw `{"name", "quantity": {"amount", "unit"}, "scaling": {"mode"}}` item
/// and a plain text line both load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct ScalableIngredient {
    pub name: String,
    pub quantity: Option<QuantityValue>,
    pub unit: Option<String>,
    pub scaling: ScalingMode,
}

impl ScalableIngredient {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: None,
            unit: None,
            scaling: ScalingMode::Proportional,
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<QuantityValue>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_scaling(mut self, scaling: ScalingMode) -> Self {
        self.scaling = scaling;
        self
    }

    fn unit(&self) -> Option<&str> {
        self.unit.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Proportional mode with a quantity that parses
    pub fn is_scalable(&self) -> bool {
        self.scaling.is_scalable() && parse_quantity(self.quantity.as_ref()).is_some()
    }
}

impl TryFrom<Value> for ScalableIngredient {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        parse_ingredient(&value)
            .map(|entry| ScalableIngredient::from(&entry))
            .ok_or_else(|| format!("expected ingredient text or object, got {}", value))
    }
}

impl From<&Ingredient> for ScalableIngredient {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            quantity: ingredient.quantity.clone(),
            unit: ingredient.unit.clone(),
            scaling: ingredient.scaling,
        }
    }
}

impl From<&IngredientEntry> for ScalableIngredient {
    fn from(entry: &IngredientEntry) -> Self {
        match entry {
            IngredientEntry::PlainText(text) => ScalableIngredient::new(text),
            IngredientEntry::Structured(ingredient) => ScalableIngredient::from(ingredient),
        }
    }
}

/// Scaler configured with a [`RecipeConfig`]
#[derive(Debug, Clone, Default)]
pub struct RecipeScaler {
    config: RecipeConfig,
}

impl RecipeScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RecipeConfig) -> Self {
        Self { config }
    }

    /// Scale one ingredient by `factor`
    ///
    /// To-taste and fixed ingredients, and ingredients without a usable
    /// quantity, keep their unscaled text. Otherwise the quantity is
    /// multiplied, rounded for its unit and formatted; `scaled` is true when
    /// the factor is not 1.
    pub fn scale_ingredient(
        &self,
        ingredient: &ScalableIngredient,
        factor: f64,
    ) -> ScaledIngredient {
        if !ingredient.scaling.is_scalable() {
            trace!(
                "'{}' is {:?}, not scaling",
                ingredient.name,
                ingredient.scaling
            );
            return unscaled(ingredient);
        }

        let Some(quantity) = parse_quantity(ingredient.quantity.as_ref()) else {
            trace!("'{}' has no usable quantity, not scaling", ingredient.name);
            return unscaled(ingredient);
        };

        let unit = ingredient.unit();
        let value = round_to_sensible(quantity * factor, unit);
        let quantity_text = format_quantity_with_tolerance(value, self.config.fraction_tolerance);

        let display = join_parts([Some(quantity_text.as_str()), unit, name_part(ingredient)]);

        ScaledIngredient {
            display,
            scaled: factor != 1.0,
        }
    }

    /// Scale a whole ingredient list from a servings label to `target` servings
    ///
    /// The original count is the first integer of `servings_label`; a label
    /// without one leaves every ingredient unscaled (factor 1). Rows that do not
    /// change show their original text.
    pub fn scale_ingredients(
        &self,
        servings_label: &str,
        ingredients: &[ScalableIngredient],
        target: u32,
    ) -> ScaledIngredientList {
        let original_servings = parse_servings(servings_label);
        let factor = calculate_scale_factor(
            original_servings.map(f64::from).unwrap_or(0.0),
            f64::from(target),
        );

        if original_servings.is_none() {
            debug!(
                "No servings count in '{}', ingredients stay unscaled",
                servings_label
            );
        }

        let rows: Vec<ScaledIngredientView> = ingredients
            .iter()
            .enumerate()
            .map(|(index, ingredient)| {
                let original = format_ingredient_display(ingredient);
                let result = self.scale_ingredient(ingredient, factor);
                ScaledIngredientView {
                    id: self.config.ingredient_id(index),
                    scaled: if result.scaled {
                        result.display
                    } else {
                        original.clone()
                    },
                    original,
                    is_scaled: result.scaled,
                    is_scalable: ingredient.is_scalable(),
                }
            })
            .collect();

        info!(
            "Scaled {} ingredients from {:?} to {} servings (factor {:.3}), {} changed",
            rows.len(),
            original_servings,
            target,
            factor,
            rows.iter().filter(|row| row.is_scaled).count()
        );

        ScaledIngredientList {
            scale_factor: factor,
            original_servings,
            target_servings: target,
            target_label: format_servings(target, None),
            ingredients: rows,
        }
    }
}

/// Render an ingredient without scaling: `quantity unit name (to taste)`
pub fn format_ingredient_display(ingredient: &ScalableIngredient) -> String {
    let quantity = ingredient
        .quantity
        .as_ref()
        .and_then(QuantityValue::display_text);

    let mut display = join_parts([
        quantity.as_deref(),
        ingredient.unit(),
        name_part(ingredient),
    ]);

    if ingredient.scaling == ScalingMode::ToTaste {
        if !display.is_empty() {
            display.push(' ');
        }
        display.push_str(TO_TASTE_MARKER);
    }

    display
}

/// Scale one ingredient with the default configuration
pub fn scale_ingredient(ingredient: &ScalableIngredient, factor: f64) -> ScaledIngredient {
    RecipeScaler::default().scale_ingredient(ingredient, factor)
}

/// Scale an ingredient list with the default configuration
pub fn scale_ingredients(
    servings_label: &str,
    ingredients: &[ScalableIngredient],
    target: u32,
) -> ScaledIngredientList {
    RecipeScaler::default().scale_ingredients(servings_label, ingredients, target)
}

fn unscaled(ingredient: &ScalableIngredient) -> ScaledIngredient {
    ScaledIngredient {
        display: format_ingredient_display(ingredient),
        scaled: false,
    }
}

fn name_part(ingredient: &ScalableIngredient) -> Option<&str> {
    Some(ingredient.name.trim()).filter(|n| !n.is_empty())
}

fn join_parts<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts.into_iter().flatten().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scale_proportional_ingredient() {
        let flour = ScalableIngredient::new("flour").with_quantity(2.0).with_unit("cups");
        let result = scale_ingredient(&flour, 2.0);
        assert_eq!(result.display, "4 cups flour");
        assert!(result.scaled);
    }

    #[test]
    fn test_scale_fraction_quantity() {
        let butter = ScalableIngredient::new("butter").with_quantity("1/2").with_unit("cup");
        let result = scale_ingredient(&butter, 2.0);
        assert_eq!(result.display, "1 cup butter");
        assert!(result.scaled);

        let halved = scale_ingredient(&butter, 0.5);
        assert_eq!(halved.display, "¼ cup butter");
    }

    #[test]
    fn test_to_taste_never_scales() {
        let salt = ScalableIngredient::new("salt").with_scaling(ScalingMode::ToTaste);
        let result = scale_ingredient(&salt, 2.0);
        assert_eq!(result.display, "salt (to taste)");
        assert!(!result.scaled);
    }

    #[test]
    fn test_fixed_and_to_taste_ignore_every_factor() {
        let bay = ScalableIngredient::new("bay leaf")
            .with_quantity(1.0)
            .with_scaling(ScalingMode::Fixed);
        let pepper = ScalableIngredient::new("pepper")
            .with_quantity("1/4")
            .with_unit("tsp")
            .with_scaling(ScalingMode::ToTaste);

        for factor in [2.0, 0.5, 10.0] {
            let result = scale_ingredient(&bay, factor);
            assert!(!result.scaled);
            assert_eq!(result.display, "1 bay leaf");

            let result = scale_ingredient(&pepper, factor);
            assert!(!result.scaled);
            assert_eq!(result.display, "1/4 tsp pepper (to taste)");
        }
    }

    #[test]
    fn test_unparseable_quantity_is_left_alone() {
        let herbs = ScalableIngredient::new("parsley").with_quantity("a handful");
        let result = scale_ingredient(&herbs, 3.0);
        assert_eq!(result.display, "a handful parsley");
        assert!(!result.scaled);
    }

    #[test]
    fn test_factor_one_is_not_scaled() {
        let eggs = ScalableIngredient::new("eggs").with_quantity(3.0);
        let result = scale_ingredient(&eggs, 1.0);
        assert_eq!(result.display, "3 eggs");
        assert!(!result.scaled);
    }

    #[test]
    fn test_unit_rounding_applies() {
        let garlic = ScalableIngredient::new("garlic").with_quantity(3.0).with_unit("cloves");
        assert_eq!(scale_ingredient(&garlic, 1.5).display, "5 cloves garlic");

        let sugar = ScalableIngredient::new("sugar").with_quantity(110.0).with_unit("g");
        assert_eq!(scale_ingredient(&sugar, 1.5).display, "165 g sugar");
    }

    #[test]
    fn test_format_ingredient_display() {
        let flour = ScalableIngredient::new("flour").with_quantity("1 1/2").with_unit("cups");
        assert_eq!(format_ingredient_display(&flour), "1 1/2 cups flour");
        assert_eq!(format_ingredient_display(&ScalableIngredient::new("water")), "water");
    }

    #[test]
    fn test_scale_ingredients_list() {
        let ingredients = vec![
            ScalableIngredient::new("flour").with_quantity(2.0).with_unit("cups"),
            ScalableIngredient::new("salt").with_scaling(ScalingMode::ToTaste),
        ];

        let list = scale_ingredients("4 servings", &ingredients, 8);
        assert_eq!(list.scale_factor, 2.0);
        assert_eq!(list.original_servings, Some(4));
        assert_eq!(list.target_label, "8 servings");

        assert_eq!(list.ingredients[0].id, "ing-0");
        assert_eq!(list.ingredients[0].original, "2 cups flour");
        assert_eq!(list.ingredients[0].scaled, "4 cups flour");
        assert!(list.ingredients[0].is_scaled);
        assert!(list.ingredients[0].is_scalable);

        assert_eq!(list.ingredients[1].scaled, "salt (to taste)");
        assert!(!list.ingredients[1].is_scaled);
        assert!(!list.ingredients[1].is_scalable);
    }

    #[test]
    fn test_scale_ingredients_without_servings_count() {
        let ingredients = vec![ScalableIngredient::new("rice").with_quantity(1.0).with_unit("cup")];
        let list = scale_ingredients("varies", &ingredients, 6);
        assert_eq!(list.scale_factor, 1.0);
        assert_eq!(list.original_servings, None);
        assert_eq!(list.ingredients[0].scaled, "1 cup rice");
        assert!(!list.ingredients[0].is_scaled);
    }

    #[test]
    fn test_projection_from_entries() {
        let entry = IngredientEntry::Structured(
            Ingredient::new("milk").with_quantity(1.0).with_unit("cup").to_taste(),
        );
        let scalable = ScalableIngredient::from(&entry);
        assert_eq!(scalable.scaling, ScalingMode::ToTaste);
        assert_eq!(scalable.unit.as_deref(), Some("cup"));

        let plain = ScalableIngredient::from(&IngredientEntry::PlainText("2 eggs".into()));
        assert_eq!(plain.name, "2 eggs");
        assert!(plain.quantity.is_none());
    }

    #[test]
    fn test_deserialize_raw_ingredient_shapes() {
        let salt: ScalableIngredient =
            serde_json::from_value(json!({"name": "salt", "scaling": {"mode": "toTaste"}}))
                .unwrap();
        assert_eq!(salt.scaling, ScalingMode::ToTaste);
        assert_eq!(scale_ingredient(&salt, 2.0).display, "salt (to taste)");

        let flour: ScalableIngredient = serde_json::from_value(json!({
            "name": "flour",
            "quantity": {"amount": 2, "unit": "cups"}
        }))
        .unwrap();
        assert_eq!(flour.quantity, Some(QuantityValue::Number(2.0)));
        assert_eq!(flour.unit.as_deref(), Some("cups"));
        assert_eq!(scale_ingredient(&flour, 2.0).display, "4 cups flour");

        let list: Vec<ScalableIngredient> = serde_json::from_value(json!([
            {"name": "butter", "quantity": "1/2", "unit": "cup", "toTaste": false},
            "a pinch of nutmeg"
        ]))
        .unwrap();
        assert_eq!(list[0].quantity, Some(QuantityValue::Text("1/2".into())));
        assert_eq!(list[1].name, "a pinch of nutmeg");

        assert!(serde_json::from_value::<ScalableIngredient>(json!(42)).is_err());
    }

    #[test]
    fn test_serialized_form_loads_back() {
        let bay = ScalableIngredient::new("bay leaf")
            .with_quantity(1.0)
            .with_scaling(ScalingMode::Fixed);
        let json = serde_json::to_value(&bay).unwrap();
        let loaded: ScalableIngredient = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, bay);
    }
}
