//! Nutrient arithmetic over the nutrition side of a build.
//!
//! Values in the Food Nutrients inventory are per 100 g, so every
//! computation funnels through a Quantity's gram weight: grams map 1:1 and
//! any other unit is resolved through the Food's unit sequences. A Recipe
//! scales its subtree by the consumed share of the prepared batch.

use std::collections::BTreeSet;

use chrono::NaiveTime;

use super::{BuildNode, Payload, RefView};

/// Protein, fat and carbohydrate gram totals (nutrient IDs 203, 204, 205).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MacroWeights {
    pub protein: f64,
    pub fat: f64,
    pub carbohydrate: f64,
}

impl BuildNode {
    /// Gram weight of this node's portion. Zero for anything but a Quantity,
    /// and zero when the unit cannot be resolved for the referenced Food.
    pub fn portion_grams(&self, view: RefView<'_>) -> f64 {
        let Payload::Quantity {
            food_id,
            amount,
            unit,
        } = &self.payload
        else {
            return 0.0;
        };
        if *amount == 0.0 {
            return 0.0;
        }
        if unit == "g" {
            return *amount;
        }
        let Some(food) = view.foods.get(food_id) else {
            return 0.0;
        };
        food.unit_sequences
            .iter()
            .find(|sequence| sequence.unit == *unit)
            .map(|sequence| (amount / sequence.amount) * sequence.grams)
            .unwrap_or(0.0)
    }

    /// Total value of one nutrient over the subtree, in the nutrient's unit.
    pub fn nutrient_value(&self, view: RefView<'_>, nutrient_id: &str) -> f64 {
        match &self.payload {
            Payload::Quantity { food_id, .. } => {
                let per_hectogram = view
                    .food_nutrients
                    .get(food_id)
                    .and_then(|content| content.get(nutrient_id))
                    .copied()
                    .unwrap_or(0.0);
                self.portion_grams(view) / 100.0 * per_hectogram
            }
            Payload::Recipe { portion, .. } => {
                let total: f64 = self
                    .children
                    .iter()
                    .map(|child| child.nutrient_value(view, nutrient_id))
                    .sum();
                total * portion.multiplier()
            }
            _ => self
                .children
                .iter()
                .map(|child| child.nutrient_value(view, nutrient_id))
                .sum(),
        }
    }

    pub fn macro_weights(&self, view: RefView<'_>) -> MacroWeights {
        MacroWeights {
            protein: self.nutrient_value(view, "203"),
            fat: self.nutrient_value(view, "204"),
            carbohydrate: self.nutrient_value(view, "205"),
        }
    }

    /// All Food item IDs referenced beneath (and including) this node.
    pub fn unique_foods(&self) -> BTreeSet<String> {
        let mut foods = BTreeSet::new();
        self.collect_foods(&mut foods);
        foods
    }

    fn collect_foods(&self, foods: &mut BTreeSet<String>) {
        match &self.payload {
            Payload::Ingredient { food_id } | Payload::Quantity { food_id, .. } => {
                foods.insert(food_id.clone());
            }
            _ => {}
        }
        for child in &self.children {
            child.collect_foods(foods);
        }
    }

    pub fn has_ingredient(&self) -> bool {
        matches!(self.payload, Payload::Ingredient { .. })
            || self.children.iter().any(BuildNode::has_ingredient)
    }

    pub fn has_quantity(&self) -> bool {
        matches!(self.payload, Payload::Quantity { .. })
            || self.children.iter().any(BuildNode::has_quantity)
    }

    /// Sorted times of the child Meals. Only meaningful on a Diet.
    pub fn meal_times(&self) -> Vec<NaiveTime> {
        let mut times: Vec<NaiveTime> = self
            .children
            .iter()
            .filter_map(|child| match child.payload {
                Payload::Meal { time, .. } => Some(time),
                _ => None,
            })
            .collect();
        times.sort();
        times
    }
}
