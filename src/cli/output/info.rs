//! Build info rendering: the nutrient table for nutrition builds and the
//! focus-muscle table for fitness builds.

use std::collections::BTreeMap;

use crate::build::{BuildNode, RefView};
use crate::refdata;
use crate::storage::entities::Settings;
use crate::utils::numbers::fmt_amount;

use super::heading;

/// Nutrient values for the build with each displayed nutrient's unit and,
/// when targets are in effect, the share of the daily target it covers.
pub fn nutrition_info(
    node: &BuildNode,
    view: RefView<'_>,
    settings: &Settings,
    targets: Option<&BTreeMap<String, f64>>,
) -> String {
    let mut out = heading(&format!(
        "{:<30} {:>10} {:<5} {:>9}",
        "Nutrient", "Value", "Unit", "Target"
    ));
    out.push('\n');
    for nutrient_id in &settings.nutrient_order {
        let Some(nutrient) = refdata::nutrient(nutrient_id) else {
            continue;
        };
        let value = node.nutrient_value(view, nutrient_id);
        let share = targets
            .and_then(|targets| targets.get(nutrient_id))
            .filter(|target| **target > 0.0)
            .map(|target| format!("{}%", fmt_amount(value / target * 100.0)))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<30} {:>10} {:<5} {:>9}\n",
            nutrient.name,
            fmt_amount(value),
            nutrient.unit,
            share
        ));
    }
    out
}

/// Session counts, total effort and maximum intensity per focus muscle, in
/// the user's display order. Muscles without sessions are left out.
pub fn fitness_info(node: &BuildNode, view: RefView<'_>, settings: &Settings) -> String {
    let totals = node.muscle_totals(view);
    let mut out = heading(&format!(
        "{:<14} {:>9} {:>10} {:>14}",
        "Muscle", "Sessions", "Effort", "Max intensity"
    ));
    out.push('\n');

    let mut seen = Vec::new();
    for muscle in &settings.muscle_order {
        if let Some(rollup) = totals.get(muscle) {
            out.push_str(&format!(
                "{:<14} {:>9} {:>10} {:>14}\n",
                muscle,
                rollup.sessions,
                fmt_amount(rollup.effort),
                fmt_amount(rollup.max_intensity)
            ));
            seen.push(muscle.clone());
        }
    }
    // muscles outside the configured display order still show up
    for (muscle, rollup) in &totals {
        if !seen.contains(muscle) {
            out.push_str(&format!(
                "{:<14} {:>9} {:>10} {:>14}\n",
                muscle,
                rollup.sessions,
                fmt_amount(rollup.effort),
                fmt_amount(rollup.max_intensity)
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::build::BuildNode;
    use crate::reference::{ExerciseDetail, FoodDetail, NutrientContent, UnitSequence};

    use super::*;

    #[test]
    fn nutrition_table_shows_values_and_target_share() {
        let mut foods = BTreeMap::new();
        foods.insert(
            "200001".to_string(),
            FoodDetail {
                description: "Oats".into(),
                group_id: "0800".into(),
                unit_sequences: vec![UnitSequence {
                    amount: 1.0,
                    unit: "cup".into(),
                    grams: 100.0,
                }],
            },
        );
        let mut nutrients = BTreeMap::new();
        nutrients.insert(
            "200001".to_string(),
            NutrientContent::from([("203".to_string(), 25.0)]),
        );
        let exercises: BTreeMap<String, ExerciseDetail> = BTreeMap::new();
        let view = RefView {
            foods: &foods,
            food_nutrients: &nutrients,
            exercises: &exercises,
        };

        let mut meal = BuildNode::meal();
        let mut ingredient = BuildNode::ingredient("200001");
        ingredient
            .attach(BuildNode::quantity("200001", 1.0, "cup"))
            .unwrap();
        meal.attach(ingredient).unwrap();

        let settings = Settings::default();
        let targets = BTreeMap::from([("203".to_string(), 50.0)]);
        let table = nutrition_info(&meal, view, &settings, Some(&targets));
        let protein_row = table
            .lines()
            .find(|line| line.starts_with("Protein"))
            .unwrap();
        assert!(protein_row.contains("25"));
        assert!(protein_row.contains("50%"));

        let without_targets = nutrition_info(&meal, view, &settings, None);
        let protein_row = without_targets
            .lines()
            .find(|line| line.starts_with("Protein"))
            .unwrap();
        assert!(protein_row.trim_end().ends_with('-'));
    }

    #[test]
    fn fitness_table_lists_only_worked_muscles() {
        let foods: BTreeMap<String, FoodDetail> = BTreeMap::new();
        let nutrients: BTreeMap<String, NutrientContent> = BTreeMap::new();
        let mut exercises = BTreeMap::new();
        exercises.insert(
            "10001".to_string(),
            ExerciseDetail {
                description: "Squat (Barbell)".into(),
                focus_muscle: "Quadriceps".into(),
                units: ["rep".into(), "lb".into()],
                tags: vec![],
            },
        );
        let view = RefView {
            foods: &foods,
            food_nutrients: &nutrients,
            exercises: &exercises,
        };

        let mut workout = BuildNode::workout();
        let mut activity = BuildNode::activity("10001");
        activity
            .attach(BuildNode::session("10001", 5.0, 225.0, ""))
            .unwrap();
        activity
            .attach(BuildNode::session("10001", 5.0, 245.0, ""))
            .unwrap();
        workout.attach(activity).unwrap();

        let table = fitness_info(&workout, view, &Settings::default());
        let row = table
            .lines()
            .find(|line| line.starts_with("Quadriceps"))
            .unwrap();
        assert!(row.contains("2"));
        assert!(row.contains("10"));
        assert!(row.contains("245"));
        assert!(!table.contains("Chest"));
    }
}
