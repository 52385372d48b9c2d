//! Food and Exercise reference items and their shareable "data capsule"
//! form.
//!
//! Reference items are the building blocks of every build: an Ingredient or
//! Quantity points at a Food item, an Activity or Session points at an
//! Exercise item. A data capsule is a single reference item exported as one
//! JSON document so it can be handed to another user and imported there.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::refdata;

/// Nutrient content of a Food: nutrient ID to value per 100 g.
pub type NutrientContent = BTreeMap<String, f64>;

/// One measure conversion for a Food: `amount` of `unit` weighs `grams`
/// grams. A portion in grams needs no sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSequence {
    pub amount: f64,
    pub unit: String,
    pub grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDetail {
    pub description: String,
    pub group_id: String,
    #[serde(default)]
    pub unit_sequences: Vec<UnitSequence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDetail {
    pub description: String,
    pub focus_muscle: String,
    /// Effort unit and intensity unit, in that order.
    pub units: [String; 2],
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A single-item export of a reference item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataCapsule {
    Food {
        description: String,
        group_id: String,
        unit_sequences: Vec<UnitSequence>,
        nutrients: NutrientContent,
    },
    Exercise {
        description: String,
        focus_muscle: String,
        units: [String; 2],
        tags: Vec<String>,
    },
}

impl DataCapsule {
    pub fn from_food(detail: &FoodDetail, nutrients: &NutrientContent) -> Self {
        DataCapsule::Food {
            description: detail.description.clone(),
            group_id: detail.group_id.clone(),
            unit_sequences: detail.unit_sequences.clone(),
            nutrients: nutrients.clone(),
        }
    }

    pub fn from_exercise(detail: &ExerciseDetail) -> Self {
        DataCapsule::Exercise {
            description: detail.description.clone(),
            focus_muscle: detail.focus_muscle.clone(),
            units: detail.units.clone(),
            tags: detail.tags.clone(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            DataCapsule::Food { description, .. } => description,
            DataCapsule::Exercise { description, .. } => description,
        }
    }

    pub fn is_food(&self) -> bool {
        matches!(self, DataCapsule::Food { .. })
    }

    /// Checks the capsule against the built-in catalogs before it may become
    /// a reference item. Capsule files come from other users, so nothing in
    /// them is trusted.
    pub fn validate(&self) -> Result<()> {
        match self {
            DataCapsule::Food {
                description,
                group_id,
                unit_sequences,
                nutrients,
            } => {
                if description.trim().is_empty() {
                    bail!("capsule has an empty description");
                }
                if !refdata::is_food_group(group_id) {
                    bail!("unknown food group {group_id:?}");
                }
                for sequence in unit_sequences {
                    validate_unit_sequence(sequence)?;
                }
                for (nutrient_id, value) in nutrients {
                    if !refdata::is_nutrient(nutrient_id) {
                        bail!("unknown nutrient {nutrient_id:?}");
                    }
                    if !value.is_finite() || *value < 0.0 {
                        bail!("nutrient {nutrient_id} has invalid value {value}");
                    }
                }
            }
            DataCapsule::Exercise {
                description,
                focus_muscle,
                units,
                tags,
            } => {
                if description.trim().is_empty() {
                    bail!("capsule has an empty description");
                }
                if !refdata::is_muscle(focus_muscle) {
                    bail!("unknown focus muscle {focus_muscle:?}");
                }
                if units.iter().any(|u| u.trim().is_empty()) {
                    bail!("exercise units must not be empty");
                }
                if tags.iter().any(|t| t.trim().is_empty()) {
                    bail!("exercise tags must not be empty");
                }
            }
        }
        Ok(())
    }

    /// Splits a validated Food capsule into storable parts.
    pub fn into_food(self) -> Option<(FoodDetail, NutrientContent)> {
        match self {
            DataCapsule::Food {
                description,
                group_id,
                unit_sequences,
                nutrients,
            } => Some((
                FoodDetail {
                    description,
                    group_id,
                    unit_sequences,
                },
                nutrients,
            )),
            DataCapsule::Exercise { .. } => None,
        }
    }

    pub fn into_exercise(self) -> Option<ExerciseDetail> {
        match self {
            DataCapsule::Exercise {
                description,
                focus_muscle,
                units,
                tags,
            } => Some(ExerciseDetail {
                description,
                focus_muscle,
                units,
                tags,
            }),
            DataCapsule::Food { .. } => None,
        }
    }
}

fn validate_unit_sequence(sequence: &UnitSequence) -> Result<()> {
    if sequence.unit.trim().is_empty() {
        bail!("unit sequence has an empty unit");
    }
    if !sequence.amount.is_finite() || sequence.amount <= 0.0 {
        bail!("unit sequence amount must be positive");
    }
    if !sequence.grams.is_finite() || sequence.grams <= 0.0 {
        bail!("unit sequence gram weight must be positive");
    }
    Ok(())
}

/// Validates a user-entered Food before it is stored.
pub fn validate_food(detail: &FoodDetail, nutrients: &NutrientContent) -> Result<()> {
    DataCapsule::from_food(detail, nutrients).validate()
}

/// Validates a user-entered Exercise before it is stored.
pub fn validate_exercise(detail: &ExerciseDetail) -> Result<()> {
    DataCapsule::from_exercise(detail).validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oats() -> (FoodDetail, NutrientContent) {
        let detail = FoodDetail {
            description: "Oats, rolled, dry".into(),
            group_id: "0800".into(),
            unit_sequences: vec![UnitSequence {
                amount: 1.0,
                unit: "cup".into(),
                grams: 81.0,
            }],
        };
        let nutrients = NutrientContent::from([
            ("203".to_string(), 13.15),
            ("208".to_string(), 379.0),
        ]);
        (detail, nutrients)
    }

    #[test]
    fn food_capsule_round_trip() {
        let (detail, nutrients) = oats();
        let capsule = DataCapsule::from_food(&detail, &nutrients);
        capsule.validate().unwrap();

        let json = serde_json::to_string(&capsule).unwrap();
        let back: DataCapsule = serde_json::from_str(&json).unwrap();
        let (detail_back, nutrients_back) = back.into_food().unwrap();
        assert_eq!(detail_back, detail);
        assert_eq!(nutrients_back, nutrients);
    }

    #[test]
    fn rejects_unknown_group_and_nutrient() {
        let (mut detail, nutrients) = oats();
        detail.group_id = "9999".into();
        assert!(validate_food(&detail, &nutrients).is_err());

        let (detail, mut nutrients) = oats();
        nutrients.insert("777".into(), 1.0);
        assert!(validate_food(&detail, &nutrients).is_err());
    }

    #[test]
    fn rejects_bad_unit_sequence() {
        let (mut detail, nutrients) = oats();
        detail.unit_sequences[0].grams = 0.0;
        assert!(validate_food(&detail, &nutrients).is_err());
    }

    #[test]
    fn exercise_capsule_validation() {
        let detail = ExerciseDetail {
            description: "Deadlift (Trap Bar)".into(),
            focus_muscle: "Hamstrings".into(),
            units: ["rep".into(), "lb".into()],
            tags: vec!["compound".into()],
        };
        DataCapsule::from_exercise(&detail).validate().unwrap();

        let mut bad = detail.clone();
        bad.focus_muscle = "Wings".into();
        assert!(validate_exercise(&bad).is_err());

        let mut bad = detail;
        bad.units[1] = "".into();
        assert!(validate_exercise(&bad).is_err());
    }

    #[test]
    fn capsule_type_tag_is_stable() {
        let detail = ExerciseDetail {
            description: "Plank".into(),
            focus_muscle: "Abdominals".into(),
            units: ["min".into(), "NA".into()],
            tags: vec![],
        };
        let json = serde_json::to_string(&DataCapsule::from_exercise(&detail)).unwrap();
        assert!(json.contains("\"type\":\"exercise\""));
    }
}
