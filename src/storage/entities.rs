//! Serde shapes of the persisted documents.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::build::{BuildNode, Kind};
use crate::refdata;

/// `AppState.json`: application-level bookkeeping shared by all users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppStateData {
    /// Date the application first ran; stamped on first start.
    pub created: Option<NaiveDate>,
    /// Username logged in automatically on start.
    #[serde(rename = "default")]
    pub default_user: Option<String>,
    pub users: Vec<String>,
    pub version: String,
}

impl AppStateData {
    pub fn new(version: &str) -> Self {
        AppStateData {
            created: None,
            default_user: None,
            users: Vec::new(),
            version: version.to_string(),
        }
    }
}

/// `Profile.json`: the health diary and the nutrient guide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Entry date to health metric measurements.
    #[serde(default)]
    pub diary: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
    /// Effective date to daily nutrient targets.
    #[serde(default)]
    pub guide: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
}

impl Profile {
    /// The targets in effect on `date`: the entry with the latest effective
    /// date on or before it.
    pub fn targets_for(&self, date: NaiveDate) -> Option<(&NaiveDate, &BTreeMap<String, f64>)> {
        self.guide.range(..=date).next_back()
    }
}

/// `Records.json`: dated Diet and Program builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub diets: BTreeMap<NaiveDate, BuildNode>,
    #[serde(default)]
    pub programs: BTreeMap<NaiveDate, BuildNode>,
}

impl Records {
    pub fn map(&self, kind: Kind) -> Result<&BTreeMap<NaiveDate, BuildNode>> {
        match kind {
            Kind::Diet => Ok(&self.diets),
            Kind::Program => Ok(&self.programs),
            other => bail!("{other} builds cannot be saved as records"),
        }
    }

    pub fn map_mut(&mut self, kind: Kind) -> Result<&mut BTreeMap<NaiveDate, BuildNode>> {
        match kind {
            Kind::Diet => Ok(&mut self.diets),
            Kind::Program => Ok(&mut self.programs),
            other => bail!("{other} builds cannot be saved as records"),
        }
    }
}

/// `Templates.json`: reusable builds per top-level kind, with numeric string
/// IDs kept consecutive from 101.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default)]
    pub recipes: BTreeMap<String, BuildNode>,
    #[serde(default)]
    pub meals: BTreeMap<String, BuildNode>,
    #[serde(default)]
    pub diets: BTreeMap<String, BuildNode>,
    #[serde(default)]
    pub workouts: BTreeMap<String, BuildNode>,
    #[serde(default)]
    pub cycles: BTreeMap<String, BuildNode>,
    #[serde(default)]
    pub programs: BTreeMap<String, BuildNode>,
}

impl Templates {
    pub fn map(&self, kind: Kind) -> Result<&BTreeMap<String, BuildNode>> {
        match kind {
            Kind::Recipe => Ok(&self.recipes),
            Kind::Meal => Ok(&self.meals),
            Kind::Diet => Ok(&self.diets),
            Kind::Workout => Ok(&self.workouts),
            Kind::Cycle => Ok(&self.cycles),
            Kind::Program => Ok(&self.programs),
            other => bail!("{other} elements cannot be saved as templates"),
        }
    }

    pub fn map_mut(&mut self, kind: Kind) -> Result<&mut BTreeMap<String, BuildNode>> {
        match kind {
            Kind::Recipe => Ok(&mut self.recipes),
            Kind::Meal => Ok(&mut self.meals),
            Kind::Diet => Ok(&mut self.diets),
            Kind::Workout => Ok(&mut self.workouts),
            Kind::Cycle => Ok(&mut self.cycles),
            Kind::Program => Ok(&mut self.programs),
            other => bail!("{other} elements cannot be saved as templates"),
        }
    }
}

/// Favorite item IDs per inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Favorites {
    pub foods: Vec<String>,
    pub exercises: Vec<String>,
    pub recipe_templates: Vec<String>,
    pub meal_templates: Vec<String>,
    pub diet_templates: Vec<String>,
    pub workout_templates: Vec<String>,
    pub cycle_templates: Vec<String>,
    pub program_templates: Vec<String>,
    pub diet_records: Vec<String>,
    pub program_records: Vec<String>,
}

impl Favorites {
    pub fn template_list_mut(&mut self, kind: Kind) -> Result<&mut Vec<String>> {
        match kind {
            Kind::Recipe => Ok(&mut self.recipe_templates),
            Kind::Meal => Ok(&mut self.meal_templates),
            Kind::Diet => Ok(&mut self.diet_templates),
            Kind::Workout => Ok(&mut self.workout_templates),
            Kind::Cycle => Ok(&mut self.cycle_templates),
            Kind::Program => Ok(&mut self.program_templates),
            other => bail!("no template favorites for {other}"),
        }
    }

    pub fn record_list_mut(&mut self, kind: Kind) -> Result<&mut Vec<String>> {
        match kind {
            Kind::Diet => Ok(&mut self.diet_records),
            Kind::Program => Ok(&mut self.program_records),
            other => bail!("no record favorites for {other}"),
        }
    }

    /// Adds or removes `item_id` from a favorites list, idempotently.
    pub fn mark(list: &mut Vec<String>, item_id: &str, is_favorite: bool) {
        if is_favorite {
            if !list.iter().any(|id| id == item_id) {
                list.push(item_id.to_string());
            }
        } else {
            list.retain(|id| id != item_id);
        }
    }
}

/// `Settings.json`: per-user application behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ask before deleting inventory items.
    pub ask_delete: bool,
    /// Ask before exiting with unsaved workspace edits.
    pub ask_exit: bool,
    /// Show build info for the whole build rather than a selected element.
    pub whole_build_info: bool,
    /// Sort inventories by item ID; by description otherwise.
    pub sort_by_id: bool,
    pub sort_ascending: bool,
    /// Nutrient IDs shown in build info, in order.
    pub nutrient_order: Vec<String>,
    /// Focus muscles shown in build info, in order.
    pub muscle_order: Vec<String>,
    pub favorites: Favorites,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ask_delete: true,
            ask_exit: true,
            whole_build_info: true,
            sort_by_id: true,
            sort_ascending: true,
            nutrient_order: refdata::DEFAULT_NUTRIENT_ORDER
                .iter()
                .map(|id| id.to_string())
                .collect(),
            muscle_order: refdata::MUSCLES.iter().map(|m| m.to_string()).collect(),
            favorites: Favorites::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults_survive_partial_documents() {
        let settings: Settings = serde_json::from_str("{\"ask_delete\": false}").unwrap();
        assert!(!settings.ask_delete);
        assert!(settings.ask_exit);
        assert_eq!(
            settings.nutrient_order.len(),
            refdata::DEFAULT_NUTRIENT_ORDER.len()
        );
        assert!(settings.favorites.foods.is_empty());
    }

    #[test]
    fn guide_targets_pick_latest_effective_date() {
        let mut profile = Profile::default();
        let january = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        let june = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
        profile
            .guide
            .insert(january, BTreeMap::from([("203".to_string(), 50.0)]));
        profile
            .guide
            .insert(june, BTreeMap::from([("203".to_string(), 120.0)]));

        let march = NaiveDate::from_ymd_opt(2017, 3, 15).unwrap();
        assert_eq!(profile.targets_for(march).unwrap().0, &january);
        assert_eq!(profile.targets_for(june).unwrap().0, &june);
        let before = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap();
        assert!(profile.targets_for(before).is_none());
    }

    #[test]
    fn favorites_marking_is_idempotent() {
        let mut favorites = Favorites::default();
        Favorites::mark(&mut favorites.foods, "200001", true);
        Favorites::mark(&mut favorites.foods, "200001", true);
        assert_eq!(favorites.foods, ["200001"]);
        Favorites::mark(&mut favorites.foods, "200001", false);
        assert!(favorites.foods.is_empty());
    }

    #[test]
    fn record_and_template_maps_reject_wrong_kinds() {
        let mut records = Records::default();
        assert!(records.map_mut(Kind::Diet).is_ok());
        assert!(records.map_mut(Kind::Meal).is_err());

        let mut templates = Templates::default();
        assert!(templates.map_mut(Kind::Meal).is_ok());
        assert!(templates.map_mut(Kind::Ingredient).is_err());
    }
}
