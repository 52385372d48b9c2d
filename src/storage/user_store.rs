//! Per-user data files and every operation that edits them.
//!
//! A `UserStore` holds one user's inventories in memory and writes the
//! affected document back after each change. Reference inventories (Foods,
//! Exercises) are copied from the shared reference source when the user is
//! created, so users' catalogs evolve independently.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use tracing::warn;

use crate::build::{BuildNode, Kind, RefView};
use crate::fs::operations::{read_document, try_read_document, write_document};
use crate::reference::{
    validate_exercise, validate_food, DataCapsule, ExerciseDetail, FoodDetail, NutrientContent,
};
use crate::storage::app_state::AppState;
use crate::storage::entities::{Favorites, Profile, Records, Settings, Templates};
use crate::storage::{
    EXERCISE_DETAILS_FILE, FOOD_DETAILS_FILE, FOOD_NUTRIENTS_FILE, PROFILE_FILE, RECORDS_FILE,
    SETTINGS_FILE, TEMPLATES_FILE, WORKSPACE_FILE,
};
use crate::utils::merge::renumber_consecutive;

const FOOD_ID_FLOOR: u32 = 200_001;
const FOOD_ID_CEILING: u32 = 210_000;
const EXERCISE_ID_FLOOR: u32 = 10_001;
const EXERCISE_ID_CEILING: u32 = 20_000;
const TEMPLATE_ID_FLOOR: u32 = 101;
const TEMPLATE_ID_CEILING: u32 = 600;

/// Where a reference item is still in use, reported before deletion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageCounts {
    pub in_workspace: bool,
    pub record_count: u32,
    pub template_counts: BTreeMap<Kind, u32>,
}

impl UsageCounts {
    pub fn is_used(&self) -> bool {
        self.in_workspace
            || self.record_count > 0
            || self.template_counts.values().any(|count| *count > 0)
    }
}

/// Outcome of a best-effort capsule import batch.
#[derive(Debug, Default)]
pub struct CapsuleImportReport {
    /// Successfully created items: file, new item ID, description.
    pub created: Vec<(PathBuf, String, String)>,
    /// Skipped files with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// What to mark or unmark as a favorite.
#[derive(Debug, Clone, Copy)]
pub enum FavoriteTarget<'a> {
    Food(&'a str),
    Exercise(&'a str),
    Template(Kind, &'a str),
    Record(Kind, NaiveDate),
}

pub struct UserStore {
    username: String,
    user_dir: PathBuf,
    foods: BTreeMap<String, FoodDetail>,
    food_nutrients: BTreeMap<String, NutrientContent>,
    exercises: BTreeMap<String, ExerciseDetail>,
    profile: Profile,
    records: Records,
    settings: Settings,
    templates: Templates,
    workspace: Option<BuildNode>,
}

/// Usernames become directory names, so they are restricted to 1-30
/// letters, digits, hyphens and underscores.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || username.len() > 30 {
        bail!("usernames must be 1-30 characters long");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        bail!("usernames may only contain letters, numbers, hyphens and underscores");
    }
    Ok(())
}

impl UserStore {
    /// Creates a new user: directory, reference copies and default files,
    /// then registers the username in the application state.
    pub async fn create(state: &mut AppState, username: &str) -> Result<UserStore> {
        validate_username(username)?;
        if state.is_user(username) {
            bail!("user {username} already exists");
        }
        let user_dir = state.user_dir(username);
        if tokio::fs::metadata(&user_dir).await.is_ok() {
            bail!("a folder named {username} already exists in the Users directory");
        }
        tokio::fs::create_dir_all(&user_dir).await?;

        // Copy reference inventories from the shared source so every new
        // user starts from the same catalog.
        let reference_dir = state.reference_dir();
        let foods: BTreeMap<String, FoodDetail> =
            read_document(&reference_dir.join(FOOD_DETAILS_FILE)).await?;
        let food_nutrients: BTreeMap<String, NutrientContent> =
            read_document(&reference_dir.join(FOOD_NUTRIENTS_FILE)).await?;
        let exercises: BTreeMap<String, ExerciseDetail> =
            read_document(&reference_dir.join(EXERCISE_DETAILS_FILE)).await?;
        write_document(&user_dir.join(FOOD_DETAILS_FILE), &foods).await?;
        write_document(&user_dir.join(FOOD_NUTRIENTS_FILE), &food_nutrients).await?;
        write_document(&user_dir.join(EXERCISE_DETAILS_FILE), &exercises).await?;

        write_document(&user_dir.join(PROFILE_FILE), &Profile::default()).await?;
        write_document(&user_dir.join(RECORDS_FILE), &Records::default()).await?;
        write_document(&user_dir.join(SETTINGS_FILE), &Settings::default()).await?;
        write_document(&user_dir.join(TEMPLATES_FILE), &Templates::default()).await?;

        state.register_user(username).await?;
        UserStore::load(state, username).await
    }

    /// Loads an active user's files, re-checking every persisted build.
    pub async fn load(state: &AppState, username: &str) -> Result<UserStore> {
        if !state.is_user(username) {
            bail!("{username} is not an active user");
        }
        let user_dir = state.user_dir(username);

        let foods = read_document(&user_dir.join(FOOD_DETAILS_FILE)).await?;
        let food_nutrients = read_document(&user_dir.join(FOOD_NUTRIENTS_FILE)).await?;
        let exercises = read_document(&user_dir.join(EXERCISE_DETAILS_FILE)).await?;
        let profile = read_document(&user_dir.join(PROFILE_FILE)).await?;
        let records: Records = read_document(&user_dir.join(RECORDS_FILE)).await?;
        let settings = read_document(&user_dir.join(SETTINGS_FILE)).await?;
        let templates: Templates = read_document(&user_dir.join(TEMPLATES_FILE)).await?;
        let workspace: Option<BuildNode> =
            try_read_document(&user_dir.join(WORKSPACE_FILE)).await?;

        for kind in [Kind::Diet, Kind::Program] {
            for (date, node) in records.map(kind)? {
                node.validate()
                    .with_context(|| format!("record {date} is damaged"))?;
                if node.kind() != kind || node.record_key() != Some(*date) {
                    bail!("record inventory for {kind} is inconsistent at {date}");
                }
            }
        }
        for kind in [
            Kind::Recipe,
            Kind::Meal,
            Kind::Diet,
            Kind::Workout,
            Kind::Cycle,
            Kind::Program,
        ] {
            for (id, node) in templates.map(kind)? {
                node.validate()
                    .with_context(|| format!("template {id} is damaged"))?;
                if node.kind() != kind {
                    bail!("template inventory for {kind} is inconsistent at {id}");
                }
            }
        }
        if let Some(node) = &workspace {
            node.validate().context("the workspace build is damaged")?;
        }

        Ok(UserStore {
            username: username.to_string(),
            user_dir,
            foods,
            food_nutrients,
            exercises,
            profile,
            records,
            settings,
            templates,
            workspace,
        })
    }

    /// Deletes the user's directory and drops them from the application
    /// state. Irreversible.
    pub async fn delete(state: &mut AppState, username: &str) -> Result<()> {
        let user_dir = state.user_dir(username);
        if let Err(e) = tokio::fs::remove_dir_all(&user_dir).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("could not delete {}: {e}", user_dir.display());
            }
        }
        state.unregister_user(username).await
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn ref_view(&self) -> RefView<'_> {
        RefView {
            foods: &self.foods,
            food_nutrients: &self.food_nutrients,
            exercises: &self.exercises,
        }
    }

    fn path(&self, file_name: &str) -> PathBuf {
        self.user_dir.join(file_name)
    }

    // ------------------------------------------------------------------
    // Settings and favorites

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn update_settings(&mut self, apply: impl FnOnce(&mut Settings)) -> Result<()> {
        apply(&mut self.settings);
        self.save_settings().await
    }

    pub async fn set_favorite(
        &mut self,
        target: FavoriteTarget<'_>,
        is_favorite: bool,
    ) -> Result<()> {
        match target {
            FavoriteTarget::Food(id) => {
                if !self.foods.contains_key(id) {
                    bail!("no Food item {id}");
                }
                Favorites::mark(&mut self.settings.favorites.foods, id, is_favorite);
            }
            FavoriteTarget::Exercise(id) => {
                if !self.exercises.contains_key(id) {
                    bail!("no Exercise item {id}");
                }
                Favorites::mark(&mut self.settings.favorites.exercises, id, is_favorite);
            }
            FavoriteTarget::Template(kind, id) => {
                if !self.templates.map(kind)?.contains_key(id) {
                    bail!("no {kind} template {id}");
                }
                let list = self.settings.favorites.template_list_mut(kind)?;
                Favorites::mark(list, id, is_favorite);
            }
            FavoriteTarget::Record(kind, date) => {
                if !self.records.map(kind)?.contains_key(&date) {
                    bail!("no {kind} record for {date}");
                }
                let list = self.settings.favorites.record_list_mut(kind)?;
                Favorites::mark(list, &date.to_string(), is_favorite);
            }
        }
        self.save_settings().await
    }

    // ------------------------------------------------------------------
    // Health diary

    pub fn diary(&self) -> &BTreeMap<NaiveDate, BTreeMap<String, f64>> {
        &self.profile.diary
    }

    /// Merges measurements into the entry for `date`, creating it if needed.
    pub async fn add_diary_entry(
        &mut self,
        date: NaiveDate,
        measurements: BTreeMap<String, f64>,
    ) -> Result<()> {
        if measurements.is_empty() {
            bail!("an entry needs at least one measurement");
        }
        for (metric, value) in &measurements {
            if metric.trim().is_empty() {
                bail!("health metric names must not be empty");
            }
            if !value.is_finite() {
                bail!("measurement for {metric} is out of range");
            }
        }
        self.profile.diary.entry(date).or_default().extend(measurements);
        self.save_profile().await
    }

    pub async fn remove_diary_entry(&mut self, date: NaiveDate) -> Result<()> {
        if self.profile.diary.remove(&date).is_none() {
            bail!("no diary entry for {date}");
        }
        self.save_profile().await
    }

    /// Removes a metric from every entry; entries left empty are dropped.
    /// Returns how many entries carried the metric.
    pub async fn remove_health_metric(&mut self, metric: &str) -> Result<u32> {
        let mut removed = 0;
        self.profile.diary.retain(|_, measurements| {
            if measurements.remove(metric).is_some() {
                removed += 1;
            }
            !measurements.is_empty()
        });
        if removed == 0 {
            bail!("no diary entry measures {metric:?}");
        }
        self.save_profile().await?;
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Nutrient guide

    pub fn guide(&self) -> &BTreeMap<NaiveDate, BTreeMap<String, f64>> {
        &self.profile.guide
    }

    pub fn targets_for(&self, date: NaiveDate) -> Option<(&NaiveDate, &BTreeMap<String, f64>)> {
        self.profile.targets_for(date)
    }

    /// Sets the targets taking effect on `date`, replacing any previous
    /// entry for that date. All targets must be positive.
    pub async fn set_targets(
        &mut self,
        date: NaiveDate,
        targets: BTreeMap<String, f64>,
    ) -> Result<()> {
        if targets.is_empty() {
            bail!("set at least one nutrient target");
        }
        for (nutrient_id, value) in &targets {
            if !crate::refdata::is_nutrient(nutrient_id) {
                bail!("unknown nutrient {nutrient_id:?}");
            }
            if !value.is_finite() || *value <= 0.0 {
                bail!("targets must be greater than zero");
            }
        }
        self.profile.guide.insert(date, targets);
        self.save_profile().await
    }

    pub async fn remove_targets(&mut self, date: NaiveDate) -> Result<()> {
        if self.profile.guide.remove(&date).is_none() {
            bail!("no nutrient targets effective {date}");
        }
        self.save_profile().await
    }

    // ------------------------------------------------------------------
    // Reference inventories

    pub fn foods(&self) -> &BTreeMap<String, FoodDetail> {
        &self.foods
    }

    pub fn exercises(&self) -> &BTreeMap<String, ExerciseDetail> {
        &self.exercises
    }

    pub fn food(&self, item_id: &str) -> Result<(&FoodDetail, &NutrientContent)> {
        let detail = self
            .foods
            .get(item_id)
            .ok_or_else(|| anyhow!("no Food item {item_id}"))?;
        let nutrients = self
            .food_nutrients
            .get(item_id)
            .ok_or_else(|| anyhow!("Food item {item_id} has no nutrient content"))?;
        Ok((detail, nutrients))
    }

    pub fn exercise(&self, item_id: &str) -> Result<&ExerciseDetail> {
        self.exercises
            .get(item_id)
            .ok_or_else(|| anyhow!("no Exercise item {item_id}"))
    }

    pub async fn add_food(
        &mut self,
        detail: FoodDetail,
        nutrients: NutrientContent,
        is_favorite: bool,
    ) -> Result<String> {
        validate_food(&detail, &nutrients)?;
        let item_id = allocate_id(self.foods.keys(), FOOD_ID_FLOOR, FOOD_ID_CEILING, "Food")?;
        self.foods.insert(item_id.clone(), detail);
        self.food_nutrients.insert(item_id.clone(), nutrients);
        self.save_foods().await?;
        Favorites::mark(&mut self.settings.favorites.foods, &item_id, is_favorite);
        self.save_settings().await?;
        Ok(item_id)
    }

    pub async fn update_food(
        &mut self,
        item_id: &str,
        detail: FoodDetail,
        nutrients: NutrientContent,
    ) -> Result<()> {
        if !self.foods.contains_key(item_id) {
            bail!("no Food item {item_id}");
        }
        validate_food(&detail, &nutrients)?;
        self.foods.insert(item_id.to_string(), detail);
        self.food_nutrients.insert(item_id.to_string(), nutrients);
        self.save_foods().await
    }

    pub async fn remove_food(&mut self, item_id: &str) -> Result<()> {
        if self.foods.remove(item_id).is_none() {
            bail!("no Food item {item_id}");
        }
        self.food_nutrients.remove(item_id);
        self.save_foods().await?;
        Favorites::mark(&mut self.settings.favorites.foods, item_id, false);
        self.save_settings().await
    }

    pub async fn add_exercise(&mut self, detail: ExerciseDetail, is_favorite: bool) -> Result<String> {
        validate_exercise(&detail)?;
        let item_id = allocate_id(
            self.exercises.keys(),
            EXERCISE_ID_FLOOR,
            EXERCISE_ID_CEILING,
            "Exercise",
        )?;
        self.exercises.insert(item_id.clone(), detail);
        self.save_exercises().await?;
        Favorites::mark(&mut self.settings.favorites.exercises, &item_id, is_favorite);
        self.save_settings().await?;
        Ok(item_id)
    }

    pub async fn update_exercise(&mut self, item_id: &str, detail: ExerciseDetail) -> Result<()> {
        if !self.exercises.contains_key(item_id) {
            bail!("no Exercise item {item_id}");
        }
        validate_exercise(&detail)?;
        self.exercises.insert(item_id.to_string(), detail);
        self.save_exercises().await
    }

    pub async fn remove_exercise(&mut self, item_id: &str) -> Result<()> {
        if self.exercises.remove(item_id).is_none() {
            bail!("no Exercise item {item_id}");
        }
        self.save_exercises().await?;
        Favorites::mark(&mut self.settings.favorites.exercises, item_id, false);
        self.save_settings().await
    }

    /// Everywhere a reference item is still referenced: the workspace build,
    /// records, and each applicable template inventory.
    pub fn reference_usage(&self, item_id: &str, is_food: bool) -> UsageCounts {
        let template_kinds: [Kind; 3] = if is_food {
            [Kind::Recipe, Kind::Meal, Kind::Diet]
        } else {
            [Kind::Workout, Kind::Cycle, Kind::Program]
        };
        let uses = |node: &BuildNode| {
            if is_food {
                node.unique_foods().contains(item_id)
            } else {
                node.unique_exercises().contains(item_id)
            }
        };

        let record_map = if is_food {
            &self.records.diets
        } else {
            &self.records.programs
        };
        let mut counts = UsageCounts {
            record_count: record_map.values().filter(|node| uses(node)).count() as u32,
            ..UsageCounts::default()
        };
        for kind in template_kinds {
            let map = self.templates.map(kind).expect("template kinds are fixed");
            counts
                .template_counts
                .insert(kind, map.values().filter(|node| uses(node)).count() as u32);
        }
        if let Some(node) = &self.workspace {
            counts.in_workspace = uses(node);
        }
        counts
    }

    // ------------------------------------------------------------------
    // Templates

    pub fn templates(&self, kind: Kind) -> Result<&BTreeMap<String, BuildNode>> {
        self.templates.map(kind)
    }

    pub fn template(&self, kind: Kind, item_id: &str) -> Result<&BuildNode> {
        self.templates
            .map(kind)?
            .get(item_id)
            .ok_or_else(|| anyhow!("no {kind} template {item_id}"))
    }

    /// Stores the build's template form. With `existing_id` the template is
    /// overwritten in place, otherwise the next consecutive ID is assigned.
    /// Returns the template's item ID.
    pub async fn save_template(
        &mut self,
        node: BuildNode,
        is_favorite: bool,
        existing_id: Option<&str>,
    ) -> Result<String> {
        let kind = node.kind();
        if !kind.is_top_level() {
            bail!("a {kind} cannot be saved as a template");
        }
        node.validate()?;
        let map = self.templates.map_mut(kind)?;
        let item_id = match existing_id {
            Some(id) => {
                if !map.contains_key(id) {
                    bail!("no {kind} template {id}");
                }
                id.to_string()
            }
            None => allocate_id(map.keys(), TEMPLATE_ID_FLOOR, TEMPLATE_ID_CEILING, "template")?,
        };
        map.insert(item_id.clone(), node.into_template());
        self.save_templates().await?;
        let list = self.settings.favorites.template_list_mut(kind)?;
        Favorites::mark(list, &item_id, is_favorite);
        self.save_settings().await?;
        Ok(item_id)
    }

    /// Removes a template and renumbers the survivors so IDs stay
    /// consecutive; the favorites list follows the renumbering.
    pub async fn remove_template(&mut self, kind: Kind, item_id: &str) -> Result<()> {
        let map = self.templates.map_mut(kind)?;
        if map.remove(item_id).is_none() {
            bail!("no {kind} template {item_id}");
        }
        let (renumbered, changes) = renumber_consecutive(
            std::mem::take(map),
            TEMPLATE_ID_FLOOR,
            TEMPLATE_ID_CEILING,
        );
        *map = renumbered;
        self.save_templates().await?;

        let list = self.settings.favorites.template_list_mut(kind)?;
        Favorites::mark(list, item_id, false);
        for id in list.iter_mut() {
            if let Some(new_id) = changes.get(id) {
                *id = new_id.clone();
            }
        }
        self.save_settings().await
    }

    // ------------------------------------------------------------------
    // Records

    pub fn records(&self, kind: Kind) -> Result<&BTreeMap<NaiveDate, BuildNode>> {
        self.records.map(kind)
    }

    pub fn record(&self, kind: Kind, date: NaiveDate) -> Result<&BuildNode> {
        self.records
            .map(kind)?
            .get(&date)
            .ok_or_else(|| anyhow!("no {kind} record for {date}"))
    }

    pub fn record_exists(&self, kind: Kind, date: NaiveDate) -> bool {
        self.records
            .map(kind)
            .map(|map| map.contains_key(&date))
            .unwrap_or(false)
    }

    /// Files the build under its date. When re-saving an edited record whose
    /// date changed, pass the previous date so the old entry is removed
    /// rather than left to duplicate the build.
    pub async fn save_record(
        &mut self,
        node: BuildNode,
        is_favorite: bool,
        previous_date: Option<NaiveDate>,
    ) -> Result<NaiveDate> {
        let kind = node.kind();
        if !kind.is_record() {
            bail!("{kind} builds cannot be saved as records");
        }
        node.validate()?;
        let date = node
            .record_key()
            .ok_or_else(|| anyhow!("an undated {kind} cannot be saved as a record"))?;
        let map = self.records.map_mut(kind)?;
        map.insert(date, node);
        if let Some(previous) = previous_date {
            if previous != date {
                map.remove(&previous);
                let list = self.settings.favorites.record_list_mut(kind)?;
                Favorites::mark(list, &previous.to_string(), false);
            }
        }
        self.save_records().await?;
        let list = self.settings.favorites.record_list_mut(kind)?;
        Favorites::mark(list, &date.to_string(), is_favorite);
        self.save_settings().await?;
        Ok(date)
    }

    pub async fn remove_record(&mut self, kind: Kind, date: NaiveDate) -> Result<()> {
        let map = self.records.map_mut(kind)?;
        if map.remove(&date).is_none() {
            bail!("no {kind} record for {date}");
        }
        self.save_records().await?;
        let list = self.settings.favorites.record_list_mut(kind)?;
        Favorites::mark(list, &date.to_string(), false);
        self.save_settings().await
    }

    // ------------------------------------------------------------------
    // Workspace build

    pub fn workspace(&self) -> Option<&BuildNode> {
        self.workspace.as_ref()
    }

    /// Replaces (or clears) the workspace build and persists it.
    pub async fn set_workspace(&mut self, node: Option<BuildNode>) -> Result<()> {
        if let Some(node) = &node {
            if !node.kind().is_top_level() {
                bail!("a {} cannot be edited as a standalone build", node.kind());
            }
            node.validate()?;
        }
        self.workspace = node;
        self.save_workspace().await
    }

    /// Applies an edit to the workspace build and persists the result.
    pub async fn edit_workspace<T>(
        &mut self,
        apply: impl FnOnce(&mut BuildNode) -> Result<T>,
    ) -> Result<T> {
        let node = self
            .workspace
            .as_mut()
            .ok_or_else(|| anyhow!("no build in progress; start one with `build new`"))?;
        let value = apply(node)?;
        self.save_workspace().await?;
        Ok(value)
    }

    // ------------------------------------------------------------------
    // Data capsules

    pub async fn export_food_capsule(&self, item_id: &str, path: &Path) -> Result<()> {
        let (detail, nutrients) = self.food(item_id)?;
        write_document(path, &DataCapsule::from_food(detail, nutrients)).await
    }

    pub async fn export_exercise_capsule(&self, item_id: &str, path: &Path) -> Result<()> {
        let detail = self.exercise(item_id)?;
        write_document(path, &DataCapsule::from_exercise(detail)).await
    }

    /// Imports each capsule file, best-effort: a file that cannot be read or
    /// fails validation is reported and skipped, the rest of the batch
    /// continues.
    pub async fn import_capsules(&mut self, paths: &[PathBuf]) -> CapsuleImportReport {
        let mut report = CapsuleImportReport::default();
        for path in paths {
            match self.import_capsule(path).await {
                Ok((item_id, description)) => {
                    report.created.push((path.clone(), item_id, description));
                }
                Err(e) => {
                    warn!("skipping capsule {}: {e:#}", path.display());
                    report.skipped.push((path.clone(), format!("{e:#}")));
                }
            }
        }
        report
    }

    async fn import_capsule(&mut self, path: &Path) -> Result<(String, String)> {
        let capsule: DataCapsule = read_document(path).await?;
        capsule.validate()?;
        let description = capsule.description().to_string();
        let item_id = if capsule.is_food() {
            let (detail, nutrients) = capsule.into_food().expect("checked food capsule");
            self.add_food(detail, nutrients, false).await?
        } else {
            let detail = capsule.into_exercise().expect("checked exercise capsule");
            self.add_exercise(detail, false).await?
        };
        Ok((item_id, description))
    }

    // ------------------------------------------------------------------
    // Document writes

    async fn save_settings(&self) -> Result<()> {
        write_document(&self.path(SETTINGS_FILE), &self.settings).await
    }

    async fn save_profile(&self) -> Result<()> {
        write_document(&self.path(PROFILE_FILE), &self.profile).await
    }

    async fn save_records(&self) -> Result<()> {
        write_document(&self.path(RECORDS_FILE), &self.records).await
    }

    async fn save_templates(&self) -> Result<()> {
        write_document(&self.path(TEMPLATES_FILE), &self.templates).await
    }

    async fn save_foods(&self) -> Result<()> {
        write_document(&self.path(FOOD_DETAILS_FILE), &self.foods).await?;
        write_document(&self.path(FOOD_NUTRIENTS_FILE), &self.food_nutrients).await
    }

    async fn save_exercises(&self) -> Result<()> {
        write_document(&self.path(EXERCISE_DETAILS_FILE), &self.exercises).await
    }

    async fn save_workspace(&self) -> Result<()> {
        let path = self.path(WORKSPACE_FILE);
        match &self.workspace {
            Some(node) => write_document(&path, node).await,
            None => match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
        }
    }
}

/// Picks the next item ID in `floor..=ceiling`: one past the highest in
/// use, or `floor` when the range is empty.
fn allocate_id<'a>(
    ids: impl Iterator<Item = &'a String>,
    floor: u32,
    ceiling: u32,
    what: &str,
) -> Result<String> {
    let highest = ids
        .filter_map(|id| id.parse::<u32>().ok())
        .filter(|id| (floor..=ceiling).contains(id))
        .max();
    match highest {
        None => Ok(floor.to_string()),
        Some(id) if id >= ceiling => bail!("the {what} inventory is full"),
        Some(id) => Ok((id + 1).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::{tempdir, TempDir};

    use crate::build::Payload;
    use crate::reference::UnitSequence;
    use crate::utils::clock::MockClock;

    use super::*;

    fn fixed_clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_today()
            .return_const(NaiveDate::from_ymd_opt(2017, 6, 1).unwrap());
        clock
    }

    async fn fresh_user(name: &str) -> Result<(TempDir, AppState, UserStore)> {
        let dir = tempdir()?;
        let mut state = AppState::open(dir.path().to_owned(), &fixed_clock()).await?;
        let store = UserStore::create(&mut state, name).await?;
        Ok((dir, state, store))
    }

    fn oats_detail() -> (FoodDetail, NutrientContent) {
        (
            FoodDetail {
                description: "Oats, rolled, dry".into(),
                group_id: "0800".into(),
                unit_sequences: vec![UnitSequence {
                    amount: 1.0,
                    unit: "cup".into(),
                    grams: 81.0,
                }],
            },
            NutrientContent::from([("203".to_string(), 13.15), ("208".to_string(), 379.0)]),
        )
    }

    fn dated_diet(food_id: &str, day: u32) -> BuildNode {
        let mut diet = BuildNode::diet();
        diet.set_date(NaiveDate::from_ymd_opt(2017, 6, day).unwrap())
            .unwrap();
        let mut meal = BuildNode::meal();
        meal.set_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
            .unwrap();
        let mut ingredient = BuildNode::ingredient(food_id);
        ingredient
            .attach(BuildNode::quantity(food_id, 1.0, "cup"))
            .unwrap();
        meal.attach(ingredient).unwrap();
        diet.attach(meal).unwrap();
        diet
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("robin-3_a").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username(&"x".repeat(31)).is_err());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("semi;colon").is_err());
    }

    #[tokio::test]
    async fn create_makes_a_complete_user_directory() -> Result<()> {
        let (_dir, state, store) = fresh_user("robin").await?;
        for file_name in crate::storage::USER_REQUIRED_FILES {
            assert!(
                state.user_dir("robin").join(file_name).is_file(),
                "missing {file_name}"
            );
        }
        // the seed exercise catalog was copied in
        assert_eq!(store.exercises().len(), crate::refdata::SEED_EXERCISES.len());
        assert!(store.foods().is_empty());
        assert_eq!(state.users(), ["robin"]);

        // a second create under the same name fails
        let mut state = state;
        assert!(UserStore::create(&mut state, "robin").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn depth_three_tree_reloads_identically() -> Result<()> {
        let (_dir, state, mut store) = fresh_user("robin").await?;
        let (detail, nutrients) = oats_detail();
        let food_id = store.add_food(detail, nutrients, false).await?;

        let mut meal = BuildNode::meal();
        let mut ingredient = BuildNode::ingredient(&food_id);
        ingredient
            .attach(BuildNode::quantity(&food_id, 1.5, "cup"))
            .unwrap();
        meal.attach(ingredient).unwrap();
        store.set_workspace(Some(meal.clone())).await?;

        let reloaded = UserStore::load(&state, "robin").await?;
        assert_eq!(reloaded.workspace(), Some(&meal));
        Ok(())
    }

    #[tokio::test]
    async fn food_ids_allocate_from_the_bottom_of_the_range() -> Result<()> {
        let (_dir, _state, mut store) = fresh_user("robin").await?;
        let (detail, nutrients) = oats_detail();
        let first = store.add_food(detail.clone(), nutrients.clone(), true).await?;
        let second = store.add_food(detail, nutrients, false).await?;
        assert_eq!(first, "200001");
        assert_eq!(second, "200002");
        assert_eq!(store.settings().favorites.foods, ["200001"]);

        store.remove_food(&first).await?;
        assert!(store.food(&first).is_err());
        assert!(store.settings().favorites.foods.is_empty());
        Ok(())
    }

    #[test]
    fn id_allocation_reports_exhaustion() {
        let empty: Vec<String> = vec![];
        assert_eq!(allocate_id(empty.iter(), 101, 600, "template").unwrap(), "101");

        let nearly_full = vec!["599".to_string()];
        assert_eq!(
            allocate_id(nearly_full.iter(), 101, 600, "template").unwrap(),
            "600"
        );
        let full = vec!["600".to_string()];
        assert!(allocate_id(full.iter(), 101, 600, "template").is_err());

        // IDs outside the range are ignored
        let foreign = vec!["999999".to_string()];
        assert_eq!(allocate_id(foreign.iter(), 101, 600, "template").unwrap(), "101");
    }

    #[tokio::test]
    async fn templates_renumber_and_remap_favorites() -> Result<()> {
        let (_dir, state, mut store) = fresh_user("robin").await?;

        let mut ids = Vec::new();
        for hour in [7, 12, 19] {
            let mut meal = BuildNode::meal();
            meal.set_description(&format!("meal at {hour}")).unwrap();
            meal.set_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
                .unwrap();
            ids.push(store.save_template(meal, false, None).await?);
        }
        assert_eq!(ids, ["101", "102", "103"]);

        // template form drops the meal time
        let stored = store.template(Kind::Meal, "103")?;
        match &stored.payload {
            Payload::Meal { time, .. } => assert_eq!(*time, NaiveTime::MIN),
            _ => unreachable!(),
        }

        store
            .set_favorite(FavoriteTarget::Template(Kind::Meal, "103"), true)
            .await?;
        store.remove_template(Kind::Meal, "102").await?;

        let remaining: Vec<String> = store.templates(Kind::Meal)?.keys().cloned().collect();
        assert_eq!(remaining, ["101", "102"]);
        // the favorite followed its template from 103 to 102
        assert_eq!(store.settings().favorites.meal_templates, ["102"]);

        let reloaded = UserStore::load(&state, "robin").await?;
        assert_eq!(
            reloaded.templates(Kind::Meal)?.keys().cloned().collect::<Vec<_>>(),
            ["101", "102"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn record_saves_are_keyed_by_date() -> Result<()> {
        let (_dir, _state, mut store) = fresh_user("robin").await?;
        let (detail, nutrients) = oats_detail();
        let food_id = store.add_food(detail, nutrients, false).await?;

        let undated = BuildNode::diet();
        assert!(store.save_record(undated, false, None).await.is_err());

        let diet = dated_diet(&food_id, 1);
        let date = store.save_record(diet.clone(), true, None).await?;
        assert_eq!(date, NaiveDate::from_ymd_opt(2017, 6, 1).unwrap());
        assert!(store.record_exists(Kind::Diet, date));
        assert_eq!(store.settings().favorites.diet_records, [date.to_string()]);

        // re-filing the record under a new date removes the old entry
        let mut moved = diet;
        moved
            .set_date(NaiveDate::from_ymd_opt(2017, 6, 2).unwrap())
            .unwrap();
        let new_date = store.save_record(moved, false, Some(date)).await?;
        assert!(!store.record_exists(Kind::Diet, date));
        assert!(store.record_exists(Kind::Diet, new_date));
        assert!(store.settings().favorites.diet_records.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn capsule_import_is_best_effort() -> Result<()> {
        let (_dir, mut state, mut store) = fresh_user("robin").await?;
        let (detail, nutrients) = oats_detail();
        let food_id = store.add_food(detail, nutrients, false).await?;

        let out_dir = tempdir()?;
        let good = out_dir.path().join("FoodDataCapsule-Oats.json");
        store.export_food_capsule(&food_id, &good).await?;
        let bad = out_dir.path().join("mangled.json");
        tokio::fs::write(&bad, b"{\"type\":\"food\"}").await?;

        let mut receiver = UserStore::create(&mut state, "sam").await?;
        let report = receiver
            .import_capsules(&[good.clone(), bad.clone()])
            .await;
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].1, "200001");
        assert_eq!(report.created[0].2, "Oats, rolled, dry");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, bad);

        let (imported, imported_nutrients) = receiver.food("200001")?;
        assert_eq!(imported.description, "Oats, rolled, dry");
        assert_eq!(imported_nutrients.get("208"), Some(&379.0));
        Ok(())
    }

    #[tokio::test]
    async fn diary_entries_merge_and_metrics_prune() -> Result<()> {
        let (_dir, _state, mut store) = fresh_user("robin").await?;
        let june_1 = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
        let june_2 = NaiveDate::from_ymd_opt(2017, 6, 2).unwrap();

        store
            .add_diary_entry(june_1, BTreeMap::from([("weight".to_string(), 180.0)]))
            .await?;
        store
            .add_diary_entry(
                june_1,
                BTreeMap::from([("sleep hours".to_string(), 7.5)]),
            )
            .await?;
        store
            .add_diary_entry(june_2, BTreeMap::from([("weight".to_string(), 179.2)]))
            .await?;
        assert_eq!(store.diary()[&june_1].len(), 2);

        let removed = store.remove_health_metric("weight").await?;
        assert_eq!(removed, 2);
        // June 2 only measured weight, so the whole entry is gone
        assert!(!store.diary().contains_key(&june_2));
        assert_eq!(store.diary()[&june_1].len(), 1);

        assert!(store.remove_health_metric("weight").await.is_err());
        assert!(store
            .add_diary_entry(june_1, BTreeMap::new())
            .await
            .is_err());
        Ok(())
    }

    #[tokio::test]
    async fn guide_targets_validate_and_resolve() -> Result<()> {
        let (_dir, _state, mut store) = fresh_user("robin").await?;
        let june_1 = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();

        assert!(store
            .set_targets(june_1, BTreeMap::from([("999".to_string(), 10.0)]))
            .await
            .is_err());
        assert!(store
            .set_targets(june_1, BTreeMap::from([("203".to_string(), 0.0)]))
            .await
            .is_err());

        store
            .set_targets(june_1, BTreeMap::from([("203".to_string(), 120.0)]))
            .await?;
        let later = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
        let (effective, targets) = store.targets_for(later).unwrap();
        assert_eq!(effective, &june_1);
        assert_eq!(targets["203"], 120.0);

        store.remove_targets(june_1).await?;
        assert!(store.targets_for(later).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn reference_usage_reports_each_inventory() -> Result<()> {
        let (_dir, _state, mut store) = fresh_user("robin").await?;
        let (detail, nutrients) = oats_detail();
        let food_id = store.add_food(detail, nutrients, false).await?;

        let diet = dated_diet(&food_id, 1);
        store.save_record(diet.clone(), false, None).await?;
        store.save_template(diet.children[0].clone(), false, None).await?;
        store.set_workspace(Some(dated_diet(&food_id, 2))).await?;

        let usage = store.reference_usage(&food_id, true);
        assert!(usage.in_workspace);
        assert_eq!(usage.record_count, 1);
        assert_eq!(usage.template_counts[&Kind::Meal], 1);
        assert_eq!(usage.template_counts[&Kind::Recipe], 0);
        assert!(usage.is_used());

        let unused = store.reference_usage("209999", true);
        assert!(!unused.is_used());
        Ok(())
    }
}
