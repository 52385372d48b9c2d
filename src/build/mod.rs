//! The build tree.
//!
//! A build is a user-authored nutrition or fitness routine modeled as a tree
//! of nodes. Each node kind fixes which kinds may appear beneath it:
//!
//! ```text
//! Diet > Meal > Recipe > Ingredient > Quantity
//! Program > Cycle > Workout > Activity > Session
//! ```
//!
//! with two extra edges on the nutrition side: a Meal also takes Ingredients
//! directly, and a Recipe nests other Recipes. Ownership of the `children`
//! vector makes a build a tree by construction (one parent, no cycles); the
//! kind table is enforced when a child is attached and re-checked when a
//! persisted build is loaded.

pub mod fitness;
pub mod nutrition;

use std::{collections::BTreeMap, fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::reference::{ExerciseDetail, FoodDetail, NutrientContent};
use crate::utils::numbers::fmt_amount;
use crate::utils::time::{DATE_FORMAT, MINUTE_FORMAT};

/// Borrowed view of a user's reference inventories, needed wherever nodes
/// resolve item IDs into descriptions, weights or nutrients.
#[derive(Clone, Copy)]
pub struct RefView<'a> {
    pub foods: &'a BTreeMap<String, FoodDetail>,
    pub food_nutrients: &'a BTreeMap<String, NutrientContent>,
    pub exercises: &'a BTreeMap<String, ExerciseDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Diet,
    Meal,
    Recipe,
    Ingredient,
    Quantity,
    Program,
    Cycle,
    Workout,
    Activity,
    Session,
}

impl Kind {
    pub fn allowed_children(self) -> &'static [Kind] {
        match self {
            Kind::Diet => &[Kind::Meal],
            Kind::Meal => &[Kind::Recipe, Kind::Ingredient],
            Kind::Recipe => &[Kind::Recipe, Kind::Ingredient],
            Kind::Ingredient => &[Kind::Quantity],
            Kind::Quantity => &[],
            Kind::Program => &[Kind::Cycle],
            Kind::Cycle => &[Kind::Workout],
            Kind::Workout => &[Kind::Activity],
            Kind::Activity => &[Kind::Session],
            Kind::Session => &[],
        }
    }

    pub fn accepts(self, child: Kind) -> bool {
        self.allowed_children().contains(&child)
    }

    /// Kinds that may stand alone in the build workspace and be saved as
    /// templates.
    pub fn is_top_level(self) -> bool {
        matches!(
            self,
            Kind::Diet | Kind::Meal | Kind::Recipe | Kind::Program | Kind::Cycle | Kind::Workout
        )
    }

    /// Kinds that may be saved as dated records.
    pub fn is_record(self) -> bool {
        matches!(self, Kind::Diet | Kind::Program)
    }

    pub fn is_nutrition(self) -> bool {
        matches!(
            self,
            Kind::Diet | Kind::Meal | Kind::Recipe | Kind::Ingredient | Kind::Quantity
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Diet => "Diet",
            Kind::Meal => "Meal",
            Kind::Recipe => "Recipe",
            Kind::Ingredient => "Ingredient",
            Kind::Quantity => "Quantity",
            Kind::Program => "Program",
            Kind::Cycle => "Cycle",
            Kind::Workout => "Workout",
            Kind::Activity => "Activity",
            Kind::Session => "Session",
        }
    }

    /// Single-letter tag used in rendered node labels.
    pub fn tag(self) -> char {
        self.name().as_bytes()[0] as char
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "diet" | "d" => Ok(Kind::Diet),
            "meal" | "m" => Ok(Kind::Meal),
            "recipe" | "r" => Ok(Kind::Recipe),
            "ingredient" | "i" => Ok(Kind::Ingredient),
            "quantity" | "q" => Ok(Kind::Quantity),
            "program" | "p" => Ok(Kind::Program),
            "cycle" | "c" => Ok(Kind::Cycle),
            "workout" | "w" => Ok(Kind::Workout),
            "activity" | "a" => Ok(Kind::Activity),
            "session" | "s" => Ok(Kind::Session),
            other => Err(anyhow!("unknown build element kind {other:?}")),
        }
    }
}

/// A Recipe's portion: the user consumed `consumed` of a prepared batch of
/// `prepared`, both expressed in `unit`. Nutrient totals of the subtree are
/// scaled by `consumed / prepared`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portion {
    pub consumed: f64,
    pub prepared: f64,
    pub unit: String,
}

impl Default for Portion {
    fn default() -> Self {
        Portion {
            consumed: 1.0,
            prepared: 1.0,
            unit: "piece".into(),
        }
    }
}

impl Portion {
    pub fn multiplier(&self) -> f64 {
        self.consumed / self.prepared
    }
}

/// The span over which a Workout was performed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub began: NaiveDateTime,
    pub ended: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Diet {
        description: String,
        /// None while unscheduled (fresh builds and templates); required to
        /// save the Diet as a record.
        date: Option<NaiveDate>,
    },
    Meal {
        description: String,
        time: NaiveTime,
    },
    Recipe {
        description: String,
        portion: Portion,
    },
    Ingredient {
        food_id: String,
    },
    Quantity {
        /// Copied from the parent Ingredient when the Quantity is attached.
        food_id: String,
        amount: f64,
        unit: String,
    },
    Program {
        description: String,
        start: Option<NaiveDate>,
    },
    Cycle {
        description: String,
    },
    Workout {
        description: String,
        period: Option<Period>,
    },
    Activity {
        exercise_id: String,
    },
    Session {
        /// Copied from the parent Activity when the Session is attached.
        exercise_id: String,
        effort: f64,
        intensity: f64,
        #[serde(default)]
        note: String,
    },
}

const UNNAMED: &str = "(unnamed)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildNode {
    #[serde(flatten)]
    pub payload: Payload,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BuildNode>,
}

impl BuildNode {
    pub fn new(payload: Payload) -> Self {
        BuildNode {
            payload,
            children: Vec::new(),
        }
    }

    pub fn diet() -> Self {
        BuildNode::new(Payload::Diet {
            description: UNNAMED.into(),
            date: None,
        })
    }

    pub fn meal() -> Self {
        BuildNode::new(Payload::Meal {
            description: UNNAMED.into(),
            time: NaiveTime::MIN,
        })
    }

    pub fn recipe() -> Self {
        BuildNode::new(Payload::Recipe {
            description: UNNAMED.into(),
            portion: Portion::default(),
        })
    }

    pub fn ingredient(food_id: impl Into<String>) -> Self {
        BuildNode::new(Payload::Ingredient {
            food_id: food_id.into(),
        })
    }

    pub fn quantity(food_id: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        BuildNode::new(Payload::Quantity {
            food_id: food_id.into(),
            amount,
            unit: unit.into(),
        })
    }

    pub fn program() -> Self {
        BuildNode::new(Payload::Program {
            description: UNNAMED.into(),
            start: None,
        })
    }

    pub fn cycle() -> Self {
        BuildNode::new(Payload::Cycle {
            description: UNNAMED.into(),
        })
    }

    pub fn workout() -> Self {
        BuildNode::new(Payload::Workout {
            description: UNNAMED.into(),
            period: None,
        })
    }

    pub fn activity(exercise_id: impl Into<String>) -> Self {
        BuildNode::new(Payload::Activity {
            exercise_id: exercise_id.into(),
        })
    }

    pub fn session(
        exercise_id: impl Into<String>,
        effort: f64,
        intensity: f64,
        note: impl Into<String>,
    ) -> Self {
        BuildNode::new(Payload::Session {
            exercise_id: exercise_id.into(),
            effort,
            intensity,
            note: note.into(),
        })
    }

    pub fn kind(&self) -> Kind {
        match self.payload {
            Payload::Diet { .. } => Kind::Diet,
            Payload::Meal { .. } => Kind::Meal,
            Payload::Recipe { .. } => Kind::Recipe,
            Payload::Ingredient { .. } => Kind::Ingredient,
            Payload::Quantity { .. } => Kind::Quantity,
            Payload::Program { .. } => Kind::Program,
            Payload::Cycle { .. } => Kind::Cycle,
            Payload::Workout { .. } => Kind::Workout,
            Payload::Activity { .. } => Kind::Activity,
            Payload::Session { .. } => Kind::Session,
        }
    }

    /// Creates a fresh node of the given kind with default data. Ingredient
    /// and Activity require a reference item ID.
    pub fn fresh(kind: Kind, item_id: Option<&str>) -> Result<Self> {
        let node = match kind {
            Kind::Diet => BuildNode::diet(),
            Kind::Meal => BuildNode::meal(),
            Kind::Recipe => BuildNode::recipe(),
            Kind::Program => BuildNode::program(),
            Kind::Cycle => BuildNode::cycle(),
            Kind::Workout => BuildNode::workout(),
            Kind::Ingredient => {
                let id = item_id.ok_or_else(|| anyhow!("an Ingredient needs a Food item ID"))?;
                BuildNode::ingredient(id)
            }
            Kind::Activity => {
                let id = item_id.ok_or_else(|| anyhow!("an Activity needs an Exercise item ID"))?;
                BuildNode::activity(id)
            }
            Kind::Quantity | Kind::Session => {
                bail!("{kind} carries measurements; use the dedicated add command")
            }
        };
        Ok(node)
    }

    // ------------------------------------------------------------------
    // Structure editing

    /// Appends `child` under this node, subject to the kind table.
    pub fn attach(&mut self, child: BuildNode) -> Result<()> {
        if !self.kind().accepts(child.kind()) {
            bail!("a {} cannot contain a {}", self.kind(), child.kind());
        }
        self.children.push(child);
        Ok(())
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&BuildNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut BuildNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }

    /// Detaches and returns the node at `path`. The root cannot be removed.
    pub fn remove_at(&mut self, path: &[usize]) -> Result<BuildNode> {
        let (&last, parent_path) = path
            .split_last()
            .ok_or_else(|| anyhow!("cannot remove the build root"))?;
        let parent = self
            .node_at_mut(parent_path)
            .ok_or_else(|| anyhow!("no element at path {}", format_path(parent_path)))?;
        if last >= parent.children.len() {
            bail!("no element at path {}", format_path(path));
        }
        Ok(parent.children.remove(last))
    }

    /// Moves the child at `path` one slot towards the front (`-1`) or back
    /// (`+1`) of its parent's child list.
    pub fn move_at(&mut self, path: &[usize], offset: i64) -> Result<()> {
        let (&last, parent_path) = path
            .split_last()
            .ok_or_else(|| anyhow!("cannot move the build root"))?;
        let parent = self
            .node_at_mut(parent_path)
            .ok_or_else(|| anyhow!("no element at path {}", format_path(parent_path)))?;
        if last >= parent.children.len() {
            bail!("no element at path {}", format_path(path));
        }
        let target = last as i64 + offset;
        if target < 0 || target as usize >= parent.children.len() {
            bail!("cannot move element outside its parent");
        }
        let child = parent.children.remove(last);
        parent.children.insert(target as usize, child);
        Ok(())
    }

    /// Re-checks the kind table over the whole tree plus the numeric
    /// constraints the editor enforces on entry. Used after deserializing a
    /// persisted build.
    pub fn validate(&self) -> Result<()> {
        match &self.payload {
            Payload::Recipe { portion, .. } => {
                if portion.consumed <= 0.0 || portion.prepared <= 0.0 {
                    bail!("recipe portion amounts must be positive");
                }
            }
            Payload::Quantity { amount, .. } => {
                if !amount.is_finite() || *amount < 0.0 {
                    bail!("quantity amount must be non-negative");
                }
            }
            Payload::Workout {
                period: Some(period),
                ..
            } => {
                if period.ended <= period.began {
                    bail!("workout must end after it begins");
                }
            }
            Payload::Session {
                effort, intensity, ..
            } => {
                if !effort.is_finite() || !intensity.is_finite() {
                    bail!("session measurements must be finite");
                }
            }
            _ => {}
        }
        for child in &self.children {
            if !self.kind().accepts(child.kind()) {
                bail!("a {} cannot contain a {}", self.kind(), child.kind());
            }
            match (&self.payload, &child.payload) {
                (
                    Payload::Activity { exercise_id },
                    Payload::Session {
                        exercise_id: session_id,
                        ..
                    },
                ) if exercise_id != session_id => {
                    bail!("session references a different exercise than its activity");
                }
                (
                    Payload::Ingredient { food_id },
                    Payload::Quantity {
                        food_id: quantity_id,
                        ..
                    },
                ) if food_id != quantity_id => {
                    bail!("quantity references a different food than its ingredient");
                }
                _ => {}
            }
            child.validate()?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Templates and records

    /// Converts the build into its template form, dropping volatile data so
    /// that fresh dates and times must be entered each time the template is
    /// used: Meal times reset to midnight, Diet dates, Program start dates
    /// and Workout periods are cleared.
    pub fn into_template(mut self) -> BuildNode {
        match &mut self.payload {
            Payload::Diet { date, .. } => *date = None,
            Payload::Meal { time, .. } => *time = NaiveTime::MIN,
            Payload::Program { start, .. } => *start = None,
            Payload::Workout { period, .. } => *period = None,
            _ => {}
        }
        self.children = self
            .children
            .into_iter()
            .map(BuildNode::into_template)
            .collect();
        self
    }

    /// The date a record of this build would be filed under: the Diet date
    /// or the Program start date.
    pub fn record_key(&self) -> Option<NaiveDate> {
        match self.payload {
            Payload::Diet { date, .. } => date,
            Payload::Program { start, .. } => start,
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Field edits

    pub fn set_description(&mut self, new_description: &str) -> Result<()> {
        match &mut self.payload {
            Payload::Diet { description, .. }
            | Payload::Meal { description, .. }
            | Payload::Recipe { description, .. }
            | Payload::Program { description, .. }
            | Payload::Cycle { description }
            | Payload::Workout { description, .. } => {
                *description = new_description.to_string();
                Ok(())
            }
            _ => bail!("a {} has no description of its own", self.kind()),
        }
    }

    pub fn set_date(&mut self, new_date: NaiveDate) -> Result<()> {
        match &mut self.payload {
            Payload::Diet { date, .. } => *date = Some(new_date),
            Payload::Program { start, .. } => *start = Some(new_date),
            _ => bail!("a {} is not dated", self.kind()),
        }
        Ok(())
    }

    pub fn set_time(&mut self, new_time: NaiveTime) -> Result<()> {
        match &mut self.payload {
            Payload::Meal { time, .. } => {
                *time = new_time;
                Ok(())
            }
            _ => bail!("only a Meal has a time of day"),
        }
    }

    pub fn set_portion(&mut self, new_portion: Portion) -> Result<()> {
        if new_portion.consumed <= 0.0 || new_portion.prepared <= 0.0 {
            bail!("portion amounts must be positive");
        }
        match &mut self.payload {
            Payload::Recipe { portion, .. } => {
                *portion = new_portion;
                Ok(())
            }
            _ => bail!("only a Recipe has a portion"),
        }
    }

    pub fn set_period(&mut self, new_period: Period) -> Result<()> {
        if new_period.ended <= new_period.began {
            bail!("workout must end after it begins");
        }
        match &mut self.payload {
            Payload::Workout { period, .. } => {
                *period = Some(new_period);
                Ok(())
            }
            _ => bail!("only a Workout has a period"),
        }
    }

    pub fn set_measure(&mut self, new_amount: f64, new_unit: &str) -> Result<()> {
        match &mut self.payload {
            Payload::Quantity { amount, unit, .. } => {
                *amount = new_amount;
                *unit = new_unit.to_string();
                Ok(())
            }
            _ => bail!("only a Quantity has an amount and unit"),
        }
    }

    pub fn set_performance(&mut self, new_effort: f64, new_intensity: f64, new_note: &str) -> Result<()> {
        match &mut self.payload {
            Payload::Session {
                effort,
                intensity,
                note,
                ..
            } => {
                *effort = new_effort;
                *intensity = new_intensity;
                *note = new_note.to_string();
                Ok(())
            }
            _ => bail!("only a Session has performance measurements"),
        }
    }

    // ------------------------------------------------------------------
    // Display

    /// One-line label for the node, in the `<TAG>: ...` shape used by the
    /// tree view. Reference descriptions are resolved through `view`;
    /// dangling item IDs render as the bare ID.
    pub fn label(&self, view: RefView<'_>) -> String {
        let tag = self.kind().tag();
        match &self.payload {
            Payload::Diet { description, date } => {
                let date = date
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_else(|| "(undated)".into());
                format!("{tag}: {description} -> {date}")
            }
            Payload::Meal { description, time } => {
                format!("{tag}: {description} -> {}", time.format("%H:%M"))
            }
            Payload::Recipe {
                description,
                portion,
            } => format!(
                "{tag}: {description} -> {} of {} {}",
                fmt_amount(portion.consumed),
                fmt_amount(portion.prepared),
                portion.unit
            ),
            Payload::Ingredient { food_id } => {
                let name = view
                    .foods
                    .get(food_id)
                    .map(|f| f.description.as_str())
                    .unwrap_or(food_id.as_str());
                format!("{tag}: {name}")
            }
            Payload::Quantity { amount, unit, .. } => {
                format!("{tag}: {} {unit}", fmt_amount(*amount))
            }
            Payload::Program { description, start } => {
                let start = start
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_else(|| "(undated)".into());
                format!("{tag}: {description} -> {start}")
            }
            Payload::Cycle { description } => format!("{tag}: {description}"),
            Payload::Workout {
                description,
                period,
            } => {
                let span = period
                    .map(|p| {
                        format!(
                            "{} to {}",
                            p.began.format(MINUTE_FORMAT),
                            p.ended.format(MINUTE_FORMAT)
                        )
                    })
                    .unwrap_or_else(|| "(unscheduled)".into());
                format!("{tag}: {description} -> {span}")
            }
            Payload::Activity { exercise_id } => {
                let name = view
                    .exercises
                    .get(exercise_id)
                    .map(|e| e.description.as_str())
                    .unwrap_or(exercise_id.as_str());
                format!("{tag}: {name}")
            }
            Payload::Session {
                exercise_id,
                effort,
                intensity,
                note,
            } => {
                let units = view
                    .exercises
                    .get(exercise_id)
                    .map(|e| e.units.clone())
                    .unwrap_or_else(|| ["?".into(), "?".into()]);
                let mut label = format!(
                    "{tag}: {} {} at {} {}",
                    fmt_amount(*effort),
                    units[0],
                    fmt_amount(*intensity),
                    units[1]
                );
                if !note.is_empty() {
                    label.push_str(" -> ");
                    label.push_str(note);
                }
                label
            }
        }
    }
}

/// Renders a child path as entered on the command line.
pub fn format_path(path: &[usize]) -> String {
    if path.is_empty() {
        return "root".into();
    }
    path.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Parses a dotted child path such as `0.2.1`. An empty string or `root`
/// addresses the build root.
pub fn parse_path(input: &str) -> Result<Vec<usize>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "root" {
        return Ok(Vec::new());
    }
    trimmed
        .split('.')
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| anyhow!("invalid path segment {part:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn empty_view() -> (
        BTreeMap<String, FoodDetail>,
        BTreeMap<String, NutrientContent>,
        BTreeMap<String, ExerciseDetail>,
    ) {
        (BTreeMap::new(), BTreeMap::new(), BTreeMap::new())
    }

    #[test]
    fn kind_table_matches_hierarchy() {
        assert!(Kind::Diet.accepts(Kind::Meal));
        assert!(Kind::Meal.accepts(Kind::Recipe));
        assert!(Kind::Meal.accepts(Kind::Ingredient));
        assert!(Kind::Recipe.accepts(Kind::Recipe));
        assert!(Kind::Recipe.accepts(Kind::Ingredient));
        assert!(Kind::Ingredient.accepts(Kind::Quantity));
        assert!(Kind::Quantity.allowed_children().is_empty());

        assert!(Kind::Program.accepts(Kind::Cycle));
        assert!(Kind::Cycle.accepts(Kind::Workout));
        assert!(Kind::Workout.accepts(Kind::Activity));
        assert!(Kind::Activity.accepts(Kind::Session));
        assert!(Kind::Session.allowed_children().is_empty());

        assert!(!Kind::Diet.accepts(Kind::Ingredient));
        assert!(!Kind::Meal.accepts(Kind::Meal));
        assert!(!Kind::Workout.accepts(Kind::Session));
    }

    #[test]
    fn attach_rejects_cross_hierarchy_children() {
        let mut diet = BuildNode::diet();
        assert!(diet.attach(BuildNode::meal()).is_ok());
        assert!(diet.attach(BuildNode::cycle()).is_err());

        let mut workout = BuildNode::workout();
        assert!(workout.attach(BuildNode::activity("10001")).is_ok());
        assert!(workout.attach(BuildNode::meal()).is_err());
    }

    #[test]
    fn path_addressing_and_removal() {
        let mut diet = BuildNode::diet();
        diet.attach(BuildNode::meal()).unwrap();
        diet.attach(BuildNode::meal()).unwrap();
        diet.children[1].attach(BuildNode::ingredient("200001")).unwrap();

        assert_eq!(diet.node_at(&[1, 0]).unwrap().kind(), Kind::Ingredient);
        assert!(diet.node_at(&[2]).is_none());

        let removed = diet.remove_at(&[1, 0]).unwrap();
        assert_eq!(removed.kind(), Kind::Ingredient);
        assert!(diet.children[1].children.is_empty());
        assert!(diet.remove_at(&[]).is_err());
    }

    #[test]
    fn move_child_within_parent() {
        let mut meal = BuildNode::meal();
        meal.attach(BuildNode::ingredient("a")).unwrap();
        meal.attach(BuildNode::ingredient("b")).unwrap();
        meal.attach(BuildNode::ingredient("c")).unwrap();

        meal.move_at(&[2], -1).unwrap();
        let ids: Vec<_> = meal
            .children
            .iter()
            .map(|c| match &c.payload {
                Payload::Ingredient { food_id } => food_id.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(ids, ["a", "c", "b"]);

        assert!(meal.move_at(&[0], -1).is_err());
        assert!(meal.move_at(&[2], 1).is_err());
    }

    #[test]
    fn template_drops_volatile_fields() {
        let mut diet = BuildNode::diet();
        diet.set_date(NaiveDate::from_ymd_opt(2017, 6, 1).unwrap())
            .unwrap();
        let mut meal = BuildNode::meal();
        meal.set_time(NaiveTime::from_hms_opt(18, 30, 0).unwrap())
            .unwrap();
        diet.attach(meal).unwrap();

        let template = diet.into_template();
        assert_eq!(template.record_key(), None);
        match &template.children[0].payload {
            Payload::Meal { time, .. } => assert_eq!(*time, NaiveTime::MIN),
            _ => unreachable!(),
        }
    }

    #[test]
    fn template_clears_workout_period() {
        let mut program = BuildNode::program();
        program
            .set_date(NaiveDate::from_ymd_opt(2017, 6, 1).unwrap())
            .unwrap();
        let mut cycle = BuildNode::cycle();
        let mut workout = BuildNode::workout();
        let began = NaiveDate::from_ymd_opt(2017, 6, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        workout
            .set_period(Period {
                began,
                ended: began + chrono::Duration::hours(1),
            })
            .unwrap();
        cycle.attach(workout).unwrap();
        program.attach(cycle).unwrap();

        let template = program.into_template();
        match &template.children[0].children[0].payload {
            Payload::Workout { period, .. } => assert!(period.is_none()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn validate_catches_tampered_documents() {
        let mut diet = BuildNode::diet();
        diet.children.push(BuildNode::cycle());
        assert!(diet.validate().is_err());

        let mut recipe = BuildNode::recipe();
        recipe.set_portion(Portion {
            consumed: 1.0,
            prepared: 0.0,
            unit: "g".into(),
        })
        .unwrap_err();
        match &mut recipe.payload {
            Payload::Recipe { portion, .. } => portion.prepared = 0.0,
            _ => unreachable!(),
        }
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn node_serde_round_trip() {
        let mut meal = BuildNode::meal();
        let mut ingredient = BuildNode::ingredient("200001");
        ingredient
            .attach(BuildNode::quantity("200001", 1.5, "cup"))
            .unwrap();
        meal.attach(ingredient).unwrap();

        let json = serde_json::to_string(&meal).unwrap();
        let back: BuildNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meal);
        back.validate().unwrap();
    }

    #[test]
    fn labels_resolve_reference_descriptions() {
        let (mut foods, nutrients, exercises) = empty_view();
        foods.insert(
            "200001".into(),
            FoodDetail {
                description: "Oats, rolled, dry".into(),
                group_id: "0800".into(),
                unit_sequences: vec![],
            },
        );
        let view = RefView {
            foods: &foods,
            food_nutrients: &nutrients,
            exercises: &exercises,
        };

        let node = BuildNode::ingredient("200001");
        assert_eq!(node.label(view), "I: Oats, rolled, dry");
        let missing = BuildNode::ingredient("200002");
        assert_eq!(missing.label(view), "I: 200002");
        assert_eq!(
            BuildNode::quantity("200001", 1.5, "cup").label(view),
            "Q: 1.5 cup"
        );
    }

    #[test]
    fn path_parsing() {
        assert_eq!(parse_path("").unwrap(), Vec::<usize>::new());
        assert_eq!(parse_path("root").unwrap(), Vec::<usize>::new());
        assert_eq!(parse_path("0.2.1").unwrap(), vec![0, 2, 1]);
        assert!(parse_path("0.x").is_err());
        assert_eq!(format_path(&[0, 2, 1]), "0.2.1");
        assert_eq!(format_path(&[]), "root");
    }
}
