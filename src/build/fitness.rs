//! Performance arithmetic over the fitness side of a build.
//!
//! A Session measures one Activity: `effort` is the amount of work done
//! (e.g. 5 rep) and `intensity` how hard it was (e.g. 125 lb); `magnitude`
//! is their product. Results aggregate per Workout, keyed by the minute the
//! Workout began; Workouts without a recorded period (template editing
//! state) are left out.

use std::collections::{BTreeMap, BTreeSet};

use super::{BuildNode, Payload, RefView};
use crate::utils::merge::{maxed_values, summed_values};
use crate::utils::time::MINUTE_FORMAT;

/// Which performance value to aggregate. Effort and magnitude sum over
/// sessions; intensity takes the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMetric {
    Effort,
    Intensity,
    Magnitude,
}

/// Which Exercise property aggregated values are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseProperty {
    ItemId,
    FocusMuscle,
    Tags,
}

/// Per-muscle rollup backing the fitness build info view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MuscleTotals {
    pub sessions: u32,
    pub effort: f64,
    pub max_intensity: f64,
}

impl BuildNode {
    pub fn has_activity(&self) -> bool {
        matches!(self.payload, Payload::Activity { .. })
            || self.children.iter().any(BuildNode::has_activity)
    }

    pub fn has_session(&self) -> bool {
        matches!(self.payload, Payload::Session { .. })
            || self.children.iter().any(BuildNode::has_session)
    }

    /// Number of Sessions per focus muscle over the subtree.
    pub fn muscle_sessions(&self, view: RefView<'_>) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        self.collect_muscle_sessions(view, &mut counts);
        counts
    }

    fn collect_muscle_sessions(&self, view: RefView<'_>, counts: &mut BTreeMap<String, u32>) {
        if let Payload::Session { exercise_id, .. } = &self.payload {
            if let Some(exercise) = view.exercises.get(exercise_id) {
                *counts.entry(exercise.focus_muscle.clone()).or_insert(0) += 1;
            }
        }
        for child in &self.children {
            child.collect_muscle_sessions(view, counts);
        }
    }

    /// Session count, total effort and maximum intensity per focus muscle.
    pub fn muscle_totals(&self, view: RefView<'_>) -> BTreeMap<String, MuscleTotals> {
        let mut totals = BTreeMap::new();
        self.collect_muscle_totals(view, &mut totals);
        totals
    }

    fn collect_muscle_totals(
        &self,
        view: RefView<'_>,
        totals: &mut BTreeMap<String, MuscleTotals>,
    ) {
        if let Payload::Session {
            exercise_id,
            effort,
            intensity,
            ..
        } = &self.payload
        {
            if let Some(exercise) = view.exercises.get(exercise_id) {
                let entry = totals.entry(exercise.focus_muscle.clone()).or_default();
                entry.sessions += 1;
                entry.effort += effort;
                if *intensity > entry.max_intensity {
                    entry.max_intensity = *intensity;
                }
            }
        }
        for child in &self.children {
            child.collect_muscle_totals(view, totals);
        }
    }

    /// Aggregated performance per Exercise property per constituent Workout:
    /// `{workout began -> {property -> value}}`. Called beneath the Workout
    /// level the node's sessions are aggregated without the Workout keying.
    pub fn performance_results(
        &self,
        view: RefView<'_>,
        metric: ResultMetric,
        property: ExerciseProperty,
    ) -> BTreeMap<String, BTreeMap<String, f64>> {
        match &self.payload {
            Payload::Workout { period, .. } => {
                let Some(period) = period else {
                    return BTreeMap::new();
                };
                let results = self.session_results(view, metric, property);
                if results.is_empty() {
                    return BTreeMap::new();
                }
                let began = period.began.format(MINUTE_FORMAT).to_string();
                BTreeMap::from([(began, results)])
            }
            _ => {
                let mut merged = BTreeMap::new();
                for child in &self.children {
                    merged.extend(child.performance_results(view, metric, property));
                }
                merged
            }
        }
    }

    /// Aggregates this subtree's Sessions by Exercise property, without
    /// grouping by Workout.
    pub fn session_results(
        &self,
        view: RefView<'_>,
        metric: ResultMetric,
        property: ExerciseProperty,
    ) -> BTreeMap<String, f64> {
        let mut results = BTreeMap::new();
        self.collect_session_results(view, metric, property, &mut results);
        results
    }

    fn collect_session_results(
        &self,
        view: RefView<'_>,
        metric: ResultMetric,
        property: ExerciseProperty,
        results: &mut BTreeMap<String, f64>,
    ) {
        if let Payload::Session {
            exercise_id,
            effort,
            intensity,
            ..
        } = &self.payload
        {
            let value = match metric {
                ResultMetric::Effort => *effort,
                ResultMetric::Intensity => *intensity,
                ResultMetric::Magnitude => effort * intensity,
            };
            let keys: Vec<String> = match property {
                ExerciseProperty::ItemId => vec![exercise_id.clone()],
                ExerciseProperty::FocusMuscle => view
                    .exercises
                    .get(exercise_id)
                    .map(|e| vec![e.focus_muscle.clone()])
                    .unwrap_or_default(),
                ExerciseProperty::Tags => view
                    .exercises
                    .get(exercise_id)
                    .map(|e| e.tags.clone())
                    .unwrap_or_default(),
            };
            let single = BTreeMap::from_iter(keys.into_iter().map(|key| (key, value)));
            match metric {
                ResultMetric::Effort | ResultMetric::Magnitude => summed_values(results, &single),
                ResultMetric::Intensity => maxed_values(results, &single),
            }
        }
        for child in &self.children {
            child.collect_session_results(view, metric, property, results);
        }
    }

    /// All Exercise item IDs referenced beneath (and including) this node.
    pub fn unique_exercises(&self) -> BTreeSet<String> {
        let mut exercises = BTreeSet::new();
        self.collect_exercises(&mut exercises);
        exercises
    }

    fn collect_exercises(&self, exercises: &mut BTreeSet<String>) {
        match &self.payload {
            Payload::Activity { exercise_id } | Payload::Session { exercise_id, .. } => {
                exercises.insert(exercise_id.clone());
            }
            _ => {}
        }
        for child in &self.children {
            child.collect_exercises(exercises);
        }
    }

    pub fn unique_focus_muscles(&self, view: RefView<'_>) -> BTreeSet<String> {
        self.unique_exercises()
            .into_iter()
            .filter_map(|id| view.exercises.get(&id).map(|e| e.focus_muscle.clone()))
            .collect()
    }

    pub fn unique_tags(&self, view: RefView<'_>) -> BTreeSet<String> {
        self.unique_exercises()
            .into_iter()
            .filter_map(|id| view.exercises.get(&id))
            .flat_map(|e| e.tags.iter().cloned())
            .collect()
    }

    /// Began-to-ended pairs for every scheduled Workout in the subtree.
    pub fn workout_periods(&self) -> BTreeMap<String, String> {
        let mut periods = BTreeMap::new();
        self.collect_workout_periods(&mut periods);
        periods
    }

    fn collect_workout_periods(&self, periods: &mut BTreeMap<String, String>) {
        if let Payload::Workout {
            period: Some(period),
            ..
        } = &self.payload
        {
            periods.insert(
                period.began.format(MINUTE_FORMAT).to_string(),
                period.ended.format(MINUTE_FORMAT).to_string(),
            );
        }
        for child in &self.children {
            child.collect_workout_periods(periods);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::build::{BuildNode, Period, RefView};
    use crate::reference::{ExerciseDetail, FoodDetail, NutrientContent};

    use super::{ExerciseProperty, ResultMetric};

    struct Fixture {
        foods: BTreeMap<String, FoodDetail>,
        food_nutrients: BTreeMap<String, NutrientContent>,
        exercises: BTreeMap<String, ExerciseDetail>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut exercises = BTreeMap::new();
            exercises.insert(
                "10001".to_string(),
                ExerciseDetail {
                    description: "Squat (Barbell)".into(),
                    focus_muscle: "Quadriceps".into(),
                    units: ["rep".into(), "lb".into()],
                    tags: vec!["compound".into(), "legs".into()],
                },
            );
            exercises.insert(
                "10002".to_string(),
                ExerciseDetail {
                    description: "Bench Press (Machine)".into(),
                    focus_muscle: "Chest".into(),
                    units: ["rep".into(), "lb".into()],
                    tags: vec!["compound".into()],
                },
            );
            Fixture {
                foods: BTreeMap::new(),
                food_nutrients: BTreeMap::new(),
                exercises,
            }
        }

        fn view(&self) -> RefView<'_> {
            RefView {
                foods: &self.foods,
                food_nutrients: &self.food_nutrients,
                exercises: &self.exercises,
            }
        }
    }

    fn activity_with_sessions(exercise_id: &str, sessions: &[(f64, f64)]) -> BuildNode {
        let mut activity = BuildNode::activity(exercise_id);
        for (effort, intensity) in sessions {
            activity
                .attach(BuildNode::session(exercise_id, *effort, *intensity, ""))
                .unwrap();
        }
        activity
    }

    fn scheduled_workout(day: u32, hour: u32) -> BuildNode {
        let mut workout = BuildNode::workout();
        let began = NaiveDate::from_ymd_opt(2017, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        workout
            .set_period(Period {
                began,
                ended: began + chrono::Duration::hours(1),
            })
            .unwrap();
        workout
    }

    #[test]
    fn muscle_rollups() {
        let fixture = Fixture::new();
        let view = fixture.view();

        let mut workout = scheduled_workout(1, 18);
        workout
            .attach(activity_with_sessions("10001", &[(5.0, 225.0), (5.0, 245.0)]))
            .unwrap();
        workout
            .attach(activity_with_sessions("10002", &[(8.0, 150.0)]))
            .unwrap();

        let sessions = workout.muscle_sessions(view);
        assert_eq!(sessions["Quadriceps"], 2);
        assert_eq!(sessions["Chest"], 1);

        let totals = workout.muscle_totals(view);
        assert_eq!(totals["Quadriceps"].sessions, 2);
        assert_eq!(totals["Quadriceps"].effort, 10.0);
        assert_eq!(totals["Quadriceps"].max_intensity, 245.0);
        assert_eq!(totals["Chest"].effort, 8.0);
    }

    #[test]
    fn performance_results_keyed_by_workout() {
        let fixture = Fixture::new();
        let view = fixture.view();

        let mut program = BuildNode::program();
        let mut cycle = BuildNode::cycle();

        let mut monday = scheduled_workout(5, 18);
        monday
            .attach(activity_with_sessions("10001", &[(5.0, 225.0), (3.0, 245.0)]))
            .unwrap();
        let mut thursday = scheduled_workout(8, 18);
        thursday
            .attach(activity_with_sessions("10002", &[(8.0, 150.0)]))
            .unwrap();
        cycle.attach(monday).unwrap();
        cycle.attach(thursday).unwrap();
        program.attach(cycle).unwrap();

        let efforts =
            program.performance_results(view, ResultMetric::Effort, ExerciseProperty::ItemId);
        assert_eq!(efforts["2017-06-05 18:00"]["10001"], 8.0);
        assert_eq!(efforts["2017-06-08 18:00"]["10002"], 8.0);

        let intensities =
            program.performance_results(view, ResultMetric::Intensity, ExerciseProperty::ItemId);
        assert_eq!(intensities["2017-06-05 18:00"]["10001"], 245.0);

        let magnitudes = program.performance_results(
            view,
            ResultMetric::Magnitude,
            ExerciseProperty::FocusMuscle,
        );
        assert_eq!(
            magnitudes["2017-06-05 18:00"]["Quadriceps"],
            5.0 * 225.0 + 3.0 * 245.0
        );

        // tags fan a session's value out to each tag
        let by_tag =
            program.performance_results(view, ResultMetric::Effort, ExerciseProperty::Tags);
        assert_eq!(by_tag["2017-06-05 18:00"]["compound"], 8.0);
        assert_eq!(by_tag["2017-06-05 18:00"]["legs"], 8.0);
    }

    #[test]
    fn unscheduled_workouts_are_omitted() {
        let fixture = Fixture::new();
        let view = fixture.view();

        let mut workout = BuildNode::workout();
        workout
            .attach(activity_with_sessions("10001", &[(5.0, 225.0)]))
            .unwrap();

        assert!(workout
            .performance_results(view, ResultMetric::Effort, ExerciseProperty::ItemId)
            .is_empty());
        assert!(workout.workout_periods().is_empty());
        // per-muscle rollups still see the sessions
        assert_eq!(workout.muscle_sessions(view)["Quadriceps"], 1);
    }

    #[test]
    fn unique_scans() {
        let fixture = Fixture::new();
        let view = fixture.view();

        let mut cycle = BuildNode::cycle();
        let mut workout = scheduled_workout(1, 7);
        workout
            .attach(activity_with_sessions("10001", &[(5.0, 100.0)]))
            .unwrap();
        workout.attach(BuildNode::activity("10002")).unwrap();
        cycle.attach(workout).unwrap();

        assert_eq!(
            cycle.unique_exercises().into_iter().collect::<Vec<_>>(),
            ["10001", "10002"]
        );
        assert_eq!(
            cycle
                .unique_focus_muscles(view)
                .into_iter()
                .collect::<Vec<_>>(),
            ["Chest", "Quadriceps"]
        );
        assert_eq!(
            cycle.unique_tags(view).into_iter().collect::<Vec<_>>(),
            ["compound", "legs"]
        );
        assert!(cycle.has_activity());
        assert!(cycle.has_session());

        let periods = cycle.workout_periods();
        assert_eq!(periods["2017-06-01 07:00"], "2017-06-01 08:00");
    }
}
