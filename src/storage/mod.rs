//! On-disk layout and the stores that manage it.
//!
//! ```text
//! <app_dir>
//! |- ReferenceSource
//! |  |- AppState.json
//! |  |- ExerciseDetails.json
//! |  |- FoodDetails.json
//! |  |- FoodNutrients.json
//! |- Users
//! |  |- <USERNAME>
//! |     |- ExerciseDetails.json   (copied from ReferenceSource)
//! |     |- FoodDetails.json       (copied from ReferenceSource)
//! |     |- FoodNutrients.json     (copied from ReferenceSource)
//! |     |- Profile.json
//! |     |- Records.json
//! |     |- Settings.json
//! |     |- Templates.json
//! |     |- Build.json             (workspace build, present while editing)
//! |- logs
//! ```

pub mod app_state;
pub mod entities;
pub mod user_store;

pub const REFERENCE_DIR: &str = "ReferenceSource";
pub const USERS_DIR: &str = "Users";

pub const APP_STATE_FILE: &str = "AppState.json";
pub const EXERCISE_DETAILS_FILE: &str = "ExerciseDetails.json";
pub const FOOD_DETAILS_FILE: &str = "FoodDetails.json";
pub const FOOD_NUTRIENTS_FILE: &str = "FoodNutrients.json";
pub const PROFILE_FILE: &str = "Profile.json";
pub const RECORDS_FILE: &str = "Records.json";
pub const SETTINGS_FILE: &str = "Settings.json";
pub const TEMPLATES_FILE: &str = "Templates.json";
pub const WORKSPACE_FILE: &str = "Build.json";

/// Files every valid user directory must contain. The workspace build is
/// optional.
pub const USER_REQUIRED_FILES: [&str; 7] = [
    EXERCISE_DETAILS_FILE,
    FOOD_DETAILS_FILE,
    FOOD_NUTRIENTS_FILE,
    PROFILE_FILE,
    RECORDS_FILE,
    SETTINGS_FILE,
    TEMPLATES_FILE,
];
