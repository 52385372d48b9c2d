//! Built-in reference catalogs: nutrients, food groups, focus muscles, FDA
//! daily values and the seed Exercise catalog used to initialize a fresh
//! reference source.
//!
//! Food and Exercise items created by users refer back to these tables for
//! validation (group IDs, nutrient IDs, muscle names) and display (names,
//! abbreviations, units).

use std::{collections::HashMap, sync::LazyLock};

/// A nutrient known to the application. Values stored for foods are per
/// 100 g and expressed in `unit`.
#[derive(Debug, Clone, Copy)]
pub struct Nutrient {
    pub id: &'static str,
    pub name: &'static str,
    pub abbr: &'static str,
    pub unit: &'static str,
}

const fn nut(
    id: &'static str,
    name: &'static str,
    abbr: &'static str,
    unit: &'static str,
) -> Nutrient {
    Nutrient {
        id,
        name,
        abbr,
        unit,
    }
}

// Amino acids
const AMINOS: &[Nutrient] = &[
    nut("501", "Tryptophan", "TRP", "g"),
    nut("502", "Threonine", "THR", "g"),
    nut("503", "Isoleucine", "ILE", "g"),
    nut("504", "Leucine", "LEU", "g"),
    nut("505", "Lysine", "LYS", "g"),
    nut("506", "Methionine", "MET", "g"),
    nut("507", "Cystine", "CYS", "g"),
    nut("508", "Phenylalanine", "PHE", "g"),
    nut("509", "Tyrosine", "TYR", "g"),
    nut("510", "Valine", "VAL", "g"),
    nut("511", "Arginine", "ARG", "g"),
    nut("512", "Histidine", "HIS", "g"),
    nut("513", "Alanine", "ALA", "g"),
    nut("514", "Aspartic Acid", "ASP", "g"),
    nut("515", "Glutamic Acid", "GLX", "g"),
    nut("516", "Glycine", "GLY", "g"),
    nut("517", "Proline", "PRO", "g"),
    nut("518", "Serine", "SER", "g"),
];

// Carbohydrates
const CARBS: &[Nutrient] = &[
    nut("209", "Starch", "Starch", "g"),
    nut("210", "Sucrose", "Sucrose", "g"),
    nut("211", "Glucose", "Glucose", "g"),
    nut("212", "Fructose", "Fructos", "g"),
    nut("213", "Lactose", "Lactose", "g"),
    nut("214", "Maltose", "Maltose", "g"),
    nut("262", "Caffeine", "Caffein", "mg"),
    nut("269", "Sugars", "Sugar", "g"),
    nut("287", "Galactose", "Galacto", "g"),
    nut("291", "Fiber", "Fiber", "g"),
];

// Lipids
const LIPIDS: &[Nutrient] = &[
    nut("601", "Cholesterol", "Cholest", "mg"),
    nut("605", "Trans Fatty Acids", "TranFat", "g"),
    nut("606", "Saturated Fatty Acids", "SatFat", "g"),
    nut("621", "DHA (Omega-3 Fatty Acid)", "DHA", "g"),
    nut("629", "EPA (Omega-3 Fatty Acid)", "EPA", "g"),
    nut("631", "DPA (Omega-3 Fatty Acid)", "DPA", "g"),
    nut("645", "Monounsaturated Fatty Acids", "MonoFat", "g"),
    nut("646", "Polyunsaturated Fatty Acids", "PolyFat", "g"),
    nut("851", "ALA (Omega-3 Fatty Acid)", "ALA", "g"),
];

// Macronutrients
const MACROS: &[Nutrient] = &[
    nut("203", "Protein", "Protein", "g"),
    nut("204", "Fat", "Fat", "g"),
    nut("205", "Carbohydrate", "Carb", "g"),
    nut("208", "Energy", "Energy", "kcal"),
];

// Minerals
const MINERALS: &[Nutrient] = &[
    nut("301", "Calcium", "Calcium", "mg"),
    nut("303", "Iron", "Iron", "mg"),
    nut("304", "Magnesium", "Magnes", "mg"),
    nut("305", "Phosphorus", "Phosph", "mg"),
    nut("306", "Potassium", "Potas", "mg"),
    nut("307", "Sodium", "Sodium", "mg"),
    nut("309", "Zinc", "Zinc", "mg"),
    nut("312", "Copper", "Copper", "mg"),
    nut("313", "Fluoride", "Fluor", "mcg"),
    nut("315", "Manganese", "Mangan", "mg"),
    nut("317", "Selenium", "Selen", "mcg"),
];

// Vitamins
const VITAMINS: &[Nutrient] = &[
    nut("318", "Vitamin A", "Vit A", "IU"),
    nut("319", "Vitamin A1 (Retinol)", "Retinol", "mcg"),
    nut("321", "Beta-Carotene", "b-Carot", "mcg"),
    nut("322", "Alpha-Carotene", "a-Carot", "mcg"),
    nut("323", "Vitamin E (a-Tocopherol)", "Vit E", "mg"),
    nut("324", "Vitamin D", "Vit D", "IU"),
    nut("325", "Vitamin D2 (Ergocalciferol)", "Vit D2", "mcg"),
    nut("326", "Vitamin D3 (Cholecalciferol)", "Vit D3", "mcg"),
    nut("342", "Vitamin E (g-Tocopherol)", "Vit E-g", "mg"),
    nut("401", "Vitamin C (Ascorbic Acid)", "Vit C", "mg"),
    nut("404", "Vitamin B1 (Thiamin)", "Vit B1", "mg"),
    nut("405", "Vitamin B2 (Riboflavin)", "Vit B2", "mg"),
    nut("406", "Vitamin B3 (Niacin)", "Vit B3", "mg"),
    nut("410", "Vitamin B5 (Pantothenic Acid)", "Vit B5", "mg"),
    nut("415", "Vitamin B6", "Vit B6", "mg"),
    nut("417", "Vitamin B9 (Folate / Folic)", "Vit B9", "mcg"),
    nut("418", "Vitamin B12 (Cobalamin)", "Vit B12", "mcg"),
    nut("421", "Choline", "Choline", "mg"),
    nut("428", "Vitamin K2 (Menaquinone-4)", "Vit K2", "mcg"),
    nut("430", "Vitamin K1 (Phylloquinone)", "Vit K", "mcg"),
];

static NUTRIENT_INDEX: LazyLock<HashMap<&'static str, &'static Nutrient>> = LazyLock::new(|| {
    [AMINOS, CARBS, LIPIDS, MACROS, MINERALS, VITAMINS]
        .into_iter()
        .flatten()
        .map(|n| (n.id, n))
        .collect()
});

pub fn nutrient(id: &str) -> Option<&'static Nutrient> {
    NUTRIENT_INDEX.get(id).copied()
}

pub fn is_nutrient(id: &str) -> bool {
    NUTRIENT_INDEX.contains_key(id)
}

/// Nutrient IDs shown by default, in display order: macros, then minerals,
/// vitamins and lipids. Amino acids are catalogued but not displayed.
pub const DEFAULT_NUTRIENT_ORDER: &[&str] = &[
    "208", "203", "204", "205", "269", "291", // macros
    "301", "312", "313", "303", "304", "315", "305", "306", "317", "307", "309", // minerals
    "318", "319", "322", "321", "404", "405", "406", "410", "415", "417", "418", "401", "324",
    "325", "326", "323", "430", "428", "421", // vitamins
    "645", "646", "606", "605", "601", "851", "621", "631", "629", // lipids
];

/// FDA daily reference values used to resolve percentage nutrient targets,
/// from the agency's food labeling requirements.
const FDA_DAILY_VALUES: &[(&str, f64, &str)] = &[
    ("203", 50.0, "g"),
    ("204", 65.0, "g"),
    ("205", 300.0, "g"),
    ("208", 2000.0, "kcal"),
    ("291", 25.0, "g"),
    ("301", 1000.0, "mg"),
    ("303", 18.0, "mg"),
    ("304", 400.0, "mg"),
    ("305", 1000.0, "mg"),
    ("306", 3500.0, "mg"),
    ("307", 2400.0, "mg"),
    ("309", 15.0, "mg"),
    ("312", 2.0, "mg"),
    ("315", 2.0, "mg"),
    ("317", 70.0, "mcg"),
    ("318", 5000.0, "IU"),
    ("323", 20.0, "mg"),
    ("324", 400.0, "IU"),
    ("401", 60.0, "mg"),
    ("404", 1.5, "mg"),
    ("405", 1.7, "mg"),
    ("406", 20.0, "mg"),
    ("410", 10.0, "mg"),
    ("415", 2.0, "mg"),
    ("417", 400.0, "mcg"),
    ("418", 6.0, "mcg"),
    ("430", 80.0, "mcg"),
    ("601", 300.0, "mg"),
    ("606", 20.0, "g"),
];

/// Returns the FDA daily value and its unit for a nutrient, if one is set.
pub fn fda_daily_value(id: &str) -> Option<(f64, &'static str)> {
    FDA_DAILY_VALUES
        .iter()
        .find(|(n, _, _)| *n == id)
        .map(|(_, amount, unit)| (*amount, *unit))
}

/// USDA food group IDs and names.
pub const FOOD_GROUPS: &[(&str, &str)] = &[
    ("0100", "Dairy and Egg Products"),
    ("0200", "Spices and Herbs"),
    ("0300", "Baby Foods"),
    ("0400", "Fats and Oils"),
    ("0500", "Poultry Products"),
    ("0600", "Soups, Sauces, and Gravies"),
    ("0700", "Sausages and Luncheon Meats"),
    ("0800", "Breakfast Cereals"),
    ("0900", "Fruits and Fruit Juices"),
    ("1000", "Pork Products"),
    ("1100", "Vegetables and Vegetable Products"),
    ("1200", "Nut and Seed Products"),
    ("1300", "Beef Products"),
    ("1400", "Beverages"),
    ("1500", "Finfish and Shellfish Products"),
    ("1600", "Legumes and Legume Products"),
    ("1700", "Lamb, Veal, and Game Products"),
    ("1800", "Baked Products"),
    ("1900", "Sweets"),
    ("2000", "Cereal Grains and Pasta"),
    ("2100", "Fast Foods"),
    ("2200", "Meals, Entrees, and Side Dishes"),
    ("2500", "Snacks"),
    ("3500", "American Indian/Alaska Native Foods"),
    ("3600", "Restaurant Foods"),
];

pub fn food_group_name(id: &str) -> Option<&'static str> {
    FOOD_GROUPS
        .iter()
        .find(|(gid, _)| *gid == id)
        .map(|(_, name)| *name)
}

pub fn is_food_group(id: &str) -> bool {
    food_group_name(id).is_some()
}

/// Focus muscles selectable for Exercise items: 18 specific muscle groups,
/// 3 general groups, and "NA" for exercises where the distinction does not
/// apply. Listed A-Z.
pub const MUSCLES: &[&str] = &[
    "Abdominals",
    "Abductors",
    "Adductors",
    "Biceps",
    "Calves",
    "Chest",
    "Forearms",
    "Full Body",
    "Glutes",
    "Hamstrings",
    "Lats",
    "Lower Back",
    "Lower Body",
    "Middle Back",
    "NA",
    "Neck",
    "Obliques",
    "Quadriceps",
    "Shoulders",
    "Traps",
    "Triceps",
    "Upper Body",
];

pub fn is_muscle(name: &str) -> bool {
    MUSCLES.contains(&name)
}

/// A seed entry for the built-in Exercise catalog. Some exercises appear
/// twice with different metric units (e.g. distance-based and time-based
/// cardio) and become separate items.
#[derive(Debug, Clone, Copy)]
pub struct SeedExercise {
    pub description: &'static str,
    pub focus_muscle: &'static str,
    pub units: [&'static str; 2],
}

const fn seed(
    description: &'static str,
    focus_muscle: &'static str,
    effort_unit: &'static str,
    intensity_unit: &'static str,
) -> SeedExercise {
    SeedExercise {
        description,
        focus_muscle,
        units: [effort_unit, intensity_unit],
    }
}

pub const SEED_EXERCISES: &[SeedExercise] = &[
    seed("Ab Rollout (Barbell)", "Abdominals", "rep", "NA"),
    seed("Bench Press (Close Grip Barbell)", "Chest", "rep", "lb"),
    seed("Bench Press (Close Grip Dumbbell)", "Chest", "rep", "lb"),
    seed("Bench Press (Decline Barbell)", "Chest", "rep", "lb"),
    seed("Bench Press (Decline Dumbbell)", "Chest", "rep", "lb"),
    seed("Bench Press (Incline Barbell)", "Chest", "rep", "lb"),
    seed("Bench Press (Incline Dumbbell)", "Chest", "rep", "lb"),
    seed("Bench Press (Machine)", "Chest", "rep", "lb"),
    seed("Bench Press (Medium Grip Barbell)", "Chest", "rep", "lb"),
    seed("Bench Press (Medium Grip Dumbbell)", "Chest", "rep", "lb"),
    seed("Bench Press (Wide Grip Barbell)", "Chest", "rep", "lb"),
    seed("Bench Press (Wide Grip Dumbbell)", "Chest", "rep", "lb"),
    seed("Bicep Curl (Barbell)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Cable)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Close Grip Barbell)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Close Grip EZ-Curl Bar)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Concentration Dumbbell)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Dumbbell)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (EZ-Curl Bar)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Hammer Alternating)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Hammer Two Arm)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Incline Dumbbell)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Preacher Barbell)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Preacher EZ-Curl Bar)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Preacher Machine)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Reverse Grip Barbell)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Reverse Grip EZ-Curl Bar)", "Biceps", "rep", "lb"),
    seed("Bicep Curl (Zottman)", "Biceps", "rep", "lb"),
    seed("Bicycling", "Quadriceps", "miles", "mph"),
    seed("Bicycling", "Quadriceps", "min", "mph"),
    seed("Bicycling (Stationary Machine)", "Quadriceps", "miles", "mph"),
    seed("Bicycling (Stationary Machine)", "Quadriceps", "min", "mph"),
    seed("Calf Raise (Leg Press Machine)", "Calves", "rep", "lb"),
    seed("Calf Raise (Seated Machine)", "Calves", "rep", "lb"),
    seed("Calf Raise (Standing Barbell)", "Calves", "rep", "lb"),
    seed("Calf Raise (Standing Dumbbell)", "Calves", "rep", "lb"),
    seed("Chin Up", "Lats", "rep", "lb"),
    seed("Chin Up (Assist Machine)", "Lats", "rep", "lb"),
    seed("Crossover (Cable)", "Chest", "rep", "lb"),
    seed("Crossover (Low Cable)", "Chest", "rep", "lb"),
    seed("Crunch", "Abdominals", "rep", "NA"),
    seed("Crunch (Cable)", "Abdominals", "rep", "lb"),
    seed("Crunch (Cable Oblique)", "Obliques", "rep", "lb"),
    seed("Crunch (Decline)", "Abdominals", "rep", "NA"),
    seed("Crunch (Decline Oblique)", "Obliques", "rep", "NA"),
    seed("Crunch (Oblique)", "Obliques", "rep", "NA"),
    seed("Deadlift (Barbell)", "Hamstrings", "rep", "lb"),
    seed("Deadlift (Dumbbell)", "Hamstrings", "rep", "lb"),
    seed("Deadlift (Romanian Barbell)", "Hamstrings", "rep", "lb"),
    seed("Deadlift (Romanian Dumbbell)", "Hamstrings", "rep", "lb"),
    seed("Deadlift (Stiff Legged Barbell)", "Hamstrings", "rep", "lb"),
    seed("Deadlift (Stiff Legged Dumbbell)", "Hamstrings", "rep", "lb"),
    seed("Dip (Assist Machine)", "Triceps", "rep", "lb"),
    seed("Dip (Bench)", "Triceps", "rep", "lb"),
    seed("Elliptical (Machine)", "Quadriceps", "miles", "mph"),
    seed("Elliptical (Machine)", "Quadriceps", "min", "mph"),
    seed("Face Pull", "Shoulders", "rep", "lb"),
    seed("Face Pull (Low Pulley Row to Neck)", "Shoulders", "rep", "lb"),
    seed("Finger Curl", "Forearms", "rep", "lb"),
    seed("Flutter Kick", "Glutes", "rep", "NA"),
    seed("Fly (Cable)", "Chest", "rep", "lb"),
    seed("Fly (Dumbbell)", "Chest", "rep", "lb"),
    seed("Fly (Incline Dumbbell)", "Chest", "rep", "lb"),
    seed("Fly (Machine)", "Chest", "rep", "lb"),
    seed("Fly (Reverse Dumbbell)", "Shoulders", "rep", "lb"),
    seed("Fly (Reverse Machine)", "Shoulders", "rep", "lb"),
    seed("Front Raise (Barbell)", "Shoulders", "rep", "lb"),
    seed("Front Raise (Cable)", "Shoulders", "rep", "lb"),
    seed("Front Raise (Dumbbell)", "Shoulders", "rep", "lb"),
    seed("Glute Bridge (Hip Thrust)", "Glutes", "rep", "lb"),
    seed("Glute Kickback", "Glutes", "rep", "NA"),
    seed("Glute Kickback (Cable)", "Glutes", "rep", "lb"),
    seed("Glute Kickback (Machine)", "Glutes", "rep", "lb"),
    seed("Good Morning", "Hamstrings", "rep", "lb"),
    seed("Hanging Leg Raise", "Abdominals", "rep", "lb"),
    seed("Hanging Leg Raise (Oblique)", "Obliques", "rep", "lb"),
    seed("Hip Raise", "Abdominals", "rep", "NA"),
    seed("Jump Rope", "Quadriceps", "min", "NA"),
    seed("Jump Rope", "Quadriceps", "rep", "NA"),
    seed("Jumping Jack", "Quadriceps", "rep", "NA"),
    seed("Leg Curl (Lying Machine)", "Hamstrings", "rep", "lb"),
    seed("Leg Curl (Seated Machine)", "Hamstrings", "rep", "lb"),
    seed("Leg Extension (Machine)", "Quadriceps", "rep", "lb"),
    seed("Leg Press (Machine)", "Quadriceps", "rep", "lb"),
    seed("Lunge", "Quadriceps", "rep", "NA"),
    seed("Lunge (Barbell)", "Quadriceps", "rep", "lb"),
    seed("Lunge (Dumbbell)", "Quadriceps", "rep", "lb"),
    seed("Lunge (EZ-Curl Bar)", "Quadriceps", "rep", "lb"),
    seed("Lunge (Reverse)", "Quadriceps", "rep", "NA"),
    seed("Lunge (Reverse Barbell)", "Quadriceps", "rep", "lb"),
    seed("Lunge (Reverse Dumbbell)", "Quadriceps", "rep", "lb"),
    seed("Lunge (Reverse EZ-Curl Bar)", "Quadriceps", "rep", "lb"),
    seed("Lunge (Side)", "Quadriceps", "rep", "NA"),
    seed("Lunge (Walking Barbell)", "Quadriceps", "rep", "lb"),
    seed("Lunge (Walking Dumbbell)", "Quadriceps", "rep", "lb"),
    seed("Lunge (Walking EZ-Curl Bar)", "Quadriceps", "rep", "lb"),
    seed("Plank", "Abdominals", "min", "NA"),
    seed("Pull Up", "Lats", "rep", "lb"),
    seed("Pull Up (Assist Machine)", "Lats", "rep", "lb"),
    seed("Pulldown (Underhand Grip Cable)", "Lats", "rep", "lb"),
    seed("Pulldown (Medium Grip Cable)", "Lats", "rep", "lb"),
    seed("Pulldown (Wide Grip Cable)", "Lats", "rep", "lb"),
    seed("Push Up", "Chest", "rep", "NA"),
    seed("Row (Bent Over Barbell)", "Middle Back", "rep", "lb"),
    seed("Row (Close Grip T-Bar)", "Lats", "rep", "lb"),
    seed("Row (One Arm Dumbbell)", "Middle Back", "rep", "lb"),
    seed("Row (One Arm Machine)", "Middle Back", "rep", "lb"),
    seed("Row (Pendlay)", "Middle Back", "rep", "lb"),
    seed("Row (Seated Cable)", "Middle Back", "rep", "lb"),
    seed("Row (Upright Barbell)", "Shoulders", "rep", "lb"),
    seed("Row (Upright Dumbbell)", "Shoulders", "rep", "lb"),
    seed("Row (Wide Grip T-Bar)", "Middle Back", "rep", "lb"),
    seed("Running (Road)", "Quadriceps", "miles", "mph"),
    seed("Running (Road)", "Quadriceps", "min", "mph"),
    seed("Running (Trail)", "Quadriceps", "miles", "mph"),
    seed("Running (Trail)", "Quadriceps", "min", "mph"),
    seed("Running (Treadmill)", "Quadriceps", "miles", "mph"),
    seed("Running (Treadmill)", "Quadriceps", "min", "mph"),
    seed("Scissor Kick", "Abdominals", "rep", "NA"),
    seed("Shoulder Press (Machine)", "Shoulders", "rep", "lb"),
    seed("Shoulder Press (Seated Barbell)", "Shoulders", "rep", "lb"),
    seed("Shoulder Press (Seated Dumbbell)", "Shoulders", "rep", "lb"),
    seed("Shoulder Press (Standing Barbell)", "Shoulders", "rep", "lb"),
    seed("Shoulder Press (Standing Dumbbell)", "Shoulders", "rep", "lb"),
    seed("Shrug (Barbell)", "Traps", "rep", "lb"),
    seed("Shrug (Dumbbell)", "Traps", "rep", "lb"),
    seed("Side Bend (Cable)", "Obliques", "rep", "lb"),
    seed("Side Bend (Dumbbell)", "Obliques", "rep", "lb"),
    seed("Side Lateral Raise", "Shoulders", "rep", "lb"),
    seed("Sit Up", "Abdominals", "rep", "NA"),
    seed("Sled Push", "Quadriceps", "ft", "lb"),
    seed("Squat (Barbell)", "Quadriceps", "rep", "lb"),
    seed("Squat (Dumbbell)", "Quadriceps", "rep", "lb"),
    seed("Squat (Front Barbell)", "Quadriceps", "rep", "lb"),
    seed("Squat (Front Dumbbell)", "Quadriceps", "rep", "lb"),
    seed("Squat (Goblet)", "Quadriceps", "rep", "lb"),
    seed("Squat (Machine)", "Quadriceps", "rep", "lb"),
    seed("Squat (One Legged Barbell)", "Quadriceps", "rep", "lb"),
    seed("Squat (One Legged Dumbbell)", "Quadriceps", "rep", "lb"),
    seed("Step Up", "Quadriceps", "rep", "NA"),
    seed("Step Up (Barbell)", "Quadriceps", "rep", "lb"),
    seed("Step Up (Dumbbell)", "Quadriceps", "rep", "lb"),
    seed("Step Up (EZ-Curl Bar)", "Quadriceps", "rep", "lb"),
    seed("Straight Arm Pulldown (Cable)", "Lats", "rep", "lb"),
    seed("Tricep Extension (Lying Barbell)", "Triceps", "rep", "lb"),
    seed("Tricep Extension (Lying Cable)", "Triceps", "rep", "lb"),
    seed("Tricep Extension (Lying Dumbbell)", "Triceps", "rep", "lb"),
    seed("Tricep Extension (Lying EZ-Curl Bar)", "Triceps", "rep", "lb"),
    seed("Tricep Extension (Seated Cable)", "Triceps", "rep", "lb"),
    seed("Tricep Extension (Seated Dumbbell)", "Triceps", "rep", "lb"),
    seed("Tricep Extension (Standing Cable)", "Triceps", "rep", "lb"),
    seed("Tricep Extension (Standing Dumbbell)", "Triceps", "rep", "lb"),
    seed("Tricep Kickback (Dumbbell)", "Triceps", "rep", "lb"),
    seed("Tricep Pushdown (Cable Bar)", "Triceps", "rep", "lb"),
    seed("Tricep Pushdown (Cable Rope)", "Triceps", "rep", "lb"),
    seed("Wood Chop (Standing Cable)", "Obliques", "rep", "lb"),
    seed("Wrist Curl (Palm Down Seated Barbell)", "Forearms", "rep", "lb"),
    seed("Wrist Curl (Palm Down Seated Dumbbell)", "Forearms", "rep", "lb"),
    seed("Wrist Curl (Palm Up Seated Barbell)", "Forearms", "rep", "lb"),
    seed("Wrist Curl (Palm Up Seated Dumbbell)", "Forearms", "rep", "lb"),
];
