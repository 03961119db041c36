// ABOUTME: Common data models for workout and meal planning
// ABOUTME: Defines exercise/recipe records, weekly plans, and derived balance reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use crate::constants::nutrition::{
    CALORIES_PER_GRAM_CARBS, CALORIES_PER_GRAM_FAT, CALORIES_PER_GRAM_PROTEIN,
};
use serde::{Deserialize, Serialize};

/// Major muscle groups tracked by the balance validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
}

impl MuscleGroup {
    /// All major groups a balanced week must touch at least twice
    pub const MAJOR: [Self; 6] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Arms,
        Self::Core,
    ];

    /// Label used in logs and narrative output
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Legs => "legs",
            Self::Shoulders => "shoulders",
            Self::Arms => "arms",
            Self::Core => "core",
        }
    }
}

/// Muscle-group focus for a single training day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    /// Pressing movements: chest, shoulders, triceps
    Push,
    /// Pulling movements: back, biceps
    Pull,
    /// Lower body
    Legs,
    /// Compound whole-body work
    FullBody,
    /// Trunk stability and anti-rotation work
    Core,
    /// No training stimulus scheduled
    Rest,
}

impl FocusArea {
    /// Muscle groups an exercise must intersect to qualify for this focus
    #[must_use]
    pub const fn target_groups(&self) -> &'static [MuscleGroup] {
        match self {
            Self::Push => &[MuscleGroup::Chest, MuscleGroup::Shoulders, MuscleGroup::Arms],
            Self::Pull => &[MuscleGroup::Back, MuscleGroup::Arms],
            Self::Legs => &[MuscleGroup::Legs],
            Self::FullBody => &[
                MuscleGroup::Chest,
                MuscleGroup::Back,
                MuscleGroup::Legs,
                MuscleGroup::Core,
            ],
            Self::Core => &[MuscleGroup::Core],
            Self::Rest => &[],
        }
    }

    /// Primary group used for consecutive-day conflict detection
    #[must_use]
    pub const fn primary_group(&self) -> Option<MuscleGroup> {
        match self {
            Self::Push => Some(MuscleGroup::Chest),
            Self::Pull => Some(MuscleGroup::Back),
            Self::Legs => Some(MuscleGroup::Legs),
            Self::Core => Some(MuscleGroup::Core),
            // Full-body days have no single primary group
            Self::FullBody | Self::Rest => None,
        }
    }

    #[must_use]
    pub const fn is_rest(&self) -> bool {
        matches!(self, Self::Rest)
    }
}

/// Exercise difficulty tier, ordered from beginner to advanced
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Default repetition range for an exercise (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepRange {
    pub min: u32,
    pub max: u32,
}

impl RepRange {
    /// Create a rep range; `min` must not exceed `max`
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        assert!(min <= max, "rep range min must not exceed max");
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(&self, reps: u32) -> bool {
        reps >= self.min && reps <= self.max
    }
}

/// Immutable exercise record keyed by name
///
/// Catalog entries are shared, read-only state; plans reference them by
/// normalized name, never by ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Display name; the normalized form is the unique catalog key
    pub name: String,
    /// Target muscle groups (non-empty)
    pub muscle_groups: Vec<MuscleGroup>,
    /// Minimum tier required to attempt this exercise
    pub tier: DifficultyTier,
    /// Default rep range the progression engine scales from
    pub rep_range: RepRange,
    /// Safety guidance surfaced alongside assignments
    pub safety_notes: String,
    /// Movement description
    pub form_description: String,
}

impl ExerciseRecord {
    /// Normalized catalog key: lowercase with underscores
    #[must_use]
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }

    /// Whether this exercise targets any of the given groups
    #[must_use]
    pub fn targets_any(&self, groups: &[MuscleGroup]) -> bool {
        self.muscle_groups.iter().any(|g| groups.contains(g))
    }
}

/// Normalize a record name into its lookup key
#[must_use]
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

/// A single exercise slot in a daily workout
///
/// Holds a weak reference to the catalog record (by key) plus the
/// plan-specific volume derived by the progression engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseAssignment {
    /// Catalog key of the exercise
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    /// Estimated minutes for this assignment
    pub duration_minutes: u32,
    /// Set when volume is maxed out and external load should increase instead
    pub increase_resistance: bool,
    /// Coaching note attached by the progression engine, present when a
    /// resistance increase is recommended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One day of a weekly workout plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWorkout {
    /// Day label, unique within a plan
    pub day: String,
    pub focus: FocusArea,
    pub assignments: Vec<ExerciseAssignment>,
    /// Total minutes including warm-up; always >= the sum of assignment durations
    pub total_duration_minutes: u32,
}

impl DailyWorkout {
    #[must_use]
    pub const fn is_rest(&self) -> bool {
        self.focus.is_rest()
    }

    /// Sum of per-assignment durations, excluding warm-up
    #[must_use]
    pub fn assignments_duration(&self) -> u32 {
        self.assignments.iter().map(|a| a.duration_minutes).sum()
    }
}

/// A validated 7-day workout plan, owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub goal: Goal,
    pub level: DifficultyTier,
    /// Exactly 7 entries for a weekly plan
    pub days: Vec<DailyWorkout>,
}

impl WorkoutPlan {
    /// Check the unique-day-label invariant
    #[must_use]
    pub fn day_labels_unique(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.days.iter().all(|d| seen.insert(d.day.as_str()))
    }
}

/// A previously completed (or abandoned) plan supplied as progression history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousPlan {
    pub plan: WorkoutPlan,
    /// Whether the user completed the prior cycle; progression only applies
    /// when true
    pub completed: bool,
}

impl PreviousPlan {
    /// Find the prior assignment for an exercise key, if any
    #[must_use]
    pub fn assignment_for(&self, exercise_key: &str) -> Option<&ExerciseAssignment> {
        self.plan
            .days
            .iter()
            .flat_map(|d| d.assignments.iter())
            .find(|a| a.exercise == exercise_key)
    }
}

/// Fitness goal driving both focus rotation and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    #[default]
    Maintenance,
    Endurance,
}

impl Goal {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Maintenance => "maintenance",
            Self::Endurance => "endurance",
        }
    }

    /// Default macro distribution for this goal as (protein, carbs, fat)
    /// percentages summing to 100. Cutting biases protein, bulking and
    /// endurance bias carbs. Overridable via `NutritionSettings`.
    #[must_use]
    pub const fn default_macro_split(&self) -> MacroSplit {
        match self {
            Self::WeightLoss => MacroSplit::new(35, 35, 30),
            Self::MuscleGain | Self::Endurance => MacroSplit::new(25, 50, 25),
            Self::Maintenance => MacroSplit::new(30, 40, 30),
        }
    }

    /// Daily calorie target used when the caller supplies none
    #[must_use]
    pub const fn default_calorie_target(&self) -> u32 {
        match self {
            Self::WeightLoss => 1800,
            Self::MuscleGain => 2500,
            Self::Maintenance => 2000,
            Self::Endurance => 2400,
        }
    }
}

/// Macro distribution as percentages of total calories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_pct: u8,
    pub carbs_pct: u8,
    pub fat_pct: u8,
}

impl MacroSplit {
    #[must_use]
    pub const fn new(protein_pct: u8, carbs_pct: u8, fat_pct: u8) -> Self {
        assert!(
            protein_pct as u16 + carbs_pct as u16 + fat_pct as u16 == 100,
            "macro split must sum to 100"
        );
        Self {
            protein_pct,
            carbs_pct,
            fat_pct,
        }
    }

    /// Fallible constructor for splits coming from configuration
    #[must_use]
    pub const fn try_new(protein_pct: u8, carbs_pct: u8, fat_pct: u8) -> Option<Self> {
        if protein_pct as u16 + carbs_pct as u16 + fat_pct as u16 == 100 {
            Some(Self {
                protein_pct,
                carbs_pct,
                fat_pct,
            })
        } else {
            None
        }
    }

    /// Sum of the three percentages; a valid split totals exactly 100
    #[must_use]
    pub const fn total_pct(&self) -> u16 {
        self.protein_pct as u16 + self.carbs_pct as u16 + self.fat_pct as u16
    }

    /// Gram targets for a given calorie budget
    #[must_use]
    pub fn gram_targets(&self, calories: f64) -> MacroTotals {
        MacroTotals {
            calories,
            protein_g: calories * f64::from(self.protein_pct) / 100.0 / CALORIES_PER_GRAM_PROTEIN,
            carbs_g: calories * f64::from(self.carbs_pct) / 100.0 / CALORIES_PER_GRAM_CARBS,
            fat_g: calories * f64::from(self.fat_pct) / 100.0 / CALORIES_PER_GRAM_FAT,
        }
    }
}

/// Aggregated macro amounts (calories plus grams)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl MacroTotals {
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fat_g: self.fat_g + other.fat_g,
        }
    }

    /// Sum of absolute deviations from a target, calories weighted in
    /// gram-equivalent units to keep dimensions comparable
    #[must_use]
    pub fn deviation_from(&self, target: &Self) -> f64 {
        (self.calories - target.calories).abs() / 10.0
            + (self.protein_g - target.protein_g).abs()
            + (self.carbs_g - target.carbs_g).abs()
            + (self.fat_g - target.fat_g).abs()
    }
}

/// Dietary compatibility label carried on recipes and requested by users
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    Keto,
    Paleo,
    Mediterranean,
    HighProtein,
    /// Free-form label from a remote recipe source
    Custom(String),
}

impl DietTag {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten_free",
            Self::DairyFree => "dairy_free",
            Self::Keto => "keto",
            Self::Paleo => "paleo",
            Self::Mediterranean => "mediterranean",
            Self::HighProtein => "high_protein",
            Self::Custom(s) => s.as_str(),
        }
    }
}

/// Immutable recipe record keyed by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// Unique recipe id
    pub id: u32,
    pub title: String,
    /// Ordered ingredient list
    pub ingredients: Vec<String>,
    /// Calories per single serving
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub prep_time_minutes: u32,
    /// Dietary-compatibility labels
    pub tags: Vec<DietTag>,
}

impl RecipeRecord {
    /// A recipe is compatible when it carries every requested tag
    #[must_use]
    pub fn is_compatible_with(&self, preferences: &[DietTag]) -> bool {
        preferences.iter().all(|p| self.tags.contains(p))
    }

    /// Macro totals for a scaled portion of this recipe
    #[must_use]
    pub fn scaled_macros(&self, portion: f64) -> MacroTotals {
        MacroTotals {
            calories: self.calories * portion,
            protein_g: self.protein_g * portion,
            carbs_g: self.carbs_g * portion,
            fat_g: self.fat_g * portion,
        }
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Share of the daily calorie target allotted to this slot
    #[must_use]
    pub const fn calorie_share(&self) -> f64 {
        match self {
            Self::Breakfast => crate::constants::nutrition::BREAKFAST_CALORIE_SHARE,
            Self::Lunch => crate::constants::nutrition::LUNCH_CALORIE_SHARE,
            Self::Dinner => crate::constants::nutrition::DINNER_CALORIE_SHARE,
        }
    }
}

/// A selected recipe scaled by a portion multiplier
///
/// Weak reference: the recipe is identified by id and resolved against the
/// catalog; the meal never owns the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub recipe_id: u32,
    pub slot: MealSlot,
    /// Portion multiplier applied to the recipe's per-serving macros
    pub portion: f64,
    /// Macros after scaling, denormalized for report computation
    pub macros: MacroTotals,
}

/// Three meal selections for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMeals {
    pub day: String,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
}

impl DailyMeals {
    #[must_use]
    pub fn totals(&self) -> MacroTotals {
        self.breakfast
            .macros
            .add(&self.lunch.macros)
            .add(&self.dinner.macros)
    }

    /// Iterate the three meals in slot order
    pub fn meals(&self) -> impl Iterator<Item = &Meal> {
        [&self.breakfast, &self.lunch, &self.dinner].into_iter()
    }
}

/// A weekly meal plan, owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub goal: Goal,
    pub calorie_target: u32,
    pub preferences: Vec<DietTag>,
    pub days: Vec<DailyMeals>,
}

impl MealPlan {
    /// Weekly average of daily calories
    #[must_use]
    pub fn average_daily_calories(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        let total: f64 = self.days.iter().map(|d| d.totals().calories).sum();
        total / self.days.len() as f64
    }
}

/// Conflict between adjacent days hammering the same primary group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsecutiveConflict {
    pub first_day: String,
    pub second_day: String,
    pub group: MuscleGroup,
}

/// Derived, ephemeral balance report; recomputed per validation call and
/// never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// True iff no under-targeted groups and no conflicts
    pub balanced: bool,
    /// Major groups touched fewer than twice across non-rest days
    pub under_targeted: Vec<MuscleGroup>,
    /// Adjacent high-intensity days sharing a primary focus
    pub conflicts: Vec<ConsecutiveConflict>,
}

/// Per-day calorie deviation entry in a nutrition report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDeviation {
    pub day: String,
    pub calories: f64,
    /// Signed deviation from the target as a fraction (0.12 = 12% over)
    pub deviation: f64,
}

/// Post-pass nutrition analysis; deviations beyond the tolerance band are
/// warnings, never errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionReport {
    pub avg_daily: MacroTotals,
    /// Realized macro ratios as (protein, carbs, fat) percentages
    pub macro_ratios: (f64, f64, f64),
    /// 0-100 closeness score between realized and target macros
    pub nutrition_score: f64,
    pub day_deviations: Vec<DayDeviation>,
    pub warnings: Vec<String>,
}
