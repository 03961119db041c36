// ABOUTME: Application constants and default configuration values for the plan core
// ABOUTME: Groups cache, nutrition, and progression defaults consumed by config and engines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

/// Service identifiers for structured logging
pub mod service_names {
    /// Name used in log output and error context
    pub const FITCOACH_CORE: &str = "fitcoach-core";
}

/// Cache defaults
pub mod cache {
    /// Default TTL for computed plans (24 hours)
    pub const DEFAULT_PLAN_TTL_SECS: u64 = 24 * 60 * 60;
    /// Default background sweep interval for expired entries (5 minutes)
    pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;
    /// Default maximum number of cached plans
    pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1000;
    /// Calorie targets are rounded to this step before fingerprinting, so
    /// near-identical requests share a cache entry
    pub const CALORIE_FINGERPRINT_STEP: u32 = 50;
}

/// Nutrition defaults
pub mod nutrition {
    /// Allowed deviation between computed daily calories and the target (±10%)
    pub const DEFAULT_CALORIE_TOLERANCE: f64 = 0.10;
    /// Calorie share of the breakfast slot
    pub const BREAKFAST_CALORIE_SHARE: f64 = 0.25;
    /// Calorie share of the lunch slot
    pub const LUNCH_CALORIE_SHARE: f64 = 0.40;
    /// Calorie share of the dinner slot
    pub const DINNER_CALORIE_SHARE: f64 = 0.35;
    /// Portion multipliers are clamped to this range when scaling recipes
    pub const MIN_PORTION_MULTIPLIER: f64 = 0.5;
    /// Upper clamp for portion multipliers
    pub const MAX_PORTION_MULTIPLIER: f64 = 2.0;
    /// Calories per gram of protein
    pub const CALORIES_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Calories per gram of carbohydrate
    pub const CALORIES_PER_GRAM_CARBS: f64 = 4.0;
    /// Calories per gram of fat
    pub const CALORIES_PER_GRAM_FAT: f64 = 9.0;
    /// Fallback daily calorie target when the caller supplies none
    pub const DEFAULT_CALORIE_TARGET: u32 = 2000;
}

/// Progression defaults
pub mod progression {
    /// Hard cap on sets per exercise; past this the engine recommends
    /// increasing external resistance instead of adding volume
    pub const SET_CAP: u32 = 5;
    /// Sets assigned on the first cycle (no history)
    pub const BASE_SETS: u32 = 3;
    /// Exercises assigned per non-rest day
    pub const EXERCISES_PER_DAY: usize = 4;
    /// Minutes added to each day's total for warm-up
    pub const WARMUP_MINUTES: u32 = 5;
    /// Weekly day labels, in plan order
    pub const DAY_LABELS: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];
}
