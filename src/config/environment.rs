// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into typed cache, nutrition, and progression settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

//! Environment-based configuration management
//!
//! The core is configured exclusively through environment variables; tolerance
//! bands and macro ratios are configuration, not hard-coded contract.

use crate::constants::{cache, nutrition, progression};
use crate::errors::{AppError, AppResult};
use crate::models::{Goal, MacroSplit};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::warn;

/// Environment type for configuration defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Plan cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// TTL applied to computed plans
    pub plan_ttl_secs: u64,
    /// Background sweep interval for expired entries
    pub sweep_interval_secs: u64,
    /// Maximum number of cached plans
    pub max_entries: usize,
    /// Enable the background sweep task (disable in tests to avoid runtime
    /// conflicts)
    pub enable_background_sweep: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            plan_ttl_secs: cache::DEFAULT_PLAN_TTL_SECS,
            sweep_interval_secs: cache::DEFAULT_SWEEP_INTERVAL_SECS,
            max_entries: cache::DEFAULT_CACHE_MAX_ENTRIES,
            enable_background_sweep: true,
        }
    }
}

impl CacheSettings {
    #[must_use]
    pub const fn plan_ttl(&self) -> Duration {
        Duration::from_secs(self.plan_ttl_secs)
    }

    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Nutrition settings: tolerance band, slot distribution, macro splits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionSettings {
    /// Allowed deviation between daily calories and the target (fraction)
    pub calorie_tolerance: f64,
    /// Calorie shares per slot: (breakfast, lunch, dinner), must sum to 1.0
    pub slot_shares: (f64, f64, f64),
    /// Portion multiplier clamp when scaling recipes
    pub min_portion: f64,
    pub max_portion: f64,
    /// Per-goal macro splits; each must sum to 100
    pub split_weight_loss: MacroSplit,
    pub split_muscle_gain: MacroSplit,
    pub split_maintenance: MacroSplit,
    pub split_endurance: MacroSplit,
}

impl Default for NutritionSettings {
    fn default() -> Self {
        Self {
            calorie_tolerance: nutrition::DEFAULT_CALORIE_TOLERANCE,
            slot_shares: (
                nutrition::BREAKFAST_CALORIE_SHARE,
                nutrition::LUNCH_CALORIE_SHARE,
                nutrition::DINNER_CALORIE_SHARE,
            ),
            min_portion: nutrition::MIN_PORTION_MULTIPLIER,
            max_portion: nutrition::MAX_PORTION_MULTIPLIER,
            split_weight_loss: Goal::WeightLoss.default_macro_split(),
            split_muscle_gain: Goal::MuscleGain.default_macro_split(),
            split_maintenance: Goal::Maintenance.default_macro_split(),
            split_endurance: Goal::Endurance.default_macro_split(),
        }
    }
}

impl NutritionSettings {
    /// Configured macro split for a goal
    #[must_use]
    pub const fn macro_split_for(&self, goal: Goal) -> MacroSplit {
        match goal {
            Goal::WeightLoss => self.split_weight_loss,
            Goal::MuscleGain => self.split_muscle_gain,
            Goal::Maintenance => self.split_maintenance,
            Goal::Endurance => self.split_endurance,
        }
    }

    /// Goal/split pairs for validation and diagnostics
    #[must_use]
    pub const fn splits(&self) -> [(Goal, MacroSplit); 4] {
        [
            (Goal::WeightLoss, self.split_weight_loss),
            (Goal::MuscleGain, self.split_muscle_gain),
            (Goal::Maintenance, self.split_maintenance),
            (Goal::Endurance, self.split_endurance),
        ]
    }

    /// Inclusive calorie band around a target
    #[must_use]
    pub fn calorie_band(&self, target: u32) -> (f64, f64) {
        let target = f64::from(target);
        (
            target * (1.0 - self.calorie_tolerance),
            target * (1.0 + self.calorie_tolerance),
        )
    }
}

/// Progression settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionSettings {
    /// Hard cap on sets per exercise
    pub set_cap: u32,
    /// Sets assigned on the first cycle
    pub base_sets: u32,
    /// Exercises per non-rest day
    pub exercises_per_day: usize,
}

impl Default for ProgressionSettings {
    fn default() -> Self {
        Self {
            set_cap: progression::SET_CAP,
            base_sets: progression::BASE_SETS,
            exercises_per_day: progression::EXERCISES_PER_DAY,
        }
    }
}

/// Top-level core configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoreConfig {
    pub environment: Environment,
    pub cache: CacheSettings,
    pub nutrition: NutritionSettings,
    pub progression: ProgressionSettings,
}

impl CoreConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but fails validation
    pub fn from_env() -> AppResult<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let config = Self {
            environment,
            cache: CacheSettings {
                plan_ttl_secs: parse_env("PLAN_CACHE_TTL_SECS", cache::DEFAULT_PLAN_TTL_SECS),
                sweep_interval_secs: parse_env(
                    "PLAN_CACHE_SWEEP_SECS",
                    cache::DEFAULT_SWEEP_INTERVAL_SECS,
                ),
                max_entries: parse_env("PLAN_CACHE_MAX_ENTRIES", cache::DEFAULT_CACHE_MAX_ENTRIES),
                enable_background_sweep: env::var("PLAN_CACHE_BACKGROUND_SWEEP")
                    .map(|v| v != "false" && v != "0")
                    .unwrap_or(true),
            },
            nutrition: NutritionSettings {
                calorie_tolerance: parse_env(
                    "CALORIE_TOLERANCE",
                    nutrition::DEFAULT_CALORIE_TOLERANCE,
                ),
                split_weight_loss: parse_split_env(
                    "MACRO_SPLIT_WEIGHT_LOSS",
                    Goal::WeightLoss.default_macro_split(),
                ),
                split_muscle_gain: parse_split_env(
                    "MACRO_SPLIT_MUSCLE_GAIN",
                    Goal::MuscleGain.default_macro_split(),
                ),
                split_maintenance: parse_split_env(
                    "MACRO_SPLIT_MAINTENANCE",
                    Goal::Maintenance.default_macro_split(),
                ),
                split_endurance: parse_split_env(
                    "MACRO_SPLIT_ENDURANCE",
                    Goal::Endurance.default_macro_split(),
                ),
                ..NutritionSettings::default()
            },
            progression: ProgressionSettings {
                set_cap: parse_env("PROGRESSION_SET_CAP", progression::SET_CAP),
                base_sets: parse_env("PROGRESSION_BASE_SETS", progression::BASE_SETS),
                exercises_per_day: parse_env(
                    "PROGRESSION_EXERCISES_PER_DAY",
                    progression::EXERCISES_PER_DAY,
                ),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate settings ranges
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when a setting is out of range
    pub fn validate(&self) -> AppResult<()> {
        if self.nutrition.calorie_tolerance <= 0.0 || self.nutrition.calorie_tolerance >= 1.0 {
            return Err(AppError::config(format!(
                "calorie tolerance must be in (0, 1), got {}",
                self.nutrition.calorie_tolerance
            )));
        }
        let (b, l, d) = self.nutrition.slot_shares;
        if (b + l + d - 1.0).abs() > 1e-6 {
            return Err(AppError::config(format!(
                "meal slot shares must sum to 1.0, got {}",
                b + l + d
            )));
        }
        if self.nutrition.min_portion <= 0.0 || self.nutrition.min_portion > self.nutrition.max_portion {
            return Err(AppError::config("invalid portion multiplier clamp"));
        }
        for (goal, split) in self.nutrition.splits() {
            if split.total_pct() != 100 {
                return Err(AppError::config(format!(
                    "macro split for {} must sum to 100, got {}",
                    goal.label(),
                    split.total_pct()
                )));
            }
        }
        if self.progression.base_sets == 0 || self.progression.base_sets > self.progression.set_cap
        {
            return Err(AppError::config(format!(
                "base sets ({}) must be between 1 and the set cap ({})",
                self.progression.base_sets, self.progression.set_cap
            )));
        }
        if self.progression.exercises_per_day == 0 {
            return Err(AppError::config("exercises per day must be at least 1"));
        }
        if self.cache.plan_ttl_secs == 0 {
            return Err(AppError::config("plan cache TTL must be positive"));
        }
        Ok(())
    }
}

/// Parse an env var, falling back to a default on absence or parse failure
fn parse_env<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = %name, value = %raw, "Unparseable environment value, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Parse a "protein/carbs/fat" macro split env var, falling back on absence
/// or when the parts do not sum to 100
fn parse_split_env(name: &str, default: MacroSplit) -> MacroSplit {
    match env::var(name) {
        Ok(raw) => parse_split(&raw).unwrap_or_else(|| {
            warn!(var = %name, value = %raw, "Unparseable macro split, using default");
            default
        }),
        Err(_) => default,
    }
}

fn parse_split(raw: &str) -> Option<MacroSplit> {
    let mut parts = raw.split('/');
    let protein = parts.next()?.trim().parse().ok()?;
    let carbs = parts.next()?.trim().parse().ok()?;
    let fat = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    MacroSplit::try_new(protein, carbs, fat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        CoreConfig::default().validate().unwrap();
    }

    #[test]
    fn test_tolerance_out_of_range_rejected() {
        let mut config = CoreConfig::default();
        config.nutrition.calorie_tolerance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_sets_above_cap_rejected() {
        let mut config = CoreConfig::default();
        config.progression.base_sets = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_macro_split_for_consults_stored_settings() {
        let mut settings = NutritionSettings::default();
        settings.split_weight_loss = MacroSplit::new(40, 30, 30);
        assert_eq!(
            settings.macro_split_for(Goal::WeightLoss),
            MacroSplit::new(40, 30, 30)
        );
        // Other goals keep their own splits
        assert_eq!(
            settings.macro_split_for(Goal::Maintenance),
            Goal::Maintenance.default_macro_split()
        );
    }

    #[test]
    fn test_split_parsing() {
        assert_eq!(parse_split("35/35/30"), Some(MacroSplit::new(35, 35, 30)));
        assert_eq!(parse_split(" 25 / 50 / 25 "), Some(MacroSplit::new(25, 50, 25)));
        assert_eq!(parse_split("40/40/40"), None);
        assert_eq!(parse_split("35/35"), None);
        assert_eq!(parse_split("35/35/20/10"), None);
        assert_eq!(parse_split("high/low/low"), None);
    }

    #[test]
    fn test_invalid_macro_split_rejected() {
        let mut config = CoreConfig::default();
        config.nutrition.split_endurance = MacroSplit {
            protein_pct: 50,
            carbs_pct: 50,
            fat_pct: 50,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_calorie_band() {
        let settings = NutritionSettings::default();
        let (lo, hi) = settings.calorie_band(2000);
        assert!((lo - 1800.0).abs() < f64::EPSILON);
        assert!((hi - 2200.0).abs() < f64::EPSILON);
    }
}
