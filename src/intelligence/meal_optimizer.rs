// ABOUTME: Deterministic meal selection with portion scaling against calorie and macro targets
// ABOUTME: Greedy slot assembly with bounded backtracking and a uniform day rescale fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use crate::catalog::RecipeCatalog;
use crate::config::NutritionSettings;
use crate::constants::progression::DAY_LABELS;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    DailyMeals, DayDeviation, DietTag, Goal, MacroSplit, MacroTotals, Meal, MealPlan, MealSlot,
    NutritionReport, RecipeRecord,
};
use std::sync::Arc;
use std::time::Instant;

/// Lowest daily calorie target the optimizer will accept
const MIN_CALORIE_TARGET: u32 = 800;
/// Highest daily calorie target the optimizer will accept
const MAX_CALORIE_TARGET: u32 = 10_000;
/// Alternatives examined per slot during backtracking
const BACKTRACK_WIDTH: usize = 5;

/// A recipe scaled toward a slot target, ready for selection
#[derive(Debug, Clone)]
struct Candidate {
    recipe_id: u32,
    portion: f64,
    macros: MacroTotals,
    deviation: f64,
}

/// Selects and portions recipes into a weekly meal plan
///
/// Selection is fully deterministic: each slot takes the candidate with the
/// lowest macro deviation, ties broken by lowest recipe id. Lower-ranked
/// alternatives are only consulted when the best combination cannot land in
/// the calorie band. Identical slot targets therefore produce identical days.
pub struct MealOptimizer {
    catalog: Arc<RecipeCatalog>,
    settings: NutritionSettings,
}

impl MealOptimizer {
    #[must_use]
    pub fn new(catalog: Arc<RecipeCatalog>, settings: NutritionSettings) -> Self {
        Self { catalog, settings }
    }

    /// Build a 7-day meal plan honoring dietary preferences and the calorie
    /// tolerance band
    ///
    /// A missing calorie target falls back to the goal's default. Every day
    /// of the returned plan lands within the tolerance band around the
    /// target.
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` for an implausible calorie target and
    /// `NO_COMPATIBLE_RECIPE` when no recipe combination can satisfy the
    /// preferences within the band
    pub fn optimize(
        &self,
        goal: Goal,
        calorie_target: Option<u32>,
        preferences: &[DietTag],
    ) -> AppResult<MealPlan> {
        let started = Instant::now();
        let target = calorie_target.unwrap_or_else(|| goal.default_calorie_target());
        if !(MIN_CALORIE_TARGET..=MAX_CALORIE_TARGET).contains(&target) {
            return Err(AppError::value_out_of_range(format!(
                "calorie target {target} outside supported range {MIN_CALORIE_TARGET}..={MAX_CALORIE_TARGET}"
            )));
        }

        let compatible: Vec<&RecipeRecord> = self.catalog.compatible_with(preferences).collect();
        if compatible.is_empty() {
            return Err(AppError::no_compatible_recipe(format!(
                "no recipe satisfies all {} dietary preferences",
                preferences.len()
            )));
        }

        let split = self.settings.macro_split_for(goal);
        let target_f = f64::from(target);
        let slot_candidates: [Vec<Candidate>; 3] = [
            self.rank_slot(&compatible, MealSlot::Breakfast, target_f, split),
            self.rank_slot(&compatible, MealSlot::Lunch, target_f, split),
            self.rank_slot(&compatible, MealSlot::Dinner, target_f, split),
        ];

        let band = self.settings.calorie_band(target);
        let meals = self.assemble_day(&slot_candidates, target_f, band)?;
        let days = DAY_LABELS
            .iter()
            .map(|label| {
                let [breakfast, lunch, dinner] = meals.clone();
                DailyMeals {
                    day: (*label).to_owned(),
                    breakfast,
                    lunch,
                    dinner,
                }
            })
            .collect();

        let plan = MealPlan {
            goal,
            calorie_target: target,
            preferences: preferences.to_vec(),
            days,
        };
        AppLogger::log_meal_optimization(
            goal.label(),
            target,
            plan.days.len() * MealSlot::ALL.len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(plan)
    }

    /// Rank compatible recipes for one slot by deviation from the slot's
    /// pro-rated macro targets
    fn rank_slot(
        &self,
        compatible: &[&RecipeRecord],
        slot: MealSlot,
        daily_target: f64,
        split: MacroSplit,
    ) -> Vec<Candidate> {
        let slot_calories = daily_target * slot.calorie_share();
        let slot_target = split.gram_targets(slot_calories);

        let mut candidates: Vec<Candidate> = compatible
            .iter()
            .map(|recipe| {
                let portion = self.clamp_portion(slot_calories / recipe.calories);
                let macros = recipe.scaled_macros(portion);
                Candidate {
                    recipe_id: recipe.id,
                    portion,
                    macros,
                    deviation: macros.deviation_from(&slot_target),
                }
            })
            .collect();
        // Stable sort: equal deviations keep catalog id order
        candidates.sort_by(|a, b| a.deviation.total_cmp(&b.deviation));
        candidates
    }

    /// Assemble the day template: start from the best-ranked candidate in
    /// every slot and fall back to lower-ranked alternatives only when the
    /// combination cannot land inside the calorie band
    fn assemble_day(
        &self,
        slot_candidates: &[Vec<Candidate>; 3],
        target: f64,
        band: (f64, f64),
    ) -> AppResult<[Meal; 3]> {
        let widths: Vec<usize> = slot_candidates
            .iter()
            .map(|c| c.len().min(BACKTRACK_WIDTH))
            .collect();

        for b in 0..widths[0] {
            for l in 0..widths[1] {
                for d in 0..widths[2] {
                    let picks = [
                        &slot_candidates[0][b],
                        &slot_candidates[1][l],
                        &slot_candidates[2][d],
                    ];
                    if let Some(meals) = self.fit_to_band(&picks, target, band) {
                        return Ok(meals);
                    }
                }
            }
        }

        Err(AppError::no_compatible_recipe(format!(
            "no compatible recipe combination lands within {:.0}-{:.0} kcal",
            band.0, band.1
        )))
    }

    /// Accept a combination as-is when inside the band, otherwise rescale all
    /// three portions uniformly toward the target and re-check
    fn fit_to_band(
        &self,
        picks: &[&Candidate; 3],
        target: f64,
        band: (f64, f64),
    ) -> Option<[Meal; 3]> {
        let day_calories: f64 = picks.iter().map(|c| c.macros.calories).sum();
        if within(day_calories, band) {
            return Some(build_meals(picks, None));
        }
        if day_calories <= 0.0 {
            return None;
        }

        let factor = target / day_calories;
        let rescaled: Vec<(f64, MacroTotals)> = picks
            .iter()
            .map(|c| {
                let portion = self.clamp_portion(c.portion * factor);
                // Recover per-serving macros from the candidate's scaling
                let per_serving_calories = c.macros.calories / c.portion;
                let macros = MacroTotals {
                    calories: per_serving_calories * portion,
                    protein_g: c.macros.protein_g / c.portion * portion,
                    carbs_g: c.macros.carbs_g / c.portion * portion,
                    fat_g: c.macros.fat_g / c.portion * portion,
                };
                (portion, macros)
            })
            .collect();

        let rescaled_calories: f64 = rescaled.iter().map(|(_, m)| m.calories).sum();
        if within(rescaled_calories, band) {
            Some(build_meals(picks, Some(&rescaled)))
        } else {
            None
        }
    }

    fn clamp_portion(&self, portion: f64) -> f64 {
        portion.clamp(self.settings.min_portion, self.settings.max_portion)
    }

    /// Analyze how a finished plan tracks its goal's macro split and calorie
    /// target; deviations are advisory warnings, never errors
    #[must_use]
    pub fn analyze_balance(&self, plan: &MealPlan) -> NutritionReport {
        let split = self.settings.macro_split_for(plan.goal);
        let target = f64::from(plan.calorie_target);

        let mut sum = MacroTotals::default();
        let mut day_deviations = Vec::with_capacity(plan.days.len());
        let mut warnings = Vec::new();

        for day in &plan.days {
            let totals = day.totals();
            let deviation = if target > 0.0 {
                (totals.calories - target) / target
            } else {
                0.0
            };
            if deviation.abs() > self.settings.calorie_tolerance {
                warnings.push(format!(
                    "{} calories deviate {:.1}% from the {:.0} kcal target",
                    day.day,
                    deviation * 100.0,
                    target
                ));
            }
            day_deviations.push(DayDeviation {
                day: day.day.clone(),
                calories: totals.calories,
                deviation,
            });
            sum = sum.add(&totals);
        }

        let count = plan.days.len().max(1) as f64;
        let avg_daily = MacroTotals {
            calories: sum.calories / count,
            protein_g: sum.protein_g / count,
            carbs_g: sum.carbs_g / count,
            fat_g: sum.fat_g / count,
        };
        let macro_ratios = realized_ratios(&avg_daily);

        let ratio_penalty = (macro_ratios.0 - f64::from(split.protein_pct)).abs()
            + (macro_ratios.1 - f64::from(split.carbs_pct)).abs()
            + (macro_ratios.2 - f64::from(split.fat_pct)).abs();
        let calorie_penalty: f64 = day_deviations
            .iter()
            .map(|d| (d.deviation.abs() - self.settings.calorie_tolerance).max(0.0) * 100.0)
            .sum();
        let nutrition_score = (100.0 - ratio_penalty - calorie_penalty).clamp(0.0, 100.0);

        NutritionReport {
            avg_daily,
            macro_ratios,
            nutrition_score,
            day_deviations,
            warnings,
        }
    }
}

fn within(value: f64, band: (f64, f64)) -> bool {
    value >= band.0 && value <= band.1
}

/// Materialize meals, substituting rescaled portions when present
fn build_meals(picks: &[&Candidate; 3], rescaled: Option<&[(f64, MacroTotals)]>) -> [Meal; 3] {
    let meal = |i: usize| {
        let candidate = picks[i];
        let (portion, macros) =
            rescaled.map_or((candidate.portion, candidate.macros), |r| r[i]);
        Meal {
            recipe_id: candidate.recipe_id,
            slot: MealSlot::ALL[i],
            portion,
            macros,
        }
    };
    [meal(0), meal(1), meal(2)]
}

/// Realized macro calorie shares as (protein, carbs, fat) percentages
fn realized_ratios(totals: &MacroTotals) -> (f64, f64, f64) {
    use crate::constants::nutrition::{
        CALORIES_PER_GRAM_CARBS, CALORIES_PER_GRAM_FAT, CALORIES_PER_GRAM_PROTEIN,
    };
    let macro_calories = totals.protein_g * CALORIES_PER_GRAM_PROTEIN
        + totals.carbs_g * CALORIES_PER_GRAM_CARBS
        + totals.fat_g * CALORIES_PER_GRAM_FAT;
    if macro_calories <= 0.0 {
        return (0.0, 0.0, 0.0);
    }
    (
        totals.protein_g * CALORIES_PER_GRAM_PROTEIN / macro_calories * 100.0,
        totals.carbs_g * CALORIES_PER_GRAM_CARBS / macro_calories * 100.0,
        totals.fat_g * CALORIES_PER_GRAM_FAT / macro_calories * 100.0,
    )
}
