// ABOUTME: Workout plan assembly with deterministic focus rotation and progressive overload
// ABOUTME: Scales volume against a prior completed cycle: reps first, then sets, then load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use crate::catalog::ExerciseCatalog;
use crate::config::ProgressionSettings;
use crate::constants::progression::{DAY_LABELS, WARMUP_MINUTES};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    DailyWorkout, DifficultyTier, ExerciseAssignment, ExerciseRecord, FocusArea, Goal,
    PreviousPlan, WorkoutPlan,
};
use std::sync::Arc;
use std::time::Instant;

/// Assembles 7-day workout plans from the exercise catalog
///
/// Generation is fully deterministic: the same goal, level, and history always
/// produce an identical plan. Selection order comes from the catalog's sorted
/// iteration, never from randomness or wall-clock time.
pub struct ProgressionEngine {
    catalog: Arc<ExerciseCatalog>,
    settings: ProgressionSettings,
}

impl ProgressionEngine {
    #[must_use]
    pub fn new(catalog: Arc<ExerciseCatalog>, settings: ProgressionSettings) -> Self {
        Self { catalog, settings }
    }

    /// Generate a weekly plan for a goal and fitness level
    ///
    /// When `previous` holds a completed cycle, each surviving exercise is
    /// progressed one step: add a rep until the top of its range, then add a
    /// set up to the cap, then flag a resistance increase.
    ///
    /// # Errors
    ///
    /// Returns `INSUFFICIENT_CATALOG` when a scheduled focus has no exercise
    /// at or below the requested tier
    pub fn generate_plan(
        &self,
        goal: Goal,
        level: DifficultyTier,
        previous: Option<&PreviousPlan>,
    ) -> AppResult<WorkoutPlan> {
        let started = Instant::now();
        let rotation = focus_rotation(goal);

        let mut days = Vec::with_capacity(DAY_LABELS.len());
        for (label, focus) in DAY_LABELS.iter().zip(rotation) {
            days.push(self.build_day(label, focus, level, previous)?);
        }

        let plan = WorkoutPlan { goal, level, days };
        AppLogger::log_plan_generation(
            goal.label(),
            level.label(),
            plan.days.len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(plan)
    }

    fn build_day(
        &self,
        label: &str,
        focus: FocusArea,
        level: DifficultyTier,
        previous: Option<&PreviousPlan>,
    ) -> AppResult<DailyWorkout> {
        if focus.is_rest() {
            return Ok(DailyWorkout {
                day: label.to_owned(),
                focus,
                assignments: Vec::new(),
                total_duration_minutes: 0,
            });
        }

        let selected: Vec<&ExerciseRecord> = self
            .catalog
            .iter()
            .filter(|r| r.tier <= level && r.targets_any(focus.target_groups()))
            .take(self.settings.exercises_per_day)
            .collect();

        if selected.is_empty() {
            return Err(AppError::insufficient_catalog(format!(
                "no {} exercise at or below the {} tier",
                focus_label(focus),
                level.label()
            )));
        }

        let assignments: Vec<ExerciseAssignment> = selected
            .into_iter()
            .map(|record| self.assign(record, previous))
            .collect();

        let total_duration_minutes =
            assignments.iter().map(|a| a.duration_minutes).sum::<u32>() + WARMUP_MINUTES;

        Ok(DailyWorkout {
            day: label.to_owned(),
            focus,
            assignments,
            total_duration_minutes,
        })
    }

    /// Derive one assignment, progressing from history when available
    fn assign(&self, record: &ExerciseRecord, previous: Option<&PreviousPlan>) -> ExerciseAssignment {
        let key = record.key();
        let range = record.rep_range;

        let prior = previous
            .filter(|p| p.completed)
            .and_then(|p| p.assignment_for(&key));

        let (sets, reps, increase_resistance) = match prior {
            None => (self.settings.base_sets, range.min, false),
            Some(prev) => {
                if prev.reps < range.max {
                    (prev.sets.min(self.settings.set_cap), prev.reps + 1, false)
                } else if prev.sets < self.settings.set_cap {
                    (prev.sets + 1, prev.reps, false)
                } else {
                    (prev.sets, prev.reps, true)
                }
            }
        };

        let notes = increase_resistance.then(|| {
            format!(
                "Volume for {} is maxed at {sets}x{reps}; increase the resistance and keep sets and reps",
                record.name
            )
        });

        ExerciseAssignment {
            exercise: key,
            sets,
            reps,
            duration_minutes: estimated_duration(sets),
            increase_resistance,
            notes,
        }
    }
}

/// Weekly focus rotation per goal; no two consecutive non-rest days share a
/// focus, so generated plans pass conflict validation by construction
#[must_use]
pub const fn focus_rotation(goal: Goal) -> [FocusArea; 7] {
    use FocusArea::{Core, FullBody, Legs, Pull, Push, Rest};
    match goal {
        Goal::MuscleGain | Goal::Maintenance => [Push, Pull, Legs, Rest, FullBody, Core, Rest],
        Goal::WeightLoss => [FullBody, Core, Legs, Rest, FullBody, Core, Rest],
        Goal::Endurance => [Legs, Core, FullBody, Rest, Legs, Core, Rest],
    }
}

/// Minutes estimated for an assignment: two per set plus setup and rest
const fn estimated_duration(sets: u32) -> u32 {
    sets * 2 + 3
}

const fn focus_label(focus: FocusArea) -> &'static str {
    match focus {
        FocusArea::Push => "push",
        FocusArea::Pull => "pull",
        FocusArea::Legs => "legs",
        FocusArea::FullBody => "full-body",
        FocusArea::Core => "core",
        FocusArea::Rest => "rest",
    }
}
