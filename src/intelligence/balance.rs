// ABOUTME: Weekly balance validation: muscle-group coverage and consecutive-day conflicts
// ABOUTME: Produces an ephemeral report; imbalance is advisory and never fails generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use crate::catalog::ExerciseCatalog;
use crate::errors::AppResult;
use crate::models::{BalanceReport, ConsecutiveConflict, MuscleGroup, WorkoutPlan};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// Exercises targeting a day's primary group beyond this count make the day
/// high-intensity for conflict purposes
const HIGH_INTENSITY_THRESHOLD: usize = 3;

/// Minimum weekly touches for each major muscle group
const MIN_WEEKLY_TOUCHES: usize = 2;

/// Validates weekly muscle-group balance of a workout plan
///
/// Two checks: every major group must be touched on at least two non-rest
/// days, and adjacent non-rest days must not both hammer the same primary
/// group at high intensity.
pub struct BalanceValidator {
    catalog: Arc<ExerciseCatalog>,
}

impl BalanceValidator {
    #[must_use]
    pub fn new(catalog: Arc<ExerciseCatalog>) -> Self {
        Self { catalog }
    }

    /// Validate a plan and report imbalances
    ///
    /// # Errors
    ///
    /// Returns `REFERENCE_NOT_FOUND` when the plan references an exercise
    /// missing from the catalog; a dangling reference makes the whole report
    /// meaningless
    pub fn validate(&self, plan: &WorkoutPlan) -> AppResult<BalanceReport> {
        let mut touch_days: BTreeMap<MuscleGroup, usize> = BTreeMap::new();
        let mut primary_hits: Vec<Option<(MuscleGroup, usize)>> = Vec::with_capacity(plan.days.len());

        for day in &plan.days {
            if day.is_rest() {
                primary_hits.push(None);
                continue;
            }

            // A group counts once per day no matter how many exercises hit it
            let mut touched: BTreeSet<MuscleGroup> = BTreeSet::new();
            let mut primary_count = 0usize;
            let primary = day.focus.primary_group();

            for assignment in &day.assignments {
                let record = self.catalog.lookup(&assignment.exercise)?;
                touched.extend(record.muscle_groups.iter().copied());
                if let Some(group) = primary {
                    if record.muscle_groups.contains(&group) {
                        primary_count += 1;
                    }
                }
            }

            for group in touched {
                *touch_days.entry(group).or_insert(0) += 1;
            }
            primary_hits.push(primary.map(|g| (g, primary_count)));
        }

        let under_targeted: Vec<MuscleGroup> = MuscleGroup::MAJOR
            .into_iter()
            .filter(|g| touch_days.get(g).copied().unwrap_or(0) < MIN_WEEKLY_TOUCHES)
            .collect();

        let conflicts = find_conflicts(plan, &primary_hits);

        let balanced = under_targeted.is_empty() && conflicts.is_empty();
        debug!(
            balanced = %balanced,
            under_targeted = under_targeted.len(),
            conflicts = conflicts.len(),
            "Balance validation complete"
        );

        Ok(BalanceReport {
            balanced,
            under_targeted,
            conflicts,
        })
    }
}

/// Adjacent non-rest days sharing a primary group, both at high intensity
fn find_conflicts(
    plan: &WorkoutPlan,
    primary_hits: &[Option<(MuscleGroup, usize)>],
) -> Vec<ConsecutiveConflict> {
    let mut conflicts = Vec::new();
    for i in 1..primary_hits.len() {
        if let (Some((prev_group, prev_count)), Some((group, count))) =
            (primary_hits[i - 1], primary_hits[i])
        {
            if prev_group == group
                && prev_count > HIGH_INTENSITY_THRESHOLD
                && count > HIGH_INTENSITY_THRESHOLD
            {
                conflicts.push(ConsecutiveConflict {
                    first_day: plan.days[i - 1].day.clone(),
                    second_day: plan.days[i].day.clone(),
                    group,
                });
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgressionSettings;
    use crate::intelligence::ProgressionEngine;
    use crate::models::{
        DailyWorkout, DifficultyTier, ExerciseAssignment, FocusArea, Goal,
    };

    fn validator() -> BalanceValidator {
        BalanceValidator::new(Arc::new(ExerciseCatalog::builtin()))
    }

    fn generated_plan(goal: Goal) -> WorkoutPlan {
        ProgressionEngine::new(
            Arc::new(ExerciseCatalog::builtin()),
            ProgressionSettings::default(),
        )
        .generate_plan(goal, DifficultyTier::Intermediate, None)
        .unwrap()
    }

    fn assignment(exercise: &str) -> ExerciseAssignment {
        ExerciseAssignment {
            exercise: exercise.into(),
            sets: 3,
            reps: 10,
            duration_minutes: 9,
            increase_resistance: false,
            notes: None,
        }
    }

    fn day(label: &str, focus: FocusArea, exercises: &[&str]) -> DailyWorkout {
        DailyWorkout {
            day: label.into(),
            focus,
            assignments: exercises.iter().map(|e| assignment(e)).collect(),
            total_duration_minutes: 0,
        }
    }

    #[test]
    fn test_generated_plans_have_no_conflicts() {
        let validator = validator();
        for goal in [
            Goal::WeightLoss,
            Goal::MuscleGain,
            Goal::Maintenance,
            Goal::Endurance,
        ] {
            let report = validator.validate(&generated_plan(goal)).unwrap();
            assert!(report.conflicts.is_empty(), "{goal:?} plan has conflicts");
        }
    }

    #[test]
    fn test_empty_week_under_targets_every_major_group() {
        let plan = WorkoutPlan {
            goal: Goal::Maintenance,
            level: DifficultyTier::Beginner,
            days: (0..7)
                .map(|i| day(&format!("Day {i}"), FocusArea::Rest, &[]))
                .collect(),
        };
        let report = validator().validate(&plan).unwrap();
        assert!(!report.balanced);
        assert_eq!(report.under_targeted.len(), MuscleGroup::MAJOR.len());
    }

    #[test]
    fn test_consecutive_high_intensity_legs_days_conflict() {
        let legs = ["Bodyweight Squat", "Lunge", "Goblet Squat", "Bulgarian Split Squat"];
        let plan = WorkoutPlan {
            goal: Goal::Maintenance,
            level: DifficultyTier::Advanced,
            days: vec![
                day("Monday", FocusArea::Legs, &legs),
                day("Tuesday", FocusArea::Legs, &legs),
                day("Wednesday", FocusArea::Rest, &[]),
                day("Thursday", FocusArea::Rest, &[]),
                day("Friday", FocusArea::Rest, &[]),
                day("Saturday", FocusArea::Rest, &[]),
                day("Sunday", FocusArea::Rest, &[]),
            ],
        };
        let report = validator().validate(&plan).unwrap();
        assert_eq!(report.conflicts.len(), 1);
        let conflict = &report.conflicts[0];
        assert_eq!(conflict.first_day, "Monday");
        assert_eq!(conflict.second_day, "Tuesday");
        assert_eq!(conflict.group, MuscleGroup::Legs);
        assert!(!report.balanced);
    }

    #[test]
    fn test_rest_day_breaks_adjacency() {
        let legs = ["Bodyweight Squat", "Lunge", "Goblet Squat", "Bulgarian Split Squat"];
        let plan = WorkoutPlan {
            goal: Goal::Maintenance,
            level: DifficultyTier::Advanced,
            days: vec![
                day("Monday", FocusArea::Legs, &legs),
                day("Tuesday", FocusArea::Rest, &[]),
                day("Wednesday", FocusArea::Legs, &legs),
                day("Thursday", FocusArea::Rest, &[]),
                day("Friday", FocusArea::Rest, &[]),
                day("Saturday", FocusArea::Rest, &[]),
                day("Sunday", FocusArea::Rest, &[]),
            ],
        };
        let report = validator().validate(&plan).unwrap();
        assert!(report.conflicts.is_empty());
    }

    #[test]
    fn test_low_intensity_adjacent_days_do_not_conflict() {
        let light = ["Bodyweight Squat", "Lunge"];
        let plan = WorkoutPlan {
            goal: Goal::Maintenance,
            level: DifficultyTier::Beginner,
            days: vec![
                day("Monday", FocusArea::Legs, &light),
                day("Tuesday", FocusArea::Legs, &light),
                day("Wednesday", FocusArea::Rest, &[]),
                day("Thursday", FocusArea::Rest, &[]),
                day("Friday", FocusArea::Rest, &[]),
                day("Saturday", FocusArea::Rest, &[]),
                day("Sunday", FocusArea::Rest, &[]),
            ],
        };
        let report = validator().validate(&plan).unwrap();
        assert!(report.conflicts.is_empty());
    }

    #[test]
    fn test_dangling_exercise_reference_is_fatal() {
        let plan = WorkoutPlan {
            goal: Goal::Maintenance,
            level: DifficultyTier::Beginner,
            days: vec![day("Monday", FocusArea::Legs, &["zercher carry"])],
        };
        let err = validator().validate(&plan).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ReferenceNotFound);
    }
}
