// ABOUTME: Integration tests for workout plan generation and progressive overload
// ABOUTME: Covers determinism, the progression contract, and weekly plan structure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitcoach_core::catalog::ExerciseCatalog;
use fitcoach_core::config::ProgressionSettings;
use fitcoach_core::intelligence::ProgressionEngine;
use fitcoach_core::models::{DifficultyTier, Goal, PreviousPlan, WorkoutPlan};
use std::sync::Arc;

fn engine() -> ProgressionEngine {
    ProgressionEngine::new(
        Arc::new(ExerciseCatalog::builtin()),
        ProgressionSettings::default(),
    )
}

fn generate(goal: Goal, level: DifficultyTier) -> WorkoutPlan {
    engine().generate_plan(goal, level, None).unwrap()
}

#[test]
fn test_identical_inputs_produce_byte_identical_plans() {
    let first = generate(Goal::MuscleGain, DifficultyTier::Intermediate);
    let second = generate(Goal::MuscleGain, DifficultyTier::Intermediate);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn test_weekly_structure_for_every_goal_and_level() {
    for goal in [
        Goal::WeightLoss,
        Goal::MuscleGain,
        Goal::Maintenance,
        Goal::Endurance,
    ] {
        for level in [
            DifficultyTier::Beginner,
            DifficultyTier::Intermediate,
            DifficultyTier::Advanced,
        ] {
            let plan = generate(goal, level);
            assert_eq!(plan.days.len(), 7, "{goal:?}/{level:?}");
            assert!(plan.day_labels_unique());
            assert!(
                plan.days.iter().any(fitcoach_core::models::DailyWorkout::is_rest),
                "{goal:?}/{level:?} has no rest day"
            );
        }
    }
}

#[test]
fn test_non_rest_days_carry_assignments_and_warmup() {
    let plan = generate(Goal::Maintenance, DifficultyTier::Advanced);
    for day in plan.days.iter().filter(|d| !d.is_rest()) {
        assert!(!day.assignments.is_empty(), "{} is empty", day.day);
        assert!(day.total_duration_minutes > day.assignments_duration());
        for assignment in &day.assignments {
            assert!(assignment.sets >= 1);
            assert!(assignment.reps >= 1);
            assert!(assignment.duration_minutes >= 1);
        }
    }
}

#[test]
fn test_full_progression_arc_reps_then_sets_then_resistance() {
    let eng = engine();
    let catalog = ExerciseCatalog::builtin();
    let mut previous: Option<PreviousPlan> = None;

    // Run enough completed cycles to saturate every assignment
    for _ in 0..60 {
        let plan = eng
            .generate_plan(Goal::Maintenance, DifficultyTier::Beginner, previous.as_ref())
            .unwrap();
        previous = Some(PreviousPlan {
            plan,
            completed: true,
        });
    }

    let last = previous.unwrap().plan;
    for day in last.days.iter().filter(|d| !d.is_rest()) {
        for assignment in &day.assignments {
            let range = catalog.lookup(&assignment.exercise).unwrap().rep_range;
            assert!(range.contains(assignment.reps));
            assert!(assignment.sets <= 5);
            // After 60 cycles everything hits the volume ceiling
            assert_eq!(assignment.sets, 5);
            assert_eq!(assignment.reps, range.max);
            assert!(assignment.increase_resistance);
        }
    }
}

#[test]
fn test_progression_never_exceeds_rep_range_or_set_cap() {
    let eng = engine();
    let catalog = ExerciseCatalog::builtin();
    let mut previous: Option<PreviousPlan> = None;

    for _ in 0..10 {
        let plan = eng
            .generate_plan(Goal::MuscleGain, DifficultyTier::Advanced, previous.as_ref())
            .unwrap();
        for day in plan.days.iter().filter(|d| !d.is_rest()) {
            for assignment in &day.assignments {
                let range = catalog.lookup(&assignment.exercise).unwrap().rep_range;
                assert!(
                    range.contains(assignment.reps),
                    "{} reps {} outside {:?}",
                    assignment.exercise,
                    assignment.reps,
                    range
                );
                assert!(assignment.sets <= 5);
            }
        }
        previous = Some(PreviousPlan {
            plan,
            completed: true,
        });
    }
}

#[test]
fn test_exercises_per_day_honors_settings() {
    let settings = ProgressionSettings {
        exercises_per_day: 2,
        ..ProgressionSettings::default()
    };
    let eng = ProgressionEngine::new(Arc::new(ExerciseCatalog::builtin()), settings);
    let plan = eng
        .generate_plan(Goal::Maintenance, DifficultyTier::Advanced, None)
        .unwrap();
    for day in plan.days.iter().filter(|d| !d.is_rest()) {
        assert_eq!(day.assignments.len(), 2);
    }
}
