// ABOUTME: Integration tests for exercise and recipe catalog loading and lookup
// ABOUTME: Covers JSON file population, source traits, and reference-miss errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitcoach_core::catalog::{ExerciseCatalog, ExerciseSource, RecipeCatalog};
use fitcoach_core::errors::{AppResult, ErrorCode};
use fitcoach_core::models::{DietTag, DifficultyTier, ExerciseRecord, MuscleGroup, RepRange};
use std::io::Write;

fn sample_exercise(name: &str) -> ExerciseRecord {
    ExerciseRecord {
        name: name.to_owned(),
        muscle_groups: vec![MuscleGroup::Legs],
        tier: DifficultyTier::Beginner,
        rep_range: RepRange::new(8, 12),
        safety_notes: "Keep the spine neutral".to_owned(),
        form_description: "Squat down and stand up".to_owned(),
    }
}

#[test]
fn test_exercise_catalog_loads_from_json_file() {
    let records = vec![sample_exercise("Box Squat"), sample_exercise("Step-up")];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&records).unwrap()).unwrap();

    let catalog = ExerciseCatalog::from_json_file(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.lookup("box squat").unwrap().name, "Box Squat");
}

#[test]
fn test_malformed_json_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(ExerciseCatalog::from_json_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_config_error() {
    let err = ExerciseCatalog::from_json_file("/nonexistent/exercises.json").unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
}

struct StaticExercises(Vec<ExerciseRecord>);

#[async_trait::async_trait]
impl ExerciseSource for StaticExercises {
    async fn load(&self) -> AppResult<Vec<ExerciseRecord>> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_exercise_catalog_loads_from_source() {
    let source = StaticExercises(vec![sample_exercise("Box Squat")]);
    let catalog = ExerciseCatalog::from_source(&source).await.unwrap();
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_builtin_catalogs_are_nonempty() {
    assert!(!ExerciseCatalog::builtin().is_empty());
    assert!(!RecipeCatalog::builtin().is_empty());
}

#[test]
fn test_recipe_lookup_miss_reports_the_key() {
    let catalog = RecipeCatalog::builtin();
    let err = catalog.lookup(424_242).unwrap_err();
    assert_eq!(err.code, ErrorCode::ReferenceNotFound);
    assert!(err.message.contains("424242"));
}

#[test]
fn test_recipe_catalog_iteration_is_ordered_by_id() {
    let catalog = RecipeCatalog::builtin();
    let ids: Vec<u32> = catalog.iter().map(|r| r.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn test_recipe_compatibility_is_conjunctive() {
    let catalog = RecipeCatalog::builtin();
    let loose = catalog.compatible_with(&[DietTag::Vegetarian]).count();
    let strict = catalog
        .compatible_with(&[DietTag::Vegetarian, DietTag::GlutenFree])
        .count();
    assert!(strict <= loose);
    assert!(strict > 0);
}
