// ABOUTME: Exercise catalog with lookup by normalized name and restartable iteration
// ABOUTME: Ships built-in seed data plus JSON file and source-trait population
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use super::ExerciseSource;
use crate::errors::{AppError, AppResult};
use crate::models::{normalize_key, DifficultyTier, ExerciseRecord, MuscleGroup, RepRange};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Append-only repository of exercise records, immutable after load
///
/// Keys are normalized names. Backed by a `BTreeMap` so iteration order is
/// deterministic, which the progression engine relies on for reproducible
/// plans.
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    records: BTreeMap<String, ExerciseRecord>,
}

impl ExerciseCatalog {
    /// Build a catalog from records, validating keys and muscle groups
    ///
    /// # Errors
    ///
    /// Returns an error on an empty record set, a duplicate key, or a record
    /// with no target muscle groups
    pub fn new(records: Vec<ExerciseRecord>) -> AppResult<Self> {
        if records.is_empty() {
            return Err(AppError::config("exercise catalog must not be empty"));
        }
        let mut map = BTreeMap::new();
        for record in records {
            if record.muscle_groups.is_empty() {
                return Err(AppError::invalid_input(format!(
                    "exercise '{}' has no target muscle groups",
                    record.name
                )));
            }
            let key = record.key();
            if map.insert(key.clone(), record).is_some() {
                return Err(AppError::invalid_input(format!(
                    "duplicate exercise key '{key}'"
                )));
            }
        }
        info!(count = map.len(), "Exercise catalog loaded");
        Ok(Self { records: map })
    }

    /// Load from a pluggable source
    ///
    /// # Errors
    ///
    /// Propagates source and validation failures
    pub async fn from_source(source: &dyn ExerciseSource) -> AppResult<Self> {
        Self::new(source.load().await?)
    }

    /// Load from a JSON file containing an array of records
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::config(format!(
                "cannot read exercise catalog file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let records: Vec<ExerciseRecord> = serde_json::from_str(&raw)?;
        Self::new(records)
    }

    /// Look up a record by name; a miss is a reference error, fatal to the
    /// current plan assembly
    ///
    /// # Errors
    ///
    /// Returns `REFERENCE_NOT_FOUND` when the exercise is absent
    pub fn lookup(&self, name: &str) -> AppResult<&ExerciseRecord> {
        self.get(name)
            .ok_or_else(|| AppError::reference_not_found("exercise", normalize_key(name)))
    }

    /// Look up a record by name, returning `None` on a miss
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExerciseRecord> {
        self.records.get(&normalize_key(name))
    }

    /// Iterate all records in deterministic key order; finite and restartable
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Built-in seed catalog
    ///
    /// # Panics
    ///
    /// Never panics; the seed data is statically valid
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_records()).expect("builtin exercise catalog is valid")
    }
}

/// Built-in exercise seed data
#[allow(clippy::too_many_lines)]
fn builtin_records() -> Vec<ExerciseRecord> {
    use DifficultyTier::{Advanced, Beginner, Intermediate};
    use MuscleGroup::{Arms, Back, Chest, Core, Legs, Shoulders};

    let record = |name: &str,
                  groups: &[MuscleGroup],
                  tier: DifficultyTier,
                  range: (u32, u32),
                  safety: &str,
                  form: &str| ExerciseRecord {
        name: name.to_owned(),
        muscle_groups: groups.to_vec(),
        tier,
        rep_range: RepRange::new(range.0, range.1),
        safety_notes: safety.to_owned(),
        form_description: form.to_owned(),
    };

    vec![
        record(
            "Push-up",
            &[Chest, Arms, Core],
            Beginner,
            (8, 15),
            "Keep core engaged; maintain a straight line from head to heels",
            "Start in plank with hands slightly wider than shoulders, lower until the chest nearly touches the ground, then press back up",
        ),
        record(
            "Incline Push-up",
            &[Chest, Shoulders],
            Beginner,
            (10, 15),
            "Choose a stable elevated surface; don't let the hips sag",
            "Hands on a bench or box, body straight, lower the chest to the edge and press away",
        ),
        record(
            "Dumbbell Shoulder Press",
            &[Shoulders, Arms],
            Beginner,
            (8, 12),
            "Avoid arching the lower back; press in a straight line",
            "Seated or standing, dumbbells at shoulder height, press overhead until arms lock out, lower with control",
        ),
        record(
            "Bench Press",
            &[Chest, Arms],
            Intermediate,
            (6, 10),
            "Use a spotter for heavy sets; never bounce the bar off the chest",
            "Lie on a bench, grip slightly wider than shoulders, lower the bar to the chest and press up explosively",
        ),
        record(
            "Overhead Press",
            &[Shoulders, Arms],
            Intermediate,
            (6, 10),
            "Keep the core braced; don't arch excessively",
            "Bar at shoulder level, feet hip-width, press straight overhead and lower under control",
        ),
        record(
            "Triceps Dip",
            &[Arms, Chest],
            Intermediate,
            (6, 12),
            "Keep shoulders down and back; limit depth if the shoulders complain",
            "Support on parallel bars, lower until elbows reach ninety degrees, press back to lockout",
        ),
        record(
            "Handstand Push-up",
            &[Shoulders, Arms],
            Advanced,
            (3, 8),
            "Master wall-supported holds first; bail safely by tucking",
            "Kick up against a wall, lower the head to the floor under control, press back to a full handstand",
        ),
        record(
            "Bent-over Row",
            &[Back, Arms],
            Beginner,
            (8, 12),
            "Keep the spine neutral; hinge from the hips, not the waist",
            "Hinge forward holding the weight, pull it to the lower ribs squeezing the shoulder blades, lower slowly",
        ),
        record(
            "Band Pull-apart",
            &[Back, Shoulders],
            Beginner,
            (12, 20),
            "Use a light band first; keep the ribs down",
            "Hold a band at shoulder height with straight arms and pull it apart until it touches the chest",
        ),
        record(
            "Pull-up",
            &[Back, Arms],
            Intermediate,
            (5, 12),
            "No swinging or kipping; use assistance bands if needed",
            "Hang from a bar with an overhand grip and pull until the chin clears the bar, lower to a dead hang",
        ),
        record(
            "Deadlift",
            &[Back, Legs],
            Advanced,
            (3, 6),
            "Master the hip hinge first; keep the bar close and the spine neutral",
            "Stand with the bar over mid-foot, hinge and grip, drive through the heels to stand tall",
        ),
        record(
            "Biceps Curl",
            &[Arms],
            Beginner,
            (10, 15),
            "No swinging; keep elbows pinned to the sides",
            "Curl the weight from full extension to full flexion, lower with a slow eccentric",
        ),
        record(
            "Bodyweight Squat",
            &[Legs, Core],
            Beginner,
            (10, 15),
            "Knees track over toes; full depth only with good ankle mobility",
            "Feet shoulder-width, sit the hips back and down until thighs are parallel, drive up through the heels",
        ),
        record(
            "Lunge",
            &[Legs],
            Beginner,
            (8, 12),
            "Keep the front knee over the ankle; step with control",
            "Step forward and lower the back knee toward the floor, push through the front heel to return",
        ),
        record(
            "Goblet Squat",
            &[Legs, Core],
            Intermediate,
            (8, 12),
            "Keep the chest up; the elbows track inside the knees",
            "Hold a weight at the chest, squat to full depth keeping the torso upright, stand tall",
        ),
        record(
            "Bulgarian Split Squat",
            &[Legs],
            Advanced,
            (6, 10),
            "Start unloaded to find balance; keep the hips square",
            "Rear foot elevated on a bench, lower straight down until the front thigh is parallel, drive up",
        ),
        record(
            "Plank Shoulder Tap",
            &[Core, Shoulders],
            Beginner,
            (10, 20),
            "Keep hips level; widen the feet to reduce rotation",
            "From a high plank, tap the opposite shoulder with each hand while resisting hip sway",
        ),
        record(
            "Crunch",
            &[Core],
            Beginner,
            (12, 20),
            "Don't pull on the neck; keep the lower back on the floor",
            "Lying with knees bent, curl the shoulder blades off the floor and lower slowly",
        ),
        record(
            "Russian Twist",
            &[Core],
            Beginner,
            (12, 20),
            "Rotate from the trunk, not the arms; keep the spine long",
            "Seated with heels light on the floor, lean back slightly and rotate side to side",
        ),
        record(
            "Hanging Leg Raise",
            &[Core, Arms],
            Intermediate,
            (6, 12),
            "Avoid swinging; bend the knees to scale down",
            "Hang from a bar and raise the legs to horizontal with a posterior pelvic tilt, lower slowly",
        ),
    ]
}
