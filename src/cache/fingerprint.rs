// ABOUTME: Canonical request fingerprinting for plan cache keys
// ABOUTME: Order-insensitive over preferences; calorie targets are bucketed before hashing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use crate::constants::cache::CALORIE_FINGERPRINT_STEP;
use crate::models::{DietTag, DifficultyTier, Goal};
use sha2::{Digest, Sha256};

/// Stable cache key derived from the semantic content of a plan request
///
/// Two requests that differ only in preference order, or whose calorie
/// targets fall in the same bucket, produce the same fingerprint and share a
/// cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanFingerprint(String);

impl PlanFingerprint {
    /// Fingerprint a meal plan request
    #[must_use]
    pub fn for_meal_request(goal: Goal, calorie_target: u32, preferences: &[DietTag]) -> Self {
        let mut labels: Vec<&str> = preferences.iter().map(DietTag::label).collect();
        labels.sort_unstable();
        Self::digest(&[
            "meal",
            goal.label(),
            &bucket_calories(calorie_target).to_string(),
            &labels.join(","),
        ])
    }

    /// Fingerprint a workout plan request
    #[must_use]
    pub fn for_workout_request(goal: Goal, level: DifficultyTier, cycle: u32) -> Self {
        Self::digest(&["workout", goal.label(), level.label(), &cycle.to_string()])
    }

    fn digest(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_bytes());
            hasher.update(b"|");
        }
        Self(hex::encode(hasher.finalize()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlanFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Round a calorie target to the nearest bucket boundary
fn bucket_calories(target: u32) -> u32 {
    let step = CALORIE_FINGERPRINT_STEP;
    ((target + step / 2) / step) * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_order_does_not_matter() {
        let a = PlanFingerprint::for_meal_request(
            Goal::Maintenance,
            2000,
            &[DietTag::Vegetarian, DietTag::GlutenFree],
        );
        let b = PlanFingerprint::for_meal_request(
            Goal::Maintenance,
            2000,
            &[DietTag::GlutenFree, DietTag::Vegetarian],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_nearby_calorie_targets_share_a_bucket() {
        let a = PlanFingerprint::for_meal_request(Goal::Maintenance, 1990, &[]);
        let b = PlanFingerprint::for_meal_request(Goal::Maintenance, 2010, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distant_calorie_targets_differ() {
        let a = PlanFingerprint::for_meal_request(Goal::Maintenance, 2000, &[]);
        let b = PlanFingerprint::for_meal_request(Goal::Maintenance, 2400, &[]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_goal_changes_fingerprint() {
        let a = PlanFingerprint::for_meal_request(Goal::Maintenance, 2000, &[]);
        let b = PlanFingerprint::for_meal_request(Goal::WeightLoss, 2000, &[]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_meal_and_workout_namespaces_are_disjoint() {
        let meal = PlanFingerprint::for_meal_request(Goal::Maintenance, 2000, &[]);
        let workout =
            PlanFingerprint::for_workout_request(Goal::Maintenance, DifficultyTier::Beginner, 0);
        assert_ne!(meal, workout);
    }
}
