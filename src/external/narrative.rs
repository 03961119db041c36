// ABOUTME: Narrative service contract for phrasing plan summaries, with prompt builders
// ABOUTME: The default template implementation is deterministic and needs no network
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use crate::errors::AppResult;
use crate::models::{MealPlan, WorkoutPlan};

/// Turns a prompt into narrative text
///
/// Narrative only phrases summaries around finished plans; plan structure and
/// numbers are already final before this service is consulted, so a failing
/// or absent narrative never invalidates a plan.
#[async_trait::async_trait]
pub trait NarrativeService: Send + Sync {
    /// Produce narrative text for a prompt
    ///
    /// # Errors
    ///
    /// Implementations backed by remote services may fail; the template
    /// implementation never does
    async fn narrate(&self, prompt: &str) -> AppResult<String>;
}

/// Deterministic pass-through narrative: the prompt builders already produce
/// readable text, so this implementation just frames it
pub struct TemplateNarrative;

#[async_trait::async_trait]
impl NarrativeService for TemplateNarrative {
    async fn narrate(&self, prompt: &str) -> AppResult<String> {
        Ok(format!("Here's your plan summary. {prompt}"))
    }
}

/// Build a narration prompt for a workout plan
#[must_use]
pub fn workout_prompt(plan: &WorkoutPlan) -> String {
    let training_days = plan.days.iter().filter(|d| !d.is_rest()).count();
    let rest_days = plan.days.len() - training_days;
    let weekly_minutes: u32 = plan.days.iter().map(|d| d.total_duration_minutes).sum();
    format!(
        "A {} {} plan with {training_days} training days and {rest_days} rest days, \
         about {weekly_minutes} minutes of training for the week.",
        plan.level.label().replace('_', " "),
        plan.goal.label().replace('_', " "),
    )
}

/// Build a narration prompt for a meal plan
#[must_use]
pub fn meal_prompt(plan: &MealPlan) -> String {
    let avg = plan.average_daily_calories();
    let prefs = if plan.preferences.is_empty() {
        "no dietary restrictions".to_owned()
    } else {
        plan.preferences
            .iter()
            .map(|p| p.label().replace('_', " "))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "A {} meal plan averaging {avg:.0} kcal per day against a {} kcal target, with {prefs}.",
        plan.goal.label().replace('_', " "),
        plan.calorie_target,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExerciseCatalog;
    use crate::config::ProgressionSettings;
    use crate::intelligence::ProgressionEngine;
    use crate::models::{DifficultyTier, Goal};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_template_narrative_is_deterministic() {
        let service = TemplateNarrative;
        let a = service.narrate("prompt").await.unwrap();
        let b = service.narrate("prompt").await.unwrap();
        assert_eq!(a, b);
        assert!(a.contains("prompt"));
    }

    #[test]
    fn test_workout_prompt_counts_days() {
        let plan = ProgressionEngine::new(
            Arc::new(ExerciseCatalog::builtin()),
            ProgressionSettings::default(),
        )
        .generate_plan(Goal::Maintenance, DifficultyTier::Beginner, None)
        .unwrap();
        let prompt = workout_prompt(&plan);
        assert!(prompt.contains("5 training days"));
        assert!(prompt.contains("2 rest days"));
    }
}
