// ABOUTME: Recipe catalog with lookup by id and restartable iteration over macro data
// ABOUTME: Ships built-in seed data plus JSON file and source-trait population
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use super::RecipeSource;
use crate::errors::{AppError, AppResult};
use crate::models::{DietTag, RecipeRecord};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Append-only repository of recipe records, immutable after load
///
/// Backed by a `BTreeMap` keyed by recipe id so iteration is ordered by id,
/// which the meal optimizer relies on for deterministic tie-breaking.
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    records: BTreeMap<u32, RecipeRecord>,
}

impl RecipeCatalog {
    /// Build a catalog from records, validating ids and macro values
    ///
    /// # Errors
    ///
    /// Returns an error on an empty record set, a duplicate id, or negative
    /// macro values
    pub fn new(records: Vec<RecipeRecord>) -> AppResult<Self> {
        if records.is_empty() {
            return Err(AppError::config("recipe catalog must not be empty"));
        }
        let mut map = BTreeMap::new();
        for record in records {
            if record.calories <= 0.0
                || record.protein_g < 0.0
                || record.carbs_g < 0.0
                || record.fat_g < 0.0
            {
                return Err(AppError::invalid_input(format!(
                    "recipe '{}' has invalid macro values",
                    record.title
                )));
            }
            let id = record.id;
            if map.insert(id, record).is_some() {
                return Err(AppError::invalid_input(format!("duplicate recipe id {id}")));
            }
        }
        info!(count = map.len(), "Recipe catalog loaded");
        Ok(Self { records: map })
    }

    /// Load from a pluggable source (static file or remote fetch)
    ///
    /// # Errors
    ///
    /// Propagates source and validation failures
    pub async fn from_source(source: &dyn RecipeSource) -> AppResult<Self> {
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
                "cannot read recipe catalog file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let records: Vec<RecipeRecord> = serde_json::from_str(&raw)?;
        Self::new(records)
    }

    /// Look up a record by id; a miss is a reference error
    ///
    /// # Errors
    ///
    /// Returns `REFERENCE_NOT_FOUND` when the recipe is absent
    pub fn lookup(&self, id: u32) -> AppResult<&RecipeRecord> {
        self.get(id)
            .ok_or_else(|| AppError::reference_not_found("recipe", id.to_string()))
    }

    /// Look up a record by id, returning `None` on a miss
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&RecipeRecord> {
        self.records.get(&id)
    }

    /// Iterate all records ordered by id; finite and restartable
    pub fn iter(&self) -> impl Iterator<Item = &RecipeRecord> {
        self.records.values()
    }

    /// Iterate records carrying every requested tag, ordered by id
    pub fn compatible_with<'a>(
        &'a self,
        preferences: &'a [DietTag],
    ) -> impl Iterator<Item = &'a RecipeRecord> {
        self.iter().filter(|r| r.is_compatible_with(preferences))
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
        Self::new(builtin_records()).expect("builtin recipe catalog is valid")
    }
}

/// Built-in recipe seed data
#[allow(clippy::too_many_lines)]
fn builtin_records() -> Vec<RecipeRecord> {
    use DietTag::{
        DairyFree, GlutenFree, HighProtein, Keto, Mediterranean, Vegan, Vegetarian,
    };

    let record = |id: u32,
                  title: &str,
                  ingredients: &[&str],
                  calories: f64,
                  protein_g: f64,
                  carbs_g: f64,
                  fat_g: f64,
                  prep_time_minutes: u32,
                  tags: &[DietTag]| RecipeRecord {
        id,
        title: title.to_owned(),
        ingredients: ingredients.iter().map(|s| (*s).to_owned()).collect(),
        calories,
        protein_g,
        carbs_g,
        fat_g,
        prep_time_minutes,
        tags: tags.to_vec(),
    };

    vec![
        record(
            1001,
            "Overnight Oats with Berries",
            &["rolled oats", "milk", "mixed berries", "honey"],
            320.0, 12.0, 58.0, 6.0, 10,
            &[Vegetarian],
        ),
        record(
            1002,
            "Grilled Chicken Quinoa Bowl",
            &["chicken breast", "quinoa", "mixed vegetables", "olive oil"],
            450.0, 35.0, 40.0, 15.0, 25,
            &[GlutenFree, HighProtein, DairyFree],
        ),
        record(
            1003,
            "Baked Salmon with Sweet Potato",
            &["salmon fillet", "sweet potato", "asparagus", "lemon"],
            520.0, 40.0, 35.0, 22.0, 30,
            &[GlutenFree, HighProtein, DairyFree],
        ),
        record(
            1004,
            "Tofu Vegetable Stir Fry",
            &["firm tofu", "mixed vegetables", "brown rice", "soy sauce"],
            380.0, 18.0, 45.0, 12.0, 20,
            &[Vegetarian, Vegan, DairyFree],
        ),
        record(
            1005,
            "Greek Yogurt Parfait",
            &["greek yogurt", "granola", "honey", "blueberries"],
            300.0, 20.0, 40.0, 7.0, 5,
            &[Vegetarian, GlutenFree, HighProtein],
        ),
        record(
            1006,
            "Veggie Omelette",
            &["eggs", "spinach", "bell pepper", "cheddar"],
            350.0, 22.0, 8.0, 26.0, 15,
            &[Vegetarian, GlutenFree, Keto],
        ),
        record(
            1007,
            "Lentil Soup with Crusty Bread",
            &["red lentils", "carrot", "onion", "sourdough bread"],
            430.0, 22.0, 62.0, 9.0, 35,
            &[Vegetarian, Vegan, DairyFree],
        ),
        record(
            1008,
            "Chickpea Coconut Curry",
            &["chickpeas", "coconut milk", "tomato", "basmati rice"],
            540.0, 17.0, 64.0, 24.0, 30,
            &[Vegetarian, Vegan, GlutenFree, DairyFree],
        ),
        record(
            1009,
            "Mediterranean Quinoa Salad",
            &["quinoa", "cucumber", "feta", "olives", "olive oil"],
            460.0, 15.0, 55.0, 19.0, 20,
            &[Vegetarian, GlutenFree, Mediterranean],
        ),
        record(
            1010,
            "Pasta Primavera",
            &["penne", "zucchini", "cherry tomatoes", "parmesan"],
            600.0, 20.0, 90.0, 16.0, 25,
            &[Vegetarian],
        ),
        record(
            1011,
            "Black Bean Burrito",
            &["black beans", "tortilla", "rice", "salsa", "cheese"],
            560.0, 21.0, 78.0, 17.0, 15,
            &[Vegetarian],
        ),
        record(
            1012,
            "Turkey Chili",
            &["ground turkey", "kidney beans", "tomato", "chili spices"],
            480.0, 38.0, 42.0, 16.0, 40,
            &[GlutenFree, HighProtein, DairyFree],
        ),
        record(
            1013,
            "Peanut Butter Banana Smoothie",
            &["banana", "peanut butter", "milk", "oats"],
            420.0, 18.0, 52.0, 16.0, 5,
            &[Vegetarian, GlutenFree],
        ),
        record(
            1014,
            "Paneer Tikka Wrap",
            &["paneer", "whole wheat wrap", "yogurt marinade", "onion"],
            520.0, 26.0, 55.0, 21.0, 25,
            &[Vegetarian],
        ),
        record(
            1015,
            "Steak and Roast Vegetables",
            &["sirloin steak", "potatoes", "broccoli", "olive oil"],
            610.0, 45.0, 30.0, 32.0, 35,
            &[GlutenFree, HighProtein, DairyFree],
        ),
        record(
            1016,
            "Tempeh Buddha Bowl",
            &["tempeh", "brown rice", "edamame", "tahini dressing"],
            500.0, 27.0, 55.0, 18.0, 25,
            &[Vegetarian, Vegan, DairyFree],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = RecipeCatalog::builtin();
        assert_eq!(catalog.lookup(1001).unwrap().title, "Overnight Oats with Berries");
    }

    #[test]
    fn test_lookup_miss_is_reference_error() {
        let catalog = RecipeCatalog::builtin();
        let err = catalog.lookup(9999).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ReferenceNotFound);
    }

    #[test]
    fn test_compatible_with_requires_all_tags() {
        let catalog = RecipeCatalog::builtin();
        let prefs = vec![DietTag::Vegetarian, DietTag::Vegan];
        for recipe in catalog.compatible_with(&prefs) {
            assert!(recipe.tags.contains(&DietTag::Vegetarian));
            assert!(recipe.tags.contains(&DietTag::Vegan));
        }
        assert!(catalog.compatible_with(&prefs).count() > 0);
    }

    #[test]
    fn test_empty_preferences_match_everything() {
        let catalog = RecipeCatalog::builtin();
        assert_eq!(catalog.compatible_with(&[]).count(), catalog.len());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut records = builtin_records();
        records.push(records[0].clone());
        assert!(RecipeCatalog::new(records).is_err());
    }
}
