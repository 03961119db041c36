// ABOUTME: Immutable exercise and recipe catalogs with pluggable population sources
// ABOUTME: Catalogs are loaded once at startup and are read-only for the process lifetime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

/// Exercise catalog and built-in seed data
pub mod exercises;
/// Recipe catalog and built-in seed data
pub mod recipes;

pub use exercises::ExerciseCatalog;
pub use recipes::RecipeCatalog;

use crate::errors::AppResult;
use crate::models::{ExerciseRecord, RecipeRecord};

/// Pluggable population source for the exercise catalog
///
/// The catalog contract is the stable seam: whether records come from the
/// built-in seed, a JSON file, or a remote service, the catalog itself stays
/// immutable after load.
#[async_trait::async_trait]
pub trait ExerciseSource: Send + Sync {
    /// Load all exercise records from this source
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or parsed
    async fn load(&self) -> AppResult<Vec<ExerciseRecord>>;
}

/// Pluggable population source for the recipe catalog
#[async_trait::async_trait]
pub trait RecipeSource: Send + Sync {
    /// Load all recipe records from this source
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or parsed
    async fn load(&self) -> AppResult<Vec<RecipeRecord>>;
}
