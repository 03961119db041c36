// ABOUTME: Remote recipe source over HTTP implementing the catalog's RecipeSource contract
// ABOUTME: Maps wire-format recipes and free-form diet labels into catalog records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use crate::catalog::RecipeSource;
use crate::errors::{AppError, AppResult};
use crate::external::secrets::SecretsProvider;
use crate::logging::AppLogger;
use crate::models::{DietTag, RecipeRecord};
use serde::Deserialize;
use std::time::Instant;

/// Environment variable holding the recipe API key
pub const RECIPE_API_KEY_VAR: &str = "RECIPE_API_KEY";
/// Environment variable overriding the recipe API base URL
pub const RECIPE_API_URL_VAR: &str = "RECIPE_API_URL";

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
const SERVICE_NAME: &str = "recipe API";

/// Remote recipe source configuration
#[derive(Debug, Clone)]
pub struct RemoteRecipeConfig {
    pub base_url: String,
    pub api_key: String,
    /// Number of recipes requested per load
    pub page_size: u32,
}

impl Default for RemoteRecipeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            page_size: 100,
        }
    }
}

/// Wire format of a remote recipe
#[derive(Debug, Deserialize)]
struct RemoteRecipe {
    id: u32,
    title: String,
    #[serde(default)]
    ingredients: Vec<String>,
    calories: f64,
    #[serde(default)]
    protein_g: f64,
    #[serde(default)]
    carbs_g: f64,
    #[serde(default)]
    fat_g: f64,
    #[serde(default)]
    prep_time_minutes: u32,
    #[serde(default)]
    diets: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecipeListResponse {
    recipes: Vec<RemoteRecipe>,
}

/// `RecipeSource` backed by a remote HTTP recipe service
pub struct RemoteRecipeSource {
    config: RemoteRecipeConfig,
    http_client: reqwest::Client,
}

impl RemoteRecipeSource {
    #[must_use]
    pub fn new(config: RemoteRecipeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Build a source with credentials from a secrets provider
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` when the API key secret is unavailable
    pub async fn from_secrets(provider: &dyn SecretsProvider) -> AppResult<Self> {
        let api_key = provider.secret(RECIPE_API_KEY_VAR).await?;
        let base_url = provider
            .secret(RECIPE_API_URL_VAR)
            .await
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Ok(Self::new(RemoteRecipeConfig {
            base_url,
            api_key,
            ..RemoteRecipeConfig::default()
        }))
    }
}

#[async_trait::async_trait]
impl RecipeSource for RemoteRecipeSource {
    async fn load(&self) -> AppResult<Vec<RecipeRecord>> {
        let started = Instant::now();
        let url = format!("{}/recipes", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("number", self.config.page_size.to_string()),
                ("apiKey", self.config.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, e.to_string()))?;

        if !response.status().is_success() {
            AppLogger::log_external_call(
                SERVICE_NAME,
                "load",
                false,
                u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            );
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let body: RecipeListResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })?;

        AppLogger::log_external_call(
            SERVICE_NAME,
            "load",
            true,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(body.recipes.into_iter().map(into_record).collect())
    }
}

fn into_record(remote: RemoteRecipe) -> RecipeRecord {
    RecipeRecord {
        id: remote.id,
        title: remote.title,
        ingredients: remote.ingredients,
        calories: remote.calories,
        protein_g: remote.protein_g,
        carbs_g: remote.carbs_g,
        fat_g: remote.fat_g,
        prep_time_minutes: remote.prep_time_minutes,
        tags: remote.diets.iter().map(|d| parse_diet_label(d)).collect(),
    }
}

/// Map a free-form diet label onto a known tag, preserving unknown labels
fn parse_diet_label(label: &str) -> DietTag {
    match label.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
        "vegetarian" | "lacto_ovo_vegetarian" => DietTag::Vegetarian,
        "vegan" => DietTag::Vegan,
        "gluten_free" => DietTag::GlutenFree,
        "dairy_free" => DietTag::DairyFree,
        "keto" | "ketogenic" => DietTag::Keto,
        "paleo" | "paleolithic" => DietTag::Paleo,
        "mediterranean" => DietTag::Mediterranean,
        "high_protein" => DietTag::HighProtein,
        other => DietTag::Custom(other.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_diet_labels_normalize() {
        assert_eq!(parse_diet_label("Gluten Free"), DietTag::GlutenFree);
        assert_eq!(parse_diet_label("lacto-ovo-vegetarian"), DietTag::Vegetarian);
        assert_eq!(parse_diet_label("ketogenic"), DietTag::Keto);
    }

    #[test]
    fn test_unknown_diet_label_preserved_as_custom() {
        assert_eq!(
            parse_diet_label("Whole 30"),
            DietTag::Custom("whole_30".into())
        );
    }

    #[test]
    fn test_wire_recipe_maps_to_record() {
        let remote = RemoteRecipe {
            id: 42,
            title: "Test Bowl".into(),
            ingredients: vec!["rice".into()],
            calories: 500.0,
            protein_g: 25.0,
            carbs_g: 60.0,
            fat_g: 15.0,
            prep_time_minutes: 20,
            diets: vec!["vegan".into()],
        };
        let record = into_record(remote);
        assert_eq!(record.id, 42);
        assert_eq!(record.tags, vec![DietTag::Vegan]);
    }
}
