use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::RecipeApi;
use crate::config::FridgeConfig;
use crate::join::join_degrade;
use crate::model::{RecipeDetails, RecipeSummary};
use crate::state::LoadState;
use crate::FridgeError;

/// Outcome of a recipe lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "recipes", rename_all = "snake_case")]
pub enum RecipeMatches {
    Found(Vec<RecipeSummary>),
    /// Nothing to show; not an error
    NoneFound,
}

impl RecipeMatches {
    pub fn recipes(&self) -> &[RecipeSummary] {
        match self {
            RecipeMatches::Found(recipes) => recipes,
            RecipeMatches::NoneFound => &[],
        }
    }
}

/// Normalise a comma separated ingredient list: trim parts, drop empty ones.
pub fn normalize_ingredient_list(ingredients: &str) -> String {
    ingredients
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Finds recipes for a set of ingredients and loads their details
pub struct RecipeResolver {
    api: Arc<dyn RecipeApi>,
    recipe_count: u32,
    max_concurrency: Option<usize>,
}

impl RecipeResolver {
    pub fn new(api: Arc<dyn RecipeApi>, config: &FridgeConfig) -> Self {
        RecipeResolver {
            api,
            recipe_count: config.recipe_count,
            max_concurrency: config.max_concurrency,
        }
    }

    /// Look up recipes using the comma separated `ingredients`.
    ///
    /// Matches whose detail request fails, or whose details are incomplete,
    /// are left out silently. Only a failure of the match request itself is
    /// reported as an error.
    pub async fn find_recipes(&self, ingredients: &str) -> Result<RecipeMatches, FridgeError> {
        let ingredients = normalize_ingredient_list(ingredients);
        if ingredients.is_empty() {
            debug!("No ingredients given, skipping recipe lookup");
            return Ok(RecipeMatches::NoneFound);
        }

        let matches = self
            .api
            .find_by_ingredients(&ingredients, self.recipe_count)
            .await?;
        if matches.is_empty() {
            info!("No recipes match '{}'", ingredients);
            return Ok(RecipeMatches::NoneFound);
        }

        let limit = self.max_concurrency.unwrap_or(matches.len());
        let api = &self.api;
        let details = join_degrade(matches, limit, |m| async move {
            api.recipe_information(m.id).await
        })
        .await;

        let fetched = details.len();
        let recipes: Vec<RecipeSummary> = details
            .into_iter()
            .flatten()
            .filter_map(|d| {
                let summary = d.summary();
                if summary.is_none() {
                    warn!("Skipping incomplete recipe {}", d.id);
                }
                summary
            })
            .collect();

        info!(
            "Resolved {} of {} recipes for '{}'",
            recipes.len(),
            fetched,
            ingredients
        );

        if recipes.is_empty() {
            Ok(RecipeMatches::NoneFound)
        } else {
            Ok(RecipeMatches::Found(recipes))
        }
    }

    /// Full record for the detail screen
    pub async fn recipe_details(&self, id: u64) -> Result<RecipeDetails, FridgeError> {
        self.api.recipe_information(id).await
    }
}

/// Recipe list screen for a fixed ingredient selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeListScreen {
    pub ingredients: String,
    pub recipes: LoadState<RecipeMatches>,
}

impl RecipeListScreen {
    pub fn new(ingredients: impl Into<String>) -> Self {
        RecipeListScreen {
            ingredients: ingredients.into(),
            recipes: LoadState::Idle,
        }
    }

    /// Load (or reload) the recipes; errors end up in `recipes`.
    pub async fn load(&mut self, resolver: &RecipeResolver) {
        self.recipes.begin();
        let result = resolver.find_recipes(&self.ingredients).await;
        if let Err(e) = &result {
            warn!("Error fetching recipes: {}", e);
        }
        self.recipes.finish(result);
    }
}

/// Detail screen for one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetailScreen {
    pub id: u64,
    pub recipe: LoadState<RecipeDetails>,
}

impl RecipeDetailScreen {
    pub fn new(id: u64) -> Self {
        RecipeDetailScreen {
            id,
            recipe: LoadState::Idle,
        }
    }

    pub async fn load(&mut self, resolver: &RecipeResolver) {
        self.recipe.begin();
        let result = resolver.recipe_details(self.id).await;
        if let Err(e) = &result {
            warn!("Error fetching recipe details: {}", e);
        }
        self.recipe.finish(result);
    }
}
