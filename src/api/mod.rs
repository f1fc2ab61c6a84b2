#[cfg(test)]
pub(crate) mod fake;
mod spoonacular;

pub use spoonacular::SpoonacularClient;

use async_trait::async_trait;

use crate::model::{ApiIngredient, RecipeDetails, RecipeMatch};
use crate::FridgeError;

/// The subset of the hosted recipe API the app consumes
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Random ingredients for the initial list
    async fn random_ingredients(&self, number: u32) -> Result<Vec<ApiIngredient>, FridgeError>;

    /// Ingredient search, optionally scoped to a category query string
    async fn search_ingredients(
        &self,
        query: &str,
        number: u32,
        category: Option<&str>,
    ) -> Result<Vec<ApiIngredient>, FridgeError>;

    /// Recipes using the comma separated ingredient names, ranked by used ingredients
    async fn find_by_ingredients(
        &self,
        ingredients: &str,
        number: u32,
    ) -> Result<Vec<RecipeMatch>, FridgeError>;

    /// Full record for one recipe
    async fn recipe_information(&self, id: u64) -> Result<RecipeDetails, FridgeError>;
}
