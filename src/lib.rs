pub mod api;
pub mod browser;
pub mod builder;
pub mod category;
pub mod config;
pub mod error;
pub mod join;
pub mod model;
pub mod recipes;
pub mod sanitize;
pub mod selection;
pub mod state;
pub mod uniffi_bindings;

pub use api::{RecipeApi, SpoonacularClient};
pub use browser::{BrowseSettings, IngredientBrowser, IngredientScreen, SearchAction};
pub use builder::{FridgeMate, FridgeMateBuilder};
pub use category::Category;
pub use config::FridgeConfig;
pub use error::FridgeError;
pub use model::{Ingredient, RecipeDetails, RecipeMatch, RecipeSummary};
pub use recipes::{RecipeDetailScreen, RecipeListScreen, RecipeMatches, RecipeResolver};
pub use sanitize::clean_instructions;
pub use selection::{name_key, reconcile_selection, IdentityKey};
pub use state::LoadState;

/// Ingredients for `category`, using configuration from file and environment
///
/// # Example
/// ```no_run
/// # use fridge_mate::{ingredients_for_category, Category};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fruits = ingredients_for_category(Category::Fruits).await?;
/// # Ok(())
/// # }
/// ```
pub async fn ingredients_for_category(
    category: Category,
) -> Result<Vec<Ingredient>, FridgeError> {
    let mut browser = FridgeMate::builder().build()?.browser();
    browser.load_by_category(category).await?;
    Ok(browser.into_screen().visible().to_vec())
}

/// Search ingredients across all categories
pub async fn search_ingredients(query: &str) -> Result<Vec<Ingredient>, FridgeError> {
    let mut browser = FridgeMate::builder().build()?.browser();
    browser.search(query).await?;
    Ok(browser.into_screen().visible().to_vec())
}

/// Recipes using the comma separated ingredient names
pub async fn find_recipes(ingredients: &str) -> Result<RecipeMatches, FridgeError> {
    FridgeMate::builder()
        .build()?
        .resolver()
        .find_recipes(ingredients)
        .await
}

/// Full details of one recipe
pub async fn recipe_details(id: u64) -> Result<RecipeDetails, FridgeError> {
    FridgeMate::builder()
        .build()?
        .resolver()
        .recipe_details(id)
        .await
}
