//! UniFFI bindings for fridge-mate
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;
use std::time::Duration;

use crate::selection::name_key;
use crate::{
    Category, FridgeError, FridgeMate, Ingredient, IngredientScreen, RecipeDetails,
    RecipeMatches, RecipeSummary,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible category
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiCategory {
    pub id: String,
    pub name: String,
    /// Search query behind the category (none for "All")
    pub query: Option<String>,
}

impl From<Category> for FfiCategory {
    fn from(category: Category) -> Self {
        FfiCategory {
            id: category.id().to_string(),
            name: category.name().to_string(),
            query: category.query().map(String::from),
        }
    }
}

/// FFI-compatible ingredient
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub aisle: Option<String>,
    pub selected: bool,
}

impl From<Ingredient> for FfiIngredient {
    fn from(ingredient: Ingredient) -> Self {
        FfiIngredient {
            id: ingredient.id,
            name: ingredient.name,
            image_url: ingredient.image_url,
            aisle: ingredient.aisle,
            selected: ingredient.selected,
        }
    }
}

impl From<FfiIngredient> for Ingredient {
    fn from(ffi: FfiIngredient) -> Self {
        Ingredient {
            id: ffi.id,
            name: ffi.name,
            image_url: ffi.image_url,
            aisle: ffi.aisle,
            selected: ffi.selected,
        }
    }
}

/// FFI-compatible recipe card
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeSummary {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: Option<String>,
    pub ingredients: Vec<String>,
}

impl From<RecipeSummary> for FfiRecipeSummary {
    fn from(summary: RecipeSummary) -> Self {
        FfiRecipeSummary {
            id: summary.id,
            title: summary.title,
            image: summary.image,
            ready_in_minutes: summary.ready_in_minutes,
            servings: summary.servings,
            source_url: summary.source_url,
            ingredients: summary.ingredients,
        }
    }
}

/// FFI-compatible recipe details, instructions already cleaned
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeDetails {
    pub id: u64,
    pub title: Option<String>,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
    pub ingredients: Vec<String>,
    pub method_of_preparation: String,
}

impl From<RecipeDetails> for FfiRecipeDetails {
    fn from(details: RecipeDetails) -> Self {
        FfiRecipeDetails {
            id: details.id,
            ingredients: details.ingredient_lines(),
            method_of_preparation: details.method_of_preparation(),
            title: details.title,
            image: details.image,
            ready_in_minutes: details.ready_in_minutes,
            servings: details.servings,
            source_url: details.source_url,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiFridgeError {
    /// The API answered with a non-2xx status
    RequestFailed { status: u16, message: String },
    /// Network failure or timeout
    Connectivity { message: String },
    /// Response did not have the expected shape
    InvalidResponse { message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Configuration error (including a missing API key)
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiFridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiFridgeError::RequestFailed { message, .. } => write!(f, "{}", message),
            FfiFridgeError::Connectivity { message } => write!(f, "{}", message),
            FfiFridgeError::InvalidResponse { message } => write!(f, "{}", message),
            FfiFridgeError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiFridgeError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiFridgeError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiFridgeError {}

impl From<FridgeError> for FfiFridgeError {
    fn from(err: FridgeError) -> Self {
        let message = err.user_message();
        match err {
            FridgeError::Http { status } => FfiFridgeError::RequestFailed { status, message },
            FridgeError::Network(_) | FridgeError::Timeout => {
                FfiFridgeError::Connectivity { message }
            }
            FridgeError::InvalidResponse(_) => FfiFridgeError::InvalidResponse { message },
            FridgeError::InvalidInput(msg) => FfiFridgeError::InvalidInput { message: msg },
            FridgeError::MissingApiKey | FridgeError::ConfigError(_) => {
                FfiFridgeError::ConfigError { message }
            }
            FridgeError::Client(msg) => FfiFridgeError::RuntimeError { message: msg },
        }
    }
}

/// Connection overrides passed from the app
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiClientConfig {
    /// Optional API key (uses configuration/environment if not specified)
    pub api_key: Option<String>,
    /// Optional base URL of the recipe API
    pub base_url: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiFridgeError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiFridgeError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn build_client(config: Option<FfiClientConfig>) -> Result<FridgeMate, FfiFridgeError> {
    let config = config.unwrap_or_default();
    let mut builder = FridgeMate::builder();

    if let Some(api_key) = config.api_key {
        builder = builder.api_key(api_key);
    }

    if let Some(base_url) = config.base_url {
        builder = builder.base_url(base_url);
    }

    if let Some(timeout_secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }

    Ok(builder.build()?)
}

fn parse_category(category_id: &str) -> Result<Category, FfiFridgeError> {
    Ok(category_id.parse::<Category>()?)
}

/// All categories, "All" first
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn list_categories() -> Vec<FfiCategory> {
    Category::ALL_CATEGORIES
        .into_iter()
        .map(FfiCategory::from)
        .collect()
}

/// Load the ingredients of a category
///
/// # Arguments
/// * `category_id` - Category id such as "fruits" or "all"
/// * `config` - Optional connection overrides
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn load_ingredients(
    category_id: String,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiIngredient>, FfiFridgeError> {
    let category = parse_category(&category_id)?;
    let mate = build_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let mut browser = mate.browser();
        browser.load_by_category(category).await?;
        Ok(to_ffi_ingredients(browser.ingredients()))
    })
}

/// Search ingredients within a category
///
/// Queries of one or two characters return an empty list without a request;
/// an empty query loads the whole category.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_ingredients(
    query: String,
    category_id: String,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiIngredient>, FfiFridgeError> {
    let category = parse_category(&category_id)?;
    let mate = build_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let mut browser = mate.browser();
        if !query.is_empty() {
            // Scope the search without fetching the category first
            browser = browser.with_screen(IngredientScreen {
                category,
                ..Default::default()
            });
            browser.search(&query).await?;
        } else {
            browser.load_by_category(category).await?;
        }
        Ok(to_ffi_ingredients(browser.ingredients()))
    })
}

/// Carry the current selection onto a new result list
///
/// The app keeps its own list state; this applies the same name-based
/// reconciliation the browser uses.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn reconcile_selection(
    results: Vec<FfiIngredient>,
    selected: Vec<FfiIngredient>,
) -> Vec<FfiIngredient> {
    let results: Vec<Ingredient> = results.into_iter().map(Ingredient::from).collect();
    let selected: Vec<Ingredient> = selected.into_iter().map(Ingredient::from).collect();
    crate::selection::reconcile_selection(results, &selected, name_key)
        .into_iter()
        .map(FfiIngredient::from)
        .collect()
}

/// Recipes for a comma separated ingredient list; empty when none match
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn find_recipes(
    ingredients: String,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiRecipeSummary>, FfiFridgeError> {
    let mate = build_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let matches = mate.resolver().find_recipes(&ingredients).await?;
        Ok(match matches {
            RecipeMatches::Found(recipes) => {
                recipes.into_iter().map(FfiRecipeSummary::from).collect()
            }
            RecipeMatches::NoneFound => Vec::new(),
        })
    })
}

/// Full details of one recipe
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_recipe_details(
    id: u64,
    config: Option<FfiClientConfig>,
) -> Result<FfiRecipeDetails, FfiFridgeError> {
    let mate = build_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let details = mate.resolver().recipe_details(id).await?;
        Ok(details.into())
    })
}

/// Strip markup from recipe instructions
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn clean_instructions(html: String) -> String {
    crate::sanitize::clean_instructions(&html)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_ffi_ingredients(ingredients: &[Ingredient]) -> Vec<FfiIngredient> {
    ingredients.iter().cloned().map(FfiIngredient::from).collect()
}
