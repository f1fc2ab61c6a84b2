use clap::{Parser, Subcommand};
use log::{debug, warn};
use serde::Serialize;

use fridge_mate::{
    Category, FridgeError, FridgeMate, Ingredient, IngredientBrowser, IngredientScreen, LoadState,
    RecipeDetailScreen, RecipeListScreen, RecipeMatches, SearchAction,
};

#[derive(Parser)]
#[command(name = "fridge-mate", version, about = "Find recipes for what's in your fridge")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List ingredient categories
    Categories,
    /// Browse or search ingredients
    Ingredients {
        /// Category id (all, fruits, vegetables, ...)
        #[arg(short, long, default_value = "all")]
        category: Category,
        /// Search query; needs at least three characters
        #[arg(short, long)]
        query: Option<String>,
        /// Show random ingredients instead of a category
        #[arg(long, conflicts_with_all = ["category", "query"])]
        random: bool,
        /// Mark ingredients as selected by name
        #[arg(short, long = "select")]
        select: Vec<String>,
    },
    /// Find recipes for comma separated ingredient names
    Recipes {
        /// e.g. "egg,flour"
        ingredients: String,
    },
    /// Show one recipe
    Recipe {
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Categories => {
            let categories: Vec<_> = Category::ALL_CATEGORIES
                .iter()
                .map(|c| (c.id(), c.name(), c.query()))
                .collect();
            if cli.json {
                print_json(&categories)?;
            } else {
                for (id, name, _) in categories {
                    println!("{:<12} {}", id, name);
                }
            }
        }
        Command::Ingredients {
            category,
            query,
            random,
            select,
        } => {
            let mate = FridgeMate::builder().build()?;
            let mut browser = browse(&mate, category, query.as_deref(), random).await?;
            for name in &select {
                if !browser.select_by_name(name) {
                    warn!("'{}' is not in the current list", name);
                }
            }

            if cli.json {
                print_json(browser.screen())?;
            } else {
                print_ingredients(browser.ingredients());
                if !browser.selected().is_empty() {
                    println!("\nSelected: {}", browser.selected_csv());
                }
            }
        }
        Command::Recipes { ingredients } => {
            let resolver = FridgeMate::builder().build()?.resolver();
            let mut screen = RecipeListScreen::new(ingredients);
            screen.load(&resolver).await;

            if cli.json {
                print_json(&screen)?;
            } else {
                match screen.recipes.data() {
                    Some(RecipeMatches::Found(recipes)) => {
                        for recipe in recipes {
                            println!(
                                "{:>8}  {}  ({} minutes, {} servings)",
                                recipe.id, recipe.title, recipe.ready_in_minutes, recipe.servings
                            );
                        }
                    }
                    Some(RecipeMatches::NoneFound) => {
                        println!("No recipes found for the selected ingredients")
                    }
                    None => {}
                }
            }
            check_loaded(&screen.recipes)?;
        }
        Command::Recipe { id } => {
            let resolver = FridgeMate::builder().build()?.resolver();
            let mut screen = RecipeDetailScreen::new(id);
            screen.load(&resolver).await;

            if cli.json {
                print_json(&screen)?;
            } else if let Some(recipe) = screen.recipe.data() {
                debug!("{:#?}", recipe);
                println!("{}", recipe.title.as_deref().unwrap_or("Untitled recipe"));
                if let (Some(minutes), Some(servings)) = (recipe.ready_in_minutes, recipe.servings)
                {
                    println!("{} minutes, {} portions", minutes, servings);
                }
                println!("\nIngredients needed:");
                for line in recipe.ingredient_lines() {
                    println!("  • {}", line);
                }
                println!("\nMethod of preparation:");
                println!("{}", recipe.method_of_preparation());
            }
            check_loaded(&screen.recipe)?;
        }
    }

    Ok(())
}

/// Load the list the `ingredients` command shows.
///
/// A query is searched directly within `category`; the category itself is
/// only fetched when there is no query or it is too short to search.
async fn browse(
    mate: &FridgeMate,
    category: Category,
    query: Option<&str>,
    random: bool,
) -> Result<IngredientBrowser, FridgeError> {
    let mut browser = mate.browser();
    if random {
        browser.load_initial().await?;
        return Ok(browser);
    }

    match query {
        Some(query) => {
            browser = browser.with_screen(IngredientScreen {
                category,
                ..Default::default()
            });
            if browser.search(query).await? == SearchAction::Skipped {
                browser.load_by_category(category).await?;
            }
        }
        None => browser.load_by_category(category).await?,
    }
    Ok(browser)
}

/// A screen that failed to load fails the command
fn check_loaded<T>(state: &LoadState<T>) -> Result<(), Box<dyn std::error::Error>> {
    match state.error() {
        Some(message) => Err(message.into()),
        None => Ok(()),
    }
}

fn print_ingredients(ingredients: &[Ingredient]) {
    if ingredients.is_empty() {
        println!("No ingredients found");
        return;
    }
    for ingredient in ingredients {
        let mark = if ingredient.selected { "[x]" } else { "[ ]" };
        println!("{} {:<32} {}", mark, ingredient.name, ingredient.id);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
