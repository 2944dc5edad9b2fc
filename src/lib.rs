pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod likes;
pub mod model;
pub mod recipe;
pub mod search;
pub mod shopping_list;
pub mod storage;
pub mod units;

pub use api::{Food2ForkClient, RecipeApi};
pub use config::AppConfig;
pub use controller::{App, AppState, Command, LoadState, Renderer};
pub use error::{ForkifyError, Result};
pub use likes::{Like, LikesStore};
pub use model::{Ingredient, RecipeDetail, RecipeSummary};
pub use recipe::{Direction, Recipe, DEFAULT_SERVINGS};
pub use search::{limit_title, PageButtons, Search};
pub use shopping_list::{ShoppingList, ShoppingListItem};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use units::{normalize, parse_ingredient};

/// Fetches a recipe by id and prepares it for display: ingredients parsed,
/// time and servings calculated.
pub async fn fetch_recipe(api: &dyn RecipeApi, id: &str) -> Result<Recipe> {
    let detail = api.recipe(id).await?;
    let mut recipe = Recipe::new(id, detail);
    recipe.parse_ingredients();
    recipe.calc_time();
    recipe.calc_servings();
    Ok(recipe)
}
