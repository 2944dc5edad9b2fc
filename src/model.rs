use serde::{Deserialize, Serialize};

/// Lightweight search result, distinct from a fully fetched [`crate::Recipe`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
}

/// Recipe data as returned by the detail endpoint, before any derivation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDetail {
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub source_url: String,
    pub ingredients: Vec<String>,
}

/// One ingredient line of a recipe.
///
/// Lines arrive from the provider as free text and become structured once
/// [`crate::Recipe::parse_ingredients`] has run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Ingredient {
    Raw(String),
    Parsed {
        /// `None` when the line carries no quantity, e.g. "salt to taste"
        count: Option<f64>,
        /// Canonical short unit, empty when there is none
        unit: String,
        ingredient: String,
    },
}

impl Ingredient {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Ingredient::Parsed { .. })
    }
}
