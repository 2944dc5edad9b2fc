use log::debug;
use serde::Serialize;

use crate::error::{ForkifyError, Result};
use crate::model::{Ingredient, RecipeDetail};
use crate::units::{normalize, parse_ingredient};

/// Servings assumed for every recipe.
///
/// The provider does not report a yield, so scaling always starts from this
/// base rather than a per-recipe serving count.
pub const DEFAULT_SERVINGS: u32 = 4;

/// Minutes of preparation assumed for every started group of three ingredients
const MINUTES_PER_PERIOD: u32 = 15;
const INGREDIENTS_PER_PERIOD: usize = 3;

/// Direction of a servings change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inc,
    Dec,
}

/// A fully fetched recipe with its derived fields
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub source_url: String,
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    pub time: u32,
}

impl Recipe {
    /// Builds a recipe from provider data. Ingredients stay raw until
    /// [`Recipe::parse_ingredients`] runs.
    pub fn new(id: impl Into<String>, detail: RecipeDetail) -> Self {
        Recipe {
            id: id.into(),
            title: detail.title,
            author: detail.author,
            image_url: detail.image_url,
            source_url: detail.source_url,
            ingredients: detail.ingredients.into_iter().map(Ingredient::Raw).collect(),
            servings: DEFAULT_SERVINGS,
            time: 0,
        }
    }

    /// Normalizes and structures every raw ingredient line
    pub fn parse_ingredients(&mut self) {
        for ingredient in &mut self.ingredients {
            if let Ingredient::Raw(line) = ingredient {
                *ingredient = parse_ingredient(&normalize(line));
            }
        }
    }

    pub fn calc_time(&mut self) {
        let periods = self.ingredients.len().div_ceil(INGREDIENTS_PER_PERIOD) as u32;
        self.time = periods * MINUTES_PER_PERIOD;
    }

    pub fn calc_servings(&mut self) {
        self.servings = DEFAULT_SERVINGS;
    }

    /// Changes servings by one and scales every ingredient count in
    /// proportion. Decreasing below one serving is ignored.
    ///
    /// Returns the servings after the update.
    ///
    /// # Errors
    /// Returns [`ForkifyError::Validation`] if ingredients have not been
    /// parsed yet; nothing is changed in that case.
    pub fn update_servings(&mut self, direction: Direction) -> Result<u32> {
        if self.ingredients.iter().any(|i| !i.is_parsed()) {
            return Err(ForkifyError::Validation(
                "ingredients must be parsed before changing servings".to_string(),
            ));
        }

        let new_servings = match direction {
            Direction::Dec if self.servings <= 1 => return Ok(self.servings),
            Direction::Dec => self.servings - 1,
            Direction::Inc => self.servings + 1,
        };

        let ratio = f64::from(new_servings) / f64::from(self.servings);
        for ingredient in &mut self.ingredients {
            if let Ingredient::Parsed {
                count: Some(count), ..
            } = ingredient
            {
                *count *= ratio;
            }
        }

        debug!(
            "Recipe {} servings {} -> {}",
            self.id, self.servings, new_servings
        );
        self.servings = new_servings;
        Ok(new_servings)
    }
}
