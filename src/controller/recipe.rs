use log::{debug, error, info, warn};

use super::{App, LoadState};
use crate::fetch_recipe;
use crate::recipe::Direction;

impl App {
    /// Loads the recipe named by a location fragment ("#47746" or "47746").
    ///
    /// Only the most recently started load may install its recipe: when an
    /// older request completes after a newer one was issued, its result is
    /// dropped. A failed load renders an error and keeps the previous recipe.
    pub async fn control_recipe(&self, fragment: &str) {
        let id = fragment.trim().trim_start_matches('#');
        if id.is_empty() {
            return;
        }

        let token = {
            let mut state = self.state.borrow_mut();
            state.recipe_token += 1;
            state.load = LoadState::Loading { id: id.to_string() };
            state.recipe_token
        };
        debug!("Loading recipe {} (request {})", id, token);
        self.renderer.render_loader();

        let result = fetch_recipe(self.api.as_ref(), id).await;

        {
            let state = self.state.borrow();
            if state.recipe_token != token {
                warn!(
                    "Discarding recipe {} from superseded request {} (latest is {})",
                    id, token, state.recipe_token
                );
                return;
            }
        }
        self.renderer.clear_loader();

        match result {
            Ok(recipe) => {
                info!("Loaded recipe {} '{}'", id, recipe.title);
                let shown = recipe.clone();
                let is_liked = {
                    let mut state = self.state.borrow_mut();
                    state.recipe = Some(recipe);
                    state.load = LoadState::Ready { id: id.to_string() };
                    state.likes.is_liked(id)
                };
                self.renderer.render_recipe(&shown, is_liked);
            }
            Err(e) => {
                error!("Error processing recipe {}: {}", id, e);
                self.state.borrow_mut().load = LoadState::Failed { id: id.to_string() };
                self.renderer.show_error(&e.user_message());
            }
        }
    }

    /// Scales the current recipe one serving up or down
    pub fn change_servings(&self, direction: Direction) {
        let scaled = {
            let mut state = self.state.borrow_mut();
            let Some(recipe) = state.recipe.as_mut() else {
                return;
            };
            match recipe.update_servings(direction) {
                Ok(_) => Ok(recipe.clone()),
                Err(e) => {
                    warn!("Cannot change servings of recipe {}: {}", recipe.id, e);
                    Err(e)
                }
            }
        };

        match scaled {
            Ok(recipe) => self.renderer.update_servings(&recipe),
            Err(e) => self.renderer.show_error(&e.user_message()),
        }
    }
}
