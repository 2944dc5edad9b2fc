use log::{debug, warn};

use super::App;
use crate::model::Ingredient;
use crate::shopping_list::ShoppingList;

impl App {
    /// Adds every ingredient of the current recipe to the shopping list,
    /// creating the list on first use.
    pub fn control_list(&self) {
        let added = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let Some(recipe) = state.recipe.as_ref() else {
                return;
            };
            let list = state.list.get_or_insert_with(ShoppingList::new);

            let added: Vec<_> = recipe
                .ingredients
                .iter()
                .map(|ingredient| match ingredient {
                    Ingredient::Parsed {
                        count,
                        unit,
                        ingredient,
                    } => list.add_item(count.unwrap_or(1.0), unit.as_str(), ingredient.as_str()),
                    Ingredient::Raw(line) => list.add_item(1.0, "", line.as_str()),
                })
                .collect();
            debug!(
                "Added {} ingredients of recipe {} to the shopping list",
                added.len(),
                recipe.id
            );
            added
        };

        for item in &added {
            self.renderer.render_list_item(item);
        }
    }

    pub fn delete_item(&self, id: &str) {
        let removed = match self.state.borrow_mut().list.as_mut() {
            Some(list) => {
                list.delete_item(id);
                true
            }
            None => false,
        };
        if removed {
            self.renderer.remove_list_item(id);
        }
    }

    pub fn update_count(&self, id: &str, count: f64) {
        let updated = match self.state.borrow_mut().list.as_mut() {
            Some(list) => list.update_count(id, count),
            None => return,
        };

        if let Err(e) = updated {
            warn!("Rejected count for shopping list item {}: {}", id, e);
            self.renderer.show_error(&e.user_message());
        }
    }
}
