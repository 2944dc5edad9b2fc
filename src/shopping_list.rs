use serde::Serialize;

use crate::error::{ForkifyError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub count: f64,
    pub unit: String,
    pub ingredient: String,
}

/// Ordered shopping list. Items keep the order they were added in.
#[derive(Debug, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
    next_id: u64,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item under a fresh id and returns it
    pub fn add_item(
        &mut self,
        count: f64,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
    ) -> ShoppingListItem {
        self.next_id += 1;
        let item = ShoppingListItem {
            id: format!("item-{}", self.next_id),
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        };
        self.items.push(item.clone());
        item
    }

    /// Removes the item with `id`. Unknown ids are ignored.
    pub fn delete_item(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    /// Sets the count of the item with `id`. Unknown ids are ignored.
    ///
    /// # Errors
    /// Returns [`ForkifyError::Validation`] for negative or non-finite counts.
    pub fn update_count(&mut self, id: &str, count: f64) -> Result<()> {
        if !count.is_finite() || count < 0.0 {
            return Err(ForkifyError::Validation(format!(
                "shopping list count must be a non-negative number, got {}",
                count
            )));
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.count = count;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
