use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ForkifyError, Result};
use crate::storage::Storage;

/// Storage key the liked recipes are persisted under
pub const LIKES_KEY: &str = "likes";

/// A bookmarked recipe with the metadata needed to list it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
}

/// Liked recipes, persisted on every change
pub struct LikesStore {
    likes: Vec<Like>,
    ids: HashSet<String>,
    storage: Box<dyn Storage>,
}

impl LikesStore {
    /// Restores persisted likes from `storage`. Missing or unreadable data
    /// starts an empty store.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let likes = match read_likes(storage.as_ref()) {
            Ok(likes) => likes,
            Err(e) => {
                warn!("Ignoring persisted likes: {}", e);
                Vec::new()
            }
        };

        let mut store = LikesStore {
            likes: Vec::with_capacity(likes.len()),
            ids: HashSet::with_capacity(likes.len()),
            storage,
        };
        for like in likes {
            if store.ids.insert(like.id.clone()) {
                store.likes.push(like);
            }
        }
        debug!("Restored {} liked recipes", store.likes.len());
        store
    }

    /// # Errors
    /// Returns [`ForkifyError::Duplicate`] if `id` is already liked.
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Result<Like> {
        let id = id.into();
        if self.ids.contains(&id) {
            return Err(ForkifyError::Duplicate(id));
        }

        let like = Like {
            id: id.clone(),
            title: title.into(),
            author: author.into(),
            image_url: image_url.into(),
        };
        self.ids.insert(id);
        self.likes.push(like.clone());
        self.persist();
        Ok(like)
    }

    /// Removes the like for `id`, if any
    pub fn delete_like(&mut self, id: &str) {
        if self.ids.remove(id) {
            self.likes.retain(|like| like.id != id);
        }
        self.persist();
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn count(&self) -> usize {
        self.likes.len()
    }

    /// Likes in the order they were added
    pub fn likes(&self) -> &[Like] {
        &self.likes
    }

    // A failed write keeps the in-memory change; the next mutation retries
    // with the full list.
    fn persist(&self) {
        let written = serde_json::to_string(&self.likes)
            .map_err(ForkifyError::from)
            .and_then(|json| self.storage.set(LIKES_KEY, &json));
        if let Err(e) = written {
            warn!("Failed to persist likes: {}", e);
        }
    }
}

fn read_likes(storage: &dyn Storage) -> Result<Vec<Like>> {
    match storage.get(LIKES_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
