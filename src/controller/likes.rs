use log::{error, info};

use super::App;
use crate::error::ForkifyError;
use crate::likes::Like;

enum Toggled {
    Liked(Like),
    Unliked(String),
    Failed(ForkifyError),
}

impl App {
    /// Likes the current recipe, or removes the like if it is already liked
    pub fn control_like(&self) {
        let (toggled, any_liked) = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let Some(recipe) = state.recipe.as_ref() else {
                return;
            };
            let likes = &mut state.likes;

            let toggled = if likes.is_liked(&recipe.id) {
                likes.delete_like(&recipe.id);
                info!("Removed like for recipe {}", recipe.id);
                Toggled::Unliked(recipe.id.clone())
            } else {
                match likes.add_like(
                    recipe.id.as_str(),
                    recipe.title.as_str(),
                    recipe.author.as_str(),
                    recipe.image_url.as_str(),
                ) {
                    Ok(like) => {
                        info!("Liked recipe {}", like.id);
                        Toggled::Liked(like)
                    }
                    Err(e) => {
                        error!("Failed to like recipe {}: {}", recipe.id, e);
                        Toggled::Failed(e)
                    }
                }
            };
            (toggled, likes.count() > 0)
        };

        match toggled {
            Toggled::Liked(like) => {
                self.renderer.toggle_like_button(true);
                self.renderer.render_like(&like);
            }
            Toggled::Unliked(id) => {
                self.renderer.toggle_like_button(false);
                self.renderer.remove_like(&id);
            }
            Toggled::Failed(e) => self.renderer.show_error(&e.user_message()),
        }
        self.renderer.toggle_likes_menu(any_liked);
    }
}
