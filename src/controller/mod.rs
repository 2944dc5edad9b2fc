//! Controllers coordinating the entities with the provider and the view.
//!
//! [`App`] owns the whole application state. UI events reach it as
//! [`Command`]s; it updates the entities, talks to the [`RecipeApi`], and
//! hands the results to a [`Renderer`].
//!
//! All methods take `&self` so that several commands can be in flight on one
//! thread (e.g. two route changes racing). State is never borrowed across an
//! await or while the renderer runs; remote completions are matched against
//! the latest request token and discarded when they have been superseded.

mod likes;
mod list;
mod recipe;
mod search;

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::debug;

use crate::api::{Food2ForkClient, RecipeApi};
use crate::config::AppConfig;
use crate::error::Result;
use crate::likes::{Like, LikesStore};
use crate::model::RecipeSummary;
use crate::recipe::{Direction, Recipe};
use crate::search::{PageButtons, Search};
use crate::shopping_list::{ShoppingList, ShoppingListItem};
use crate::storage::{FileStorage, Storage};

/// A user action, decoupled from how the view captured it
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Search form submitted
    Search(String),
    /// Result page button clicked
    GoToPage(usize),
    /// Location fragment changed (or initial load), e.g. "#47746"
    Navigate(String),
    Increment,
    Decrement,
    AddToList,
    DeleteItem(String),
    UpdateCount(String, f64),
    ToggleLike,
}

/// Draws entities. Implemented by the view layer.
///
/// Callbacks run after the controller has released the state, so a renderer
/// may read [`App::state`] from inside them.
pub trait Renderer {
    fn render_loader(&self) {}

    fn clear_loader(&self) {}

    /// One page of search results with its navigation buttons
    fn render_results(&self, results: &[RecipeSummary], buttons: PageButtons);

    fn render_recipe(&self, recipe: &Recipe, is_liked: bool);

    /// Servings and ingredient counts changed on the displayed recipe
    fn update_servings(&self, recipe: &Recipe);

    fn render_list_item(&self, item: &ShoppingListItem);

    fn remove_list_item(&self, id: &str);

    fn toggle_like_button(&self, is_liked: bool);

    fn render_like(&self, like: &Like);

    fn remove_like(&self, id: &str);

    fn toggle_likes_menu(&self, visible: bool);

    /// Non-blocking notice that an action failed
    fn show_error(&self, message: &str);
}

/// Lifecycle of the current recipe load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading { id: String },
    Ready { id: String },
    Failed { id: String },
}

/// Everything the controllers read and write
pub struct AppState {
    pub search: Option<Search>,
    pub page: usize,
    pub recipe: Option<Recipe>,
    pub load: LoadState,
    pub list: Option<ShoppingList>,
    pub likes: LikesStore,
    search_token: u64,
    recipe_token: u64,
}

impl AppState {
    pub fn new(likes: LikesStore) -> Self {
        AppState {
            search: None,
            page: 1,
            recipe: None,
            load: LoadState::Idle,
            list: None,
            likes,
            search_token: 0,
            recipe_token: 0,
        }
    }
}

/// Root controller
pub struct App {
    state: RefCell<AppState>,
    api: Box<dyn RecipeApi>,
    renderer: Rc<dyn Renderer>,
    results_per_page: usize,
}

impl App {
    pub fn new(
        api: Box<dyn RecipeApi>,
        likes: LikesStore,
        renderer: Rc<dyn Renderer>,
        results_per_page: usize,
    ) -> Self {
        App {
            state: RefCell::new(AppState::new(likes)),
            api,
            renderer,
            results_per_page: results_per_page.max(1),
        }
    }

    /// Wires the HTTP client and file-backed likes described by `config`
    pub fn from_config(config: &AppConfig, renderer: Rc<dyn Renderer>) -> Result<Self> {
        let api = Food2ForkClient::new(&config.api)?;
        let storage: Box<dyn Storage> = Box::new(FileStorage::new(&config.data_dir));
        Ok(App::new(
            Box::new(api),
            LikesStore::load(storage),
            renderer,
            config.results_per_page,
        ))
    }

    /// Renders the persisted likes. Call once at startup.
    pub fn init(&self) {
        let likes = self.state.borrow().likes.likes().to_vec();
        self.renderer.toggle_likes_menu(!likes.is_empty());
        for like in &likes {
            self.renderer.render_like(like);
        }
    }

    pub async fn dispatch(&self, command: Command) {
        debug!("Dispatching {:?}", command);
        match command {
            Command::Search(query) => self.control_search(&query).await,
            Command::GoToPage(page) => self.go_to_page(page),
            Command::Navigate(fragment) => self.control_recipe(&fragment).await,
            Command::Increment => self.change_servings(Direction::Inc),
            Command::Decrement => self.change_servings(Direction::Dec),
            Command::AddToList => self.control_list(),
            Command::DeleteItem(id) => self.delete_item(&id),
            Command::UpdateCount(id, count) => self.update_count(&id, count),
            Command::ToggleLike => self.control_like(),
        }
    }

    /// Read access to the current state
    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }
}
