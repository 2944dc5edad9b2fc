use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use forkify::{
    App, AppState, Command, ForkifyError, Ingredient, Like, LikesStore, LoadState, MemoryStorage,
    PageButtons, Recipe, RecipeApi, RecipeDetail, RecipeSummary, Renderer, ShoppingListItem,
};

/// Provider answering from fixed data, each query and recipe after its own delay
#[derive(Default)]
struct ScriptedApi {
    searches: HashMap<String, (u64, Vec<RecipeSummary>)>,
    recipes: HashMap<String, (u64, RecipeDetail)>,
    failing_searches: Vec<String>,
    timeouts: bool,
}

impl ScriptedApi {
    fn search(self, query: &str, total: usize) -> Self {
        self.delayed_search(query, 0, total)
    }

    fn delayed_search(mut self, query: &str, delay_ms: u64, total: usize) -> Self {
        let results = (0..total)
            .map(|i| RecipeSummary {
                id: format!("{}-{}", query, i),
                title: format!("{} {}", query, i),
                author: "Closet Cooking".to_string(),
                image_url: format!("http://img/{}.jpg", i),
            })
            .collect();
        self.searches.insert(query.to_string(), (delay_ms, results));
        self
    }

    fn recipe(mut self, id: &str, delay_ms: u64, title: &str, ingredients: &[&str]) -> Self {
        let detail = RecipeDetail {
            title: title.to_string(),
            author: "101 Cookbooks".to_string(),
            image_url: format!("http://img/{}.jpg", id),
            source_url: format!("http://source/{}", id),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        };
        self.recipes.insert(id.to_string(), (delay_ms, detail));
        self
    }

    fn failing_search(mut self, query: &str) -> Self {
        self.failing_searches.push(query.to_string());
        self
    }

    fn timing_out(mut self) -> Self {
        self.timeouts = true;
        self
    }
}

#[async_trait]
impl RecipeApi for ScriptedApi {
    async fn search(&self, query: &str) -> forkify::Result<Vec<RecipeSummary>> {
        if self.timeouts || self.failing_searches.iter().any(|q| q == query) {
            return Err(ForkifyError::Timeout(30));
        }
        match self.searches.get(query) {
            Some((delay, results)) => {
                tokio::time::sleep(Duration::from_millis(*delay)).await;
                Ok(results.clone())
            }
            None => Ok(Vec::new()),
        }
    }

    async fn recipe(&self, id: &str) -> forkify::Result<RecipeDetail> {
        if self.timeouts {
            return Err(ForkifyError::Timeout(30));
        }
        match self.recipes.get(id) {
            Some((delay, detail)) => {
                tokio::time::sleep(Duration::from_millis(*delay)).await;
                Ok(detail.clone())
            }
            None => Err(ForkifyError::NotFound(format!("recipe {}", id))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Rendered {
    Results(Vec<String>, PageButtons),
    Recipe(String, bool),
    Servings(u32),
    ListItem(ShoppingListItem),
    RemovedItem(String),
    LikeButton(bool),
    Like(String),
    RemovedLike(String),
    LikesMenu(bool),
    Error(String),
}

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<Rendered>>,
}

impl Recorder {
    fn push(&self, event: Rendered) {
        self.events.borrow_mut().push(event);
    }

    fn take(&self) -> Vec<Rendered> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl Renderer for Recorder {
    fn render_results(&self, results: &[RecipeSummary], buttons: PageButtons) {
        let ids = results.iter().map(|r| r.id.clone()).collect();
        self.push(Rendered::Results(ids, buttons));
    }

    fn render_recipe(&self, recipe: &Recipe, is_liked: bool) {
        self.push(Rendered::Recipe(recipe.id.clone(), is_liked));
    }

    fn update_servings(&self, recipe: &Recipe) {
        self.push(Rendered::Servings(recipe.servings));
    }

    fn render_list_item(&self, item: &ShoppingListItem) {
        self.push(Rendered::ListItem(item.clone()));
    }

    fn remove_list_item(&self, id: &str) {
        self.push(Rendered::RemovedItem(id.to_string()));
    }

    fn toggle_like_button(&self, is_liked: bool) {
        self.push(Rendered::LikeButton(is_liked));
    }

    fn render_like(&self, like: &Like) {
        self.push(Rendered::Like(like.id.clone()));
    }

    fn remove_like(&self, id: &str) {
        self.push(Rendered::RemovedLike(id.to_string()));
    }

    fn toggle_likes_menu(&self, visible: bool) {
        self.push(Rendered::LikesMenu(visible));
    }

    fn show_error(&self, message: &str) {
        self.push(Rendered::Error(message.to_string()));
    }
}

fn app_with(api: ScriptedApi, storage: MemoryStorage) -> (App, Rc<Recorder>) {
    let recorder = Rc::new(Recorder::default());
    let app = App::new(
        Box::new(api),
        LikesStore::load(Box::new(storage)),
        recorder.clone(),
        10,
    );
    (app, recorder)
}

fn pizza_api() -> ScriptedApi {
    ScriptedApi::default().recipe(
        "47746",
        0,
        "Best Pizza Dough Ever",
        &["4 1/2 cups flour", "2 Teaspoons salt (kosher)", "Olive oil"],
    )
}

fn counts(app: &App) -> Vec<Option<f64>> {
    app.state()
        .recipe
        .as_ref()
        .unwrap()
        .ingredients
        .iter()
        .map(|i| match i {
            Ingredient::Parsed { count, .. } => *count,
            Ingredient::Raw(line) => panic!("raw ingredient {}", line),
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_superseded_recipe_load_is_discarded() {
    let api = ScriptedApi::default()
        .recipe("slow", 50, "Slow Soup", &["1 cup water"])
        .recipe("fast", 10, "Fast Salad", &["2 tomatoes"]);
    let (app, recorder) = app_with(api, MemoryStorage::new());

    tokio::join!(
        app.dispatch(Command::Navigate("#slow".to_string())),
        app.dispatch(Command::Navigate("#fast".to_string())),
    );

    let state = app.state();
    let recipe = state.recipe.as_ref().unwrap();
    assert_eq!(recipe.id, "fast");
    assert_eq!(recipe.title, "Fast Salad");
    assert_eq!(
        state.load,
        LoadState::Ready {
            id: "fast".to_string()
        }
    );
    assert_eq!(
        recorder.take(),
        vec![Rendered::Recipe("fast".to_string(), false)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_latest_load_wins_when_it_completes_last() {
    let api = ScriptedApi::default()
        .recipe("first", 10, "First", &["1 egg"])
        .recipe("second", 50, "Second", &["2 eggs"]);
    let (app, recorder) = app_with(api, MemoryStorage::new());

    tokio::join!(
        app.dispatch(Command::Navigate("#first".to_string())),
        app.dispatch(Command::Navigate("#second".to_string())),
    );

    assert_eq!(app.state().recipe.as_ref().unwrap().id, "second");
    assert_eq!(
        recorder.take(),
        vec![Rendered::Recipe("second".to_string(), false)]
    );
}

#[tokio::test]
async fn test_recipe_is_prepared_on_load() {
    let (app, _recorder) = app_with(pizza_api(), MemoryStorage::new());

    app.dispatch(Command::Navigate("#47746".to_string())).await;

    let state = app.state();
    let recipe = state.recipe.as_ref().unwrap();
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.time, 15);
    assert_eq!(
        recipe.ingredients[1],
        Ingredient::Parsed {
            count: Some(2.0),
            unit: "tsp".to_string(),
            ingredient: "salt".to_string(),
        }
    );
}

#[tokio::test]
async fn test_failed_load_keeps_previous_recipe() {
    let (app, recorder) = app_with(pizza_api(), MemoryStorage::new());
    app.dispatch(Command::Navigate("47746".to_string())).await;
    recorder.take();

    app.dispatch(Command::Navigate("#missing".to_string())).await;

    let state = app.state();
    assert_eq!(state.recipe.as_ref().unwrap().id, "47746");
    assert_eq!(
        state.load,
        LoadState::Failed {
            id: "missing".to_string()
        }
    );
    assert_eq!(
        recorder.take(),
        vec![Rendered::Error("Something went wrong :(".to_string())]
    );
}

#[tokio::test]
async fn test_empty_fragment_is_ignored() {
    let (app, recorder) = app_with(pizza_api(), MemoryStorage::new());

    app.dispatch(Command::Navigate("#".to_string())).await;

    assert_eq!(app.state().load, LoadState::Idle);
    assert!(recorder.take().is_empty());
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let (app, recorder) = app_with(ScriptedApi::default().timing_out(), MemoryStorage::new());

    app.dispatch(Command::Navigate("#47746".to_string())).await;

    match recorder.take().as_slice() {
        [Rendered::Error(message)] => assert!(message.contains("too long")),
        other => panic!("unexpected renders: {:?}", other),
    }
}

#[tokio::test]
async fn test_search_and_paginate() {
    let api = ScriptedApi::default().search("pizza", 25);
    let (app, recorder) = app_with(api, MemoryStorage::new());

    app.dispatch(Command::Search("pizza".to_string())).await;
    app.dispatch(Command::GoToPage(2)).await;
    app.dispatch(Command::GoToPage(3)).await;

    let events = recorder.take();
    assert_eq!(events.len(), 3);
    match &events[0] {
        Rendered::Results(ids, buttons) => {
            assert_eq!(ids.len(), 10);
            assert_eq!(ids[0], "pizza-0");
            assert_eq!(*buttons, PageButtons::Next { goto: 2 });
        }
        other => panic!("unexpected render: {:?}", other),
    }
    match &events[1] {
        Rendered::Results(ids, buttons) => {
            assert_eq!(ids[0], "pizza-10");
            assert_eq!(*buttons, PageButtons::Both { prev: 1, next: 3 });
        }
        other => panic!("unexpected render: {:?}", other),
    }
    match &events[2] {
        Rendered::Results(ids, buttons) => {
            assert_eq!(ids.len(), 5);
            assert_eq!(*buttons, PageButtons::Prev { goto: 2 });
        }
        other => panic!("unexpected render: {:?}", other),
    }
    assert_eq!(app.state().page, 3);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_search_is_discarded() {
    let api = ScriptedApi::default()
        .delayed_search("slow", 50, 3)
        .delayed_search("fast", 10, 2);
    let (app, recorder) = app_with(api, MemoryStorage::new());

    tokio::join!(
        app.dispatch(Command::Search("slow".to_string())),
        app.dispatch(Command::Search("fast".to_string())),
    );

    assert_eq!(app.state().search.as_ref().unwrap().query, "fast");
    assert_eq!(
        recorder.take(),
        vec![Rendered::Results(
            vec!["fast-0".to_string(), "fast-1".to_string()],
            PageButtons::None
        )]
    );
}

#[tokio::test]
async fn test_blank_search_is_ignored() {
    let (app, recorder) = app_with(ScriptedApi::default(), MemoryStorage::new());

    app.dispatch(Command::Search("   ".to_string())).await;

    assert!(app.state().search.is_none());
    assert!(recorder.take().is_empty());
}

#[tokio::test]
async fn test_failed_search_keeps_previous_results() {
    let api = ScriptedApi::default()
        .search("soup", 3)
        .failing_search("stew");
    let (app, recorder) = app_with(api, MemoryStorage::new());
    app.dispatch(Command::Search("soup".to_string())).await;
    recorder.take();

    app.dispatch(Command::Search("stew".to_string())).await;

    let state = app.state();
    let search = state.search.as_ref().unwrap();
    assert_eq!(search.query, "soup");
    assert_eq!(search.result.len(), 3);
    assert!(matches!(recorder.take().as_slice(), [Rendered::Error(_)]));
}

#[tokio::test]
async fn test_servings_commands_scale_ingredients() {
    let (app, recorder) = app_with(pizza_api(), MemoryStorage::new());
    app.dispatch(Command::Navigate("#47746".to_string())).await;
    recorder.take();

    app.dispatch(Command::Increment).await;

    assert_eq!(app.state().recipe.as_ref().unwrap().servings, 5);
    assert_eq!(counts(&app), vec![Some(5.625), Some(2.5), None]);

    for _ in 0..10 {
        app.dispatch(Command::Decrement).await;
    }
    assert_eq!(app.state().recipe.as_ref().unwrap().servings, 1);

    let events = recorder.take();
    assert_eq!(events.first(), Some(&Rendered::Servings(5)));
    assert_eq!(events.last(), Some(&Rendered::Servings(1)));
}

#[tokio::test]
async fn test_shopping_list() {
    let (app, recorder) = app_with(pizza_api(), MemoryStorage::new());

    app.dispatch(Command::AddToList).await;
    assert!(app.state().list.is_none());

    app.dispatch(Command::Navigate("#47746".to_string())).await;
    recorder.take();
    app.dispatch(Command::AddToList).await;

    let items: Vec<ShoppingListItem> = app.state().list.as_ref().unwrap().items().to_vec();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].count, 4.5);
    assert_eq!(items[0].unit, "cup");
    assert_eq!(items[2].count, 1.0);
    assert_eq!(items[2].ingredient, "olive oil");

    app.dispatch(Command::DeleteItem(items[0].id.clone())).await;
    app.dispatch(Command::UpdateCount(items[1].id.clone(), 3.0)).await;
    app.dispatch(Command::UpdateCount(items[2].id.clone(), -2.0)).await;

    let state = app.state();
    let list = state.list.as_ref().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(&items[1].id).unwrap().count, 3.0);
    assert_eq!(list.get(&items[2].id).unwrap().count, 1.0);

    let events = recorder.take();
    assert_eq!(events.len(), 5);
    assert_eq!(events[3], Rendered::RemovedItem(items[0].id.clone()));
    assert!(matches!(events[4], Rendered::Error(_)));
}

#[tokio::test]
async fn test_list_survives_navigation() {
    let api = pizza_api().recipe("35382", 0, "Grilled Cheese", &["2 slices bread"]);
    let (app, _recorder) = app_with(api, MemoryStorage::new());

    app.dispatch(Command::Navigate("#47746".to_string())).await;
    app.dispatch(Command::AddToList).await;
    app.dispatch(Command::Navigate("#35382".to_string())).await;
    app.dispatch(Command::AddToList).await;

    let state = app.state();
    let list = state.list.as_ref().unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list.items()[3].ingredient, "slices bread");
}

#[tokio::test]
async fn test_toggle_like() {
    let storage = MemoryStorage::new();
    let (app, recorder) = app_with(pizza_api(), storage.clone());
    app.dispatch(Command::Navigate("#47746".to_string())).await;
    recorder.take();

    app.dispatch(Command::ToggleLike).await;
    assert!(app.state().likes.is_liked("47746"));
    assert_eq!(
        recorder.take(),
        vec![
            Rendered::LikeButton(true),
            Rendered::Like("47746".to_string()),
            Rendered::LikesMenu(true),
        ]
    );

    app.dispatch(Command::ToggleLike).await;
    assert!(!app.state().likes.is_liked("47746"));
    assert_eq!(
        recorder.take(),
        vec![
            Rendered::LikeButton(false),
            Rendered::RemovedLike("47746".to_string()),
            Rendered::LikesMenu(false),
        ]
    );
}

#[tokio::test]
async fn test_likes_restored_on_startup() {
    let storage = MemoryStorage::new();
    let (app, _recorder) = app_with(pizza_api(), storage.clone());
    app.dispatch(Command::Navigate("#47746".to_string())).await;
    app.dispatch(Command::ToggleLike).await;

    let (restarted, recorder) = app_with(pizza_api(), storage);
    restarted.init();
    restarted
        .dispatch(Command::Navigate("#47746".to_string()))
        .await;

    assert_eq!(restarted.state().likes.count(), 1);
    assert_eq!(
        recorder.take(),
        vec![
            Rendered::LikesMenu(true),
            Rendered::Like("47746".to_string()),
            Rendered::Recipe("47746".to_string(), true),
        ]
    );
}

/// Renderer that reads the app state back from inside every callback
#[derive(Default)]
struct StateReader {
    app: RefCell<Weak<App>>,
    seen: RefCell<Vec<String>>,
}

impl StateReader {
    fn observe(&self, read: impl FnOnce(&AppState) -> String) {
        if let Some(app) = self.app.borrow().upgrade() {
            let seen = read(&app.state());
            self.seen.borrow_mut().push(seen);
        }
    }
}

impl Renderer for StateReader {
    fn render_results(&self, _results: &[RecipeSummary], _buttons: PageButtons) {
        self.observe(|state| format!("page {}", state.page));
    }

    fn render_recipe(&self, _recipe: &Recipe, _is_liked: bool) {
        self.observe(|state| format!("recipe {}", state.recipe.as_ref().unwrap().id));
    }

    fn update_servings(&self, _recipe: &Recipe) {
        self.observe(|state| format!("servings {}", state.recipe.as_ref().unwrap().servings));
    }

    fn render_list_item(&self, _item: &ShoppingListItem) {
        self.observe(|state| format!("items {}", state.list.as_ref().unwrap().len()));
    }

    fn remove_list_item(&self, _id: &str) {
        self.observe(|state| format!("items {}", state.list.as_ref().unwrap().len()));
    }

    fn toggle_like_button(&self, _is_liked: bool) {
        self.observe(|state| format!("likes {}", state.likes.count()));
    }

    fn render_like(&self, _like: &Like) {}

    fn remove_like(&self, _id: &str) {}

    fn toggle_likes_menu(&self, _visible: bool) {}

    fn show_error(&self, _message: &str) {
        self.observe(|state| format!("error while {:?}", state.load));
    }
}

#[tokio::test]
async fn test_renderer_can_read_state_during_callbacks() {
    let api = pizza_api().search("pizza", 3);
    let reader = Rc::new(StateReader::default());
    let app = Rc::new(App::new(
        Box::new(api),
        LikesStore::load(Box::new(MemoryStorage::new())),
        reader.clone(),
        10,
    ));
    *reader.app.borrow_mut() = Rc::downgrade(&app);

    app.dispatch(Command::Search("pizza".to_string())).await;
    app.dispatch(Command::GoToPage(1)).await;
    app.dispatch(Command::Navigate("#47746".to_string())).await;
    app.dispatch(Command::Increment).await;
    app.dispatch(Command::AddToList).await;
    let first = app.state().list.as_ref().unwrap().items()[0].id.clone();
    app.dispatch(Command::DeleteItem(first)).await;
    app.dispatch(Command::ToggleLike).await;
    app.dispatch(Command::Navigate("#missing".to_string())).await;

    assert_eq!(
        reader.seen.take(),
        vec![
            "page 1",
            "page 1",
            "recipe 47746",
            "servings 5",
            "items 3",
            "items 3",
            "items 3",
            "items 2",
            "likes 1",
            "error while Failed { id: \"missing\" }",
        ]
    );
}
