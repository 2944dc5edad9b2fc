use std::env;
use std::rc::Rc;

use forkify::search::TITLE_LIMIT;
use forkify::{
    limit_title, App, AppConfig, Command, Ingredient, Like, LoadState, PageButtons, Recipe,
    RecipeSummary, Renderer, ShoppingListItem,
};

const USAGE: &str = "Usage:
  forkify search <query> [page]
  forkify recipe <id> [servings]
  forkify like <id>
  forkify likes
  forkify list <id>...";

/// Prints everything the controllers render to stdout
struct ConsoleRenderer;

fn format_count(count: f64) -> String {
    let rounded = (count * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

impl Renderer for ConsoleRenderer {
    fn render_results(&self, results: &[RecipeSummary], buttons: PageButtons) {
        for recipe in results {
            println!(
                "#{:<8} {:<22} {}",
                recipe.id,
                limit_title(&recipe.title, TITLE_LIMIT),
                recipe.author
            );
        }
        if let Some(prev) = buttons.prev() {
            println!("<< page {}", prev);
        }
        if let Some(next) = buttons.next() {
            println!(">> page {}", next);
        }
    }

    fn render_recipe(&self, recipe: &Recipe, is_liked: bool) {
        let heart = if is_liked { " [liked]" } else { "" };
        println!("{} by {}{}", recipe.title, recipe.author, heart);
        println!("{} minutes", recipe.time);
        self.update_servings(recipe);
        println!("Directions: {}", recipe.source_url);
    }

    fn update_servings(&self, recipe: &Recipe) {
        println!("{} servings", recipe.servings);
        for ingredient in &recipe.ingredients {
            match ingredient {
                Ingredient::Parsed {
                    count: Some(count),
                    unit,
                    ingredient,
                } => println!("  - {} {} {}", format_count(*count), unit, ingredient),
                Ingredient::Parsed {
                    count: None,
                    unit,
                    ingredient,
                } => println!("  - {} {}", unit, ingredient),
                Ingredient::Raw(line) => println!("  - {}", line),
            }
        }
    }

    fn render_list_item(&self, item: &ShoppingListItem) {
        println!(
            "[{}] {} {} {}",
            item.id,
            format_count(item.count),
            item.unit,
            item.ingredient
        );
    }

    fn remove_list_item(&self, id: &str) {
        println!("removed {}", id);
    }

    fn toggle_like_button(&self, is_liked: bool) {
        println!("{}", if is_liked { "Liked" } else { "Unliked" });
    }

    fn render_like(&self, like: &Like) {
        println!(
            "  #{:<8} {} ({})",
            like.id,
            limit_title(&like.title, TITLE_LIMIT),
            like.author
        );
    }

    fn remove_like(&self, id: &str) {
        println!("  removed #{}", id);
    }

    fn toggle_likes_menu(&self, _visible: bool) {}

    fn show_error(&self, message: &str) {
        eprintln!("{}", message);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().ok_or(USAGE)?;

    let config = AppConfig::load()?;
    let app = App::from_config(&config, Rc::new(ConsoleRenderer))?;

    match (command.as_str(), &args[1..]) {
        ("search", [query, rest @ ..]) => {
            app.dispatch(Command::Search(query.clone())).await;
            if let Some(page) = rest.first() {
                app.dispatch(Command::GoToPage(page.parse()?)).await;
            }
        }
        ("recipe", [id, rest @ ..]) => {
            app.dispatch(Command::Navigate(id.clone())).await;
            if let Some(target) = rest.first() {
                let target: u32 = target.parse()?;
                let current = app.state().recipe.as_ref().map(|r| r.servings);
                if let Some(current) = current {
                    let step = if target > current {
                        Command::Increment
                    } else {
                        Command::Decrement
                    };
                    for _ in 0..target.abs_diff(current) {
                        app.dispatch(step.clone()).await;
                    }
                }
            }
        }
        ("like", [id]) => {
            app.dispatch(Command::Navigate(id.clone())).await;
            app.dispatch(Command::ToggleLike).await;
        }
        ("likes", []) => app.init(),
        ("list", ids) if !ids.is_empty() => {
            for id in ids {
                app.dispatch(Command::Navigate(id.clone())).await;
                if matches!(app.state().load, LoadState::Ready { .. }) {
                    app.dispatch(Command::AddToList).await;
                }
            }
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}
