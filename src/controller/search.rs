use log::{error, info, warn};

use super::App;
use crate::search::Search;

impl App {
    /// Runs a search and renders its first page. Blank queries are ignored;
    /// a failed search keeps the previous results.
    pub async fn control_search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let token = {
            let mut state = self.state.borrow_mut();
            state.search_token += 1;
            state.search_token
        };
        self.renderer.render_loader();

        let result = self.api.search(query).await;

        {
            let state = self.state.borrow();
            if state.search_token != token {
                warn!("Discarding results for superseded search '{}'", query);
                return;
            }
        }
        self.renderer.clear_loader();

        match result {
            Ok(recipes) => {
                info!("Search '{}' found {} recipes", query, recipes.len());
                let search = Search::new(query, recipes);
                let results = search.page(1, self.results_per_page).to_vec();
                let buttons = search.pagination(1, self.results_per_page);
                {
                    let mut state = self.state.borrow_mut();
                    state.search = Some(search);
                    state.page = 1;
                }
                self.renderer.render_results(&results, buttons);
            }
            Err(e) => {
                error!("Search '{}' failed: {}", query, e);
                self.renderer.show_error(&e.user_message());
            }
        }
    }

    /// Re-renders the active search on `page` without fetching again
    pub fn go_to_page(&self, page: usize) {
        if page == 0 {
            return;
        }
        let (results, buttons) = {
            let mut state = self.state.borrow_mut();
            let Some(search) = &state.search else {
                return;
            };
            let results = search.page(page, self.results_per_page).to_vec();
            let buttons = search.pagination(page, self.results_per_page);
            state.page = page;
            (results, buttons)
        };

        self.renderer.render_results(&results, buttons);
    }
}
