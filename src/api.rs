use std::time::Duration;

use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::{ForkifyError, Result};
use crate::model::{RecipeDetail, RecipeSummary};

/// Remote recipe provider
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Free-text search, in the provider's ranking order
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>>;

    /// Full recipe data for `id`
    async fn recipe(&self, id: &str) -> Result<RecipeDetail>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    recipes: Vec<ApiSummary>,
}

#[derive(Debug, Deserialize)]
struct ApiSummary {
    recipe_id: ApiId,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    recipe: Option<ApiRecipe>,
}

#[derive(Debug, Deserialize)]
struct ApiRecipe {
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    ingredients: Vec<String>,
}

// Ids come back as strings from some endpoints and numbers from others
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiId {
    String(String),
    Number(u64),
}

impl From<ApiId> for String {
    fn from(id: ApiId) -> Self {
        match id {
            ApiId::String(s) => s,
            ApiId::Number(n) => n.to_string(),
        }
    }
}

fn decode(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

impl From<ApiSummary> for RecipeSummary {
    fn from(summary: ApiSummary) -> Self {
        RecipeSummary {
            id: summary.recipe_id.into(),
            title: decode(&summary.title),
            author: decode(&summary.publisher),
            image_url: summary.image_url,
        }
    }
}

impl From<ApiRecipe> for RecipeDetail {
    fn from(recipe: ApiRecipe) -> Self {
        RecipeDetail {
            title: decode(&recipe.title),
            author: decode(&recipe.publisher),
            image_url: recipe.image_url,
            source_url: recipe.source_url,
            ingredients: recipe.ingredients.iter().map(|i| decode(i)).collect(),
        }
    }
}

/// HTTP client for the food2fork-style search and detail endpoints
pub struct Food2ForkClient {
    client: Client,
    base_url: String,
    key: Option<String>,
    timeout: Duration,
}

impl Food2ForkClient {
    /// Create a new client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        // Try config first, then fall back to environment variable
        let key = config
            .key
            .clone()
            .or_else(|| std::env::var("FORKIFY_API_KEY").ok());

        let client = Client::builder()
            .user_agent(concat!("forkify/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Food2ForkClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key,
            timeout: Duration::from_secs(config.timeout),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, timeout: Duration) -> Self {
        Food2ForkClient {
            client: Client::new(),
            base_url,
            key: None,
            timeout,
        }
    }

    /// GETs `path` and decodes the JSON body. A 404 yields `None`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        tokio::time::timeout(self.timeout, self.send(path, params))
            .await
            .map_err(|_| ForkifyError::Timeout(self.timeout.as_secs()))?
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = format!("{}/{}", self.base_url, path);
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        if let Some(key) = &self.key {
            query.push(("key", key.as_str()));
        }
        query.extend_from_slice(params);
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(&url).query(&query).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.error_for_status()?.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}

#[async_trait]
impl RecipeApi for Food2ForkClient {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        let response = self
            .get_json::<SearchResponse>("search", &[("q", query)])
            .await?;
        // No matches is a 200 without recipes; a 404 means the endpoint itself is wrong
        let Some(response) = response else {
            return Err(ForkifyError::NotFound(format!(
                "search endpoint {}/search",
                self.base_url
            )));
        };
        let recipes = response.recipes;
        debug!("Search '{}' returned {} recipes", query, recipes.len());
        Ok(recipes.into_iter().map(RecipeSummary::from).collect())
    }

    async fn recipe(&self, id: &str) -> Result<RecipeDetail> {
        let response = self
            .get_json::<DetailResponse>("get", &[("rId", id)])
            .await?;
        response
            .and_then(|r| r.recipe)
            .map(RecipeDetail::from)
            .ok_or_else(|| ForkifyError::NotFound(format!("recipe {}", id)))
    }
}
