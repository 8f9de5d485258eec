//! Recipe lookup client for TheCocktailDB.

use futures_util::future::BoxFuture;
use tracing::debug;

use crate::recipe::{parse_lookup_body, Recipe, RecipeId};

pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lookup returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to parse lookup response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Resolves an identifier to the recipes the service knows under it.
///
/// An empty list is a well-formed "not found", distinct from an error.
pub trait RecipeLookup: Send + Sync {
    fn lookup<'a>(&'a self, id: &'a RecipeId) -> BoxFuture<'a, Result<Vec<Recipe>, LookupError>>;
}

/// HTTP implementation against `{base_url}/lookup.php?i=<id>`.
#[derive(Debug, Clone)]
pub struct CocktailDbClient {
    http: reqwest::Client,
    base_url: String,
}

impl CocktailDbClient {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn lookup_url(&self) -> String {
        format!("{}/lookup.php", self.base_url)
    }

    pub async fn fetch(&self, id: &RecipeId) -> Result<Vec<Recipe>, LookupError> {
        let url = self.lookup_url();
        debug!("[lookup] GET {}?i={}", url, id);

        let response = self
            .http
            .get(&url)
            .query(&[("i", id.as_str())])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.text().await?;
        let recipes = parse_lookup_body(&body, id)?;
        debug!("[lookup] {} -> {} recipe(s)", id, recipes.len());
        Ok(recipes)
    }
}

impl RecipeLookup for CocktailDbClient {
    fn lookup<'a>(&'a self, id: &'a RecipeId) -> BoxFuture<'a, Result<Vec<Recipe>, LookupError>> {
        Box::pin(self.fetch(id))
    }
}
