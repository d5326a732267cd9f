use crate::config::Config;
use crate::models::{SearchOutcome, SearchResult};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

pub const NO_POSTER: &str = "N/A";

#[async_trait]
pub trait OmdbApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchOutcome>;
}

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    // No timeout: a hung lookup stays pending.
    pub fn new(config: &Config) -> Result<Self> {
        let user_agent = format!("moviefinder/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build OMDb HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl OmdbApi for OmdbClient {
    async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let url = search_url(&self.base_url, query, &self.api_key);
        debug!("OMDb search for '{}'", query);
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        parse_search_body(status, &text)
    }
}

pub fn search_url(base_url: &str, query: &str, api_key: &str) -> String {
    format!(
        "{}?s={}&apikey={}",
        base_url,
        urlencoding::encode(query),
        urlencoding::encode(api_key)
    )
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search")]
    search: Option<Vec<SearchEntry>>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

// Rejections arrive as JSON even on 4xx; only an unreadable body is an error.
pub fn parse_search_body(status: StatusCode, body: &str) -> Result<SearchOutcome> {
    let parsed: SearchResponse = serde_json::from_str(body)
        .with_context(|| format!("JSON parse failed (HTTP {status})"))?;

    if parsed.response == "True" {
        let entries = parsed
            .search
            .ok_or_else(|| anyhow!("successful response without Search array (HTTP {status})"))?;
        let results = entries
            .into_iter()
            .map(|e| SearchResult {
                title: e.title,
                year: e.year,
                poster_url: e.poster,
            })
            .collect();
        return Ok(SearchOutcome::Found(results));
    }

    parsed
        .error
        .map(SearchOutcome::Rejected)
        .ok_or_else(|| anyhow!("rejected response without Error text (HTTP {status})"))
}
