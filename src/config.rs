use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_PLACEHOLDER: &str = "placeholder.jpg";
const DEFAULT_ASSETS_DIR: &str = "static";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3146";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub placeholder: String,
    pub assets_dir: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OMDB_API_KEY")
            .ok_or_else(|| anyhow::anyhow!("Missing required environment variable: OMDB_API_KEY"))?;
        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_raw}"))?;

        Ok(Self {
            api_key,
            base_url: get("OMDB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            placeholder: get("PLACEHOLDER_POSTER").unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            assets_dir: get("ASSETS_DIR").unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()),
            bind_addr,
        })
    }
}
