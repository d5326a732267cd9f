//! Run one OMDb search and print what the results container would show.
//! Usage:
//!   cargo run --bin omdb_props -- <title words...>
//!   cargo run --bin omdb_props -- --json <title words...>
//! Requires OMDB_API_KEY in the environment (.env supported).

use anyhow::Result;
use dotenvy::dotenv;
use moviefinder::config::Config;
use moviefinder::controller::search_blocks;
use moviefinder::models::RenderBlock;
use moviefinder::omdb::OmdbClient;
use moviefinder::render;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let as_json = args.first().map(|a| a == "--json").unwrap_or(false);
    if as_json {
        args.remove(0);
    }
    let query = args.join(" ");

    let config = Config::from_env()?;
    let client = OmdbClient::new(&config)?;
    info!("OMDb search: '{}'", query);
    let blocks = search_blocks(&client, &query, &config.placeholder).await;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
        return Ok(());
    }

    info!("--- {} block(s) ---", blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        match block {
            RenderBlock::MovieItem {
                poster_src,
                title,
                year,
                ..
            } => info!("{}: {} ({}) poster={}", i + 1, title, year, poster_src),
            RenderBlock::Message { text } => info!("{}: message: {}", i + 1, text),
        }
    }
    info!("html: {}", render::to_html(&blocks)?);
    Ok(())
}
