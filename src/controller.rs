use crate::models::RenderBlock;
use crate::omdb::OmdbApi;
use crate::render;
use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Clone, Debug, Default)]
pub struct QueryField {
    value: Arc<Mutex<String>>,
}

impl QueryField {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial.into())),
        }
    }

    pub fn set(&self, value: impl Into<String>) {
        *lock(&self.value) = value.into();
    }

    pub fn value(&self) -> String {
        lock(&self.value).clone()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResultsContainer {
    blocks: Arc<Mutex<Vec<RenderBlock>>>,
}

impl ResultsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, blocks: Vec<RenderBlock>) {
        *lock(&self.blocks) = blocks;
    }

    pub fn blocks(&self) -> Vec<RenderBlock> {
        lock(&self.blocks).clone()
    }

    pub fn to_html(&self) -> Result<String> {
        render::to_html(&lock(&self.blocks))
    }
}

// A poisoned lock only means a writer panicked mid-swap; the Vec is still whole.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone)]
pub struct SearchController {
    omdb: Arc<dyn OmdbApi>,
    query: QueryField,
    results: ResultsContainer,
    placeholder: String,
}

impl SearchController {
    pub fn new(
        omdb: Arc<dyn OmdbApi>,
        query: QueryField,
        results: ResultsContainer,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            omdb,
            query,
            results,
            placeholder: placeholder.into(),
        }
    }

    // No cancellation: whichever search finishes last owns the container.
    pub fn submit(&self) -> JoinHandle<()> {
        let query = self.query.value();
        let controller = self.clone();
        tokio::spawn(async move { controller.search(&query).await })
    }

    pub async fn search(&self, query: &str) {
        let blocks = search_blocks(self.omdb.as_ref(), query, &self.placeholder).await;
        self.results.replace(blocks);
    }
}

pub async fn search_blocks(omdb: &dyn OmdbApi, query: &str, placeholder: &str) -> Vec<RenderBlock> {
    match omdb.search(query).await {
        Ok(outcome) => {
            let blocks = render::render_outcome(outcome, placeholder);
            info!("Search '{}' rendered {} block(s)", query, blocks.len());
            blocks
        }
        Err(e) => {
            error!("Search '{}' failed: {:?}", query, e);
            render::render_failure()
        }
    }
}
