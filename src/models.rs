use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<SearchResult>),
    Rejected(String),
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderBlock {
    MovieItem {
        poster_src: String,
        alt: String,
        title: String,
        year: String,
    },
    Message { text: String },
}
