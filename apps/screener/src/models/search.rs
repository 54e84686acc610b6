use serde::{Deserialize, Serialize};

/// One resume that matched a keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub filename: String,
    #[serde(default)]
    pub extract: String,
}

/// Body of `GET /api/search`. A missing `matches` field means no matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
}
