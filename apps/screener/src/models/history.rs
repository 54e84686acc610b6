use serde::{Deserialize, Serialize};

use super::screening::score_label;

/// Page size the backend uses when none is given.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// One past screening, newest first in a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub filename: String,
    /// First 100 characters of the job description screened against.
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub processed_at: Option<String>,
}

impl HistoryEntry {
    pub fn score_label(&self) -> String {
        score_label(self.match_score)
    }
}

/// Body of `GET /api/history`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub items: Vec<HistoryEntry>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl HistoryPage {
    /// 1-based index range shown, e.g. `(11, 20)`; `None` for an empty page.
    pub fn range(&self) -> Option<(u64, u64)> {
        if self.items.is_empty() {
            return None;
        }
        let first = u64::from(self.offset) + 1;
        Some((first, first + self.items.len() as u64 - 1))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.offset) + (self.items.len() as u64) < self.total
    }
}
