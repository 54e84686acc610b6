pub mod history;
pub mod identity;
pub mod screening;
pub mod search;

pub use history::{HistoryEntry, HistoryPage, DEFAULT_HISTORY_LIMIT};
pub use identity::{Credentials, Identity, Registration};
pub use screening::{ResumeFile, ScreeningResult, UploadResponse};
pub use search::{SearchMatch, SearchResponse};
