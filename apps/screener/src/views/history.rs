use std::fmt::Write as _;

use tracing::info;

use crate::api::ApiError;
use crate::lifecycle::{Begin, RequestState, Submission};
use crate::models::{HistoryEntry, HistoryPage, DEFAULT_HISTORY_LIMIT};
use crate::state::AppState;

pub const HISTORY_FAILED: &str = "Failed to load history. Please try again.";
pub const NO_HISTORY: &str = "No screenings yet.";

/// Which slice of the history to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

/// The user's past screenings, one page at a time.
pub struct HistoryView {
    state: AppState,
    limit: u32,
    /// 1-based page to load on the next submit.
    page: u32,
    request: RequestState<HistoryPage>,
}

impl HistoryView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            limit: DEFAULT_HISTORY_LIMIT,
            page: 1,
            request: RequestState::Idle,
        }
    }

    /// Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    #[cfg(test)]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[cfg(test)]
    pub fn request(&self) -> &RequestState<HistoryPage> {
        &self.request
    }

    pub fn begin(&mut self) -> Begin<PageRequest> {
        if self.request.is_submitting() {
            return Begin::Skipped;
        }
        if !self.state.session.is_authenticated() {
            self.request = RequestState::Unauthorized;
            return Begin::Unauthorized;
        }
        self.request = RequestState::Submitting;
        Begin::Send(PageRequest {
            limit: self.limit,
            offset: (self.page - 1).saturating_mul(self.limit),
        })
    }

    pub fn finish(&mut self, outcome: Result<HistoryPage, ApiError>) -> Submission {
        self.request = RequestState::settle(outcome, HISTORY_FAILED);
        match &self.request {
            RequestState::Succeeded(page) => {
                info!("Loaded {} of {} history entries", page.items.len(), page.total)
            }
            RequestState::Unauthorized => self.state.session.invalidate(),
            _ => {}
        }
        Submission::from(&self.request)
    }

    pub async fn submit(&mut self) -> Submission {
        match self.begin() {
            Begin::Skipped => Submission::Skipped,
            Begin::Unauthorized => Submission::Unauthorized,
            Begin::Send(PageRequest { limit, offset }) => {
                let backend = self.state.backend.clone();
                let outcome = backend.history(limit, offset).await;
                self.finish(outcome)
            }
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
        self.request = RequestState::Idle;
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Screening History\n");
        match &self.request {
            RequestState::Idle => out.push_str("[Load History]\n"),
            RequestState::Submitting => out.push_str("[Loading...] (disabled)\n"),
            RequestState::Succeeded(page) => match page.range() {
                None => {
                    let _ = writeln!(out, "\n{NO_HISTORY}");
                }
                Some((first, last)) => {
                    let _ = writeln!(out, "\nShowing {first}-{last} of {}", page.total);
                    for entry in &page.items {
                        out.push_str(&render_entry(entry));
                    }
                    if page.has_next() {
                        let _ = writeln!(out, "More: history {}", self.page + 1);
                    }
                }
            },
            RequestState::Failed(message) => {
                let _ = writeln!(out, "\n{message}");
            }
            RequestState::Unauthorized => {}
        }
        out
    }
}

fn render_entry(entry: &HistoryEntry) -> String {
    let mut line = format!("- 📄 {} · {}", entry.filename, entry.score_label());
    if let Some(processed_at) = &entry.processed_at {
        let _ = write!(line, " · {processed_at}");
    }
    line.push('\n');
    if let Some(job_title) = entry.job_title.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(line, "  Job: {job_title}");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{app_state, logged_in_state, pdf, Call, Reply};
    use crate::views::ScreeningView;

    #[tokio::test]
    async fn test_screenings_show_up_newest_first() {
        let (state, backend) = logged_in_state().await;
        let mut screening = ScreeningView::new(state.clone());
        for name in ["first.pdf", "second.pdf"] {
            screening.select_resume(pdf(name));
            screening.set_job_description("Rust engineer");
            screening.submit().await;
        }

        let mut view = HistoryView::new(state);
        assert_eq!(view.submit().await, Submission::Succeeded);
        assert_eq!(
            backend.calls().last(),
            Some(&Call::History {
                limit: DEFAULT_HISTORY_LIMIT,
                offset: 0
            })
        );

        let page = view.render();
        assert!(page.contains("Showing 1-2 of 2"));
        let second = page.find("second.pdf").unwrap();
        let first = page.find("first.pdf").unwrap();
        assert!(second < first);
        assert!(page.contains("85%"));
        assert!(page.contains("Job: Rust engineer"));
        assert!(!page.contains("More:"));
    }

    #[tokio::test]
    async fn test_page_number_sets_offset() {
        let (state, backend) = logged_in_state().await;
        let mut view = HistoryView::new(state);
        view.set_page(3);
        view.submit().await;
        assert_eq!(
            backend.calls(),
            [Call::History {
                limit: DEFAULT_HISTORY_LIMIT,
                offset: 2 * DEFAULT_HISTORY_LIMIT
            }]
        );

        view.set_page(0);
        assert_eq!(view.page(), 1);
    }

    #[tokio::test]
    async fn test_more_link_when_pages_remain() {
        let (state, backend) = logged_in_state().await;
        backend.reply_to_history(Some(Reply::Ok(HistoryPage {
            items: vec![
                HistoryEntry {
                    filename: "a.pdf".to_string(),
                    ..Default::default()
                };
                10
            ],
            total: 25,
            limit: 10,
            offset: 0,
        })));
        let mut view = HistoryView::new(state);
        view.submit().await;

        let page = view.render();
        assert!(page.contains("Showing 1-10 of 25"));
        assert!(page.contains("More: history 2"));
        assert!(page.contains("a.pdf · N/A"));
    }

    #[tokio::test]
    async fn test_empty_history() {
        let (state, _) = logged_in_state().await;
        let mut view = HistoryView::new(state);
        assert!(!view.render().contains(NO_HISTORY));

        view.submit().await;
        assert!(view.render().contains(NO_HISTORY));
    }

    #[tokio::test]
    async fn test_without_session_no_request_is_sent() {
        let (state, backend) = app_state();
        let mut view = HistoryView::new(state);
        assert_eq!(view.submit().await, Submission::Unauthorized);
        assert_eq!(backend.network_calls(), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let (state, backend) = logged_in_state().await;
        backend.reply_to_history(Some(Reply::Unauthorized));
        let session = state.session.clone();
        let mut view = HistoryView::new(state);

        assert_eq!(view.submit().await, Submission::Unauthorized);
        assert!(!session.is_authenticated());
        assert!(!view.render().contains("Showing"));
    }

    #[tokio::test]
    async fn test_failure_shows_generic_message() {
        let (state, backend) = logged_in_state().await;
        backend.reply_to_history(Some(Reply::Status(500)));
        let mut view = HistoryView::new(state);

        assert_eq!(view.submit().await, Submission::Failed);
        let page = view.render();
        assert!(page.contains(HISTORY_FAILED));
        assert!(!page.contains("stub failure"));
    }

    #[tokio::test]
    async fn test_in_flight_blocks_second_load() {
        let (state, _) = logged_in_state().await;
        let mut view = HistoryView::new(state);
        assert!(matches!(view.begin(), Begin::Send(_)));
        assert!(view.render().contains("[Loading...] (disabled)"));
        assert!(matches!(view.begin(), Begin::Skipped));
    }

    #[tokio::test]
    async fn test_reset_returns_to_first_page() {
        let (state, _) = logged_in_state().await;
        let mut view = HistoryView::new(state);
        view.set_page(4);
        view.submit().await;
        view.reset();
        assert_eq!(view.page(), 1);
        assert_eq!(view.request(), &RequestState::Idle);
    }
}
