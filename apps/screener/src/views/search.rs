#![allow(dead_code)]

use std::fmt::Write as _;

use tracing::info;

use crate::api::ApiError;
use crate::lifecycle::{Begin, RequestState, Submission};
use crate::models::{SearchMatch, SearchResponse};
use crate::state::AppState;

pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const NO_RESULTS: &str = "No results found.";

/// Matches for one keyword, replaced wholesale by the next search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub keyword: String,
    pub matches: Vec<SearchMatch>,
}

pub struct SearchView {
    state: AppState,
    keyword: String,
    /// Keyword of the request in flight.
    pending: Option<String>,
    request: RequestState<SearchOutcome>,
}

impl SearchView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            keyword: String::new(),
            pending: None,
            request: RequestState::Idle,
        }
    }

    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword = keyword.to_string();
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn request(&self) -> &RequestState<SearchOutcome> {
        &self.request
    }

    pub fn matches(&self) -> &[SearchMatch] {
        self.request
            .succeeded()
            .map(|o| o.matches.as_slice())
            .unwrap_or(&[])
    }

    pub fn can_submit(&self) -> bool {
        !self.request.is_submitting()
    }

    /// An empty keyword is a no-op and leaves earlier results on screen. Anything
    /// else, surrounding spaces included, goes out as typed.
    pub fn begin(&mut self) -> Begin<String> {
        if !self.can_submit() || self.keyword.is_empty() {
            return Begin::Skipped;
        }
        if !self.state.session.is_authenticated() {
            self.request = RequestState::Unauthorized;
            return Begin::Unauthorized;
        }

        let keyword = self.keyword.clone();
        self.pending = Some(keyword.clone());
        self.request = RequestState::Submitting;
        Begin::Send(keyword)
    }

    pub fn finish(&mut self, outcome: Result<SearchResponse, ApiError>) -> Submission {
        let keyword = self.pending.take().unwrap_or_default();
        let outcome = outcome.map(|response| SearchOutcome {
            keyword,
            matches: response.matches,
        });
        self.request = RequestState::settle(outcome, SEARCH_FAILED);
        match &self.request {
            RequestState::Succeeded(outcome) => info!(
                "Search for '{}' returned {} matches",
                outcome.keyword,
                outcome.matches.len()
            ),
            RequestState::Unauthorized => self.state.session.invalidate(),
            _ => {}
        }
        Submission::from(&self.request)
    }

    pub async fn submit(&mut self) -> Submission {
        match self.begin() {
            Begin::Skipped => Submission::Skipped,
            Begin::Unauthorized => Submission::Unauthorized,
            Begin::Send(keyword) => {
                let backend = self.state.backend.clone();
                let outcome = backend.search(&keyword).await;
                self.finish(outcome)
            }
        }
    }

    pub fn reset(&mut self) {
        self.keyword.clear();
        self.pending = None;
        self.request = RequestState::Idle;
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Search Resumes\n");
        let _ = writeln!(out, "Keyword: {}", self.keyword);
        if self.request.is_submitting() {
            out.push_str("[Searching...] (disabled)\n");
        } else {
            out.push_str("[Search]\n");
        }

        match &self.request {
            RequestState::Succeeded(outcome) if outcome.matches.is_empty() => {
                let _ = writeln!(out, "\n{NO_RESULTS}");
            }
            RequestState::Succeeded(outcome) => {
                out.push_str("\nSearch Results\n");
                for m in &outcome.matches {
                    let _ = writeln!(out, "- 📄 File: {}", m.filename);
                    let _ = writeln!(out, "  Extract: {}", m.extract);
                }
            }
            RequestState::Failed(message) => {
                let _ = writeln!(out, "\n{message}");
            }
            RequestState::Idle | RequestState::Submitting | RequestState::Unauthorized => {}
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{app_state, logged_in_state, Call, Reply};

    fn list_items(page: &str) -> usize {
        page.lines().filter(|l| l.starts_with("- ")).count()
    }

    #[tokio::test]
    async fn test_single_match_renders_one_item() {
        let (state, backend) = logged_in_state().await;
        backend.index("java", &[("a.pdf", "5 years Java")]);
        let mut view = SearchView::new(state);
        view.set_keyword("java");

        assert_eq!(view.submit().await, Submission::Succeeded);
        assert_eq!(backend.calls(), [Call::Search("java".to_string())]);

        let page = view.render();
        assert_eq!(list_items(&page), 1);
        assert!(page.contains("File: a.pdf"));
        assert!(page.contains("Extract: 5 years Java"));
        assert!(!page.contains(NO_RESULTS));
    }

    #[tokio::test]
    async fn test_matches_keep_server_order() {
        let (state, backend) = logged_in_state().await;
        backend.index("rust", &[("z.pdf", "rust 1"), ("a.pdf", "rust 2"), ("m.pdf", "rust 3")]);
        let mut view = SearchView::new(state);
        view.set_keyword("rust");
        view.submit().await;

        let names: Vec<_> = view.matches().iter().map(|m| m.filename.as_str()).collect();
        assert_eq!(names, ["z.pdf", "a.pdf", "m.pdf"]);
        assert_eq!(list_items(&view.render()), 3);
    }

    #[tokio::test]
    async fn test_zero_matches_shows_no_results() {
        let (state, _) = logged_in_state().await;
        let mut view = SearchView::new(state);
        view.set_keyword("cobol");

        assert_eq!(view.submit().await, Submission::Succeeded);
        let page = view.render();
        assert!(page.contains(NO_RESULTS));
        assert_eq!(list_items(&page), 0);
    }

    #[tokio::test]
    async fn test_no_results_hidden_while_in_flight() {
        let (state, _) = logged_in_state().await;
        let mut view = SearchView::new(state);
        view.set_keyword("cobol");
        view.submit().await;

        assert!(matches!(view.begin(), Begin::Send(_)));
        let page = view.render();
        assert!(!page.contains(NO_RESULTS));
        assert!(page.contains("[Searching...] (disabled)"));
        assert!(matches!(view.begin(), Begin::Skipped));
    }

    #[tokio::test]
    async fn test_idle_view_shows_no_indicator() {
        let (state, _) = logged_in_state().await;
        let mut view = SearchView::new(state);
        view.set_keyword("java");
        assert!(!view.render().contains(NO_RESULTS));
    }

    #[tokio::test]
    async fn test_empty_keyword_sends_nothing_and_keeps_results() {
        let (state, backend) = logged_in_state().await;
        backend.index("java", &[("a.pdf", "5 years Java")]);
        let mut view = SearchView::new(state);
        view.set_keyword("java");
        view.submit().await;

        view.set_keyword("");
        assert_eq!(view.submit().await, Submission::Skipped);
        assert_eq!(backend.network_calls(), 1);
        assert_eq!(view.matches().len(), 1);
        assert!(view.render().contains("File: a.pdf"));
    }

    #[tokio::test]
    async fn test_new_search_replaces_matches() {
        let (state, backend) = logged_in_state().await;
        backend.index("java", &[("a.pdf", "5 years Java")]);
        backend.index("go", &[("b.pdf", "Go"), ("c.pdf", "Golang")]);
        let mut view = SearchView::new(state);

        view.set_keyword("java");
        view.submit().await;
        view.set_keyword("go");
        view.submit().await;

        let names: Vec<_> = view.matches().iter().map(|m| m.filename.as_str()).collect();
        assert_eq!(names, ["b.pdf", "c.pdf"]);
    }

    #[tokio::test]
    async fn test_unauthorized_renders_no_panel() {
        let (state, backend) = logged_in_state().await;
        backend.reply_to_search(Some(Reply::Unauthorized));
        let session = state.session.clone();
        let mut view = SearchView::new(state);
        view.set_keyword("java");

        assert_eq!(view.submit().await, Submission::Unauthorized);
        assert!(!session.is_authenticated());
        let page = view.render();
        assert!(!page.contains("Search Results"));
        assert!(!page.contains(NO_RESULTS));
    }

    #[tokio::test]
    async fn test_failure_shows_generic_message() {
        let (state, backend) = logged_in_state().await;
        backend.reply_to_search(Some(Reply::Status(502)));
        let mut view = SearchView::new(state);
        view.set_keyword("java");

        assert_eq!(view.submit().await, Submission::Failed);
        let page = view.render();
        assert!(page.contains(SEARCH_FAILED));
        assert!(!page.contains(NO_RESULTS));
    }

    #[tokio::test]
    async fn test_without_session_no_request_is_sent() {
        let (state, backend) = app_state();
        let mut view = SearchView::new(state);
        view.set_keyword("java");

        assert_eq!(view.submit().await, Submission::Unauthorized);
        assert_eq!(backend.network_calls(), 0);
    }

    #[tokio::test]
    async fn test_keyword_is_sent_as_typed() {
        let (state, backend) = logged_in_state().await;
        let mut view = SearchView::new(state);
        view.set_keyword(" c++ ");
        assert_eq!(view.submit().await, Submission::Succeeded);
        assert_eq!(backend.calls(), [Call::Search(" c++ ".to_string())]);
    }

    #[tokio::test]
    async fn test_whitespace_keyword_is_not_empty() {
        let (state, backend) = logged_in_state().await;
        let mut view = SearchView::new(state);
        view.set_keyword("   ");
        assert_eq!(view.submit().await, Submission::Succeeded);
        assert_eq!(backend.calls(), [Call::Search("   ".to_string())]);
    }
}
