//! Text renderings of the client's pages. Each view owns its form state and, for
//! the screening and search views, its request lifecycle.

pub mod auth;
pub mod content;
pub mod history;
pub mod screening;
pub mod search;

pub use auth::{LoginForm, RegisterForm};
pub use history::HistoryView;
pub use screening::ScreeningView;
pub use search::SearchView;

/// Sections of the tabbed area. Selected by local state, not by the router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    About,
    Services,
    Contact,
    Screen,
    Search,
    History,
    Landing,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::Home,
        Tab::About,
        Tab::Services,
        Tab::Contact,
        Tab::Screen,
        Tab::Search,
        Tab::History,
        Tab::Landing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::About => "About",
            Tab::Services => "Services",
            Tab::Contact => "Contact",
            Tab::Screen => "Screen Resume",
            Tab::Search => "Search Resumes",
            Tab::History => "History",
            Tab::Landing => "Landing Page",
        }
    }

    /// Short name used in commands and in `?tab=` query strings.
    pub fn key(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::About => "about",
            Tab::Services => "services",
            Tab::Contact => "contact",
            Tab::Screen => "screen",
            Tab::Search => "search",
            Tab::History => "history",
            Tab::Landing => "landing",
        }
    }

    pub fn parse(name: &str) -> Option<Tab> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "screening" => Some(Tab::Screen),
            _ => Tab::ALL.into_iter().find(|t| t.key() == name),
        }
    }

    /// Screening, search and history talk to protected endpoints.
    pub fn requires_session(self) -> bool {
        matches!(self, Tab::Screen | Tab::Search | Tab::History)
    }

    /// Reads `tab=<key>` from the query string of `path`.
    pub fn from_query(path: &str) -> Option<Tab> {
        let (_, query) = path.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "tab")
            .and_then(|(_, value)| Tab::parse(value))
    }
}

/// `Home | [About] | ...` with the active tab bracketed.
pub fn render_tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
