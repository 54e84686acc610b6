pub mod guard;

pub use guard::Navigator;

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const SCREENER_PATH: &str = "/screener";

/// Client-side routes. The tabbed sections inside `Landing` and `Screener` are
/// local UI state, not routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Screener,
    NotFound,
}

impl Route {
    /// Resolves a path, ignoring query string, fragment and a trailing slash.
    pub fn resolve(path: &str) -> Route {
        let bare = path.split(['?', '#']).next().unwrap_or_default();
        let bare = match bare.trim_end_matches('/') {
            "" => LANDING_PATH,
            trimmed => trimmed,
        };
        match bare {
            LANDING_PATH => Route::Landing,
            LOGIN_PATH => Route::Login,
            REGISTER_PATH => Route::Register,
            SCREENER_PATH => Route::Screener,
            _ => Route::NotFound,
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Screener)
    }

    pub fn is_auth_form(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// A place the client can be: the exact path as requested plus its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub route: Route,
}

impl Location {
    pub fn new(path: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let route = Route::resolve(&path);
        Self { path, route }
    }
}
