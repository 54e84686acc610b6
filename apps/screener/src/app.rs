//! Page shell: the client's single "tab". Owns navigation and every view, and turns
//! view outcomes into navigation.

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::api::{ApiError, HealthStatus};
use crate::errors::{AuthError, SelectionError};
use crate::lifecycle::Submission;
use crate::models::Identity;
use crate::routes::{
    Location, Navigator, Route, LANDING_PATH, LOGIN_PATH, REGISTER_PATH, SCREENER_PATH,
};
use crate::state::AppState;
use crate::views::content::{self, FOOTER, LOGO};
use crate::views::{
    render_tab_bar, HistoryView, LoginForm, RegisterForm, ScreeningView, SearchView, Tab,
};

pub struct App {
    state: AppState,
    navigator: Navigator,
    tab: Tab,
    screening: ScreeningView,
    search: SearchView,
    history: HistoryView,
    login: LoginForm,
    register: RegisterForm,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            navigator: Navigator::default(),
            tab: Tab::default(),
            screening: ScreeningView::new(state.clone()),
            search: SearchView::new(state.clone()),
            history: HistoryView::new(state.clone()),
            login: LoginForm::new(state.clone()),
            register: RegisterForm::new(state.clone()),
            state,
        }
    }

    #[cfg(test)]
    pub fn location(&self) -> &Location {
        self.navigator.current()
    }

    #[cfg(test)]
    pub fn pending_destination(&self) -> Option<&Location> {
        self.navigator.pending_destination()
    }

    #[cfg(test)]
    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.state.session.current_user()
    }

    #[cfg(test)]
    pub fn search(&self) -> &SearchView {
        &self.search
    }

    pub fn navigate(&mut self, path: &str) {
        let user = self.state.session.current_user();
        let location = self.navigator.navigate(path, user.as_ref()).clone();
        info!("Navigated to {}", location.path);
        self.apply_tab_from(&location);
    }

    /// Switches the tabbed section. Protected tabs go through the route guard
    /// with `/screener?tab=<key>` as the destination.
    pub fn select_tab(&mut self, tab: Tab) {
        if tab.requires_session() {
            self.navigate(&format!("{SCREENER_PATH}?tab={}", tab.key()));
            return;
        }
        if !matches!(self.navigator.route(), Route::Landing | Route::Screener) {
            self.navigate(LANDING_PATH);
        }
        self.tab = tab;
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<Identity, AuthError> {
        if self.navigator.route() != &Route::Login {
            self.navigate(LOGIN_PATH);
        }
        self.login.fill(username, password);
        let identity = self.login.submit().await?;
        self.resume_after_login(&identity);
        Ok(identity)
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        if self.navigator.route() != &Route::Register {
            self.navigate(REGISTER_PATH);
        }
        self.register.fill(username, email, password);
        let identity = self.register.submit().await?;
        self.resume_after_login(&identity);
        Ok(identity)
    }

    /// Ends the session and drops every form and result.
    pub async fn logout(&mut self) {
        self.state.session.logout().await;
        self.screening.reset();
        self.search.reset();
        self.history.reset();
        self.login.reset();
        self.register.reset();
        self.tab = Tab::default();
        self.navigate(LANDING_PATH);
    }

    pub async fn select_resume(&mut self, path: &Path) -> Result<(), SelectionError> {
        self.screening.select_resume_path(path).await
    }

    pub fn set_job_description(&mut self, text: &str) {
        self.screening.set_job_description(text);
    }

    pub async fn submit_screening(&mut self) -> Submission {
        let submission = self.screening.submit().await;
        if submission == Submission::Unauthorized {
            self.redirect_to_login(Tab::Screen);
        }
        submission
    }

    pub async fn submit_search(&mut self, keyword: &str) -> Submission {
        self.search.set_keyword(keyword);
        let submission = self.search.submit().await;
        if submission == Submission::Unauthorized {
            self.redirect_to_login(Tab::Search);
        }
        submission
    }

    /// Loads one page (1-based) of past screenings into the History tab.
    pub async fn load_history(&mut self, page: u32) -> Submission {
        self.history.set_page(page);
        let submission = self.history.submit().await;
        if submission == Submission::Unauthorized {
            self.redirect_to_login(Tab::History);
        }
        submission
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.state.backend.health().await
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let who = match self.current_user() {
            Some(user) => format!("Signed in as {}", user.username),
            None => "Not signed in".to_string(),
        };
        let _ = writeln!(out, "{LOGO}  ({who})");

        let location = self.navigator.current();
        match location.route {
            Route::Login | Route::Register => {
                let form = match location.route {
                    Route::Login => self.login.render(),
                    _ => self.register.render(),
                };
                out.push_str(&form);
                if let Some(pending) = self.navigator.pending_destination() {
                    let _ = writeln!(out, "(continues to {} after sign-in)", pending.path);
                }
            }
            Route::NotFound => {
                let _ = writeln!(out, "{}", content::not_found(&location.path));
            }
            Route::Landing | Route::Screener => {
                let _ = writeln!(out, "{}\n", render_tab_bar(self.tab));
                match self.tab {
                    Tab::Screen => out.push_str(&self.screening.render()),
                    Tab::Search => out.push_str(&self.search.render()),
                    Tab::History => out.push_str(&self.history.render()),
                    tab => {
                        if let Some(page) = content::static_page(tab) {
                            let _ = writeln!(out, "{page}");
                        }
                    }
                }
                // The landing page is full-bleed and has no footer.
                if self.tab != Tab::Landing {
                    let _ = writeln!(out, "\n{FOOTER}");
                }
            }
        }
        out
    }

    fn resume_after_login(&mut self, identity: &Identity) {
        let location = self.navigator.resume_after_login(Some(identity)).clone();
        info!("Resuming at {}", location.path);
        self.apply_tab_from(&location);
    }

    fn redirect_to_login(&mut self, tab: Tab) {
        let from = Location::new(&format!("{SCREENER_PATH}?tab={}", tab.key()));
        self.navigator.redirect_to_login(from);
    }

    fn apply_tab_from(&mut self, location: &Location) {
        if let Some(tab) = Tab::from_query(&location.path) {
            if location.route == Route::Screener || !tab.requires_session() {
                self.tab = tab;
            }
        }
    }
}
