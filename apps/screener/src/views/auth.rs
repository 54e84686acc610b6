use std::fmt::Write as _;

use crate::errors::AuthError;
use crate::models::Identity;
use crate::state::AppState;

/// Login form. Errors show inline above the fields.
///
/// `submit` borrows the form mutably for the whole request, so a second submit
/// cannot start while one is outstanding.
pub struct LoginForm {
    state: AppState,
    username: String,
    password: String,
    error: Option<String>,
}

impl LoginForm {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            username: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn fill(&mut self, username: &str, password: &str) {
        self.username = username.to_string();
        self.password = password.to_string();
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn submit(&mut self) -> Result<Identity, AuthError> {
        self.error = None;
        let result = self.state.session.login(&self.username, &self.password).await;

        match &result {
            Ok(_) => self.password.clear(),
            Err(e) => self.error = Some(e.to_string()),
        }
        result
    }

    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.error = None;
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Login\n");
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }
        let _ = writeln!(out, "Username: {}", self.username);
        let _ = writeln!(out, "Password: {}", "*".repeat(self.password.chars().count()));
        out.push_str("[Login]\n");
        out.push_str("Don't have an account? Register here: /register\n");
        out
    }
}

/// Registration form. A successful registration also logs the user in.
pub struct RegisterForm {
    state: AppState,
    username: String,
    email: String,
    password: String,
    error: Option<String>,
}

impl RegisterForm {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn fill(&mut self, username: &str, email: &str, password: &str) {
        self.username = username.to_string();
        self.email = email.to_string();
        self.password = password.to_string();
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn submit(&mut self) -> Result<Identity, AuthError> {
        self.error = None;
        let result = self
            .state
            .session
            .register(&self.username, &self.email, &self.password)
            .await;

        match &result {
            Ok(_) => self.password.clear(),
            Err(e) => self.error = Some(e.to_string()),
        }
        result
    }

    pub fn reset(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password.clear();
        self.error = None;
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Register\n");
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }
        let _ = writeln!(out, "Username: {}", self.username);
        let _ = writeln!(out, "Email: {}", self.email);
        let _ = writeln!(out, "Password: {}", "*".repeat(self.password.chars().count()));
        out.push_str("[Register]\n");
        out.push_str("Already have an account? Log in here: /login\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{app_state, PASSWORD};

    #[tokio::test]
    async fn test_failed_login_shows_message_inline() {
        let (state, _) = app_state();
        let mut form = LoginForm::new(state.clone());
        form.fill("ada", "wrong");

        assert!(form.submit().await.is_err());
        assert_eq!(form.error(), Some("Invalid username or password"));
        assert!(form.render().contains("! Invalid username or password"));
        assert!(!state.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_successful_login_clears_error_and_password() {
        let (state, _) = app_state();
        let mut form = LoginForm::new(state.clone());
        form.fill("ada", "wrong");
        let _ = form.submit().await;

        form.fill("ada", PASSWORD);
        let identity = form.submit().await.unwrap();
        assert_eq!(identity.username, "ada");
        assert_eq!(form.error(), None);
        assert!(form.render().contains("Password: \n"));
        assert!(state.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_password_is_masked() {
        let (state, _) = app_state();
        let mut form = LoginForm::new(state);
        form.fill("ada", "hunter2");
        let page = form.render();
        assert!(page.contains("Password: *******"));
        assert!(!page.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_register_error_inline() {
        let (state, _) = app_state();
        let mut form = RegisterForm::new(state);
        form.fill("taken", "t@example.com", "pw");

        assert!(form.submit().await.is_err());
        assert!(form.render().contains("! Username or email already exists"));
    }

    #[tokio::test]
    async fn test_register_missing_fields_inline() {
        let (state, backend) = app_state();
        let mut form = RegisterForm::new(state);
        form.fill("grace", "", "pw");

        assert_eq!(form.submit().await.unwrap_err(), AuthError::MissingFields);
        assert_eq!(form.error(), Some("Missing required fields"));
        assert_eq!(backend.network_calls(), 0);
    }
}
