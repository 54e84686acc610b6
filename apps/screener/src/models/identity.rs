use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the backend on login or registration.
/// Only `username` is shown; `id` and `email` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub id: Option<i64>,
    #[allow(dead_code)]
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    #[cfg(test)]
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            id: None,
            email: None,
        }
    }
}

/// Body of `POST /login`.
#[derive(Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

// Hand-written so the password never reaches a log line.
impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /register`.
#[derive(Serialize)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl Registration<'_> {
    /// Every field present. Whitespace counts as present, as it does server-side.
    pub fn is_complete(&self) -> bool {
        [self.username, self.email, self.password]
            .iter()
            .all(|field| !field.is_empty())
    }
}

impl std::fmt::Debug for Registration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
