use tracing::info;

use super::{Location, Route, LANDING_PATH, LOGIN_PATH, SCREENER_PATH};
use crate::models::Identity;

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded {
    Render(Location),
    /// Not logged in: show `to` (the login page) and remember `from`.
    Redirect { to: Location, from: Location },
}

/// Decides whether `requested` may render for `user`. Pure; `Navigator` applies it.
pub fn guard(requested: Location, user: Option<&Identity>) -> Guarded {
    if requested.route.is_protected() && user.is_none() {
        return Guarded::Redirect {
            to: Location::new(LOGIN_PATH),
            from: requested,
        };
    }
    Guarded::Render(requested)
}

/// Current location plus the destination to resume once login succeeds.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Location,
    resume_to: Option<Location>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Location::new(LANDING_PATH),
            resume_to: None,
        }
    }
}

impl Navigator {
    pub fn current(&self) -> &Location {
        &self.current
    }

    pub fn route(&self) -> &Route {
        &self.current.route
    }

    /// The destination recorded by the last redirect to login, if still pending.
    pub fn pending_destination(&self) -> Option<&Location> {
        self.resume_to.as_ref()
    }

    pub fn navigate(&mut self, path: &str, user: Option<&Identity>) -> &Location {
        match guard(Location::new(path), user) {
            Guarded::Render(location) => {
                // Moving between login and register keeps the pending destination.
                if !location.route.is_auth_form() {
                    self.resume_to = None;
                }
                self.current = location;
            }
            Guarded::Redirect { to, from } => self.redirect(to, from),
        }
        &self.current
    }

    /// Sends the user to login, remembering `from`.
    pub fn redirect_to_login(&mut self, from: Location) -> &Location {
        self.redirect(Location::new(LOGIN_PATH), from);
        &self.current
    }

    /// After a successful login or registration: go back to where the user was
    /// headed, or to the screener when nothing was pending.
    pub fn resume_after_login(&mut self, user: Option<&Identity>) -> &Location {
        let destination = self
            .resume_to
            .take()
            .map(|l| l.path)
            .unwrap_or_else(|| SCREENER_PATH.to_string());
        self.navigate(&destination, user)
    }

    fn redirect(&mut self, to: Location, from: Location) {
        info!("Redirecting {} -> {}", from.path, to.path);
        self.resume_to = Some(from);
        self.current = to;
    }
}
