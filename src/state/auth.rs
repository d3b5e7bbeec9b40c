//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by route gating and by every authenticated course call. The token is
//! the single source of truth for "signed in": it is set iff the user is
//! authenticated.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::lifecycle::{Lifecycle, RequestTicket};
use crate::net::types::UserType;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Identity returned by a successful login or registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedIn {
    pub token: String,
    pub user_type: UserType,
    pub username: String,
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user_type: Option<UserType>,
    pub username: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    latest: RequestTicket,
}

impl AuthState {
    /// State rehydrated from a persisted token. User type and name are not
    /// persisted and stay unknown until the next login.
    #[must_use]
    pub fn restored(token: Option<String>) -> Self {
        Self { token, ..Self::default() }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn is_instructor(&self) -> bool {
        self.user_type == Some(UserType::Instructor)
    }

    /// Ticket the next login/registration should carry.
    #[must_use]
    pub fn next_ticket(&self) -> RequestTicket {
        self.latest.next()
    }

    /// Whether an outcome for `ticket` would still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest == ticket
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Login { ticket: RequestTicket, phase: Lifecycle<SignedIn> },
    Register { ticket: RequestTicket, phase: Lifecycle<SignedIn> },
    Logout,
}

/// Apply `action` to `state`.
pub fn reduce(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::Login { ticket, phase } | AuthAction::Register { ticket, phase } => {
            apply_sign_in(state, ticket, phase);
        }
        AuthAction::Logout => {
            state.token = None;
            state.user_type = None;
            state.username = None;
            state.loading = false;
            // Outcomes of sign-ins still in flight must not resurrect the session.
            state.latest = state.latest.next();
        }
    }
}

fn apply_sign_in(state: &mut AuthState, ticket: RequestTicket, phase: Lifecycle<SignedIn>) {
    if phase.is_pending() {
        state.latest = ticket;
        state.loading = true;
        state.error = None;
        return;
    }
    if !state.is_current(ticket) {
        return;
    }
    state.loading = false;
    match phase {
        Lifecycle::Fulfilled(signed_in) => {
            state.token = Some(signed_in.token);
            state.user_type = Some(signed_in.user_type);
            state.username = Some(signed_in.username);
            state.error = None;
        }
        Lifecycle::Rejected(message) => {
            state.error = Some(message);
        }
        Lifecycle::Pending => {}
    }
}
