//! Application store: the state container owned by the front end's root.
//!
//! DESIGN
//! ======
//! `AppState` composes the auth and course slices; [`reduce`] routes each
//! [`Action`] to its slice reducer. [`Store`] wraps the state in an
//! `Arc<RwLock<_>>` and runs the async operations: dispatch `Pending`, call
//! the backend with no lock held, dispatch the outcome.
//!
//! ERROR HANDLING
//! ==============
//! Operations never return errors. Every failure is converted to a display
//! string at the operation boundary and lands in the slice's error field.
//! Session storage failures are logged and ignored.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::net::api::Backend;
use crate::net::error::ApiError;
use crate::net::types::{AuthResponse, CourseId, LoginRequest, RegisterRequest, UserType};
use crate::session::SessionPersistence;
use crate::state::auth::{self, AuthAction, AuthState, LOGIN_FAILED, REGISTRATION_FAILED, SignedIn};
use crate::state::courses::{self, CoursesAction, CoursesState, ENROLL_FAILED, FETCH_FAILED, UNENROLL_FAILED};
use crate::state::lifecycle::{Lifecycle, RequestTicket};

// =============================================================================
// STATE + ROOT REDUCER
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub auth: AuthState,
    pub courses: CoursesState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Auth(AuthAction),
    Courses(CoursesAction),
}

/// Root reducer.
pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::Auth(action) => auth::reduce(&mut state.auth, action),
        Action::Courses(action) => courses::reduce(&mut state.courses, action),
    }
}

#[derive(Clone, Copy, Debug)]
enum SignInKind {
    Login,
    Register,
}

impl SignInKind {
    fn action(self, ticket: RequestTicket, phase: Lifecycle<SignedIn>) -> AuthAction {
        match self {
            Self::Login => AuthAction::Login { ticket, phase },
            Self::Register => AuthAction::Register { ticket, phase },
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            Self::Login => LOGIN_FAILED,
            Self::Register => REGISTRATION_FAILED,
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Shared handle to the application state and the operations that mutate it.
/// Clones share the same state.
#[derive(Clone)]
pub struct Store {
    state: Arc<RwLock<AppState>>,
    backend: Arc<dyn Backend>,
    session: Arc<dyn SessionPersistence>,
}

impl Store {
    /// Create a store, rehydrating the token from `session`.
    pub fn new(backend: Arc<dyn Backend>, session: Arc<dyn SessionPersistence>) -> Self {
        let token = match session.load_token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "failed to load persisted session; starting signed out");
                None
            }
        };
        if token.is_some() {
            debug!("rehydrated persisted session token");
        }
        let state = AppState { auth: AuthState::restored(token), courses: CoursesState::default() };
        Self { state: Arc::new(RwLock::new(state)), backend, session }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Current bearer token, if signed in.
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.auth.token.clone()
    }

    /// Apply a raw action. Operations below are the usual entry points.
    pub async fn dispatch(&self, action: Action) {
        reduce(&mut *self.state.write().await, action);
    }

    // -------------------------------------------------------------------------
    // auth
    // -------------------------------------------------------------------------

    /// Sign in with username and password.
    pub async fn login(&self, username: &str, password: &str) {
        let ticket = self.begin_sign_in(SignInKind::Login).await;
        let result = self.backend.login(&LoginRequest { username, password }).await;
        self.finish_sign_in(SignInKind::Login, ticket, username, result).await;
    }

    /// Create an account; on success the user is signed in as after a login.
    pub async fn register(&self, username: &str, email: &str, password: &str, user_type: UserType) {
        let ticket = self.begin_sign_in(SignInKind::Register).await;
        let request = RegisterRequest { username, email, password, user_type };
        let result = self.backend.register(&request).await;
        self.finish_sign_in(SignInKind::Register, ticket, username, result).await;
    }

    /// Drop the session locally and forget the persisted token. No network call.
    ///
    /// The course collection belongs to the signed-out user and is cleared too.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        auth::reduce(&mut state.auth, AuthAction::Logout);
        courses::reduce(&mut state.courses, CoursesAction::Reset);
        if let Err(e) = self.session.clear_token() {
            warn!(error = %e, "failed to remove persisted session token");
        }
        info!("signed out");
    }

    async fn begin_sign_in(&self, kind: SignInKind) -> RequestTicket {
        let mut state = self.state.write().await;
        let ticket = state.auth.next_ticket();
        auth::reduce(&mut state.auth, kind.action(ticket, Lifecycle::Pending));
        ticket
    }

    async fn finish_sign_in(
        &self,
        kind: SignInKind,
        ticket: RequestTicket,
        username: &str,
        result: Result<AuthResponse, ApiError>,
    ) {
        let phase = match result {
            Ok(resp) => Lifecycle::Fulfilled(SignedIn {
                token: resp.access,
                user_type: resp.user_type,
                username: username.to_owned(),
            }),
            Err(e) => {
                warn!(?kind, error = %e, "sign-in failed");
                Lifecycle::Rejected(e.display_message(kind.fallback()))
            }
        };

        let mut state = self.state.write().await;
        if !state.auth.is_current(ticket) {
            debug!(?kind, "dropping superseded sign-in outcome");
            return;
        }
        let persist = match &phase {
            Lifecycle::Fulfilled(signed_in) => Some(signed_in.token.clone()),
            _ => None,
        };
        auth::reduce(&mut state.auth, kind.action(ticket, phase));
        if let Some(token) = persist {
            if let Err(e) = self.session.save_token(&token) {
                warn!(error = %e, "failed to persist session token");
            }
            info!(username, user_type = ?state.auth.user_type, "signed in");
        }
    }

    // -------------------------------------------------------------------------
    // courses
    // -------------------------------------------------------------------------

    /// Replace the course collection with the backend's current list.
    pub async fn fetch_courses(&self) {
        let (ticket, token) = {
            let mut state = self.state.write().await;
            let ticket = state.courses.next_ticket();
            courses::reduce(&mut state.courses, CoursesAction::Fetch { ticket, phase: Lifecycle::Pending });
            (ticket, state.auth.token.clone())
        };

        let result = match token {
            Some(token) => self.backend.list_courses(&token).await,
            None => Err(ApiError::Unauthenticated),
        };
        let phase = match result {
            Ok(items) => {
                debug!(count = items.len(), "fetched courses");
                Lifecycle::Fulfilled(items)
            }
            Err(e) => {
                warn!(error = %e, "course fetch failed");
                Lifecycle::Rejected(e.display_message(FETCH_FAILED))
            }
        };
        self.dispatch(Action::Courses(CoursesAction::Fetch { ticket, phase })).await;
    }

    /// Enroll in `course_id`; marks the stored entry on success.
    pub async fn enroll_course(&self, course_id: CourseId) {
        self.change_enrollment(course_id, true).await;
    }

    /// Leave `course_id`; clears the stored entry's flag on success.
    pub async fn unenroll_course(&self, course_id: CourseId) {
        self.change_enrollment(course_id, false).await;
    }

    /// Clear both the list and enrollment errors.
    pub async fn clear_errors(&self) {
        self.dispatch(Action::Courses(CoursesAction::ClearErrors)).await;
    }

    async fn change_enrollment(&self, course_id: CourseId, enroll: bool) {
        let wrap = |phase| if enroll { CoursesAction::Enroll(phase) } else { CoursesAction::Unenroll(phase) };
        let token = {
            let mut state = self.state.write().await;
            courses::reduce(&mut state.courses, wrap(Lifecycle::Pending));
            state.auth.token.clone()
        };

        let result = match (token, enroll) {
            (None, _) => Err(ApiError::Unauthenticated),
            (Some(token), true) => self.backend.enroll(&token, course_id).await,
            (Some(token), false) => self.backend.unenroll(&token, course_id).await,
        };
        let phase = match result {
            Ok(()) => {
                info!(course_id, enroll, "enrollment changed");
                Lifecycle::Fulfilled(course_id)
            }
            Err(e) => {
                warn!(course_id, enroll, error = %e, "enrollment change failed");
                Lifecycle::Rejected(e.display_message(if enroll { ENROLL_FAILED } else { UNENROLL_FAILED }))
            }
        };
        self.dispatch(Action::Courses(wrap(phase))).await;
    }
}
