//! Course list state and its reducer.

#[cfg(test)]
#[path = "courses_test.rs"]
mod courses_test;

use super::lifecycle::{Lifecycle, RequestTicket};
use crate::net::types::{CourseId, CourseSummary};

pub const FETCH_FAILED: &str = "Failed to fetch courses";
pub const ENROLL_FAILED: &str = "Failed to enroll in course";
pub const UNENROLL_FAILED: &str = "Error unenrolling from course";

/// Fetched course collection plus request flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoursesState {
    pub items: Vec<CourseSummary>,
    pub loading: bool,
    /// Failure of the last list fetch.
    pub error: Option<String>,
    /// Failure of the last enroll/unenroll, kept apart from list errors.
    pub enrollment_error: Option<String>,
    latest: RequestTicket,
}

impl CoursesState {
    /// Ticket the next fetch should carry.
    #[must_use]
    pub fn next_ticket(&self) -> RequestTicket {
        self.latest.next()
    }

    #[must_use]
    pub fn get(&self, course_id: CourseId) -> Option<&CourseSummary> {
        self.items.iter().find(|c| c.id == course_id)
    }

    pub fn enrolled(&self) -> impl Iterator<Item = &CourseSummary> {
        self.items.iter().filter(|c| c.is_enrolled)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoursesAction {
    Fetch { ticket: RequestTicket, phase: Lifecycle<Vec<CourseSummary>> },
    Enroll(Lifecycle<CourseId>),
    Unenroll(Lifecycle<CourseId>),
    ClearErrors,
    /// Drop the collection and invalidate any fetch still in flight.
    Reset,
}

/// Apply `action` to `state`.
pub fn reduce(state: &mut CoursesState, action: CoursesAction) {
    match action {
        CoursesAction::Fetch { ticket, phase } => apply_fetch(state, ticket, phase),
        CoursesAction::Enroll(phase) => apply_enrollment(state, phase, true),
        CoursesAction::Unenroll(phase) => apply_enrollment(state, phase, false),
        CoursesAction::ClearErrors => {
            state.error = None;
            state.enrollment_error = None;
        }
        CoursesAction::Reset => {
            let latest = state.latest.next();
            *state = CoursesState { latest, ..CoursesState::default() };
        }
    }
}

fn apply_fetch(state: &mut CoursesState, ticket: RequestTicket, phase: Lifecycle<Vec<CourseSummary>>) {
    if phase.is_pending() {
        state.latest = ticket;
        state.loading = true;
        state.error = None;
        return;
    }
    if state.latest != ticket {
        return;
    }
    state.loading = false;
    match phase {
        Lifecycle::Fulfilled(items) => state.items = items,
        Lifecycle::Rejected(message) => state.error = Some(message),
        Lifecycle::Pending => {}
    }
}

fn apply_enrollment(state: &mut CoursesState, phase: Lifecycle<CourseId>, enrolled: bool) {
    match phase {
        Lifecycle::Pending => state.enrollment_error = None,
        Lifecycle::Fulfilled(course_id) => {
            // Stale collections may not hold the course; that is a no-op.
            if let Some(course) = state.items.iter_mut().find(|c| c.id == course_id) {
                course.is_enrolled = enrolled;
            }
        }
        Lifecycle::Rejected(message) => state.enrollment_error = Some(message),
    }
}
