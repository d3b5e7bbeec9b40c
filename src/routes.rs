//! Route table and auth gating.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every front end applies the same rule: protected routes need a session
//! token, everything unknown lands on the course list. Gating is a pure
//! function of the route and the auth state, so it can be checked without any
//! UI framework.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::net::types::{CourseId, LessonId};
use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const COURSES_PATH: &str = "/courses";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Courses,
    Course(CourseId),
    Lesson { course_id: CourseId, lesson_id: LessonId },
    InstructorDashboard,
    InstructorCourse(CourseId),
    Unknown,
}

impl Route {
    /// Match a URL path (query and fragment ignored, trailing slash optional).
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["courses"] => Self::Courses,
            ["courses", id] => id.parse().map_or(Self::Unknown, Self::Course),
            ["courses", course, "lessons", lesson] => match (course.parse(), lesson.parse()) {
                (Ok(course_id), Ok(lesson_id)) => Self::Lesson { course_id, lesson_id },
                _ => Self::Unknown,
            },
            ["instructor", "dashboard"] => Self::InstructorDashboard,
            ["instructor", "courses", id] => id.parse().map_or(Self::Unknown, Self::InstructorCourse),
            _ => Self::Unknown,
        }
    }

    /// Canonical path for this route. `Unknown` has none.
    #[must_use]
    pub fn path(&self) -> Option<String> {
        match self {
            Self::Login => Some(LOGIN_PATH.to_owned()),
            Self::Register => Some(REGISTER_PATH.to_owned()),
            Self::Courses => Some(COURSES_PATH.to_owned()),
            Self::Course(id) => Some(format!("/courses/{id}")),
            Self::Lesson { course_id, lesson_id } => Some(format!("/courses/{course_id}/lessons/{lesson_id}")),
            Self::InstructorDashboard => Some("/instructor/dashboard".to_owned()),
            Self::InstructorCourse(id) => Some(format!("/instructor/courses/{id}")),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Decide whether `route` may render for the given session.
#[must_use]
pub fn gate(route: Route, auth: &AuthState) -> RouteDecision {
    match route {
        Route::Unknown => RouteDecision::Redirect(COURSES_PATH),
        r if r.is_public() => RouteDecision::Allow,
        // Only the token survives a restart, not `user_type`, so instructor
        // routes need a session like any other; the backend enforces roles.
        _ if auth.is_authenticated() => RouteDecision::Allow,
        _ => RouteDecision::Redirect(LOGIN_PATH),
    }
}

/// Follow redirects from `path` to the route that finally renders.
#[must_use]
pub fn resolve(path: &str, auth: &AuthState) -> Route {
    let mut route = Route::parse(path);
    // Redirect targets are fixed public or list routes, so this settles
    // within two hops; the bound guards against a future cycle.
    for _ in 0..4 {
        match gate(route, auth) {
            RouteDecision::Allow => return route,
            RouteDecision::Redirect(target) => route = Route::parse(target),
        }
    }
    Route::Login
}
