//! Lesson access and navigation helpers.

#[cfg(test)]
#[path = "lessons_test.rs"]
mod lessons_test;

use crate::net::types::{Lesson, LessonId, UserType};

pub const NOT_ENROLLED: &str = "You must be enrolled in this course to access its lessons";
pub const LESSON_FAILED: &str = "Error accessing lesson";
pub const CREATE_LESSON_FAILED: &str = "Error creating lesson";

/// Lessons are readable by enrolled students and by instructors.
///
/// # Errors
///
/// Returns [`NOT_ENROLLED`] when neither condition holds.
pub fn check_lesson_access(is_enrolled: bool, user_type: Option<UserType>) -> Result<(), &'static str> {
    if is_enrolled || user_type == Some(UserType::Instructor) { Ok(()) } else { Err(NOT_ENROLLED) }
}

/// Neighbours of the current lesson within a course's ordered lesson list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LessonNav {
    /// Zero-based position of the current lesson, if it is in the list.
    pub position: Option<usize>,
    pub previous: Option<LessonId>,
    pub next: Option<LessonId>,
}

impl LessonNav {
    #[must_use]
    pub fn locate(lessons: &[Lesson], current: LessonId) -> Self {
        let Some(position) = lessons.iter().position(|l| l.id == current) else {
            return Self::default();
        };
        Self {
            position: Some(position),
            previous: position.checked_sub(1).map(|i| lessons[i].id),
            next: lessons.get(position + 1).map(|l| l.id),
        }
    }
}

/// Order value for a lesson appended to `lessons`.
#[must_use]
pub fn next_lesson_order(lessons: &[Lesson]) -> u32 {
    lessons.iter().map(|l| l.order).max().map_or(1, |max| max.saturating_add(1))
}
