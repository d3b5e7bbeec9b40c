//! Wire DTOs for the course platform REST API.
//!
//! DESIGN
//! ======
//! Response types are lenient: optional fields default when the backend omits
//! them, so a bare `{"id": 1, "title": "Intro"}` is still a valid course.
//! Request types borrow their fields since they only live for one call.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type CourseId = u64;
pub type LessonId = u64;

// =============================================================================
// AUTH
// =============================================================================

/// Account role issued by the backend at login/registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Instructor,
}

impl UserType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "instructor" => Ok(Self::Instructor),
            other => Err(format!("unknown user type '{other}' (expected 'student' or 'instructor')")),
        }
    }
}

/// `POST login/` body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `POST register/` body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub user_type: UserType,
}

/// Successful login/registration payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent authenticated calls.
    pub access: String,
    pub user_type: UserType,
}

/// Error body shapes the backend emits. `message` is the platform's own
/// convention; `detail` is what the REST framework produces for auth and
/// permission failures.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// First non-blank message in precedence order.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        [self.message, self.detail, self.error]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

// =============================================================================
// COURSES
// =============================================================================

/// How a course refers to its instructor. The backend serializer has sent a
/// bare primary key, a display name, and a nested user object over time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstructorRef {
    Id(u64),
    Name(String),
    User {
        #[serde(default)]
        id: Option<u64>,
        #[serde(default)]
        username: Option<String>,
    },
}

impl InstructorRef {
    /// Human-readable label for listings.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Id(id) => format!("#{id}"),
            Self::Name(name) => name.clone(),
            Self::User { username: Some(name), .. } => name.clone(),
            Self::User { id: Some(id), username: None } => format!("#{id}"),
            Self::User { id: None, username: None } => "unknown".to_owned(),
        }
    }
}

/// A course as listed by `GET courses/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: CourseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<InstructorRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, alias = "isEnrolled")]
    pub is_enrolled: bool,
}

/// `GET courses/{id}`: the summary plus embedded lessons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: CourseSummary,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

// =============================================================================
// LESSONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub order: u32,
    /// Minutes, when the backend tracks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `POST courses/{id}/lessons/` body.
#[derive(Debug, Clone, Serialize)]
pub struct NewLesson<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub order: u32,
}

/// `GET courses/{id}/enrollment_status/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentStatus {
    #[serde(default)]
    pub is_enrolled: bool,
}

/// `GET courses/{id}/instructor_lessons/` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct InstructorLessons {
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

// =============================================================================
// INSTRUCTOR AGGREGATES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRef {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl StudentRef {
    /// Full name when set, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

/// One row of `GET courses/{id}/instructor_enrollments/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEnrollment {
    pub id: u64,
    pub student: StudentRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<String>,
}

/// `GET courses/{id}/instructor_enrollments/` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct InstructorEnrollments {
    #[serde(default)]
    pub enrollments: Vec<StudentEnrollment>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOverview {
    #[serde(default)]
    pub total_courses: u64,
    #[serde(default)]
    pub total_students: u64,
    #[serde(default)]
    pub total_lessons: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEnrollment {
    #[serde(default)]
    pub student_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Per-course row of the instructor dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseStatistics {
    pub id: CourseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub total_students: u64,
    #[serde(default)]
    pub total_lessons: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// `GET instructor/dashboard/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorDashboard {
    #[serde(default)]
    pub overview: DashboardOverview,
    /// Enrollment count keyed by date string.
    #[serde(default)]
    pub enrollment_trends: BTreeMap<String, u64>,
    #[serde(default)]
    pub recent_enrollments: Vec<RecentEnrollment>,
    #[serde(default)]
    pub courses: Vec<CourseStatistics>,
}

/// `GET instructor/courses/{id}/details/`. Fields beyond the title and
/// recent enrollments are kept verbatim in `stats`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstructorCourseDetails {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub recent_enrollments: Vec<RecentEnrollment>,
    #[serde(flatten)]
    pub stats: serde_json::Map<String, serde_json::Value>,
}
