//! REST client for the course platform backend.
//!
//! DESIGN
//! ======
//! One attempt per call: no timeout, retry, or backoff. Authenticated calls
//! carry `Authorization: Bearer <token>`. Non-success responses are turned
//! into [`ApiError::Status`] with whatever message the body carried.
//!
//! The stores talk to the backend through the [`Backend`] trait so they can
//! be driven by an in-memory fake; [`ApiClient`] is the reqwest-backed
//! implementation and also exposes the lesson and instructor endpoints that
//! only the front end calls directly.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    ApiErrorBody, AuthResponse, CourseDetail, CourseId, CourseSummary, EnrollmentStatus, InstructorCourseDetails,
    InstructorDashboard, InstructorEnrollments, InstructorLessons, Lesson, LessonId, LoginRequest, NewLesson,
    RegisterRequest, StudentEnrollment,
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

// =============================================================================
// ENDPOINTS
// =============================================================================

fn course_endpoint(course_id: CourseId) -> String {
    format!("courses/{course_id}")
}

fn enroll_endpoint(course_id: CourseId) -> String {
    format!("courses/{course_id}/enroll/")
}

fn unenroll_endpoint(course_id: CourseId) -> String {
    format!("courses/{course_id}/unenroll/")
}

fn lessons_endpoint(course_id: CourseId) -> String {
    format!("courses/{course_id}/lessons/")
}

fn lesson_endpoint(course_id: CourseId, lesson_id: LessonId) -> String {
    format!("courses/{course_id}/lessons/{lesson_id}/")
}

fn instructor_lessons_endpoint(course_id: CourseId) -> String {
    format!("courses/{course_id}/instructor_lessons/")
}

fn instructor_enrollments_endpoint(course_id: CourseId) -> String {
    format!("courses/{course_id}/instructor_enrollments/")
}

fn enrollment_status_endpoint(course_id: CourseId) -> String {
    format!("courses/{course_id}/enrollment_status/")
}

fn instructor_course_details_endpoint(course_id: CourseId) -> String {
    format!("instructor/courses/{course_id}/details/")
}

/// Normalize a base URL so relative endpoint paths can be appended directly.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') { trimmed.to_owned() } else { format!("{trimmed}/") }
}

/// Build the error for a non-success response body.
pub(crate) fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::into_message);
    ApiError::Status { status, message }
}

// =============================================================================
// BACKEND SEAM
// =============================================================================

/// The calls the auth and course stores make.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<AuthResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest<'_>) -> Result<AuthResponse, ApiError>;

    async fn list_courses(&self, token: &str) -> Result<Vec<CourseSummary>, ApiError>;

    async fn enroll(&self, token: &str, course_id: CourseId) -> Result<(), ApiError>;

    async fn unenroll(&self, token: &str, course_id: CourseId) -> Result<(), ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

/// reqwest-backed client for the course platform API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:8000/api/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: normalize_base_url(base_url) })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        let response = Self::send(self.request(Method::GET, path, Some(token))).await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = Self::send(self.request(Method::POST, path, token).json(body)).await?;
        decode(response).await
    }

    async fn post_empty(&self, path: &str, token: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, path, Some(token))
            .json(&serde_json::json!({}));
        Self::send(builder).await?;
        Ok(())
    }

    /// `GET courses/{id}`: course with embedded lessons and enrollment flag.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a body
    /// that does not decode.
    pub async fn course_detail(&self, token: &str, course_id: CourseId) -> Result<CourseDetail, ApiError> {
        self.get_json(&course_endpoint(course_id), token).await
    }

    /// `GET courses/{id}/lessons/`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::course_detail`].
    pub async fn course_lessons(&self, token: &str, course_id: CourseId) -> Result<Vec<Lesson>, ApiError> {
        self.get_json(&lessons_endpoint(course_id), token).await
    }

    /// `GET courses/{id}/lessons/{lesson_id}/`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::course_detail`].
    pub async fn lesson(&self, token: &str, course_id: CourseId, lesson_id: LessonId) -> Result<Lesson, ApiError> {
        self.get_json(&lesson_endpoint(course_id, lesson_id), token).await
    }

    /// `GET courses/{id}/instructor_lessons/`: includes unpublished lessons.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::course_detail`].
    pub async fn instructor_lessons(&self, token: &str, course_id: CourseId) -> Result<Vec<Lesson>, ApiError> {
        let envelope: InstructorLessons = self
            .get_json(&instructor_lessons_endpoint(course_id), token)
            .await?;
        Ok(envelope.lessons)
    }

    /// `GET courses/{id}/instructor_enrollments/`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::course_detail`].
    pub async fn instructor_enrollments(
        &self,
        token: &str,
        course_id: CourseId,
    ) -> Result<Vec<StudentEnrollment>, ApiError> {
        let envelope: InstructorEnrollments = self
            .get_json(&instructor_enrollments_endpoint(course_id), token)
            .await?;
        Ok(envelope.enrollments)
    }

    /// `GET courses/{id}/enrollment_status/`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::course_detail`].
    pub async fn enrollment_status(&self, token: &str, course_id: CourseId) -> Result<EnrollmentStatus, ApiError> {
        self.get_json(&enrollment_status_endpoint(course_id), token).await
    }

    /// `POST courses/{id}/lessons/`: returns the created lesson.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::course_detail`].
    pub async fn create_lesson(
        &self,
        token: &str,
        course_id: CourseId,
        lesson: &NewLesson<'_>,
    ) -> Result<Lesson, ApiError> {
        self.post_json(&lessons_endpoint(course_id), Some(token), lesson).await
    }

    /// `GET instructor/dashboard/`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::course_detail`].
    pub async fn instructor_dashboard(&self, token: &str) -> Result<InstructorDashboard, ApiError> {
        self.get_json("instructor/dashboard/", token).await
    }

    /// `GET instructor/courses/{id}/details/`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::course_detail`].
    pub async fn instructor_course_details(
        &self,
        token: &str,
        course_id: CourseId,
    ) -> Result<InstructorCourseDetails, ApiError> {
        self.get_json(&instructor_course_details_endpoint(course_id), token).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl Backend for ApiClient {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.post_json("login/", None, request).await
    }

    async fn register(&self, request: &RegisterRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.post_json("register/", None, request).await
    }

    async fn list_courses(&self, token: &str) -> Result<Vec<CourseSummary>, ApiError> {
        self.get_json("courses/", token).await
    }

    async fn enroll(&self, token: &str, course_id: CourseId) -> Result<(), ApiError> {
        self.post_empty(&enroll_endpoint(course_id), token).await
    }

    async fn unenroll(&self, token: &str, course_id: CourseId) -> Result<(), ApiError> {
        self.post_empty(&unenroll_endpoint(course_id), token).await
    }
}
