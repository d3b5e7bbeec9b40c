use super::*;

#[test]
fn display_message_uses_server_message() {
    let err = ApiError::Status { status: 400, message: Some("Already enrolled".to_owned()) };
    assert_eq!(err.display_message("Failed to enroll in course"), "Already enrolled");
}

#[test]
fn display_message_falls_back_without_server_message() {
    let err = ApiError::Status { status: 500, message: None };
    assert_eq!(err.display_message("Failed to fetch courses"), "Failed to fetch courses");
}

#[test]
fn transport_and_decode_errors_use_fallback() {
    assert_eq!(ApiError::Transport("connection refused".to_owned()).display_message("Login failed"), "Login failed");
    assert_eq!(ApiError::Decode("expected array".to_owned()).display_message("Login failed"), "Login failed");
    assert_eq!(ApiError::Unauthenticated.display_message("Login failed"), "Login failed");
}

#[test]
fn status_is_only_reported_for_server_rejections() {
    assert_eq!(ApiError::Status { status: 404, message: None }.status(), Some(404));
    assert_eq!(ApiError::Transport("x".to_owned()).status(), None);
}

#[test]
fn display_formats_status() {
    let err = ApiError::Status { status: 401, message: None };
    assert_eq!(err.to_string(), "server returned status 401");
}
