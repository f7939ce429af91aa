use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

pub mod generate_api_key;
pub mod get_user_info;
pub mod login;
pub mod logout;
pub mod register;
pub mod token_login;

pub(crate) const STATUS_SUCCESS: &str = "Success";
pub(crate) const JSON_PARSE_FAILED: &str = "JSON parse failed";
pub(crate) const EMAIL_TAKEN: &str = "Email address already taken";

/// Generic happy-case response body carrying a status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    pub status: String,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
        }
    }
}

/// Generic error response body carrying an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// HTTP-level error, the closed status mapping for every handler.
///
/// `Internal` deliberately carries no message: whatever failed has already
/// been logged server-side, and the caller only learns that it was our
/// fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error))).into_response()
            }
            ApiError::Unauthorized(error) => {
                (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(error))).into_response()
            }
            ApiError::NotFound(error) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(error))).into_response()
            }
            ApiError::Conflict(error) => {
                (StatusCode::CONFLICT, Json(ErrorResponse::new(error))).into_response()
            }
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
