// src/api/response.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::RecommendError;

/// Standardized API response format
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler result carrying either a payload or a status with an error message
pub enum ApiResult<T: Serialize> {
    Success(T),
    Error(StatusCode, String),
}

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResult::Success(data) => {
                (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
            }
            ApiResult::Error(status, message) => {
                (status, Json(ApiResponse::<T>::error(message))).into_response()
            }
        }
    }
}

pub fn api_success<T: Serialize>(data: T) -> ApiResult<T> {
    ApiResult::Success(data)
}

pub fn api_error<T: Serialize>(status: StatusCode, message: impl Into<String>) -> ApiResult<T> {
    ApiResult::Error(status, message.into())
}

/// HTTP status for each engine failure.
pub fn status_for(err: &RecommendError) -> StatusCode {
    match err {
        RecommendError::NotFound(_) => StatusCode::NOT_FOUND,
        RecommendError::InvalidState(..) => StatusCode::BAD_REQUEST,
        RecommendError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Error text returned to clients. Store failures are reported generically;
/// their cause chain stays in the server log.
pub fn client_message(err: &RecommendError) -> String {
    match err {
        RecommendError::StoreUnavailable(_) => "listing store unavailable".to_string(),
        other => other.to_string(),
    }
}
