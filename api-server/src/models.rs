use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use room_selector::Room;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::BookingError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_number: Room,
}

#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub count: i64,
}

/// `count` stays raw text: previews fire on every keystroke, so anything
/// that is not an integer just yields an empty preview.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub count: Option<String>,
}

impl PreviewQuery {
    pub fn count(&self) -> Option<i64> {
        self.count.as_deref()?.trim().parse().ok()
    }
}

/// Body of `/api/book` and `/api/preview`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomsResponse {
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResult {
    pub booking_id: Uuid,
    pub rooms: Vec<Room>,
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatus {
    pub room_number: Room,
    pub occupied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorPlan {
    pub floor: u8,
    pub rooms: Vec<RoomStatus>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Booking(#[from] BookingError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Booking(BookingError::InvalidCount(_)) => StatusCode::BAD_REQUEST,
            ApiError::Booking(BookingError::InsufficientCapacity { .. }) => StatusCode::CONFLICT,
            ApiError::Booking(BookingError::StoreInvariantViolation(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Booking(BookingError::StoreInvariantViolation(_)) => {
                "internal booking error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}
