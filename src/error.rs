use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::entities::booking::BookingId;
use crate::entities::room::RoomId;
use crate::entities::tour::TourId;

/// Failures raised by the domain store and its policy checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email already registered")]
    EmailExists,
    #[error("Tour {0} not found")]
    TourNotFound(TourId),
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),
    #[error("Booking {0} not found")]
    BookingNotFound(BookingId),
    #[error("You already have a confirmed booking for this tour")]
    AlreadyBooked,
    #[error("Tour {0} is archived")]
    TourArchived(TourId),
    #[error("You can only manage your own bookings")]
    NotBookingOwner,
    #[error("Bookings can only be cancelled more than {days} days in advance")]
    CancellationWindowClosed { days: i64 },
    #[error("Cannot move booking from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
    #[error("Check-in date must be before check-out date")]
    InvalidDateRange,
    #[error("You do not administer tour {0}")]
    NotTourAdmin(TourId),
}

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status_and_code().0
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(status = %status, code, error = %self, "Internal server error");
        }

        let body = ErrorResponse {
            code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NotAuthenticated | DomainError::InvalidCredentials => {
                AppError::Unauthorized(message)
            }
            DomainError::EmailExists | DomainError::AlreadyBooked => AppError::Conflict(message),
            DomainError::TourNotFound(_)
            | DomainError::RoomNotFound(_)
            | DomainError::BookingNotFound(_) => AppError::NotFound(message),
            DomainError::NotBookingOwner | DomainError::NotTourAdmin(_) => {
                AppError::Forbidden(message)
            }
            DomainError::TourArchived(_)
            | DomainError::InvalidDateRange
            | DomainError::CancellationWindowClosed { .. }
            | DomainError::InvalidStatusTransition { .. } => AppError::Validation(message),
        }
    }
}

/// Well-formed JSON of the wrong shape is a validation failure; anything
/// else the extractor rejects is a bad request.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status_mapping() {
        assert_eq!(
            AppError::from(DomainError::AlreadyBooked).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(DomainError::TourNotFound(9)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(DomainError::NotAuthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(DomainError::NotBookingOwner).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::from(DomainError::CancellationWindowClosed { days: 7 }).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_message_carries_through() {
        let err = AppError::from(DomainError::EmailExists);
        assert_eq!(err.to_string(), "Email already registered");
    }
}
