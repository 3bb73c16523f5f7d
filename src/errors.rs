use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::work_order::WorkOrderStatus;

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status category (e.g. "Not Found", "Bad Request")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::error::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    #[error("Invalid status transition: from {from} to {to}")]
    InvalidTransition {
        from: WorkOrderStatus,
        to: WorkOrderStatus,
    },

    #[error("Order locked: {0}")]
    OrderLocked(String),

    #[error("Insufficient stock for inventory item {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: i32,
        requested: i32,
        available: i32,
    },

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Single source of truth for the error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_)
            | Self::InvalidRelationship(_)
            | Self::InvalidTransition { .. }
            | Self::OrderLocked(_)
            | Self::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
            Self::AuthError(_) => StatusCode::UNAUTHORIZED,
            Self::DatabaseError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message suitable for HTTP responses. Persistence and internal errors
    /// return a generic message instead of leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rule_violations_map_to_bad_request() {
        let errors = [
            ServiceError::ValidationError("description is required".into()),
            ServiceError::InvalidRelationship("vehicle does not belong to customer".into()),
            ServiceError::InvalidTransition {
                from: WorkOrderStatus::Open,
                to: WorkOrderStatus::Completed,
            },
            ServiceError::OrderLocked("work order 1 is concluida".into()),
            ServiceError::InsufficientStock {
                item_id: 1,
                requested: 5,
                available: 3,
            },
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn not_found_maps_to_404_and_db_errors_to_500() {
        assert_eq!(
            ServiceError::NotFound("work order 42 not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        let db = ServiceError::DatabaseError(sea_orm::DbErr::Custom("boom".into()));
        assert_eq!(db.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.response_message(), "Database error");
    }

    #[test]
    fn insufficient_stock_message_carries_quantities() {
        let err = ServiceError::InsufficientStock {
            item_id: 7,
            requested: 10,
            available: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("requested 10"));
        assert!(msg.contains("available 4"));
    }
}
