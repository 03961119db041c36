// ABOUTME: Unified error handling for the plan-generation core with standard error codes
// ABOUTME: Defines AppError, ErrorCode taxonomy, and serializable error responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Standard error codes used throughout the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Plan assembly (1000-1999)
    /// Catalog lookup miss during plan assembly
    #[serde(rename = "REFERENCE_NOT_FOUND")]
    ReferenceNotFound = 1000,
    /// No exercise in the catalog matches a required focus/tier combination
    #[serde(rename = "INSUFFICIENT_CATALOG")]
    InsufficientCatalog = 1001,
    /// No recipe compatible with the requested dietary preferences
    #[serde(rename = "NO_COMPATIBLE_RECIPE")]
    NoCompatibleRecipe = 1002,

    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3001,

    // External services (5000-5999)
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6001,

    // Internal (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ReferenceNotFound => "A referenced catalog record was not found",
            Self::InsufficientCatalog => {
                "The exercise catalog cannot satisfy the requested focus and difficulty"
            }
            Self::NoCompatibleRecipe => {
                "No recipe is compatible with the requested dietary preferences"
            }
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::StorageError => "Storage operation failed",
        }
    }

    /// Whether the caller may meaningfully retry with relaxed inputs
    #[must_use]
    pub const fn is_retryable_with_relaxed_input(&self) -> bool {
        matches!(self, Self::NoCompatibleRecipe | Self::InsufficientCatalog)
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// User ID if available
    pub user_id: Option<Uuid>,
    /// Catalog record or cache key involved, if applicable
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            request_id: None,
            user_id: None,
            resource_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the plan-generation core
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a request ID to the error context
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.context.request_id = Some(request_id.into());
        self
    }

    /// Add a user ID to the error context
    #[must_use]
    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.context.user_id = Some(user_id);
        self
    }

    /// Add a resource ID (catalog record or cache key) to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Duplicate this error without the (non-cloneable) source chain.
    ///
    /// Used by the plan cache to fan a single compute failure out to every
    /// concurrent waiter of the same fingerprint.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            code: self.code,
            message: self.message.clone(),
            context: self.context.clone(),
            source: None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Serializable error response handed to the surrounding orchestration layer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                request_id: error.context.request_id,
                details: error.context.details,
            },
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Catalog lookup miss, fatal to the current plan assembly
    pub fn reference_not_found(kind: &str, key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorCode::ReferenceNotFound,
            format!("{kind} '{key}' not found in catalog"),
        )
        .with_resource_id(key)
    }

    /// No exercise matches a focus/tier combination
    pub fn insufficient_catalog(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientCatalog, message)
    }

    /// No recipe compatible with the requested preferences
    pub fn no_compatible_recipe(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoCompatibleRecipe, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside the acceptable range
    pub fn value_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

/// Conversion from `anyhow::Error` to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.source() {
            Some(source) => Self::new(ErrorCode::InternalError, error.to_string()).with_details(
                serde_json::json!({
                    "source": source.to_string()
                }),
            ),
            None => Self::new(ErrorCode::InternalError, error.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_not_found_carries_resource_id() {
        let error = AppError::reference_not_found("exercise", "bench_press");
        assert_eq!(error.code, ErrorCode::ReferenceNotFound);
        assert_eq!(error.context.resource_id.as_deref(), Some("bench_press"));
    }

    #[test]
    fn test_retryable_codes() {
        assert!(ErrorCode::NoCompatibleRecipe.is_retryable_with_relaxed_input());
        assert!(ErrorCode::InsufficientCatalog.is_retryable_with_relaxed_input());
        assert!(!ErrorCode::InternalError.is_retryable_with_relaxed_input());
    }

    #[test]
    fn test_duplicate_preserves_code_and_message() {
        let error = AppError::no_compatible_recipe("no vegan breakfast candidates")
            .with_request_id("req-42");
        let copy = error.duplicate();
        assert_eq!(copy.code, error.code);
        assert_eq!(copy.message, error.message);
        assert_eq!(copy.context.request_id.as_deref(), Some("req-42"));
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::insufficient_catalog("no beginner pull exercises")
            .with_details(serde_json::json!({ "focus": "pull", "tier": "beginner" }));
        let response = ErrorResponse::from(error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("INSUFFICIENT_CATALOG"));
        assert!(json.contains("focus"));
    }
}
