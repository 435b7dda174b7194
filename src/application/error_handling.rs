// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for the UI
// - Never exposes transport internals
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Result type of every command: errors are a serialized ErrorResponse
pub type CommandResult<T> = Result<T, String>;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Domain invariant violation (422)
    DomainError,

    /// Missing or rejected credentials (401/403)
    Unauthorized,

    /// The remote service answered with an error
    Remote,

    /// The remote service could not be reached (502)
    ExternalService,

    /// Bad or missing configuration
    Configuration,

    /// File system error (500)
    FileSystem,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound(_) => Self::new(ErrorType::NotFound, error.to_string(), None),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Remote(remote) => {
                log::error!("Remote error ({}): {}", remote.status, remote.message);

                let error_type = match remote.status {
                    401 | 403 => ErrorType::Unauthorized,
                    _ => ErrorType::Remote,
                };
                Self::new(error_type, remote.message, remote.code)
            }

            AppError::Http(http_error) => {
                log::error!("Transport error: {:?}", http_error);

                Self::new(
                    ErrorType::ExternalService,
                    "Remote service unreachable",
                    Some(http_error.to_string()),
                )
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);

                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);

                Self::new(ErrorType::Configuration, message, None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);

                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);

                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> CommandResult<T>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> CommandResult<T> {
        self.map_err(|e| ErrorResponse::from_app_error(e).to_json())
    }
}
