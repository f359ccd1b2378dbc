//! Error types for folioctl

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for folioctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),

    /// Failure already shown to the user; only the exit status remains
    #[error("{0}")]
    Reported(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// User-facing message attached at the transport boundary, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Error::Api(api) => api.user_message(),
            _ => None,
        }
    }

    /// Raw `message` field of the server's error payload, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api(api) => api.server_message(),
            _ => None,
        }
    }

    /// HTTP status of the failed request, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => api.status(),
            _ => None,
        }
    }

    /// True for 401/403 failures, which are handled globally rather than per call.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// True when the message was already printed by a notifier.
    pub fn is_reported(&self) -> bool {
        matches!(self, Error::Reported(_))
    }

    /// True when the underlying call was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Api(ApiError::Cancelled))
    }
}

/// Pick the message shown to the user for a failure: the attached message,
/// then the server payload's message, then `fallback`.
pub fn describe_error(err: &Error, fallback: &str) -> String {
    err.user_message()
        .or_else(|| err.server_message())
        .unwrap_or(fallback)
        .to_string()
}

/// Error payload returned by the portfolio backend
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub validation_errors: Vec<FieldError>,
}

/// Field-level validation failure
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// API-related errors
///
/// HTTP variants carry the user-facing `message` derived when the response was
/// received, plus the server's raw `message` field when it sent one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Unauthorized {
        message: String,
        server_message: Option<String>,
    },

    #[error("{message}")]
    Forbidden {
        message: String,
        server_message: Option<String>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        server_message: Option<String>,
    },

    #[error("{message}")]
    Validation {
        status: u16,
        message: String,
        server_message: Option<String>,
        field_errors: Vec<FieldError>,
    },

    #[error("{message}")]
    Conflict {
        message: String,
        server_message: Option<String>,
    },

    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        server_message: Option<String>,
    },

    #[error("{message}")]
    Unexpected {
        status: u16,
        message: String,
        server_message: Option<String>,
    },

    #[error("Unable to connect to server. Please check your connection. ({0})")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Classify a non-success response into the error taxonomy.
    pub fn from_status(status: u16, body: Option<ErrorBody>) -> Self {
        let body = body.unwrap_or_default();
        let message = body
            .message
            .clone()
            .or_else(|| body.error.clone())
            .unwrap_or_else(|| generic_message(status).to_string());
        let server_message = body.message;

        match status {
            401 => ApiError::Unauthorized {
                message,
                server_message,
            },
            403 => ApiError::Forbidden {
                message,
                server_message,
            },
            404 => ApiError::NotFound {
                message,
                server_message,
            },
            400 | 422 => ApiError::Validation {
                status,
                message,
                server_message,
                field_errors: body.validation_errors,
            },
            409 => ApiError::Conflict {
                message,
                server_message,
            },
            500..=599 => ApiError::Server {
                status,
                message,
                server_message,
            },
            _ => ApiError::Unexpected {
                status,
                message,
                server_message,
            },
        }
    }

    /// HTTP status code, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Conflict { .. } => Some(409),
            ApiError::Validation { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::Unexpected { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::InvalidResponse(_) | ApiError::Cancelled => None,
        }
    }

    /// Message attached at the transport boundary
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message, .. }
            | ApiError::Forbidden { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Conflict { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::Unexpected { message, .. } => Some(message),
            ApiError::Network(_) => Some(NETWORK_MESSAGE),
            ApiError::InvalidResponse(_) | ApiError::Cancelled => None,
        }
    }

    /// Raw `message` field from the server's error payload
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { server_message, .. }
            | ApiError::Forbidden { server_message, .. }
            | ApiError::NotFound { server_message, .. }
            | ApiError::Validation { server_message, .. }
            | ApiError::Conflict { server_message, .. }
            | ApiError::Server { server_message, .. }
            | ApiError::Unexpected { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }
}

const NETWORK_MESSAGE: &str = "Unable to connect to server. Please check your connection.";

/// Generic message for a status code when the server sent none
pub fn generic_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid request. Please check your input.",
        401 => "Session expired. Please log in again.",
        403 => "You do not have permission to perform this action.",
        404 => "The requested resource was not found.",
        409 => "A conflict occurred. The resource may already exist.",
        422 => "Validation failed. Please check your input.",
        500 => "Server error. Please try again later.",
        502 | 503 => "Service temporarily unavailable. Please try again later.",
        _ => "An unexpected error occurred. Please try again.",
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Session-related errors raised by guarded commands
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Login required to open {from}. Run `folioctl login` and try again.")]
    LoginRequired { from: String },

    #[error("Access denied. Your account does not have admin privileges.")]
    AdminRequired,

    #[error("Session storage error: {0}")]
    Storage(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
