//! # Form Errors
//!
//! Error types for the form layer, plus classification of billing API
//! failures into something a form can show.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Billdesk                               │
//! │                                                                         │
//! │  Local failures                     Remote failures                     │
//! │  ──────────────                     ───────────────                     │
//! │                                                                         │
//! │  ValidationError ─┐                 HTTP status + JSON body             │
//! │  CoreError ───────┼──► FormError    (or no response at all)             │
//! │  Config errors ───┘        │                 │                          │
//! │                            ▼                 ▼                          │
//! │                        ApiError ◄──── ErrorSummary::classify            │
//! │                      { code, message }   { code, message, fields }      │
//! │                            │                 │                          │
//! │                            └──────┬──────────┘                          │
//! │                                   ▼                                     │
//! │                         Reporter (toast) / inline field errors          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use billdesk_core::{CoreError, ValidationError};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// Form Error
// =============================================================================

/// Failures raised by the form layer.
#[derive(Debug, Error)]
pub enum FormError {
    /// Input failed schema validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Domain logic rejected the form contents.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A handler was called for a row that isn't there.
    #[error("Row {index} does not exist (form has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// Config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::FormsConfig`].
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A config value is out of range or malformed.
    #[error("Invalid config value: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for Results with FormError.
pub type FormResult<T> = Result<T, FormError>;

// =============================================================================
// API Error
// =============================================================================

/// Error shape handed to the dashboard.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "tier 1 starts at 12, expected 10"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes shared by local and remote failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400, 422)
    ValidationError,

    /// Not signed in or not allowed (401, 403)
    Unauthorized,

    /// Record changed underneath us (409)
    Conflict,

    /// Too many requests (429)
    RateLimited,

    /// The API failed (5xx or anything unexpected)
    ServerError,

    /// No response: offline, DNS, timeout
    NetworkError,

    /// Local failure that isn't the user's input
    Internal,
}

impl ErrorCode {
    /// Maps an HTTP status to a code. `None` means no response arrived.
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            None => ErrorCode::NetworkError,
            Some(400) | Some(422) => ErrorCode::ValidationError,
            Some(401) | Some(403) => ErrorCode::Unauthorized,
            Some(404) => ErrorCode::NotFound,
            Some(409) => ErrorCode::Conflict,
            Some(429) => ErrorCode::RateLimited,
            Some(_) => ErrorCode::ServerError,
        }
    }

    /// Fallback message when the API gives none.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "The requested record no longer exists",
            ErrorCode::ValidationError => "Some fields are invalid",
            ErrorCode::Unauthorized => "You are not allowed to do that",
            ErrorCode::Conflict => "This record was changed by someone else",
            ErrorCode::RateLimited => "Too many requests, try again shortly",
            ErrorCode::ServerError => "Something went wrong on our side",
            ErrorCode::NetworkError => "Could not reach the server",
            ErrorCode::Internal => "Unexpected error",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(e) => ApiError::validation(e.to_string()),
            FormError::Core(CoreError::Validation(e)) => ApiError::validation(e.to_string()),
            FormError::Core(e @ CoreError::IncompletePrice { .. })
            | FormError::Core(e @ CoreError::InvalidTemplate { .. }) => {
                ApiError::validation(e.to_string())
            }
            FormError::Core(CoreError::Serialization(e)) => {
                tracing::error!(error = %e, "Payload serialization failed");
                ApiError::internal("Could not prepare the request")
            }
            e @ FormError::RowOutOfRange { .. } => ApiError::internal(e.to_string()),
            e @ (FormError::ConfigIo { .. }
            | FormError::ConfigParse(_)
            | FormError::InvalidConfig(_)) => {
                tracing::error!(error = %e, "Configuration error");
                ApiError::internal("Configuration error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Error Summary
// =============================================================================

/// A billing API failure, classified for display.
///
/// Field errors are keyed by the form field name the API reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSummary {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ErrorSummary {
    /// Classifies an API failure.
    ///
    /// ## Body Shapes Understood
    /// ```text
    /// { "error": { "message": "...", "param": "currency" } }
    /// { "message": "...", "errors": { "currency": ["is invalid"] } }
    /// { "message": "...", "errors": { "currency": "is invalid" } }
    /// ```
    /// Anything else (including non-JSON bodies) falls back to the code's
    /// default message.
    pub fn classify(status: Option<u16>, body: Option<&str>) -> Self {
        let code = ErrorCode::from_status(status);
        let parsed: Option<Value> = body.and_then(|b| serde_json::from_str(b).ok());

        let mut message = None;
        let mut field_errors = BTreeMap::new();

        if let Some(value) = &parsed {
            if let Some(error) = value.get("error").filter(|e| e.is_object()) {
                message = error.get("message").and_then(Value::as_str).map(str::to_string);
                if let (Some(param), Some(msg)) =
                    (error.get("param").and_then(Value::as_str), &message)
                {
                    field_errors.insert(param.to_string(), vec![msg.clone()]);
                }
            }

            if message.is_none() {
                message = value.get("message").and_then(Value::as_str).map(str::to_string);
            }

            if let Some(errors) = value.get("errors").and_then(Value::as_object) {
                for (field, entry) in errors {
                    let messages = field_messages(entry);
                    if !messages.is_empty() {
                        field_errors.entry(field.clone()).or_insert_with(Vec::new).extend(messages);
                    }
                }
            }
        }

        ErrorSummary {
            code,
            message: message.unwrap_or_else(|| code.default_message().to_string()),
            field_errors,
        }
    }

    /// Whether the user can fix this by editing the form.
    pub fn is_user_fixable(&self) -> bool {
        matches!(self.code, ErrorCode::ValidationError | ErrorCode::Conflict)
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::NetworkError | ErrorCode::RateLimited | ErrorCode::ServerError
        )
    }
}

fn field_messages(entry: &Value) -> Vec<String> {
    match entry {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

impl From<ErrorSummary> for ApiError {
    fn from(summary: ErrorSummary) -> Self {
        ApiError::new(summary.code, summary.message)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
