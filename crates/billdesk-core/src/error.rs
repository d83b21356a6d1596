//! # Error Types
//!
//! Domain-specific error types for billdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billdesk-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Form input validation failures                 │
//! │                                                                         │
//! │  billdesk-forms errors (separate crate)                                │
//! │  ├── FormError        - Binding and submission failures                │
//! │  └── ApiError         - What the dashboard sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → FormError → ApiError → Dashboard  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tier renormalization itself never fails: it works on pre-validated input.
//! These errors come from parsing, schema validation and template rendering.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An invoice numbering template could not be rendered.
    ///
    /// ## When This Occurs
    /// - Template references a token we don't know (`{month}`)
    /// - A `{` is never closed, or a lone `}` appears
    #[error("Invalid numbering template at position {position}: {reason}")]
    InvalidTemplate { position: usize, reason: String },

    /// A price is missing data its billing scheme requires.
    #[error("Price is incomplete: {reason}")]
    IncompletePrice { reason: String },

    /// Payload could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These mirror the dashboard's form schema: each variant names the field so
/// the message can be shown next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., non-numeric upper bound, bad currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is above the largest allowed.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Too few entries in a collection.
    #[error("{field} must have at least {min} entries")]
    TooFew { field: String, min: usize },

    /// A tier's upper bound is below its lower bound.
    #[error("tier {index} ends at {to} before it starts at {from}")]
    InvertedTier { index: usize, from: i64, to: i64 },

    /// A tier does not start right after its predecessor.
    #[error("tier {index} starts at {actual}, expected {expected}")]
    NotContiguous {
        index: usize,
        expected: i64,
        actual: i64,
    },

    /// An open-ended tier appears before the last position.
    #[error("only the last tier may be open-ended (tier {index} is)")]
    OpenTierNotLast { index: usize },

    /// The last tier has an upper bound.
    #[error("the last tier must be open-ended")]
    LastTierBounded,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
