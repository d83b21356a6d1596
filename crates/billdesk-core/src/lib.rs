//! # billdesk-core: Pure Business Logic for Billdesk
//!
//! This crate holds the logic behind the Billdesk billing dashboard's forms
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Billdesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard (browser)                          │   │
//! │  │    Price form ──► Tier table ──► Invoice settings ──► Submit    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               billdesk-forms (form binding)                     │   │
//! │  │    TierEditor, PriceForm, ErrorSummary, FormsConfig             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ billdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │   │  types  │ │  tiers  │ │ pricing │ │numbering │ │ records │ │   │
//! │  │   │PriceTier│ │normalize│ │graduated│ │ template │ │ by id   │ │   │
//! │  │   │  Price  │ │ edits   │ │ volume  │ │ render   │ │         │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ JSON payload                           │
//! │                                ▼                                        │
//! │                       Remote billing REST API                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PriceTier, Price, BillingScheme, TiersMode)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`tiers`] - Tier renormalization and the change/create/remove edits
//! - [`pricing`] - Amount charged for a quantity under tiered prices
//! - [`numbering`] - Invoice number template rendering
//! - [`records`] - List/record conversion for API collections
//! - [`validation`] - Tier schema validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use billdesk_core::tiers::change_upper_bound;
//! use billdesk_core::{Money, PriceTier};
//!
//! let tiers = vec![
//!     PriceTier::bounded(Money::from_cents(100), 0, 9),
//!     PriceTier::bounded(Money::from_cents(200), 10, 19),
//!     PriceTier::open(Money::from_cents(300), 20),
//! ];
//!
//! // Widening the first tier pushes the rest along, keeping their widths.
//! let tiers = change_upper_bound(&tiers, 0, Some(14));
//! assert_eq!(tiers[1].from_value, 15);
//! assert_eq!(tiers[1].to_value, Some(24));
//! assert_eq!(tiers[2].from_value, 25);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod numbering;
pub mod pricing;
pub mod records;
pub mod tiers;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum number of tiers a tiered price must keep.
///
/// A single tier would be a per-unit price in disguise, so the editor
/// refuses removals that would go below this.
pub const MIN_TIERS: usize = 2;

/// Largest unit quantity a tier bound may name.
///
/// Keeps reflow arithmetic (`to_value + 1`, `anchor + span`) far from the
/// `i64` limits.
pub const MAX_TIER_BOUND: i64 = 1_000_000_000_000;

/// Default upper bound of the first tier when a tiered price is added.
pub const DEFAULT_FIRST_TIER_UPPER: i64 = 10;
