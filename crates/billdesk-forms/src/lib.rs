//! # Billdesk Forms
//!
//! Binds the pure tier logic in `billdesk-core` to the dashboard's form state.
//!
//! ## Module Organization
//! ```text
//! billdesk_forms/
//! ├── lib.rs          ◄─── You are here (logging setup)
//! ├── field_array.rs  ◄─── FieldArray capability trait
//! ├── editor.rs       ◄─── TierEditor: change/create/remove handlers
//! ├── form.rs         ◄─── PriceForm, PriceFormState, submit
//! ├── cache.rs        ◄─── Invalidation commands
//! ├── notify.rs       ◄─── Reporter trait for user notices
//! ├── config.rs       ◄─── FormsConfig (TOML + env)
//! └── error.rs        ◄─── FormError, ApiError, ErrorSummary
//! ```
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Tier table input ──► TierEditor ──► billdesk_core::tiers ──┐          │
//! │                           ▲                                 │          │
//! │                           └──── FieldArray write-back ◄─────┘          │
//! │                                                                         │
//! │  Submit ──► PriceForm::submit ──► PricePayload ──► API client          │
//! │                  │                                                      │
//! │                  ├──► Reporter (error notice)                           │
//! │                  └──► Vec<Invalidation> (refetch prices, product)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod config;
pub mod editor;
pub mod error;
pub mod field_array;
pub mod form;
pub mod notify;

use tracing_subscriber::EnvFilter;

pub use cache::Invalidation;
pub use config::FormsConfig;
pub use editor::TierEditor;
pub use error::{ApiError, ErrorCode, ErrorSummary, FormError, FormResult};
pub use field_array::{FieldArray, VecFieldArray};
pub use form::{report_api_failure, PriceForm, PriceFormState, PricePayload};
pub use notify::{Notice, NoticeLevel, Reporter, TracingReporter};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=billdesk=trace` - Show trace for billdesk crates only
/// - Default: `info,billdesk=debug`
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,billdesk=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
