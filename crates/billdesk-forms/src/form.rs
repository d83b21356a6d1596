//! # Price Form
//!
//! In-memory state of the "add price" form and its submission.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  PriceForm ──► to_payload() ──► Price::check() ──► PricePayload        │
//! │                     │                                   │               │
//! │                     ▼ (error)                           ▼               │
//! │               Reporter: error notice        [Prices, Product(id)]      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use billdesk_core::{
    BillingScheme, Money, Price, PriceTier, TiersMode, ValidationError, MAX_TIER_BOUND,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::Invalidation;
use crate::config::FormsConfig;
use crate::editor::TierEditor;
use crate::error::{ApiError, ErrorSummary, FormResult};
use crate::field_array::{FieldArray, VecFieldArray};
use crate::notify::{Notice, Reporter};

// =============================================================================
// Price Payload
// =============================================================================

/// Validated body of a create-price request.
///
/// ## Serialization
/// ```json
/// {
///   "product_id": "prod_1",
///   "currency": "usd",
///   "billing_scheme": "tiered",
///   "tiers_mode": "graduated",
///   "tiers": [
///     { "unit_amount": 100, "from_value": 0, "to_value": 10 },
///     { "unit_amount": 80, "from_value": 11, "to_value": null }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PricePayload(Price);

impl PricePayload {
    pub fn price(&self) -> &Price {
        &self.0
    }

    pub fn into_price(self) -> Price {
        self.0
    }

    /// JSON request body.
    pub fn to_json(&self) -> FormResult<String> {
        Ok(self.0.to_json()?)
    }
}

// =============================================================================
// Price Form
// =============================================================================

/// Fields of the price form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceForm {
    pub product_id: String,
    pub currency: String,
    /// Blank means no nickname.
    pub nickname: String,
    pub billing_scheme: BillingScheme,
    pub tiers_mode: TiersMode,
    /// Used by per-unit prices only.
    pub unit_amount: Option<Money>,
    /// Used by tiered prices only.
    pub tiers: VecFieldArray<PriceTier>,
}

impl PriceForm {
    /// Starts a per-unit price with no amount entered.
    pub fn per_unit(product_id: impl Into<String>, currency: &str) -> Self {
        PriceForm {
            product_id: product_id.into(),
            currency: currency.to_ascii_lowercase(),
            nickname: String::new(),
            billing_scheme: BillingScheme::PerUnit,
            tiers_mode: TiersMode::default(),
            unit_amount: None,
            tiers: VecFieldArray::new(Vec::new()),
        }
    }

    /// Starts a tiered price with two zero-priced tiers:
    /// `0..=first_upper` and an open tier after it.
    pub fn tiered(
        product_id: impl Into<String>,
        currency: &str,
        mode: TiersMode,
        first_upper: i64,
    ) -> Self {
        let first_upper = first_upper.clamp(0, MAX_TIER_BOUND - 1);
        let seed = vec![
            PriceTier::bounded(Money::zero(), 0, first_upper),
            PriceTier::open(Money::zero(), first_upper + 1),
        ];

        PriceForm {
            billing_scheme: BillingScheme::Tiered,
            tiers_mode: mode,
            tiers: VecFieldArray::new(seed),
            ..PriceForm::per_unit(product_id, currency)
        }
    }

    /// Starts a tiered price from the configured defaults.
    pub fn from_config(product_id: impl Into<String>, config: &FormsConfig) -> Self {
        PriceForm::tiered(
            product_id,
            &config.currency.code,
            config.tiers.default_mode,
            config.tiers.first_tier_upper,
        )
    }

    /// Tier table handlers bound to this form's tiers.
    pub fn tier_editor(&mut self) -> TierEditor<'_, VecFieldArray<PriceTier>> {
        TierEditor::new(&mut self.tiers)
    }

    /// Whether the tier table was edited since the form was opened or last saved.
    pub fn is_dirty(&self) -> bool {
        self.tiers.is_dirty()
    }

    /// Validates the form and builds the request body.
    ///
    /// ## Errors
    /// - `FormError::Validation` when a required field is missing
    /// - `FormError::Core` when the price fails [`Price::check`]
    pub fn to_payload(&self) -> FormResult<PricePayload> {
        let mut price = match self.billing_scheme {
            BillingScheme::PerUnit => {
                let amount = self.unit_amount.ok_or_else(|| ValidationError::Required {
                    field: "unit_amount".to_string(),
                })?;
                Price::per_unit(self.product_id.trim(), &self.currency, amount)
            }
            BillingScheme::Tiered => Price::tiered(
                self.product_id.trim(),
                &self.currency,
                self.tiers_mode,
                self.tiers.fields().to_vec(),
            ),
        };

        let nickname = self.nickname.trim();
        if !nickname.is_empty() {
            price.nickname = Some(nickname.to_string());
        }

        price.check()?;
        Ok(PricePayload(price))
    }

    /// Builds the payload for submission and lists the queries it will
    /// make stale.
    ///
    /// On failure an error notice goes to `reporter` and the error is
    /// returned.
    pub fn submit(&self, reporter: &dyn Reporter) -> FormResult<(PricePayload, Vec<Invalidation>)> {
        match self.to_payload() {
            Ok(payload) => {
                info!(
                    product_id = %payload.price().product_id,
                    scheme = ?payload.price().billing_scheme,
                    tiers = payload.price().tiers.len(),
                    "Price payload ready"
                );
                let invalidations = vec![
                    Invalidation::Prices,
                    Invalidation::Product(payload.price().product_id.clone()),
                ];
                Ok((payload, invalidations))
            }
            Err(e) => {
                warn!(error = %e, "Price form rejected");
                reporter.report(
                    Notice::error("Price could not be saved").with_description(e.to_string()),
                );
                Err(e)
            }
        }
    }

    /// Records that the API accepted the last submission.
    pub fn mark_saved(&mut self, reporter: &dyn Reporter) {
        self.tiers.mark_clean();
        reporter.report(Notice::success("Price saved"));
    }
}

/// Classifies a failed API response, tells the user, and returns the
/// error for the caller.
pub fn report_api_failure(
    status: Option<u16>,
    body: Option<&str>,
    reporter: &dyn Reporter,
) -> ApiError {
    let summary = ErrorSummary::classify(status, body);
    debug!(?status, code = ?summary.code, "API request failed");
    reporter.report(Notice::from(&summary));
    ApiError::from(summary)
}

// =============================================================================
// Shared State
// =============================================================================

/// Price form shared between UI handlers.
///
/// ## Thread Safety
/// `Arc<Mutex<PriceForm>>`: every edit takes the lock for its whole
/// read-compute-write cycle, so two handlers never interleave.
#[derive(Debug, Clone)]
pub struct PriceFormState {
    form: Arc<Mutex<PriceForm>>,
}

impl PriceFormState {
    pub fn new(form: PriceForm) -> Self {
        PriceFormState {
            form: Arc::new(Mutex::new(form)),
        }
    }

    /// Executes a function with read access to the form.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let payload = state.with_form(|form| form.to_payload())?;
    /// ```
    pub fn with_form<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PriceForm) -> R,
    {
        let form = self.form.lock().expect("Price form mutex poisoned");
        f(&form)
    }

    /// Executes a function with write access to the form.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_form_mut(|form| form.tier_editor().on_tier_change(0, "14"))?;
    /// ```
    pub fn with_form_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PriceForm) -> R,
    {
        let mut form = self.form.lock().expect("Price form mutex poisoned");
        f(&mut form)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
