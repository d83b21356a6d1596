//! # Domain Types
//!
//! Price and tier types shared by the dashboard forms and the API payload.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │     Price       │ 1    * │   PriceTier     │                        │
//! │  │  ─────────────  │◄──────►│  ─────────────  │                        │
//! │  │  product_id     │        │  unit_amount    │                        │
//! │  │  currency       │        │  from_value     │                        │
//! │  │  billing_scheme │        │  to_value       │  None = open-ended     │
//! │  │  tiers_mode     │        │  flat_amount    │                        │
//! │  └─────────────────┘        └─────────────────┘                        │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │ BillingScheme   │        │   TiersMode     │                        │
//! │  │  PerUnit        │        │   Graduated     │                        │
//! │  │  Tiered         │        │   Volume        │                        │
//! │  └─────────────────┘        └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tier Sequence Shape
//! ```text
//!   [0 ──── 9] [10 ──── 19] [20 ──────────────►
//!    tier 0      tier 1       tier 2 (open)
//! ```
//! Tiers are contiguous, inclusive on both ends, and only the last one is
//! open-ended.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_currency, validate_tiers};

// =============================================================================
// Price Tier
// =============================================================================

/// One row of a tiered pricing schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceTier {
    /// Price per unit for units falling in this tier.
    pub unit_amount: Money,

    /// Inclusive lower bound of the tier's unit range.
    #[ts(type = "number")]
    pub from_value: i64,

    /// Inclusive upper bound, or `None` for the open-ended last tier.
    /// Always serialized, as `null` when open.
    #[ts(type = "number | null")]
    pub to_value: Option<i64>,

    /// Fixed fee charged once when any unit lands in this tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub flat_amount: Option<Money>,
}

impl PriceTier {
    /// Creates a tier covering `from_value..=to_value`.
    pub fn bounded(unit_amount: Money, from_value: i64, to_value: i64) -> Self {
        PriceTier {
            unit_amount,
            from_value,
            to_value: Some(to_value),
            flat_amount: None,
        }
    }

    /// Creates an open-ended tier starting at `from_value`.
    pub fn open(unit_amount: Money, from_value: i64) -> Self {
        PriceTier {
            unit_amount,
            from_value,
            to_value: None,
            flat_amount: None,
        }
    }

    /// Adds a flat fee to the tier.
    pub fn with_flat_amount(mut self, flat_amount: Money) -> Self {
        self.flat_amount = Some(flat_amount);
        self
    }

    /// Checks whether the tier has no upper bound.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.to_value.is_none()
    }

    /// Width of the tier as `to_value - from_value`, `None` when open.
    ///
    /// A tier `{10, 19}` has span 9.
    #[inline]
    pub fn span(&self) -> Option<i64> {
        self.to_value.map(|to| to.saturating_sub(self.from_value))
    }

    /// First unit after this tier.
    ///
    /// For an open tier this falls back to `from_value + 1`. Saturates at
    /// `i64::MAX`.
    #[inline]
    pub fn next_free(&self) -> i64 {
        self.to_value.unwrap_or(self.from_value).saturating_add(1)
    }

    /// Checks whether `quantity` falls inside the tier's range.
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.from_value && self.to_value.map_or(true, |to| quantity <= to)
    }
}

// =============================================================================
// Billing Scheme
// =============================================================================

/// How a price turns a quantity into an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BillingScheme {
    /// One `unit_amount` for every unit.
    #[default]
    PerUnit,
    /// Amount depends on a tier schedule.
    Tiered,
}

// =============================================================================
// Tiers Mode
// =============================================================================

/// How tiers apply to a quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TiersMode {
    /// Each unit is priced by the tier it falls in.
    #[default]
    Graduated,
    /// Every unit is priced by the tier the total quantity falls in.
    Volume,
}

// =============================================================================
// Price
// =============================================================================

/// A price attached to a product, as sent to the billing API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Price {
    pub product_id: String,

    /// ISO 4217 code, lowercase on the wire.
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub nickname: Option<String>,

    pub billing_scheme: BillingScheme,

    /// Required when `billing_scheme` is tiered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tiers_mode: Option<TiersMode>,

    /// Required when `billing_scheme` is per-unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub unit_amount: Option<Money>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiers: Vec<PriceTier>,
}

impl Price {
    /// Creates a per-unit price.
    pub fn per_unit(product_id: impl Into<String>, currency: &str, unit_amount: Money) -> Self {
        Price {
            product_id: product_id.into(),
            currency: currency.to_ascii_lowercase(),
            nickname: None,
            billing_scheme: BillingScheme::PerUnit,
            tiers_mode: None,
            unit_amount: Some(unit_amount),
            tiers: Vec::new(),
        }
    }

    /// Creates a tiered price.
    pub fn tiered(
        product_id: impl Into<String>,
        currency: &str,
        mode: TiersMode,
        tiers: Vec<PriceTier>,
    ) -> Self {
        Price {
            product_id: product_id.into(),
            currency: currency.to_ascii_lowercase(),
            nickname: None,
            billing_scheme: BillingScheme::Tiered,
            tiers_mode: Some(mode),
            unit_amount: None,
            tiers,
        }
    }

    /// Checks the price carries everything its billing scheme needs.
    ///
    /// ## Rules
    /// - Currency must be a 3-letter code
    /// - Per-unit: `unit_amount` present and non-negative, no tiers
    /// - Tiered: `tiers_mode` present, tiers pass [`validate_tiers`]
    pub fn check(&self) -> CoreResult<()> {
        if self.product_id.trim().is_empty() {
            return Err(CoreError::IncompletePrice {
                reason: "product_id is missing".to_string(),
            });
        }
        validate_currency(&self.currency)?;

        match self.billing_scheme {
            BillingScheme::PerUnit => {
                let amount = self.unit_amount.ok_or_else(|| CoreError::IncompletePrice {
                    reason: "per-unit price needs a unit_amount".to_string(),
                })?;
                if amount.is_negative() {
                    return Err(CoreError::IncompletePrice {
                        reason: "unit_amount must not be negative".to_string(),
                    });
                }
                if !self.tiers.is_empty() {
                    return Err(CoreError::IncompletePrice {
                        reason: "per-unit price cannot carry tiers".to_string(),
                    });
                }
            }
            BillingScheme::Tiered => {
                if self.tiers_mode.is_none() {
                    return Err(CoreError::IncompletePrice {
                        reason: "tiered price needs a tiers_mode".to_string(),
                    });
                }
                validate_tiers(&self.tiers)?;
            }
        }

        Ok(())
    }

    /// Serializes the price into the API's JSON body.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
