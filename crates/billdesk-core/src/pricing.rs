//! # Pricing Preview
//!
//! Computes what a price charges for a quantity, so the price form can show
//! a live preview next to the tier table.
//!
//! ## Graduated vs Volume
//! ```text
//! Tiers: [0 ─ 9] @ $1.00   [10 ─ 19] @ $0.80   [20 ───► @ $0.50
//! Quantity: 25
//!
//! GRADUATED (each unit priced by its own tier)
//!   units 1-9    →  9 × $1.00 = $9.00
//!   units 10-19  → 10 × $0.80 = $8.00
//!   units 20-25  →  6 × $0.50 = $3.00
//!                               ──────
//!                               $20.00
//!
//! VOLUME (all units priced by the tier 25 lands in)
//!   25 × $0.50 = $12.50
//! ```
//!
//! Units are counted from 1, so a first tier starting at 0 effectively
//! starts at unit 1.

use crate::money::Money;
use crate::types::{BillingScheme, Price, PriceTier, TiersMode};

/// Amount for `quantity` units where each unit is priced by its own tier.
///
/// A tier's `flat_amount` is added once if at least one unit lands in it.
pub fn graduated_amount(tiers: &[PriceTier], quantity: i64) -> Money {
    if quantity <= 0 {
        return Money::zero();
    }

    tiers
        .iter()
        .map(|tier| {
            let first = tier.from_value.max(1);
            let last = tier.to_value.map_or(quantity, |to| to.min(quantity));
            let units = last - first + 1;
            if units <= 0 {
                return Money::zero();
            }
            tier.unit_amount.multiply_quantity(units) + tier.flat_amount.unwrap_or_default()
        })
        .sum()
}

/// Amount for `quantity` units, all priced by the tier `quantity` falls in.
///
/// Quantities below the first tier are priced by the first tier.
pub fn volume_amount(tiers: &[PriceTier], quantity: i64) -> Money {
    if quantity <= 0 {
        return Money::zero();
    }

    let tier = tiers
        .iter()
        .find(|tier| tier.contains(quantity))
        .or_else(|| tiers.first().filter(|first| quantity < first.from_value));

    match tier {
        Some(tier) => {
            tier.unit_amount.multiply_quantity(quantity) + tier.flat_amount.unwrap_or_default()
        }
        None => Money::zero(),
    }
}

impl Price {
    /// Amount this price charges for `quantity` units.
    ///
    /// ## Example
    /// ```rust
    /// use billdesk_core::{Money, Price, PriceTier, TiersMode};
    ///
    /// let tiers = vec![
    ///     PriceTier::bounded(Money::from_cents(100), 0, 9),
    ///     PriceTier::open(Money::from_cents(50), 10),
    /// ];
    /// let price = Price::tiered("prod_1", "usd", TiersMode::Volume, tiers);
    /// assert_eq!(price.amount_for_quantity(12).cents(), 600);
    /// ```
    pub fn amount_for_quantity(&self, quantity: i64) -> Money {
        match self.billing_scheme {
            BillingScheme::PerUnit => self
                .unit_amount
                .map_or(Money::zero(), |unit| unit.multiply_quantity(quantity.max(0))),
            BillingScheme::Tiered => match self.tiers_mode.unwrap_or_default() {
                TiersMode::Graduated => graduated_amount(&self.tiers, quantity),
                TiersMode::Volume => volume_amount(&self.tiers, quantity),
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
