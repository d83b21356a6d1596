//! # Tier Editor
//!
//! Event handlers for the tier table on the price form.
//!
//! ## Handler Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tier Table Handlers                                  │
//! │                                                                         │
//! │  UI Event                 Handler                 FieldArray Writes     │
//! │  ────────                 ───────                 ─────────────────     │
//! │                                                                         │
//! │  "Up to" input ─────────► on_tier_change() ─────► update(i),           │
//! │                                                    update(i+1..)        │
//! │                                                                         │
//! │  "Add tier" ────────────► on_tier_create() ─────► update(last),        │
//! │                                                    append(tail)         │
//! │                                                                         │
//! │  Trash icon ────────────► on_tier_remove() ─────► remove(i),           │
//! │  (disabled unless          (false below min)       update(i..)          │
//! │   can_remove())                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The math lives in [`billdesk_core::tiers`]; this module only reads the
//! current rows, calls it, and writes back the rows that changed.

use billdesk_core::tiers;
use billdesk_core::validation::parse_upper_bound;
use billdesk_core::PriceTier;
use tracing::debug;

use crate::error::{FormError, FormResult};
use crate::field_array::FieldArray;

/// Tier table handlers over a form's tier field array.
pub struct TierEditor<'a, F: FieldArray<PriceTier>> {
    fields: &'a mut F,
}

impl<'a, F: FieldArray<PriceTier>> TierEditor<'a, F> {
    pub fn new(fields: &'a mut F) -> Self {
        TierEditor { fields }
    }

    /// Current tiers.
    pub fn tiers(&self) -> &[PriceTier] {
        self.fields.fields()
    }

    /// Whether the remove control should be enabled.
    pub fn can_remove(&self) -> bool {
        tiers::can_remove(self.fields.fields())
    }

    /// Handles an edit of tier `index`'s "up to" input.
    ///
    /// Blank input makes the tier open-ended without touching the others.
    /// A number reflows every tier after `index`.
    ///
    /// ## Errors
    /// - `FormError::Validation` when `raw` is not blank or a non-negative integer
    /// - `FormError::RowOutOfRange` when `index` is not a row
    pub fn on_tier_change(&mut self, index: usize, raw: &str) -> FormResult<()> {
        let len = self.fields.len();
        if index >= len {
            return Err(FormError::RowOutOfRange { index, len });
        }

        let upper = parse_upper_bound(raw)?;
        let updated = tiers::change_upper_bound(self.fields.fields(), index, upper);
        debug!(index, ?upper, "tier upper bound changed");

        self.fields.update(index, updated[index].clone());
        if upper.is_some() {
            self.write_back(&updated, index + 1);
        }
        Ok(())
    }

    /// Handles "Add tier": closes the open tail and appends a new one.
    pub fn on_tier_create(&mut self) {
        let current = self.fields.fields();
        let Some(last_index) = current.len().checked_sub(1) else {
            debug!("tier create ignored: no tiers to extend");
            return;
        };

        let mut updated = tiers::create_tier(current);
        let tail = updated.pop();
        self.fields.update(last_index, updated[last_index].clone());
        if let Some(tail) = tail {
            debug!(from_value = tail.from_value, "tier appended");
            self.fields.append(tail);
        }
    }

    /// Handles removal of tier `index`.
    ///
    /// Returns `false` and leaves the rows alone when the price would drop
    /// below the minimum tier count or `index` is not a row.
    pub fn on_tier_remove(&mut self, index: usize) -> bool {
        let current = self.fields.fields();
        if !tiers::can_remove(current) || index >= current.len() {
            debug!(index, len = current.len(), "tier removal refused");
            return false;
        }

        let updated = tiers::remove_tier(current, index);
        self.fields.remove(index);
        // Removing the tail reopens the new last row, which sits before `index`.
        self.write_back(&updated, index.min(updated.len() - 1));
        debug!(index, remaining = updated.len(), "tier removed");
        true
    }

    /// Writes `updated[from..]` over the matching field rows.
    fn write_back(&mut self, updated: &[PriceTier], from: usize) {
        for (i, tier) in updated.iter().enumerate().skip(from) {
            self.fields.update(i, tier.clone());
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
