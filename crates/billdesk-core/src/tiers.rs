//! # Tier Renormalization
//!
//! Keeps a tier schedule contiguous while the user edits it.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tier Table Edits                                     │
//! │                                                                         │
//! │  User Action              Function                  Reflow From         │
//! │  ───────────              ────────                  ───────────         │
//! │                                                                         │
//! │  Type upper bound ──────► change_upper_bound() ───► index + 1          │
//! │  (blank = open)           (open: no reflow)                             │
//! │                                                                         │
//! │  Click "Add tier" ──────► create_tier() ──────────► (closes last,      │
//! │                                                       appends tail)     │
//! │                                                                         │
//! │  Click remove ──────────► remove_tier() ──────────► min(index, len-1)  │
//! │                           (refused below MIN_TIERS)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reflow Example
//! ```text
//!   before:  [0 ─ 9] [10 ─ 19] [20 ───►      user sets tier 0 upper to 14
//!   after:   [0 ─ 14] [15 ─ 24] [25 ───►     tier 1 keeps its width of 9
//! ```
//!
//! Every function takes the current schedule by reference and returns a new
//! one. None of them fail: input is validated by the form schema before it
//! gets here, and out-of-range indexes leave the schedule unchanged.

use crate::types::PriceTier;
use crate::MIN_TIERS;

/// Recomputes tier bounds from `start` onward so tiers are contiguous again.
///
/// Each reflowed tier keeps its original width (`to_value - from_value`) and
/// starts right after its predecessor. The last tier always ends up open.
/// A bounded tier with no known width collapses to a single unit.
///
/// `start == 0` never moves tier 0; reflow then begins at tier 1.
///
/// ## Example
/// ```rust
/// use billdesk_core::tiers::normalize_from;
/// use billdesk_core::{Money, PriceTier};
///
/// let unit = Money::from_cents(100);
/// let tiers = vec![
///     PriceTier::bounded(unit, 0, 14),
///     PriceTier::bounded(unit, 10, 19),
///     PriceTier::open(unit, 20),
/// ];
///
/// let fixed = normalize_from(&tiers, 1);
/// assert_eq!((fixed[1].from_value, fixed[1].to_value), (15, Some(24)));
/// assert_eq!((fixed[2].from_value, fixed[2].to_value), (25, None));
/// ```
pub fn normalize_from(tiers: &[PriceTier], start: usize) -> Vec<PriceTier> {
    let mut out = tiers.to_vec();
    if out.is_empty() || start >= out.len() {
        return out;
    }

    let reflow_start = start.max(1);
    let last = out.len() - 1;
    let mut anchor = out[reflow_start - 1].next_free();

    for (i, tier) in out.iter_mut().enumerate().skip(reflow_start) {
        let span = tier.span();
        tier.from_value = anchor;
        tier.to_value = if i == last {
            None
        } else {
            Some(anchor.saturating_add(span.unwrap_or(0)))
        };

        if let Some(to) = tier.to_value {
            anchor = to.saturating_add(1);
        }
    }

    out
}

/// Sets the upper bound of tier `index` and reflows the tiers after it.
///
/// `None` marks the tier open-ended and leaves every other tier alone; the
/// caller is expected to only do that on the last tier.
pub fn change_upper_bound(tiers: &[PriceTier], index: usize, upper: Option<i64>) -> Vec<PriceTier> {
    let mut out = tiers.to_vec();
    let Some(tier) = out.get_mut(index) else {
        return out;
    };
    tier.to_value = upper;

    match upper {
        Some(_) => normalize_from(&out, index + 1),
        None => out,
    }
}

/// Appends a new open-ended tier after the current last one.
///
/// The previous last tier is closed right before the new tier's start, and
/// its unit amount is copied onto the new tier.
///
/// ## Example
/// ```rust
/// use billdesk_core::tiers::create_tier;
/// use billdesk_core::{Money, PriceTier};
///
/// let unit = Money::from_cents(100);
/// let tiers = vec![PriceTier::bounded(unit, 0, 9), PriceTier::open(unit, 10)];
///
/// let grown = create_tier(&tiers);
/// assert_eq!(grown.len(), 3);
/// assert_eq!(grown[1].to_value, Some(10));
/// assert_eq!((grown[2].from_value, grown[2].to_value), (11, None));
/// ```
pub fn create_tier(tiers: &[PriceTier]) -> Vec<PriceTier> {
    let mut out = tiers.to_vec();
    let Some(last) = out.last_mut() else {
        return out;
    };

    let new_from = last.next_free();
    last.to_value = Some(new_from.saturating_sub(1));
    let tail = PriceTier::open(last.unit_amount, new_from);

    out.push(tail);
    out
}

/// Checks whether a tier can be removed without going below [`MIN_TIERS`].
#[inline]
pub fn can_remove(tiers: &[PriceTier]) -> bool {
    tiers.len() > MIN_TIERS
}

/// Removes tier `index` and reflows the tiers after the gap.
///
/// Refuses silently (returns the schedule unchanged) when the removal would
/// leave fewer than [`MIN_TIERS`] tiers or when `index` is out of range.
pub fn remove_tier(tiers: &[PriceTier], index: usize) -> Vec<PriceTier> {
    if !can_remove(tiers) || index >= tiers.len() {
        return tiers.to_vec();
    }

    let mut out = tiers.to_vec();
    out.remove(index);

    let start = index.min(out.len() - 1);
    normalize_from(&out, start)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn tier(unit: i64, from: i64, to: Option<i64>) -> PriceTier {
        PriceTier {
            unit_amount: Money::from_cents(unit),
            from_value: from,
            to_value: to,
            flat_amount: None,
        }
    }

    fn bounds(tiers: &[PriceTier]) -> Vec<(i64, Option<i64>)> {
        tiers.iter().map(|t| (t.from_value, t.to_value)).collect()
    }

    fn three_tiers() -> Vec<PriceTier> {
        vec![
            tier(1, 0, Some(9)),
            tier(2, 10, Some(19)),
            tier(3, 20, None),
        ]
    }

    fn assert_contiguous(tiers: &[PriceTier]) {
        for pair in tiers.windows(2) {
            if let Some(to) = pair[0].to_value {
                assert_eq!(pair[1].from_value, to + 1, "gap in {:?}", bounds(tiers));
            }
        }
    }

    fn assert_only_last_open(tiers: &[PriceTier]) {
        let open: Vec<usize> = tiers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_open())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(open, vec![tiers.len() - 1], "open tiers in {:?}", bounds(tiers));
    }

    #[test]
    fn test_normalize_empty_and_out_of_range() {
        assert!(normalize_from(&[], 0).is_empty());

        let tiers = three_tiers();
        assert_eq!(normalize_from(&tiers, 3), tiers);
        assert_eq!(normalize_from(&tiers, 99), tiers);
    }

    #[test]
    fn test_normalize_from_zero_keeps_first_tier() {
        let tiers = vec![
            tier(1, 5, Some(9)),
            tier(2, 30, Some(39)),
            tier(3, 70, Some(80)),
        ];

        let fixed = normalize_from(&tiers, 0);
        assert_eq!(
            bounds(&fixed),
            vec![(5, Some(9)), (10, Some(19)), (20, None)]
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let messy = vec![
            tier(1, 0, Some(4)),
            tier(2, 9, Some(12)),
            tier(3, 40, Some(41)),
            tier(4, 100, None),
        ];

        let once = normalize_from(&messy, 0);
        let twice = normalize_from(&once, 0);
        assert_eq!(once, twice);
        assert_eq!(normalize_from(&three_tiers(), 0), three_tiers());
    }

    #[test]
    fn test_normalize_anchors_after_open_predecessor() {
        // Predecessor is open: next free unit is its from_value + 1.
        let tiers = vec![tier(1, 0, Some(9)), tier(2, 10, None), tier(3, 50, Some(60))];

        let fixed = normalize_from(&tiers, 2);
        assert_eq!(fixed[2].from_value, 11);
        assert_eq!(fixed[2].to_value, None);
    }

    #[test]
    fn test_normalize_zero_width_fallback() {
        // Tier 1 is bounded in the middle but has lost its upper bound.
        let tiers = vec![tier(1, 0, Some(9)), tier(2, 3, None), tier(3, 20, None)];

        let fixed = normalize_from(&tiers, 1);
        assert_eq!(bounds(&fixed), vec![(0, Some(9)), (10, Some(10)), (11, None)]);
    }

    #[test]
    fn test_normalize_does_not_touch_unit_amounts() {
        let fixed = normalize_from(&three_tiers(), 1);
        let units: Vec<i64> = fixed.iter().map(|t| t.unit_amount.cents()).collect();
        assert_eq!(units, vec![1, 2, 3]);
    }

    #[test]
    fn test_change_widens_first_tier() {
        let changed = change_upper_bound(&three_tiers(), 0, Some(14));
        assert_eq!(
            bounds(&changed),
            vec![(0, Some(14)), (15, Some(24)), (25, None)]
        );
    }

    #[test]
    fn test_change_narrows_middle_tier() {
        let changed = change_upper_bound(&three_tiers(), 1, Some(12));
        assert_eq!(
            bounds(&changed),
            vec![(0, Some(9)), (10, Some(12)), (13, None)]
        );
        assert_contiguous(&changed);
    }

    #[test]
    fn test_change_preserves_downstream_spans() {
        let tiers = vec![
            tier(1, 0, Some(9)),
            tier(2, 10, Some(14)),
            tier(3, 15, Some(44)),
            tier(4, 45, None),
        ];

        let changed = change_upper_bound(&tiers, 0, Some(99));
        assert_eq!(changed[1].span(), Some(4));
        assert_eq!(changed[2].span(), Some(29));
        assert_eq!(
            bounds(&changed),
            vec![(0, Some(99)), (100, Some(104)), (105, Some(134)), (135, None)]
        );
    }

    #[test]
    fn test_change_to_open_skips_reflow() {
        let tiers = three_tiers();
        let changed = change_upper_bound(&tiers, 2, None);
        assert_eq!(changed, tiers);

        let changed = change_upper_bound(&tiers, 0, None);
        assert_eq!(changed[0].to_value, None);
        assert_eq!(changed[1], tiers[1]);
    }

    #[test]
    fn test_change_out_of_range_is_noop() {
        let tiers = three_tiers();
        assert_eq!(change_upper_bound(&tiers, 3, Some(5)), tiers);
    }

    #[test]
    fn test_create_closes_open_tail() {
        let tiers = vec![tier(1, 0, Some(9)), tier(1, 10, None)];

        let grown = create_tier(&tiers);
        assert_eq!(
            bounds(&grown),
            vec![(0, Some(9)), (10, Some(10)), (11, None)]
        );
        assert_eq!(grown[2].unit_amount, Money::from_cents(1));
    }

    #[test]
    fn test_create_copies_last_unit_amount() {
        let grown = create_tier(&three_tiers());
        assert_eq!(grown.len(), 4);
        assert_eq!(grown[3].unit_amount, Money::from_cents(3));
        assert_eq!(grown[3].flat_amount, None);
        assert_only_last_open(&grown);
        assert_contiguous(&grown);
    }

    #[test]
    fn test_create_after_bounded_tail() {
        let tiers = vec![tier(1, 0, Some(9)), tier(2, 10, Some(19))];

        let grown = create_tier(&tiers);
        assert_eq!(
            bounds(&grown),
            vec![(0, Some(9)), (10, Some(19)), (20, None)]
        );
    }

    #[test]
    fn test_create_on_empty_is_noop() {
        assert!(create_tier(&[]).is_empty());
    }

    #[test]
    fn test_remove_middle_tier() {
        let shrunk = remove_tier(&three_tiers(), 1);
        assert_eq!(bounds(&shrunk), vec![(0, Some(9)), (10, None)]);
        assert_eq!(shrunk[1].unit_amount, Money::from_cents(3));
    }

    #[test]
    fn test_remove_last_tier_reopens_new_tail() {
        let shrunk = remove_tier(&three_tiers(), 2);
        assert_eq!(bounds(&shrunk), vec![(0, Some(9)), (10, None)]);
    }

    #[test]
    fn test_remove_first_tier_keeps_successor_bounds() {
        let shrunk = remove_tier(&three_tiers(), 0);
        assert_eq!(bounds(&shrunk), vec![(10, Some(19)), (20, None)]);
    }

    #[test]
    fn test_remove_refused_at_minimum() {
        let tiers = vec![tier(1, 0, Some(9)), tier(2, 10, None)];
        assert!(!can_remove(&tiers));
        assert_eq!(remove_tier(&tiers, 0), tiers);
        assert_eq!(remove_tier(&tiers, 1), tiers);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let tiers = three_tiers();
        assert_eq!(remove_tier(&tiers, 7), tiers);
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        let changed = change_upper_bound(&three_tiers(), 0, Some(i64::MAX));
        assert_eq!(changed[0].to_value, Some(i64::MAX));
        assert!(changed[1..].iter().all(|t| t.from_value == i64::MAX));
        assert!(changed.last().unwrap().is_open());

        let tiers = vec![tier(1, 0, Some(9)), tier(2, 10, Some(i64::MAX))];
        let grown = create_tier(&tiers);
        assert_eq!(grown.len(), 3);
        assert_eq!(grown[2].from_value, i64::MAX);
        assert!(grown[2].is_open());
    }

    #[test]
    fn test_edit_sequence_keeps_invariants() {
        let mut tiers = vec![tier(5, 0, Some(10)), tier(4, 11, None)];

        tiers = create_tier(&tiers);
        tiers = create_tier(&tiers);
        tiers = change_upper_bound(&tiers, 1, Some(50));
        tiers = change_upper_bound(&tiers, 0, Some(3));
        tiers = remove_tier(&tiers, 2);
        tiers = create_tier(&tiers);
        tiers = change_upper_bound(&tiers, 2, Some(200));
        tiers = remove_tier(&tiers, 0);

        assert_contiguous(&tiers);
        assert_only_last_open(&tiers);
        for t in &tiers {
            if let Some(to) = t.to_value {
                assert!(t.from_value <= to);
            }
        }
    }
}
