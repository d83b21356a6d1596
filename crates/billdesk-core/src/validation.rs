//! # Validation Module
//!
//! Schema checks for tier schedules and the price form's raw inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input parsing                                                 │
//! │  └── parse_upper_bound: "" → open, "14" → 14, "abc" → error            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Tier editing (tiers.rs)                                      │
//! │  └── Assumes parsed input, never fails                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Submit (THIS MODULE: validate_tiers)                         │
//! │  └── Contiguity, single open tail, non-negative amounts                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Billing API                                                   │
//! │  └── Final authority, errors come back as ErrorSummary                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::PriceTier;
use crate::{MAX_TIER_BOUND, MIN_TIERS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Input Parsers
// =============================================================================

/// Parses the text of a tier's "up to" input.
///
/// ## Rules
/// - Blank (after trimming) means open-ended
/// - Otherwise must be an integer in `0..=MAX_TIER_BOUND`
///
/// ## Example
/// ```rust
/// use billdesk_core::validation::parse_upper_bound;
///
/// assert_eq!(parse_upper_bound("14").unwrap(), Some(14));
/// assert_eq!(parse_upper_bound("  ").unwrap(), None);
/// assert!(parse_upper_bound("-3").is_err());
/// assert!(parse_upper_bound("ten").is_err());
/// assert!(parse_upper_bound("9223372036854775807").is_err());
/// ```
pub fn parse_upper_bound(raw: &str) -> ValidationResult<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "to_value".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if value < 0 {
        return Err(ValidationError::Negative {
            field: "to_value".to_string(),
        });
    }
    if value > MAX_TIER_BOUND {
        return Err(ValidationError::TooLarge {
            field: "to_value".to_string(),
            max: MAX_TIER_BOUND,
        });
    }

    Ok(Some(value))
}

/// Validates a currency code.
///
/// ## Rules
/// - Exactly three ASCII letters (ISO 4217), any case
pub fn validate_currency(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a 3-letter ISO 4217 code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Tier Schedule
// =============================================================================

/// Validates a whole tier schedule before it is submitted.
///
/// ## Rules
/// - At least [`MIN_TIERS`] tiers
/// - First tier starts at zero or above
/// - No bound exceeds [`MAX_TIER_BOUND`]
/// - `unit_amount` and `flat_amount` are non-negative
/// - Every bounded tier has `from_value <= to_value`
/// - Each tier starts right after the previous one ends
/// - Only the last tier is open-ended, and it must be
///
/// ## Example
/// ```rust
/// use billdesk_core::validation::validate_tiers;
/// use billdesk_core::{Money, PriceTier};
///
/// let unit = Money::from_cents(100);
/// let ok = vec![PriceTier::bounded(unit, 0, 9), PriceTier::open(unit, 10)];
/// assert!(validate_tiers(&ok).is_ok());
///
/// let gap = vec![PriceTier::bounded(unit, 0, 9), PriceTier::open(unit, 12)];
/// assert!(validate_tiers(&gap).is_err());
/// ```
pub fn validate_tiers(tiers: &[PriceTier]) -> ValidationResult<()> {
    if tiers.len() < MIN_TIERS {
        return Err(ValidationError::TooFew {
            field: "tiers".to_string(),
            min: MIN_TIERS,
        });
    }

    if tiers[0].from_value < 0 {
        return Err(ValidationError::Negative {
            field: "tiers[0].from_value".to_string(),
        });
    }

    let last = tiers.len() - 1;
    let mut expected_from: Option<i64> = None;

    for (index, tier) in tiers.iter().enumerate() {
        if tier.unit_amount.is_negative() {
            return Err(ValidationError::Negative {
                field: format!("tiers[{index}].unit_amount"),
            });
        }
        if tier.flat_amount.is_some_and(|fee| fee.is_negative()) {
            return Err(ValidationError::Negative {
                field: format!("tiers[{index}].flat_amount"),
            });
        }

        if tier.from_value > MAX_TIER_BOUND {
            return Err(ValidationError::TooLarge {
                field: format!("tiers[{index}].from_value"),
                max: MAX_TIER_BOUND,
            });
        }
        if tier.to_value.is_some_and(|to| to > MAX_TIER_BOUND) {
            return Err(ValidationError::TooLarge {
                field: format!("tiers[{index}].to_value"),
                max: MAX_TIER_BOUND,
            });
        }

        if let Some(expected) = expected_from {
            if tier.from_value != expected {
                return Err(ValidationError::NotContiguous {
                    index,
                    expected,
                    actual: tier.from_value,
                });
            }
        }

        match tier.to_value {
            Some(_) if index == last => return Err(ValidationError::LastTierBounded),
            Some(to) if to < tier.from_value => {
                return Err(ValidationError::InvertedTier {
                    index,
                    from: tier.from_value,
                    to,
                });
            }
            Some(to) => expected_from = Some(to + 1),
            None if index != last => return Err(ValidationError::OpenTierNotLast { index }),
            None => {}
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn unit() -> Money {
        Money::from_cents(100)
    }

    fn valid() -> Vec<PriceTier> {
        vec![
            PriceTier::bounded(unit(), 0, 9),
            PriceTier::bounded(unit(), 10, 19),
            PriceTier::open(unit(), 20),
        ]
    }

    #[test]
    fn test_parse_upper_bound() {
        assert_eq!(parse_upper_bound("0").unwrap(), Some(0));
        assert_eq!(parse_upper_bound(" 42 ").unwrap(), Some(42));
        assert_eq!(parse_upper_bound("").unwrap(), None);

        assert!(matches!(
            parse_upper_bound("-1"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_upper_bound("1.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_upper_bound_caps_large_values() {
        assert_eq!(
            parse_upper_bound(&MAX_TIER_BOUND.to_string()).unwrap(),
            Some(MAX_TIER_BOUND)
        );
        assert_eq!(
            parse_upper_bound(&i64::MAX.to_string()),
            Err(ValidationError::TooLarge {
                field: "to_value".to_string(),
                max: MAX_TIER_BOUND
            })
        );
        assert!(matches!(
            parse_upper_bound("99999999999999999999"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_tiers_too_large() {
        let mut tiers = valid();
        tiers[1].to_value = Some(i64::MAX);
        tiers[2].from_value = i64::MAX;
        assert_eq!(
            validate_tiers(&tiers),
            Err(ValidationError::TooLarge {
                field: "tiers[1].to_value".to_string(),
                max: MAX_TIER_BOUND
            })
        );

        let mut tiers = valid();
        tiers[2].from_value = MAX_TIER_BOUND + 1;
        assert!(matches!(
            validate_tiers(&tiers),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_currency() {
        assert!(validate_currency("usd").is_ok());
        assert!(validate_currency("EUR").is_ok());
        assert!(validate_currency("").is_err());
        assert!(validate_currency("US").is_err());
        assert!(validate_currency("U5D").is_err());
    }

    #[test]
    fn test_validate_tiers_accepts_valid() {
        assert!(validate_tiers(&valid()).is_ok());
    }

    #[test]
    fn test_validate_tiers_too_few() {
        let one = vec![PriceTier::open(unit(), 0)];
        assert_eq!(
            validate_tiers(&one),
            Err(ValidationError::TooFew {
                field: "tiers".to_string(),
                min: 2
            })
        );
    }

    #[test]
    fn test_validate_tiers_gap() {
        let mut tiers = valid();
        tiers[1].from_value = 11;
        assert_eq!(
            validate_tiers(&tiers),
            Err(ValidationError::NotContiguous {
                index: 1,
                expected: 10,
                actual: 11
            })
        );
    }

    #[test]
    fn test_validate_tiers_inverted() {
        let mut tiers = valid();
        tiers[1].to_value = Some(5);
        assert!(matches!(
            validate_tiers(&tiers),
            Err(ValidationError::InvertedTier { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_tiers_open_placement() {
        let mut tiers = valid();
        tiers[1].to_value = None;
        assert_eq!(
            validate_tiers(&tiers),
            Err(ValidationError::OpenTierNotLast { index: 1 })
        );

        let mut tiers = valid();
        tiers[2].to_value = Some(30);
        assert_eq!(validate_tiers(&tiers), Err(ValidationError::LastTierBounded));
    }

    #[test]
    fn test_validate_tiers_negative_amounts() {
        let mut tiers = valid();
        tiers[2].unit_amount = Money::from_cents(-1);
        assert!(matches!(
            validate_tiers(&tiers),
            Err(ValidationError::Negative { .. })
        ));

        let mut tiers = valid();
        tiers[0].flat_amount = Some(Money::from_cents(-500));
        assert!(validate_tiers(&tiers).is_err());

        let mut tiers = valid();
        tiers[0].from_value = -1;
        assert!(validate_tiers(&tiers).is_err());
    }
}
