//! # Invoice Numbering
//!
//! Renders invoice numbers from an account's numbering template.
//!
//! ## Template Tokens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Token       Renders                          Example (2026-03-07, #42) │
//! │  ─────       ───────                          ───────────────────────── │
//! │  {prefix}    Account's invoice prefix         INV                       │
//! │  {number}    Sequence, zero-padded            0042  (padding = 4)       │
//! │  {YYYY}      Four-digit year                  2026                      │
//! │  {YY}        Two-digit year                   26                        │
//! │  {MM}        Two-digit month                  03                        │
//! │  {DD}        Two-digit day                    07                        │
//! │  {{ / }}     Literal brace                    { / }                     │
//! │                                                                         │
//! │  "{prefix}-{YYYY}{MM}-{number}"  →  "INV-202603-0042"                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tokens are case-sensitive. Anything else in braces is rejected.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Values substituted into a numbering template.
#[derive(Debug, Clone)]
pub struct NumberingContext<'a> {
    pub prefix: &'a str,
    pub number: u64,
    /// Minimum width of `{number}`; shorter numbers are left-padded with `0`.
    pub padding: usize,
    pub date: NaiveDate,
}

/// Renders `template` with the values in `ctx`.
///
/// ## Example
/// ```rust
/// use billdesk_core::numbering::{render, NumberingContext};
/// use chrono::NaiveDate;
///
/// let ctx = NumberingContext {
///     prefix: "INV",
///     number: 42,
///     padding: 4,
///     date: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
/// };
/// assert_eq!(render("{prefix}-{YYYY}{MM}-{number}", &ctx).unwrap(), "INV-202603-0042");
/// ```
pub fn render(template: &str, ctx: &NumberingContext<'_>) -> CoreResult<String> {
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut token = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    token.push(c);
                }
                if !closed {
                    return Err(CoreError::InvalidTemplate {
                        position: pos,
                        reason: "unclosed '{'".to_string(),
                    });
                }
                push_token(&mut out, &token, pos, ctx)?;
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(CoreError::InvalidTemplate {
                    position: pos,
                    reason: "unmatched '}'".to_string(),
                });
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn push_token(
    out: &mut String,
    token: &str,
    position: usize,
    ctx: &NumberingContext<'_>,
) -> CoreResult<()> {
    let date = ctx.date;
    let rendered = match token {
        "prefix" => ctx.prefix.to_string(),
        "number" => format!("{:0width$}", ctx.number, width = ctx.padding),
        "YYYY" => format!("{:04}", date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MM" => format!("{:02}", date.month()),
        "DD" => format!("{:02}", date.day()),
        unknown => {
            return Err(CoreError::InvalidTemplate {
                position,
                reason: format!("unknown token '{unknown}'"),
            });
        }
    };
    out.push_str(&rendered);
    Ok(())
}

// =============================================================================
// Numbering System
// =============================================================================

/// When the invoice sequence starts over at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    #[default]
    Never,
    Yearly,
    Monthly,
}

/// An account's invoice numbering settings plus its sequence position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingSystem {
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_padding")]
    pub padding: u8,

    /// Number the next issued invoice gets.
    #[serde(default = "default_next_number")]
    pub next_number: u64,

    #[serde(default)]
    pub reset: ResetPolicy,

    /// Date of the last issued invoice, used for resets.
    #[serde(default)]
    pub last_issued: Option<NaiveDate>,
}

fn default_template() -> String {
    "{prefix}-{YYYY}-{number}".to_string()
}

fn default_prefix() -> String {
    "INV".to_string()
}

fn default_padding() -> u8 {
    4
}

fn default_next_number() -> u64 {
    1
}

impl Default for NumberingSystem {
    fn default() -> Self {
        NumberingSystem {
            template: default_template(),
            prefix: default_prefix(),
            padding: default_padding(),
            next_number: default_next_number(),
            reset: ResetPolicy::default(),
            last_issued: None,
        }
    }
}

impl NumberingSystem {
    /// Checks whether issuing on `date` starts a new sequence period.
    pub fn should_reset(&self, date: NaiveDate) -> bool {
        let Some(last) = self.last_issued else {
            return false;
        };
        match self.reset {
            ResetPolicy::Never => false,
            ResetPolicy::Yearly => last.year() != date.year(),
            ResetPolicy::Monthly => (last.year(), last.month()) != (date.year(), date.month()),
        }
    }

    fn number_for(&self, date: NaiveDate) -> u64 {
        if self.should_reset(date) {
            1
        } else {
            self.next_number
        }
    }

    fn render_number(&self, number: u64, date: NaiveDate) -> CoreResult<String> {
        let ctx = NumberingContext {
            prefix: &self.prefix,
            number,
            padding: usize::from(self.padding),
            date,
        };
        render(&self.template, &ctx)
    }

    /// Renders the number the next invoice issued on `date` would get.
    pub fn preview(&self, date: NaiveDate) -> CoreResult<String> {
        self.render_number(self.number_for(date), date)
    }

    /// Issues the next invoice number and advances the sequence.
    ///
    /// The sequence is left untouched when the template fails to render.
    pub fn next(&mut self, date: NaiveDate) -> CoreResult<String> {
        let number = self.number_for(date);
        let rendered = self.render_number(number, date)?;
        self.next_number = number.saturating_add(1);
        self.last_issued = Some(date);
        Ok(rendered)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx(number: u64) -> NumberingContext<'static> {
        NumberingContext {
            prefix: "INV",
            number,
            padding: 4,
            date: date(2026, 3, 7),
        }
    }

    #[test]
    fn test_render_all_tokens() {
        let out = render("{prefix}/{YY}/{MM}/{DD}/{YYYY}/{number}", &ctx(7)).unwrap();
        assert_eq!(out, "INV/26/03/07/2026/0007");
    }

    #[test]
    fn test_render_number_wider_than_padding() {
        assert_eq!(render("{number}", &ctx(123456)).unwrap(), "123456");
    }

    #[test]
    fn test_render_escaped_braces() {
        assert_eq!(render("{{{number}}}", &ctx(1)).unwrap(), "{0001}");
        assert_eq!(render("plain", &ctx(1)).unwrap(), "plain");
    }

    #[test]
    fn test_render_unknown_token() {
        let err = render("INV-{month}", &ctx(1)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTemplate { position: 4, .. }
        ));
        assert!(err.to_string().contains("unknown token 'month'"));

        // Case-sensitive.
        assert!(render("{yyyy}", &ctx(1)).is_err());
    }

    #[test]
    fn test_render_unbalanced_braces() {
        assert!(matches!(
            render("INV-{number", &ctx(1)),
            Err(CoreError::InvalidTemplate { position: 4, .. })
        ));
        assert!(matches!(
            render("INV}", &ctx(1)),
            Err(CoreError::InvalidTemplate { position: 3, .. })
        ));
    }

    #[test]
    fn test_next_advances_sequence() {
        let mut system = NumberingSystem::default();
        assert_eq!(system.preview(date(2026, 1, 5)).unwrap(), "INV-2026-0001");

        assert_eq!(system.next(date(2026, 1, 5)).unwrap(), "INV-2026-0001");
        assert_eq!(system.next(date(2026, 1, 6)).unwrap(), "INV-2026-0002");
        assert_eq!(system.next_number, 3);
    }

    #[test]
    fn test_next_saturates_sequence() {
        let mut system = NumberingSystem {
            template: "{number}".to_string(),
            next_number: u64::MAX,
            ..NumberingSystem::default()
        };
        assert_eq!(system.next(date(2026, 1, 5)).unwrap(), u64::MAX.to_string());
        assert_eq!(system.next_number, u64::MAX);
    }

    #[test]
    fn test_preview_does_not_advance() {
        let system = NumberingSystem::default();
        system.preview(date(2026, 1, 5)).unwrap();
        assert_eq!(system.next_number, 1);
    }

    #[test]
    fn test_yearly_reset() {
        let mut system = NumberingSystem {
            reset: ResetPolicy::Yearly,
            next_number: 88,
            last_issued: Some(date(2025, 12, 31)),
            ..NumberingSystem::default()
        };

        assert!(system.should_reset(date(2026, 1, 1)));
        assert_eq!(system.next(date(2026, 1, 1)).unwrap(), "INV-2026-0001");
        assert_eq!(system.next(date(2026, 1, 2)).unwrap(), "INV-2026-0002");
    }

    #[test]
    fn test_monthly_reset() {
        let system = NumberingSystem {
            reset: ResetPolicy::Monthly,
            last_issued: Some(date(2026, 3, 31)),
            ..NumberingSystem::default()
        };
        assert!(!system.should_reset(date(2026, 3, 1)));
        assert!(system.should_reset(date(2026, 4, 1)));
        assert!(system.should_reset(date(2027, 3, 1)));
    }

    #[test]
    fn test_failed_render_keeps_sequence() {
        let mut system = NumberingSystem {
            template: "{bogus}".to_string(),
            ..NumberingSystem::default()
        };
        assert!(system.next(date(2026, 1, 1)).is_err());
        assert_eq!(system.next_number, 1);
        assert_eq!(system.last_issued, None);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let system: NumberingSystem =
            serde_json::from_str(r#"{"prefix": "CN", "reset": "yearly"}"#).unwrap();
        assert_eq!(system.prefix, "CN");
        assert_eq!(system.reset, ResetPolicy::Yearly);
        assert_eq!(system.template, "{prefix}-{YYYY}-{number}");
        assert_eq!(system.padding, 4);
    }
}
