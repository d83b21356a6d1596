//! # Cache Invalidation
//!
//! Mutation handlers return the queries they made stale. The API client
//! layer turns these into refetches; nothing here touches a cache.
//!
//! ```text
//!   PriceForm::submit ──► [Prices, Product("prod_1")] ──► client refetches
//! ```

use serde::Serialize;

/// A query the dashboard should refetch after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "query", content = "id", rename_all = "snake_case")]
pub enum Invalidation {
    /// Every price list.
    Prices,
    /// One product, including its embedded prices.
    Product(String),
    /// The product list.
    Products,
    /// Account settings, including numbering.
    AccountSettings,
}

impl Invalidation {
    /// Query key segments, in the shape the client's cache uses.
    pub fn query_key(&self) -> Vec<String> {
        match self {
            Invalidation::Prices => vec!["prices".to_string()],
            Invalidation::Product(id) => vec!["products".to_string(), id.clone()],
            Invalidation::Products => vec!["products".to_string()],
            Invalidation::AccountSettings => vec!["account".to_string(), "settings".to_string()],
        }
    }
}
