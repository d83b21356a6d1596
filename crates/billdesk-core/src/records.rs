//! # Records
//!
//! Converts API list responses into id-keyed records and back.
//!
//! The dashboard's pickers (customer, product, tax rate) look entries up by
//! id after a search; the API returns plain lists.
//!
//! ```text
//!   [ {id: "cus_b"}, {id: "cus_a"} ]  ──to_records──►  { "cus_a": .., "cus_b": .. }
//!                                     ◄─from_records──  (ordered by id)
//! ```

use std::collections::BTreeMap;

/// Anything the billing API hands out with a stable string id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Indexes a list by id. When ids repeat, the later entry wins.
pub fn to_records<T, I>(list: I) -> BTreeMap<String, T>
where
    T: Identified,
    I: IntoIterator<Item = T>,
{
    list.into_iter()
        .map(|item| (item.id().to_string(), item))
        .collect()
}

/// Flattens records back into a list ordered by id.
pub fn from_records<T>(records: BTreeMap<String, T>) -> Vec<T> {
    records.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Customer {
        id: String,
        name: &'static str,
    }

    impl Identified for Customer {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn customer(id: &str, name: &'static str) -> Customer {
        Customer {
            id: id.to_string(),
            name,
        }
    }

    #[test]
    fn test_to_records_later_duplicate_wins() {
        let records = to_records(vec![
            customer("cus_b", "Beta"),
            customer("cus_a", "Acme"),
            customer("cus_b", "Beta Ltd"),
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records["cus_b"].name, "Beta Ltd");
    }

    #[test]
    fn test_from_records_ordered_by_id() {
        let records = to_records(vec![customer("cus_c", "C"), customer("cus_a", "A")]);
        let list = from_records(records);
        let ids: Vec<&str> = list.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["cus_a", "cus_c"]);
    }

    #[test]
    fn test_empty() {
        let records = to_records(Vec::<Customer>::new());
        assert!(records.is_empty());
        assert!(from_records(records).is_empty());
    }
}
