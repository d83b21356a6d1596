//! # Field Arrays
//!
//! The capability the tier editor needs from a form's state container.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FieldArray<T>                                                          │
//! │                                                                         │
//! │  fields()          read the current rows                               │
//! │  replace(rows)     swap in a whole new list                            │
//! │  update(i, row)    overwrite one row                                   │
//! │  append(row)       push a row at the end                               │
//! │  remove(i)         drop one row                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Row-level writes exist so a form container can track which rows are
//! dirty; `VecFieldArray` just applies them to a `Vec`.

use serde::{Deserialize, Serialize};

/// A list-valued form field.
pub trait FieldArray<T> {
    /// Current rows.
    fn fields(&self) -> &[T];

    /// Replaces every row.
    fn replace(&mut self, rows: Vec<T>);

    /// Overwrites row `index`. Out-of-range indexes are ignored.
    fn update(&mut self, index: usize, row: T);

    /// Appends a row.
    fn append(&mut self, row: T);

    /// Removes row `index`. Out-of-range indexes are ignored.
    fn remove(&mut self, index: usize);

    fn len(&self) -> usize {
        self.fields().len()
    }

    fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

/// In-memory field array with a dirty flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecFieldArray<T> {
    rows: Vec<T>,
    #[serde(skip)]
    dirty: bool,
}

impl<T> VecFieldArray<T> {
    pub fn new(rows: Vec<T>) -> Self {
        VecFieldArray { rows, dirty: false }
    }

    /// Whether any write happened since creation or the last [`mark_clean`].
    ///
    /// [`mark_clean`]: VecFieldArray::mark_clean
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn into_inner(self) -> Vec<T> {
        self.rows
    }
}

impl<T> FieldArray<T> for VecFieldArray<T> {
    fn fields(&self) -> &[T] {
        &self.rows
    }

    fn replace(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.dirty = true;
    }

    fn update(&mut self, index: usize, row: T) {
        if let Some(slot) = self.rows.get_mut(index) {
            *slot = row;
            self.dirty = true;
        }
    }

    fn append(&mut self, row: T) {
        self.rows.push(row);
        self.dirty = true;
    }

    fn remove(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_mark_dirty() {
        let mut array = VecFieldArray::new(vec![1, 2, 3]);
        assert!(!array.is_dirty());

        array.update(1, 20);
        assert!(array.is_dirty());
        assert_eq!(array.fields(), &[1, 20, 3]);

        array.mark_clean();
        array.append(4);
        array.remove(0);
        assert_eq!(array.fields(), &[20, 3, 4]);
        assert!(array.is_dirty());
    }

    #[test]
    fn test_out_of_range_writes_ignored() {
        let mut array = VecFieldArray::new(vec!["a"]);
        array.update(5, "z");
        array.remove(5);
        assert_eq!(array.fields(), &["a"]);
        assert!(!array.is_dirty());
    }

    #[test]
    fn test_replace() {
        let mut array = VecFieldArray::new(vec![1]);
        array.replace(vec![7, 8]);
        assert_eq!(array.len(), 2);
        assert_eq!(array.into_inner(), vec![7, 8]);
    }
}
