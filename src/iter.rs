//! Iteration over a [`HashTable`] in bucket-index order, then key order.
//!
//! [`Cursor`] is the external cursor: it stores only a bucket and entry index
//! and borrows the table for the duration of one [`Cursor::next`] call, so
//! the table may be modified between steps. [`Iter`] wraps a cursor behind
//! the standard `Iterator` interface and borrows the table for its lifetime.

use crate::table::HashTable;
use core::iter::FusedIterator;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
enum Position {
    #[default]
    BeforeFirst,
    OnEntry {
        bucket: usize,
        index: usize,
    },
    Exhausted,
}

/// Forward-only cursor created by [`HashTable::iter_init`].
///
/// Once [`Cursor::next`] has returned `None` the cursor stays exhausted and
/// keeps returning `None`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    pub const fn new() -> Self {
        Self {
            pos: Position::BeforeFirst,
        }
    }

    /// Advance to the next entry, skipping empty buckets.
    pub fn next<'t, K, V>(
        &mut self,
        table: &'t HashTable<'_, K, V>,
    ) -> Option<(&'t K, &'t V)> {
        let (mut bucket, mut index) = match self.pos {
            Position::BeforeFirst => (0, 0),
            Position::OnEntry { bucket, index } => (bucket, index + 1),
            Position::Exhausted => return None,
        };
        while let Some(b) = table.bucket(bucket) {
            if let Some(e) = b.entry(index) {
                self.pos = Position::OnEntry { bucket, index };
                return Some((&e.key, &e.value));
            }
            bucket += 1;
            index = 0;
        }
        self.pos = Position::Exhausted;
        None
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == Position::Exhausted
    }
}

/// Borrowing iterator returned by [`HashTable::iter`].
pub struct Iter<'a, 'd, K, V> {
    table: &'a HashTable<'d, K, V>,
    cursor: Cursor,
    remaining: usize,
}

impl<'a, 'd, K, V> Iter<'a, 'd, K, V> {
    pub(crate) fn new(table: &'a HashTable<'d, K, V>) -> Self {
        Self {
            table,
            cursor: Cursor::new(),
            remaining: table.count(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, '_, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.cursor.next(self.table)?;
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, '_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, '_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Invariant: an empty table yields nothing and the cursor becomes exhausted.
    #[test]
    fn empty_table_exhausts_immediately() {
        let t: HashTable<&str, i32> = HashTable::new(8).unwrap();
        let mut c = t.iter_init();
        assert!(!c.is_exhausted());
        assert!(c.next(&t).is_none());
        assert!(c.is_exhausted());
        assert!(c.next(&t).is_none(), "exhausted cursor stays exhausted");
    }

    /// Invariant: entries come in bucket order, then sorted within a bucket.
    #[test]
    fn order_is_bucket_then_key() {
        let mut t: HashTable<&str, i32> = HashTable::new(8).unwrap();
        // buckets: "k" 0, "b" 1, "a" 2, "x" 7
        for (k, v) in [("x", 1), ("a", 2), ("k", 3), ("b", 4)] {
            t.add(k, v).unwrap();
        }
        let mut c = t.iter_init();
        let mut seen = Vec::new();
        while let Some((k, v)) = c.next(&t) {
            seen.push((*k, *v));
        }
        assert_eq!(seen, vec![("k", 3), ("b", 4), ("a", 2), ("x", 1)]);
    }

    /// Invariant: a full pass visits `count()` distinct entries, all findable.
    #[test]
    fn full_pass_visits_every_entry_once() {
        let keys: Vec<String> = (0..100).map(|i| format!("item{i}")).collect();
        let mut t: HashTable<&str, usize> = HashTable::new(8).unwrap();
        for (i, k) in keys.iter().enumerate() {
            t.add(k, i).unwrap();
        }
        let it = t.iter();
        assert_eq!(it.len(), 100);
        let mut seen = BTreeSet::new();
        for (k, v) in it {
            assert!(seen.insert(*k), "duplicate visit of {k}");
            assert_eq!(t.find(k), Some(v));
        }
        assert_eq!(seen.len(), t.count());
    }

    /// Invariant: the cursor does not hold a borrow, so the table can be
    /// modified between steps; entries added ahead of it are observed.
    #[test]
    fn cursor_observes_forward_mutation() {
        let mut t: HashTable<&str, i32> = HashTable::new(1).unwrap();
        t.add("b", 2).unwrap();
        let mut c = t.iter_init();
        assert_eq!(c.next(&t), Some((&"b", &2)));
        t.add("c", 3).unwrap();
        assert_eq!(c.next(&t), Some((&"c", &3)));
        assert_eq!(c.next(&t), None);
    }

    /// Invariant: `Iter` is fused after the end.
    #[test]
    fn iter_is_fused() {
        let mut t: HashTable<String, i32> = HashTable::new(2).unwrap();
        t.add("only".to_string(), 1).unwrap();
        let mut it = t.iter();
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
        assert_eq!(it.size_hint(), (0, Some(0)));
    }
}
