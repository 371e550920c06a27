//! Construction-time configuration for [`HashTable`].

use crate::error::TableError;
use crate::table::{Destructor, HashTable};
use core::fmt;

/// Bucket count used when [`TableBuilder::buckets`] is not called.
pub const DEFAULT_BUCKETS: usize = 16;

/// Builder for a [`HashTable`]. Typically `TableBuilder::new().buckets(n)`,
/// optionally `.destructor(f)`, then `.build()`.
pub struct TableBuilder<'d, V> {
    buckets: usize,
    destructor: Option<Destructor<'d, V>>,
}

impl<'d, V> TableBuilder<'d, V> {
    pub fn new() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            destructor: None,
        }
    }

    /// Requested bucket count; rounded up to a power of two on `build`.
    pub fn buckets(mut self, hint: usize) -> Self {
        self.buckets = hint;
        self
    }

    /// Callback for every value the table releases. It may borrow from the
    /// caller for as long as the table lives.
    pub fn destructor<F>(mut self, f: F) -> Self
    where
        F: FnMut(V) + 'd,
    {
        self.destructor = Some(Box::new(f));
        self
    }

    pub fn build<K>(self) -> Result<HashTable<'d, K, V>, TableError>
    where
        K: AsRef<str>,
    {
        HashTable::from_parts(self.buckets, self.destructor)
    }
}

impl<V> Default for TableBuilder<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for TableBuilder<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableBuilder")
            .field("buckets", &self.buckets)
            .field("destructor", &self.destructor.is_some())
            .finish()
    }
}
