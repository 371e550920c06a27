//! Bucket: a sorted array of entries with step-based capacity.
//!
//! Capacity (`total`) is tracked explicitly instead of relying on `Vec`'s
//! amortized growth. It grows by one step when `len + 1 >= total` and
//! shrinks back to whole steps after removals.

use crate::error::TableError;
use core::cmp::Ordering;

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// Where a key belongs in a bucket.
pub(crate) enum Slot {
    Occupied(usize),
    Vacant(usize),
}

#[derive(Debug)]
pub(crate) struct Bucket<K, V> {
    entries: Vec<Entry<K, V>>,
    total: usize,
}

impl<K, V> Bucket<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            total: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.total
    }

    /// `true` once storage has been allocated for this bucket.
    #[inline]
    pub(crate) fn has_storage(&self) -> bool {
        self.total != 0
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    #[inline]
    pub(crate) fn entry(&self, index: usize) -> Option<&Entry<K, V>> {
        self.entries.get(index)
    }

    /// Take every entry out in sorted order, leaving the bucket without storage.
    pub(crate) fn take(&mut self) -> Vec<Entry<K, V>> {
        self.total = 0;
        core::mem::take(&mut self.entries)
    }
}

impl<K, V> Bucket<K, V>
where
    K: AsRef<str>,
{
    /// Make room for one more entry. On failure the bucket is untouched.
    pub(crate) fn reserve_one(&mut self, step: usize) -> Result<(), TableError> {
        if self.entries.len() + 1 < self.total {
            return Ok(());
        }
        let new_total = self.total + step;
        if let Err(err) = self
            .entries
            .try_reserve_exact(new_total - self.entries.len())
        {
            tracing::debug!(total = self.total, new_total, %err, "bucket growth failed");
            return Err(TableError::OutOfMemory);
        }
        tracing::trace!(from = self.total, to = new_total, "bucket grown");
        self.total = new_total;
        Ok(())
    }

    /// Linear scan for `key`: either its position or the insertion point that
    /// keeps the bucket sorted.
    pub(crate) fn scan(&self, key: &str) -> Slot {
        for (i, e) in self.entries.iter().enumerate() {
            match key.cmp(e.key.as_ref()) {
                Ordering::Equal => return Slot::Occupied(i),
                Ordering::Less => return Slot::Vacant(i),
                Ordering::Greater => {}
            }
        }
        Slot::Vacant(self.entries.len())
    }

    pub(crate) fn search(&self, key: &str) -> Option<usize> {
        self.entries
            .binary_search_by(|e| e.key.as_ref().cmp(key))
            .ok()
    }

    #[inline]
    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.search(key).map(|i| &self.entries[i].value)
    }

    /// Overwrite key and value at `index`, returning the old value.
    pub(crate) fn replace(&mut self, index: usize, key: K, value: V) -> V {
        let entry = &mut self.entries[index];
        entry.key = key;
        core::mem::replace(&mut entry.value, value)
    }

    /// Insert at `index`, shifting later entries right. Capacity must have
    /// been reserved with [`Bucket::reserve_one`].
    pub(crate) fn insert_at(&mut self, index: usize, key: K, value: V) {
        debug_assert!(self.entries.len() < self.total);
        self.entries.insert(index, Entry { key, value });
    }

    /// Remove the entry at `index`, shifting later entries left, then give
    /// back whole steps of capacity that are no longer needed.
    pub(crate) fn remove_at(&mut self, index: usize, step: usize) -> Entry<K, V> {
        let entry = self.entries.remove(index);
        self.shrink(step);
        entry
    }

    fn shrink(&mut self, step: usize) {
        let steps_used = self.entries.len() / step;
        let steps_total = self.total / step;
        if steps_used + 1 < steps_total {
            let new_total = (steps_used + 1) * step;
            self.entries.shrink_to(new_total);
            tracing::trace!(from = self.total, to = new_total, "bucket shrunk");
            self.total = new_total;
        }
    }
}
