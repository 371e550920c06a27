//! HashTable: fixed bucket array routing string keys to sorted buckets.

use crate::bucket::{Bucket, Slot};
use crate::error::TableError;
use crate::hash;
use crate::iter::{Cursor, Iter};
use core::fmt;

/// Callback receiving every value the table lets go of: on replacement in
/// [`HashTable::add`], on [`HashTable::del`] and when the table is dropped.
///
/// The callback may borrow caller state for `'d`; the table cannot outlive it.
pub type Destructor<'d, V> = Box<dyn FnMut(V) + 'd>;

/// Occupancy snapshot of one bucket.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BucketUsage {
    /// Live entries in the bucket.
    pub used: usize,
    /// Entries the bucket has room for without growing.
    pub capacity: usize,
}

/// String-keyed hash table with a fixed, power-of-two number of buckets.
///
/// Keys are any `K: AsRef<str>`. Instantiated with `&'k str` the table only
/// remembers the caller's key references and the borrow checker keeps the
/// text alive while it is stored; with `String` the table owns its keys.
/// Values are never copied, only moved in and handed to the destructor
/// (if any) when they leave.
pub struct HashTable<'d, K, V> {
    buckets: Vec<Bucket<K, V>>,
    count: usize,
    step: usize,
    destructor: Option<Destructor<'d, V>>,
}

impl<'d, K, V> HashTable<'d, K, V>
where
    K: AsRef<str>,
{
    /// Create a table with `bucket_hint` rounded up to a power of two
    /// (minimum 1) buckets and no value destructor.
    pub fn new(bucket_hint: usize) -> Result<Self, TableError> {
        Self::from_parts(bucket_hint, None)
    }

    /// Create a table that passes every released value to `destructor`.
    pub fn with_destructor<F>(bucket_hint: usize, destructor: F) -> Result<Self, TableError>
    where
        F: FnMut(V) + 'd,
    {
        Self::from_parts(bucket_hint, Some(Box::new(destructor)))
    }

    pub(crate) fn from_parts(
        bucket_hint: usize,
        destructor: Option<Destructor<'d, V>>,
    ) -> Result<Self, TableError> {
        let n_buckets = bucket_hint
            .max(1)
            .checked_next_power_of_two()
            .ok_or(TableError::OutOfMemory)?;
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(n_buckets)
            .map_err(|_| TableError::OutOfMemory)?;
        buckets.resize_with(n_buckets, Bucket::new);
        let step = (n_buckets / 32).clamp(4, 64);
        tracing::debug!(n_buckets, step, "hash table created");
        Ok(Self {
            buckets,
            count: 0,
            step,
            destructor,
        })
    }

    #[inline]
    fn bucket_of(&self, key: &str) -> usize {
        hash::bucket_index(key, self.buckets.len())
    }

    fn dispose(&mut self, value: V) {
        if let Some(destructor) = self.destructor.as_mut() {
            destructor(value);
        }
    }

    /// Insert `key`, or replace the value of an equal key already present.
    ///
    /// On replacement the stored key is overwritten with `key` and the old
    /// value goes to the destructor; the count is unchanged.
    pub fn add(&mut self, key: K, value: V) -> Result<(), TableError> {
        let pos = self.bucket_of(key.as_ref());
        let bucket = &mut self.buckets[pos];
        bucket.reserve_one(self.step)?;
        match bucket.scan(key.as_ref()) {
            Slot::Occupied(i) => {
                let old = bucket.replace(i, key, value);
                self.dispose(old);
            }
            Slot::Vacant(i) => {
                bucket.insert_at(i, key, value);
                self.count += 1;
            }
        }
        Ok(())
    }

    /// Like [`HashTable::add`], but an existing key is an error and the table
    /// keeps its current value. The rejected value is dropped, not passed to
    /// the destructor.
    pub fn add_unique(&mut self, key: K, value: V) -> Result<(), TableError> {
        let pos = self.bucket_of(key.as_ref());
        let bucket = &mut self.buckets[pos];
        bucket.reserve_one(self.step)?;
        match bucket.scan(key.as_ref()) {
            Slot::Occupied(_) => Err(TableError::DuplicateKey),
            Slot::Vacant(i) => {
                bucket.insert_at(i, key, value);
                self.count += 1;
                Ok(())
            }
        }
    }

    pub fn find(&self, key: &str) -> Option<&V> {
        let bucket = &self.buckets[self.bucket_of(key)];
        if !bucket.has_storage() {
            return None;
        }
        bucket.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Remove `key`, passing its value to the destructor.
    pub fn del(&mut self, key: &str) -> Result<(), TableError> {
        let step = self.step;
        let pos = self.bucket_of(key);
        let bucket = &mut self.buckets[pos];
        if !bucket.has_storage() {
            return Err(TableError::NotFound);
        }
        let index = bucket.search(key).ok_or(TableError::NotFound)?;
        let entry = bucket.remove_at(index, step);
        self.count -= 1;
        self.dispose(entry.value);
        Ok(())
    }

    /// `add` every pair in order, stopping at the first failure.
    pub fn try_extend<I>(&mut self, pairs: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.add(key, value)?;
        }
        Ok(())
    }

    /// Cursor positioned before the first entry.
    pub fn iter_init(&self) -> Cursor {
        Cursor::new()
    }

    pub fn iter(&self) -> Iter<'_, 'd, K, V> {
        Iter::new(self)
    }
}

impl<K, V> HashTable<'_, K, V> {
    /// Number of entries; O(1).
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of buckets; always a power of two.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Entries by which a bucket grows or shrinks.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Per-bucket occupancy in bucket-index order.
    pub fn bucket_usage(&self) -> impl Iterator<Item = BucketUsage> + '_ {
        self.buckets.iter().map(|b| BucketUsage {
            used: b.len(),
            capacity: b.capacity(),
        })
    }

    #[inline]
    pub(crate) fn bucket(&self, index: usize) -> Option<&Bucket<K, V>> {
        self.buckets.get(index)
    }
}

impl<K, V> Drop for HashTable<'_, K, V> {
    fn drop(&mut self) {
        let Some(destructor) = self.destructor.as_mut() else {
            return;
        };
        for bucket in self.buckets.iter_mut() {
            for entry in bucket.take() {
                destructor(entry.value);
            }
        }
    }
}

impl<K, V> fmt::Debug for HashTable<'_, K, V>
where
    K: AsRef<str>,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k.as_ref(), v)))
            .finish()
    }
}

impl<'a, 'd, K, V> IntoIterator for &'a HashTable<'d, K, V>
where
    K: AsRef<str>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, 'd, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
