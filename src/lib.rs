//! strhash: a small string-keyed hash table for low-overhead use.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a single, predictable container mapping text keys to values
//!   with insertion, lookup, deletion, a live count and an external
//!   forward cursor.
//! - Pieces:
//!   - `hash`: SuperFastHash over the key bytes; the bucket index is the
//!     hash masked by `n_buckets - 1`.
//!   - `Bucket<K, V>`: a sorted array of entries with explicit capacity
//!     that grows and shrinks in fixed steps.
//!   - `HashTable<'d, K, V>`: a fixed array of buckets, a running count and an
//!     optional value destructor that may borrow caller state for `'d`.
//!   - `Cursor` / `Iter`: bucket-order, then key-order traversal.
//!
//! Constraints
//! - Single-threaded: no internal locking; the boxed destructor keeps the
//!   table `!Send`/`!Sync`.
//! - The number of buckets is a power of two fixed at construction; the
//!   table never rehashes.
//! - Within a bucket keys are strictly sorted, so lookups and deletes use
//!   binary search; inserts scan linearly for their slot.
//! - `count()` always equals the sum of the buckets' lengths.
//!
//! Capacity policy
//! - Every bucket starts without storage. `step = clamp(n_buckets / 32, 4, 64)`.
//! - Before an insert, if `len + 1 >= capacity` the bucket grows by one
//!   step via `Vec::try_reserve_exact`; failure is reported as
//!   `TableError::OutOfMemory` and leaves the bucket untouched.
//! - After a delete, if `len / step + 1 < capacity / step` the bucket
//!   shrinks to `(len / step + 1) * step`.
//!
//! Ownership
//! - Keys are `K: AsRef<str>`. `HashTable<&'k str, V>` stores the caller's
//!   references without copying; `HashTable<String, V>` owns its keys.
//! - Values leave the table through the destructor (if any): on
//!   replacement in `add`, on `del`, and on drop. Replaced keys are simply
//!   overwritten; they never reach the destructor.
//!
//! Iteration
//! - `Cursor` holds only indices and borrows the table per step, so the
//!   table may change between steps. Once exhausted it stays exhausted.
//! - `Iter` borrows the table and implements `ExactSizeIterator`.

mod bucket;
mod builder;
mod error;
mod hash;
mod iter;
mod table;
mod table_proptest;

// Public surface
pub use builder::{TableBuilder, DEFAULT_BUCKETS};
pub use error::TableError;
pub use iter::{Cursor, Iter};
pub use table::{BucketUsage, Destructor, HashTable};
