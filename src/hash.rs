//! String hashing and bucket routing.
//!
//! The hash is Paul Hsieh's SuperFastHash: the key is consumed four bytes at
//! a time as two little-endian 16-bit halves, seeded with the key length,
//! followed by a fixup for 1-3 trailing bytes and a final avalanche. Values
//! are an internal routing detail and are not meant to be persisted.

/// Hash `key` with SuperFastHash.
pub fn superfast(key: &[u8]) -> u32 {
    let mut hash = key.len() as u32;
    let mut chunks = key.chunks_exact(4);

    for c in &mut chunks {
        hash = hash.wrapping_add(u32::from(u16::from_le_bytes([c[0], c[1]])));
        let tmp = (u32::from(u16::from_le_bytes([c[2], c[3]])) << 11) ^ hash;
        hash = (hash << 16) ^ tmp;
        hash = hash.wrapping_add(hash >> 11);
    }

    // Lone trailing bytes are sign-extended, matching a signed `char`.
    match *chunks.remainder() {
        [a, b, c] => {
            hash = hash.wrapping_add(u32::from(u16::from_le_bytes([a, b])));
            hash ^= hash << 16;
            hash ^= (c as i8 as u32) << 18;
            hash = hash.wrapping_add(hash >> 11);
        }
        [a, b] => {
            hash = hash.wrapping_add(u32::from(u16::from_le_bytes([a, b])));
            hash ^= hash << 11;
            hash = hash.wrapping_add(hash >> 17);
        }
        [a] => {
            hash = hash.wrapping_add(a as i8 as u32);
            hash ^= hash << 10;
            hash = hash.wrapping_add(hash >> 1);
        }
        _ => {}
    }

    hash ^= hash << 3;
    hash = hash.wrapping_add(hash >> 5);
    hash ^= hash << 4;
    hash = hash.wrapping_add(hash >> 17);
    hash ^= hash << 25;
    hash = hash.wrapping_add(hash >> 6);
    hash
}

/// Bucket index of `key` in a table of `n_buckets` buckets.
///
/// `n_buckets` must be a power of two.
#[inline]
pub fn bucket_index(key: &str, n_buckets: usize) -> usize {
    debug_assert!(n_buckets.is_power_of_two());
    (superfast(key.as_bytes()) as usize) & (n_buckets - 1)
}
