//! Stable string hashing for slug-addressed lookups.
//!
//! Location pages pick their photo by hashing the page slug into the image
//! pool. The hash has to stay stable forever: the same slug must land on the
//! same image on every build, every machine, and every release, otherwise
//! pages silently swap photos between deploys.
//!
//! The algorithm is djb2 over UTF-16 code units with 32-bit signed wraparound,
//! which matches the assignments the site has always published. Never widen
//! the accumulator: an `i64` or bignum accumulator changes every output.

/// djb2 seed.
const SEED: i32 = 5381;

/// Hash a slug into a non-negative integer.
///
/// Total over all inputs: the empty string hashes to the seed, and non-ASCII
/// text is hashed per UTF-16 code unit, so astral characters contribute two
/// units.
///
/// ```
/// use service_areas::hash::slug_hash;
///
/// assert_eq!(slug_hash(""), 5381);
/// assert_eq!(slug_hash("a"), 177670);
/// ```
pub fn slug_hash(slug: &str) -> u32 {
    let hash = slug.encode_utf16().fold(SEED, |hash, unit| {
        hash.wrapping_mul(33).wrapping_add(i32::from(unit))
    });
    // `i32::MIN` has no positive i32 counterpart; unsigned_abs maps it to 2^31.
    hash.unsigned_abs()
}

/// Reduce a slug hash into `0..len`.
///
/// `len` must be non-zero; callers hold a validated, non-empty pool.
pub fn slug_index(slug: &str, len: usize) -> usize {
    slug_hash(slug) as usize % len
}
