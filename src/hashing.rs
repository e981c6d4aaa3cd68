//! Deterministic hashing.
//!
//! The standard library `HashMap` seeds its hasher randomly per process, which would make
//! iteration order, and therefore any random draws made while iterating, differ between two
//! runs with the same seed. Everything in this crate that iterates a hash container uses the
//! `rustc-hash` variants re-exported here instead.
//!
//! The `hash_str` free function is used by `crate::random` to derive per-stream seeds.

pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use xxhash_rust::xxh3::xxh3_64;

/// A convenience method to compute a stable 64-bit hash of a `&str`.
#[must_use]
pub fn hash_str(data: &str) -> u64 {
    xxh3_64(data.as_bytes())
}
