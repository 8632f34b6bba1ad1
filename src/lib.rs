//! boundcache: capacity-bounded in-memory cache with pluggable eviction.
//!
//! The engine maps keys to values under a fixed capacity, evicting the
//! eviction policy's least valuable entry when a new key must enter a full
//! cache. Two policies ship: recency (LRU-style) and frequency (LFU-style).
//! Beyond eviction, the store exposes a dual extraction contract — `pop`
//! removes the most valuable entry, `pull` the least valuable one.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod cache;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "concurrency")]
pub mod sync;
