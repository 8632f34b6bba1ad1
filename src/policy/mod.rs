//! Eviction policy implementations.
//!
//! Each policy implements [`EvictionPolicy`](crate::traits::EvictionPolicy)
//! and tracks metadata for exactly the keys the owning cache holds:
//!
//! - [`recency`]: LRU-style, ordered by last-touch tick.
//! - [`frequency`]: LFU-style, ordered by access count with stable tie tiers.

pub mod frequency;
pub mod recency;

pub use frequency::FrequencyPolicy;
pub use recency::RecencyPolicy;
