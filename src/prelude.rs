//! Flat re-exports of the most commonly used types.

pub use crate::builder::{Cache, CacheBuilder, EvictionStrategy};
pub use crate::cache::{CacheCore, CacheStats, FrequencyCache, RecencyCache};
pub use crate::error::InvariantError;
pub use crate::policy::{FrequencyPolicy, RecencyPolicy};
#[cfg(feature = "concurrency")]
pub use crate::sync::SharedCache;
pub use crate::traits::EvictionPolicy;
