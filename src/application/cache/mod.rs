//! Runtime caches used by application services.
//!
//! - [`listing::ListingCache`]: per-(platform, category) listing snapshots with a TTL

pub mod listing;

pub use listing::{CacheConfig, CacheError, CachedSnapshot, ListingCache};
