//! Bounded recency-ordered caching.
//!
//! Provides the fixed-capacity [`RecencyCache`] used to retain each
//! driver's most recent location observations, with least-recently-used
//! eviction once the capacity is reached.

mod recency;

pub use recency::{CacheError, RecencyCache};
