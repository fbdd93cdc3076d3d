//! Request admission control
//!
//! A single in-process token bucket guards the lookup API. Each limiter
//! instance owns its own state and is passed explicitly to the HTTP layer.

mod token_bucket;

pub use token_bucket::TokenBucket;
