//! Backend client cache.
//!
//! # Client Cache Module
//!
//! Building a backend client allocates a connection pool, so the resolver
//! memoizes clients by the credentials they were built with. The cache is an
//! explicit value owned by whoever builds the resolver; there is no global.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ClientKey`] | Provider + effective API key + effective base URL |
//! | [`ClientCache`] | Mutex-guarded get-or-create map with hit/miss counters |
//! | [`CacheStats`] | Snapshot of those counters |
//!
//! ## Guarantees
//!
//! - At most one client is constructed per distinct key for the lifetime of
//!   the cache, including under concurrent callers.
//! - Entries are never evicted. The key space is bounded by the credential
//!   combinations the configuration actually names.
//! - A failed construction stores nothing; the next call tries again.

mod key;
mod manager;

pub use key::ClientKey;
pub use manager::{CacheStats, ClientCache};
