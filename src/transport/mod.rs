//! Backend clients and how they are built.
//!
//! [`ClientConstructor`] is the seam the resolver depends on; the default
//! [`HttpClientConstructor`] produces reqwest-backed [`BackendClient`]s and
//! dispatches on [`crate::ProviderName`] with one handler per provider.

mod constructor;
mod http;

pub use constructor::{ClientConstructor, HttpClientConstructor};
pub use http::{BackendClient, ClientOptions};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
