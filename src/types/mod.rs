//! Request payload types used by [`crate::transport::BackendClient`].

pub mod message;

pub use message::{ChatMessage, MessageRole};
