//! Network layer: URL resolution, common errors and protocol clients.

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// URL parsing, default ports and the per-client resolution cache
pub mod url;

/// Protocol-specific client implementations
pub mod application;

/// Re-exports of commonly used types
pub mod prelude {
    pub use super::application::http::transport::Transport;
    pub use super::application::http::{Client, ClientConfig, Response, TransportKind};
    pub use super::error::Error;
}
