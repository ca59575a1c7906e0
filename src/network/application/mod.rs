//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocol clients built on top of the
//! [`url`](crate::network::url) resolver and the common
//! [`Error`](crate::network::error::Error) type.
//!
//! ## Available Protocols
//!
//! - **[`http`]**: HTTP/1.x client with interchangeable transports

/// HTTP client implementation.
///
/// Provides a blocking HTTP/1.x client supporting GET and POST with custom
/// headers, proxies and chunked responses.
pub mod http;
