//! HTTP/1.x client with hand-built requests and hand-parsed responses.
//!
//! This module implements a small blocking HTTP client. Requests are written
//! byte by byte by [`request::build`] and responses are split, header-parsed
//! and de-chunked by [`Response::parse`], independently of how the bytes
//! travel. The travelling part is a [`Transport`](transport::Transport):
//!
//! - [`SocketTransport`](transport::SocketTransport): raw TCP socket with a
//!   bounded connect
//! - [`StreamTransport`](transport::StreamTransport): buffered TCP stream
//!   (the default)
//! - [`NativeTransport`](transport::NativeTransport): libcurl, with the
//!   `curl` feature
//!
//! # Features
//!
//! - HTTP/1.0 and HTTP/1.1 request lines
//! - GET, and POST when a body is set (raw or url-encoded form)
//! - Custom headers in insertion order, dedicated `User-Agent`
//! - Forward proxy
//! - Chunked transfer-encoding decoding
//! - Per-client URL cache (parse + DNS), never refreshed
//!
//! One request is in flight per client and every request opens and closes its
//! own connection (`Connection: Close`).
//!
//! # Usage
//!
//! ```rust,no_run
//! use rawhttp::network::application::http::Client;
//!
//! let mut client = Client::new();
//! client
//!     .set_user_agent("rawhttp/0.1")
//!     .set_post_form([("device", "sensor 1"), ("temp", "23.5")]);
//!
//! let response = client.request("http://example.com/telemetry");
//! println!("{:?} {:?}", response.status_code, response.text());
//! ```

pub mod chunked;

/// HTTP client implementation and supporting types.
///
/// Contains the main [`Client`](client::Client), which validates URLs,
/// dispatches to the configured transport and keeps the last result.
pub mod client;

pub mod config;
pub mod request;
pub mod response;
pub mod transport;


pub use client::Client;
pub use config::{ClientConfig, HttpVersion, Proxy, TransportKind};
pub use request::{Method, RawRequest};
pub use response::Response;
