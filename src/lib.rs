//! # rawhttp - minimal HTTP/1.x client
//!
//! A small, blocking HTTP/1.x client that issues one request at a time and
//! returns a parsed response. Requests are written and responses parsed by
//! hand, including chunked transfer-encoding, so the same parsing runs no
//! matter which transport carried the bytes.
//!
//! ## Transports
//!
//! - **Socket**: raw TCP socket, non-blocking connect bounded by the timeout
//! - **Stream**: buffered TCP stream read line by line (default)
//! - **Native**: libcurl, behind the `curl` feature
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rawhttp = "0.1.0"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,no_run
//! use rawhttp::network::application::http::Client;
//!
//! let mut client = Client::new();
//! client.use_socket().set_timeout(10).use_http10();
//!
//! let response = client.request("http://example.com/api/data");
//! match &response.error {
//!     None => println!("{:?}: {:?}", response.status_code, response.text()),
//!     Some(err) => eprintln!("request failed: {err}"),
//! }
//! ```
//!
//! ### Proxy and Form Body
//!
//! ```rust,no_run
//! use rawhttp::network::application::http::Client;
//!
//! let mut client = Client::new();
//! client.set_proxy("10.0.0.2:3128")?;
//! client.set_post_form([("name", "sensor 7"), ("state", "on")]);
//!
//! let response = client.fetch("http://example.com/form");
//! assert_eq!(response.header("content-type"), Some("text/html"));
//! # Ok::<(), rawhttp::network::error::Error>(())
//! ```
//!
//! ## Optional Features
//!
//! - `curl`: Enable the libcurl-backed native transport
//! - `defmt`: Enable defmt formatting of [`network::error::Error`]
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.

#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Network layer: URL resolution, errors and the HTTP client.
///
/// Contains the URL [`Resolver`](network::url::Resolver), the common
/// [`Error`](network::error::Error) type and the HTTP client under
/// [`network::application::http`].
pub mod network;
