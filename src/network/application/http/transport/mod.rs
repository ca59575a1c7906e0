//! Transports that carry a request to the server and bring the raw response
//! back.
//!
//! Every transport implements [`Transport`]. The socket and stream variants
//! write the request built by [`request::build`](super::request::build) and
//! return the bytes exactly as received; the native variant hands the whole
//! exchange to libcurl, which already removes chunked framing.
//!
//! When a proxy is configured every variant connects to the proxy instead of
//! the URL's host. The request itself does not change.

use crate::network::application::http::config::ClientConfig;
use crate::network::error::Error;
use crate::network::url::ResolvedUrl;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

pub mod native;
pub mod socket;
pub mod stream;

pub use native::NativeTransport;
pub use socket::SocketTransport;
pub use stream::StreamTransport;

/// Size of each read from the connection.
pub(crate) const READ_BLOCK: usize = 1024;

/// Sends one request and returns the complete raw response.
pub trait Transport {
    /// Performs the request for `url` with `config`.
    ///
    /// An `Ok` value is whatever the server sent, which may be empty. Every
    /// failure to connect or write is an `Err`.
    fn send(&self, url: &ResolvedUrl, config: &ClientConfig) -> Result<Vec<u8>, Error>;
}

/// Host and port a transport should connect to.
pub fn connect_target<'a>(url: &'a ResolvedUrl, config: &'a ClientConfig) -> (&'a str, u16) {
    match &config.proxy {
        Some(proxy) => (proxy.host.as_str(), proxy.port),
        None => (url.host.as_str(), url.port),
    }
}

/// Resolves the connect target to a socket address.
pub(crate) fn target_addr(url: &ResolvedUrl, config: &ClientConfig) -> Result<SocketAddr, Error> {
    let (host, port) = connect_target(url, config);
    (host, port)
        .to_socket_addrs()
        .map_err(|_| Error::UnresolvedHost)?
        .next()
        .ok_or(Error::UnresolvedHost)
}

/// Opens a TCP connection, bounded by `timeout` when one is given.
pub(crate) fn open(addr: SocketAddr, timeout: Option<Duration>) -> Result<TcpStream, Error> {
    let result = match timeout {
        Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
        None => TcpStream::connect(addr),
    };
    result.map_err(|err| {
        log::debug!("connect to {addr} failed: {err}");
        Error::from_connect(&err)
    })
}

/// The configured timeout, if any.
pub(crate) fn timeout(config: &ClientConfig) -> Option<Duration> {
    (config.timeout > 0).then(|| Duration::from_secs(config.timeout))
}
