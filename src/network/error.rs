//! Common error types for network operations

use std::io;

/// A common error type for HTTP requests.
///
/// Every failure a request can run into is one of these variants. The client
/// never panics on them; it stores the error on the response and exposes it
/// through [`Client::last_error`](crate::network::application::http::Client::last_error).
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
pub enum Error {
    /// The URL string could not be parsed.
    #[error("url parse error")]
    InvalidUrl,
    /// The URL has no host component.
    #[error("host is empty")]
    MissingHost,
    /// The host name could not be resolved to an address.
    #[error("host could not be resolved")]
    UnresolvedHost,
    /// Neither an explicit port nor a scheme default port is available.
    #[error("remote port is empty")]
    MissingPort,
    /// The proxy string is not of the form `host:port`.
    #[error("proxy must be given as host:port")]
    InvalidProxy,
    /// A connection attempt was refused.
    #[error("connection refused")]
    ConnectionRefused,
    /// A timeout occurred.
    #[error("operation timed out")]
    Timeout,
    /// The remote could not be reached.
    #[error("connection failed")]
    ConnectionFailed,
    /// An error occurred during a write operation.
    #[error("failed to write request")]
    WriteError,
    /// An error occurred during a read operation.
    #[error("failed to read response")]
    ReadError,
    /// The transport returned no bytes at all.
    #[error("empty response")]
    EmptyResponse,
    /// The response has no blank line separating head from body.
    #[error("malformed response")]
    MalformedResponse,
    /// The selected transport is not available in this build.
    #[error("transport unavailable")]
    Unavailable,
}

impl Error {
    /// Maps an I/O error raised while connecting.
    pub(crate) fn from_connect(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Error::ConnectionRefused,
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::Timeout,
            _ => Error::ConnectionFailed,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::InvalidUrl => defmt::write!(f, "InvalidUrl"),
            Error::MissingHost => defmt::write!(f, "MissingHost"),
            Error::UnresolvedHost => defmt::write!(f, "UnresolvedHost"),
            Error::MissingPort => defmt::write!(f, "MissingPort"),
            Error::InvalidProxy => defmt::write!(f, "InvalidProxy"),
            Error::ConnectionRefused => defmt::write!(f, "ConnectionRefused"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::ConnectionFailed => defmt::write!(f, "ConnectionFailed"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::EmptyResponse => defmt::write!(f, "EmptyResponse"),
            Error::MalformedResponse => defmt::write!(f, "MalformedResponse"),
            Error::Unavailable => defmt::write!(f, "Unavailable"),
        }
    }
}
