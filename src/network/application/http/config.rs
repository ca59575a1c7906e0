//! Client configuration.

use crate::network::error::Error;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// HTTP protocol version written on the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpVersion {
    /// `HTTP/1.0`
    #[serde(rename = "1.0")]
    Http10,
    /// `HTTP/1.1`
    #[default]
    #[serde(rename = "1.1")]
    Http11,
}

impl HttpVersion {
    /// Parses a version tag. Anything other than `"1.0"` means 1.1.
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "1.0" => HttpVersion::Http10,
            _ => HttpVersion::Http11,
        }
    }

    /// The tag as written after `HTTP/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "1.0",
            HttpVersion::Http11 => "1.1",
        }
    }
}

/// Which transport carries the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Raw TCP socket with a bounded non-blocking connect.
    Socket,
    /// Buffered TCP stream read line by line.
    #[default]
    Stream,
    /// libcurl, available with the `curl` cargo feature.
    Native,
}

/// A forward proxy. Requests are sent to it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
    /// Proxy host name or IP address.
    pub host: String,
    /// Proxy port.
    pub port: u16,
}

impl FromStr for Proxy {
    type Err = Error;

    /// Parses `host:port`. The port is taken after the last colon; an IPv6
    /// host may be written in brackets (`[::1]:3128`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s.trim().rsplit_once(':').ok_or(Error::InvalidProxy)?;
        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        let port = port.parse::<u16>().map_err(|_| Error::InvalidProxy)?;
        if host.is_empty() || port == 0 {
            return Err(Error::InvalidProxy);
        }
        Ok(Proxy {
            host: host.to_owned(),
            port,
        })
    }
}

impl fmt::Display for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Everything that shapes a request, owned by a
/// [`Client`](super::Client).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Connect here instead of the URL's own host and port.
    pub proxy: Option<Proxy>,
    /// Transport used by [`Client::request`](super::Client::request).
    pub transport: TransportKind,
    /// Timeout in seconds; `0` disables it.
    pub timeout: u64,
    /// Version written on the request line.
    pub version: HttpVersion,
    /// Raw header lines, sent in insertion order without the trailing CRLF.
    pub headers: Vec<String>,
    /// Request body. Its presence turns the request into a `POST`.
    pub post: Option<String>,
    /// Sent as its own `User-Agent` line, replacing any `User-Agent` entry
    /// in `headers`.
    pub user_agent: Option<String>,
    /// Disables TLS peer certificate verification in the native transport.
    /// Host name verification stays on.
    pub insecure_skip_peer_verify: bool,
}
