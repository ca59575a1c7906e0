//! Response parsing.
//!
//! Turns the raw bytes returned by a transport into a [`Response`]. Parsing
//! never fails outright: problems are recorded on the response itself so the
//! caller still gets whatever could be extracted.

use crate::network::application::http::chunked::{self, find_slice};
use crate::network::error::Error;
use std::collections::HashMap;

/// Header key holding the raw status line.
pub const STATUS_LINE: &str = "status_line";

/// A parsed HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// The numeric status, when the status line carried one.
    pub status_code: Option<u16>,
    /// Header map with lowercase keys and trimmed values. The raw status
    /// line is stored under [`STATUS_LINE`].
    pub headers: HashMap<String, String>,
    /// The decoded body. `None` when the response could not be framed or the
    /// status line is not a valid HTTP status line.
    pub body: Option<Vec<u8>>,
    /// Set when the request produced no usable response.
    pub error: Option<Error>,
}

impl Response {
    /// A response that carries nothing but `error`.
    pub fn failed(error: Error) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Parses a raw response.
    ///
    /// `raw` is `None` when the transport produced nothing. When
    /// `decode_chunked` is set, a body sent with `Transfer-Encoding: chunked`
    /// is decoded; transports that hand back an already decoded body pass
    /// `false`.
    pub fn parse(raw: Option<&[u8]>, decode_chunked: bool) -> Self {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Self::failed(Error::EmptyResponse),
        };

        let Some(head_end) = find_slice(raw, b"\r\n\r\n") else {
            return Self::failed(Error::MalformedResponse);
        };
        let head = String::from_utf8_lossy(&raw[..head_end]);
        let body = &raw[head_end + 4..];

        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap_or_default();

        let mut headers = HashMap::new();
        headers.insert(STATUS_LINE.to_owned(), status_line.to_owned());
        for line in lines {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
        }

        let body = if is_valid_status_line(status_line) {
            let chunked = headers
                .get("transfer-encoding")
                .is_some_and(|v| v.eq_ignore_ascii_case("chunked"));
            if decode_chunked && chunked {
                Some(chunked::decode(body))
            } else {
                Some(body.to_vec())
            }
        } else {
            log::debug!("invalid status line: {status_line:?}");
            None
        };

        Self {
            status_code: status_code(status_line),
            headers,
            body,
            error: None,
        }
    }

    /// Returns `true` if the response carries an error.
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Looks up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The raw status line, e.g. `HTTP/1.1 200 OK`.
    pub fn status_line(&self) -> Option<&str> {
        self.headers.get(STATUS_LINE).map(String::as_str)
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

/// Extracts the first space-delimited numeral that is followed by a space.
fn status_code(line: &str) -> Option<u16> {
    let mut parts = line.split(' ');
    parts.next();
    let mut parts = parts.peekable();
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            break;
        }
        if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
            return part.parse().ok();
        }
    }
    None
}

/// Checks the `HTTP/d.d ddd ` shape (the code may have 3 or 4 digits).
fn is_valid_status_line(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("HTTP/") else {
        return false;
    };
    let bytes = rest.as_bytes();
    if bytes.len() < 4
        || !bytes[0].is_ascii_digit()
        || bytes[1] != b'.'
        || !bytes[2].is_ascii_digit()
        || !bytes[3].is_ascii_whitespace()
    {
        return false;
    }
    let code = &bytes[4..];
    let digits = code.iter().take_while(|b| b.is_ascii_digit()).count();
    (3..=4).contains(&digits) && code.get(digits).is_some_and(|b| b.is_ascii_whitespace())
}
