//! Chunked transfer-encoding decoder.
//!
//! Each chunk is a hex size line followed by that many bytes and a CRLF. A
//! zero-size chunk ends the body; trailers after it are ignored.

/// Decodes a chunked body.
///
/// Decoding stops at the zero-size chunk or at the first frame that does not
/// parse, in which case everything decoded up to that point is returned.
///
/// ```rust
/// use rawhttp::network::application::http::chunked::decode;
///
/// let body = decode(b"4\r\nWiki\r\n5;ext=1\r\npedia\r\n0\r\n\r\n");
/// assert_eq!(body, b"Wikipedia");
/// ```
pub fn decode(mut input: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(input.len());

    while !input.is_empty() {
        let Some(line_end) = find_crlf(input) else {
            break;
        };
        let Some(size) = parse_size(&input[..line_end]) else {
            log::debug!("bad chunk size line, keeping {} decoded bytes", body.len());
            break;
        };
        input = &input[line_end + 2..];

        if size == 0 {
            break;
        }

        let take = size.min(input.len());
        body.extend_from_slice(&input[..take]);
        input = &input[take..];

        // Chunk data is terminated by its own CRLF.
        if input.starts_with(b"\r\n") {
            input = &input[2..];
        }
    }

    body
}

/// Parses the hex size at the start of a chunk line. Extensions after `;`
/// are ignored.
fn parse_size(line: &[u8]) -> Option<usize> {
    let digits = line
        .split(|&b| b == b';')
        .next()
        .unwrap_or_default()
        .trim_ascii();
    // from_str_radix alone would take a leading sign.
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    usize::from_str_radix(core::str::from_utf8(digits).ok()?, 16).ok()
}

pub(crate) fn find_crlf(haystack: &[u8]) -> Option<usize> {
    find_slice(haystack, b"\r\n")
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
pub(crate) fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
