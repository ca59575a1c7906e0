use crate::network::application::http::config::ClientConfig;
use crate::network::url::ResolvedUrl;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// The exact bytes sent on the wire for one request attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    method: Method,
    bytes: Vec<u8>,
}

impl RawRequest {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Builds the request for `url` from `config`.
///
/// Header lines from the configuration are not validated here; they are
/// written exactly as stored.
pub fn build(url: &ResolvedUrl, config: &ClientConfig) -> RawRequest {
    let method = if config.post.is_some() {
        Method::Post
    } else {
        Method::Get
    };

    let mut buf: Vec<u8> = Vec::with_capacity(256);

    // Request line
    push_line(
        &mut buf,
        &format!(
            "{} {} HTTP/{}",
            method.as_str(),
            url.request_uri,
            config.version.as_str()
        ),
    );

    // Headers
    push_line(&mut buf, "Accept: */*");
    push_line(&mut buf, &format!("Host: {}", url.hostname));
    if let Some(body) = &config.post {
        push_line(&mut buf, &format!("Content-Length: {}", body.len()));
    }
    if let Some(agent) = &config.user_agent {
        push_line(&mut buf, &format!("User-Agent: {agent}"));
    }
    for line in &config.headers {
        if config.user_agent.is_some() && is_user_agent(line) {
            continue;
        }
        push_line(&mut buf, line);
    }
    push_line(&mut buf, "Connection: Close");
    buf.extend_from_slice(b"\r\n");

    // Body
    if let Some(body) = &config.post {
        buf.extend_from_slice(body.as_bytes());
        buf.extend_from_slice(b"\r\n\r\n");
    }

    log::trace!("built request:\n{}", String::from_utf8_lossy(&buf));
    RawRequest { method, bytes: buf }
}

/// Returns `true` if a raw header line names `User-Agent`.
pub(crate) fn is_user_agent(line: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(name, _)| name.trim().eq_ignore_ascii_case("User-Agent"))
}

fn push_line(buf: &mut Vec<u8>, line: &str) {
    buf.extend_from_slice(line.as_bytes());
    buf.extend_from_slice(b"\r\n");
}
