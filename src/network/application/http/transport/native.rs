use super::Transport;
use crate::network::application::http::config::ClientConfig;
use crate::network::error::Error;
use crate::network::url::ResolvedUrl;

/// libcurl-backed transport.
///
/// Only functional when the crate is built with the `curl` feature. Without
/// it, [`send`](Transport::send) returns [`Error::Unavailable`].
///
/// libcurl returns the status line, the headers and a body that is already
/// de-chunked, so the response parser must not decode it again.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTransport;

impl NativeTransport {
    /// Returns `true` if this build can use libcurl.
    pub const fn is_available() -> bool {
        cfg!(feature = "curl")
    }
}

#[cfg(not(feature = "curl"))]
impl Transport for NativeTransport {
    fn send(&self, _url: &ResolvedUrl, _config: &ClientConfig) -> Result<Vec<u8>, Error> {
        log::debug!("native transport requested but the curl feature is disabled");
        Err(Error::Unavailable)
    }
}

#[cfg(feature = "curl")]
impl Transport for NativeTransport {
    fn send(&self, url: &ResolvedUrl, config: &ClientConfig) -> Result<Vec<u8>, Error> {
        use crate::network::application::http::config::HttpVersion;
        use crate::network::application::http::request::is_user_agent;
        use curl::easy::{Easy, List};
        use std::time::Duration;

        let mut easy = Easy::new();
        easy.url(&url.url)?;
        easy.show_header(true)?;

        if url.scheme == "https" {
            if config.insecure_skip_peer_verify {
                log::warn!("TLS peer verification disabled for {}", url.hostname);
            }
            easy.ssl_verify_peer(!config.insecure_skip_peer_verify)?;
            easy.ssl_verify_host(true)?;
        }
        // Pinned either way: left alone, libcurl may negotiate HTTP/2 over TLS.
        easy.http_version(match config.version {
            HttpVersion::Http10 => curl::easy::HttpVersion::V10,
            HttpVersion::Http11 => curl::easy::HttpVersion::V11,
        })?;
        if let Some(proxy) = &config.proxy {
            easy.proxy(&proxy.to_string())?;
        }
        if config.timeout > 0 {
            easy.timeout(Duration::from_secs(config.timeout))?;
        }
        if let Some(agent) = &config.user_agent {
            easy.useragent(agent)?;
        }

        let mut headers = List::new();
        for line in &config.headers {
            if config.user_agent.is_some() && is_user_agent(line) {
                continue;
            }
            headers.append(line)?;
        }
        if let Some(body) = &config.post {
            easy.post(true)?;
            easy.post_fields_copy(body.as_bytes())?;
            // An empty Expect stops libcurl from waiting for 100-continue.
            headers.append("Expect:")?;
        }
        easy.http_headers(headers)?;

        let mut response = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        log::debug!("curl read {} bytes from {}", response.len(), url.url);
        Ok(response)
    }
}

#[cfg(feature = "curl")]
impl From<curl::Error> for Error {
    fn from(err: curl::Error) -> Self {
        log::debug!("curl: {err}");
        if err.is_couldnt_connect() {
            Error::ConnectionRefused
        } else if err.is_operation_timedout() {
            Error::Timeout
        } else if err.is_couldnt_resolve_host() || err.is_couldnt_resolve_proxy() {
            Error::UnresolvedHost
        } else if err.is_send_error() {
            Error::WriteError
        } else if err.is_recv_error() || err.is_got_nothing() {
            Error::ReadError
        } else {
            Error::ConnectionFailed
        }
    }
}
