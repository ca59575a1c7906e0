use crate::network::application::http::config::{ClientConfig, HttpVersion, Proxy, TransportKind};
use crate::network::application::http::response::Response;
use crate::network::application::http::transport::{
    NativeTransport, SocketTransport, StreamTransport, Transport,
};
use crate::network::error::Error;
use crate::network::url::{ResolvedUrl, Resolver};
use std::sync::Arc;

/// A blocking HTTP client that performs one request per call.
///
/// Configuration setters return `&mut Self` so they can be chained. Each
/// call to [`request`](Client::request) replaces the stored result and error.
///
/// ```rust,no_run
/// use rawhttp::network::application::http::Client;
///
/// let mut client = Client::new();
/// client
///     .use_socket()
///     .set_timeout(5)
///     .add_header("X-Device", "sensor-01");
///
/// let response = client.request("http://example.com/");
/// if let Some(err) = &response.error {
///     eprintln!("request failed: {err}");
/// }
/// ```
#[derive(Debug, Default)]
pub struct Client {
    config: ClientConfig,
    resolver: Resolver,
    result: Response,
    error: Option<Error>,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_resolver(config, Resolver::new())
    }

    /// Creates a client that resolves URLs through `resolver`.
    pub fn with_resolver(config: ClientConfig, resolver: Resolver) -> Self {
        Self {
            config,
            resolver,
            result: Response::default(),
            error: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Routes requests through a forward proxy given as `host:port`.
    pub fn set_proxy(&mut self, proxy: &str) -> Result<&mut Self, Error> {
        self.config.proxy = Some(proxy.parse::<Proxy>()?);
        Ok(self)
    }

    pub fn set_transport(&mut self, transport: TransportKind) -> &mut Self {
        self.config.transport = transport;
        self
    }

    pub fn use_socket(&mut self) -> &mut Self {
        self.set_transport(TransportKind::Socket)
    }

    pub fn use_stream(&mut self) -> &mut Self {
        self.set_transport(TransportKind::Stream)
    }

    pub fn use_native(&mut self) -> &mut Self {
        self.set_transport(TransportKind::Native)
    }

    /// Timeout in seconds. `0` waits forever.
    pub fn set_timeout(&mut self, secs: u64) -> &mut Self {
        self.config.timeout = secs;
        self
    }

    /// Sets the version from a tag; anything but `"1.0"` selects 1.1.
    pub fn set_http_version(&mut self, version: &str) -> &mut Self {
        self.config.version = HttpVersion::parse(version);
        self
    }

    pub fn use_http10(&mut self) -> &mut Self {
        self.config.version = HttpVersion::Http10;
        self
    }

    pub fn use_http11(&mut self) -> &mut Self {
        self.config.version = HttpVersion::Http11;
        self
    }

    /// Adds a header line.
    ///
    /// With a non-empty `value` the line is `name: value`. With an empty
    /// `value`, `name` is taken as a complete line if it contains a colon and
    /// ignored otherwise. Lines containing CR or LF are refused.
    pub fn add_header(&mut self, name: &str, value: &str) -> &mut Self {
        let line = if value.is_empty() {
            if !name.contains(':') {
                log::warn!("ignoring header without value: {name:?}");
                return self;
            }
            name.to_owned()
        } else {
            format!("{name}: {value}")
        };
        self.push_header(line)
    }

    /// Adds several headers. Keys that already contain a colon are complete
    /// lines and their value is not appended.
    pub fn add_headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in headers {
            let (name, value) = (name.as_ref(), value.as_ref());
            if name.contains(':') {
                self.push_header(name.to_owned());
            } else {
                self.push_header(format!("{name}: {value}"));
            }
        }
        self
    }

    /// Sets the `User-Agent`. It is written on its own line and takes the
    /// place of any `User-Agent` added through [`add_header`](Self::add_header).
    pub fn set_user_agent(&mut self, agent: &str) -> &mut Self {
        self.config.user_agent = Some(agent.to_owned());
        self
    }

    /// Sets a raw request body; the request becomes a `POST`.
    pub fn set_post(&mut self, body: impl Into<String>) -> &mut Self {
        self.config.post = Some(body.into());
        self
    }

    /// Sets a form body. Values are url-encoded and pairs joined with `&`
    /// in iteration order.
    pub fn set_post_form<I, K, V>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = fields
            .into_iter()
            .map(|(k, v)| {
                let value: String = ::url::form_urlencoded::byte_serialize(v.as_ref().as_bytes()).collect();
                format!("{}={}", k.as_ref(), value)
            })
            .collect::<Vec<_>>()
            .join("&");
        self.set_post(body)
    }

    /// Turns TLS peer verification off for the native transport.
    pub fn skip_peer_verification(&mut self, skip: bool) -> &mut Self {
        self.config.insecure_skip_peer_verify = skip;
        self
    }

    /// Performs a request and returns the parsed result.
    ///
    /// The result is also kept until the next call and is available through
    /// [`result`](Self::result). Failures never panic: check
    /// [`Response::error`] or [`last_error`](Self::last_error).
    pub fn request(&mut self, url: &str) -> &Response {
        self.error = None;

        let resolved = match self.check_url(url) {
            Ok(resolved) => resolved,
            Err(err) => {
                log::debug!("rejected {url}: {err}");
                self.error = Some(err);
                self.result = Response::failed(err);
                return &self.result;
            }
        };

        let kind = self.config.transport;
        let raw = match kind {
            TransportKind::Socket => SocketTransport.send(&resolved, &self.config),
            TransportKind::Stream => StreamTransport.send(&resolved, &self.config),
            TransportKind::Native => NativeTransport.send(&resolved, &self.config),
        };

        let decode_chunked = kind != TransportKind::Native;
        self.result = match raw {
            Ok(bytes) => Response::parse(Some(bytes.as_slice()), decode_chunked),
            Err(err) => {
                let mut response = Response::parse(None, decode_chunked);
                response.error = Some(err);
                response
            }
        };
        self.error = self.result.error;
        &self.result
    }

    /// Same as [`request`](Self::request).
    pub fn fetch(&mut self, url: &str) -> &Response {
        self.request(url)
    }

    /// The error of the last request, if it failed.
    pub fn last_error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// The result of the last request.
    pub fn result(&self) -> &Response {
        &self.result
    }

    fn push_header(&mut self, line: String) -> &mut Self {
        if line.contains(['\r', '\n']) {
            log::warn!("ignoring header with line break: {line:?}");
        } else {
            self.config.headers.push(line);
        }
        self
    }

    fn check_url(&self, url: &str) -> Result<Arc<ResolvedUrl>, Error> {
        let resolved = self.resolver.resolve(url)?;
        if resolved.domain.is_empty() {
            return Err(Error::MissingHost);
        }
        if resolved.host.is_empty() {
            return Err(Error::UnresolvedHost);
        }
        if resolved.port == 0 {
            return Err(Error::MissingPort);
        }
        Ok(resolved)
    }
}
