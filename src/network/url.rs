//! URL decomposition and host resolution.
//!
//! A [`Resolver`] turns an absolute URL string into a [`ResolvedUrl`]: the
//! pieces the request builder and the transports need, with the host already
//! resolved to an IP address. Results are memoized per URL string for the
//! lifetime of the resolver, so repeated requests to the same URL skip both
//! parsing and the DNS lookup.
//!
//! Cached entries are never refreshed. A host whose address changes while a
//! resolver is alive keeps its first address, and a lookup that failed keeps
//! failing. Drop the resolver (or the client owning it) to start over.

use crate::network::error::Error;
use std::collections::HashMap;
use std::net::{IpAddr, ToSocketAddrs};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use ::url::{Host, Url};

/// A host name lookup function.
///
/// Returns `None` when the name does not resolve.
pub type Lookup = dyn Fn(&str) -> Option<IpAddr> + Send + Sync;

/// Returns the default port for a scheme, or `0` when the scheme has none.
///
/// ```rust
/// use rawhttp::network::url::default_port;
///
/// assert_eq!(default_port("http"), 80);
/// assert_eq!(default_port("ftps"), 990);
/// assert_eq!(default_port("gopher"), 0);
/// ```
pub fn default_port(scheme: &str) -> u16 {
    match scheme {
        "http" => 80,
        "https" => 443,
        "ftp" => 21,
        "ftps" => 990,
        _ => 0,
    }
}

/// A decomposed URL, ready to be connected to and requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    /// The URL exactly as it was given.
    pub url: String,
    /// Lowercase scheme, e.g. `http`.
    pub scheme: String,
    /// The host as written in the URL (IPv6 literals keep their brackets).
    pub domain: String,
    /// The resolved IP address, or an empty string if resolution failed.
    pub host: String,
    /// Explicit port, or the scheme default from [`default_port`].
    pub port: u16,
    /// Value for the `Host` header: the domain, plus `:port` when the URL
    /// carried an explicit port.
    pub hostname: String,
    /// Path, query and fragment as written in the URL. Always starts with `/`.
    pub request_uri: String,
}

/// Parses URLs and caches the results per URL string.
pub struct Resolver {
    lookup: Box<Lookup>,
    cache: Mutex<HashMap<String, Arc<ResolvedUrl>>>,
}

impl Resolver {
    /// Creates a resolver backed by the system name resolver.
    pub fn new() -> Self {
        Self::with_lookup(system_lookup)
    }

    /// Creates a resolver that resolves host names with `lookup`.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<IpAddr> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves `url`, reusing a previous result for the identical string.
    ///
    /// Only strings that fail to parse return an error. A host that does not
    /// resolve yields a [`ResolvedUrl`] with an empty `host`, and that result
    /// is cached like any other.
    pub fn resolve(&self, url: &str) -> Result<Arc<ResolvedUrl>, Error> {
        if let Some(hit) = self.cache().get(url) {
            return Ok(Arc::clone(hit));
        }

        let resolved = Arc::new(self.parse(url)?);
        let entry = self
            .cache()
            .entry(url.to_owned())
            .or_insert(resolved)
            .clone();
        Ok(entry)
    }

    /// Number of cached URL strings.
    pub fn len(&self) -> usize {
        self.cache().len()
    }

    /// Returns `true` if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, Arc<ResolvedUrl>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn parse(&self, raw: &str) -> Result<ResolvedUrl, Error> {
        let parsed = Url::parse(raw).map_err(|_| Error::InvalidUrl)?;
        let scheme = parsed.scheme().to_owned();
        let parts = RawParts::split(raw.trim());

        // Non-special schemes report IP literals as opaque domains.
        let host = match parsed.host() {
            Some(Host::Domain(name)) if !name.is_empty() => match name.parse::<IpAddr>() {
                Ok(ip) => ip.to_string(),
                Err(_) => {
                    let ip = (self.lookup)(name);
                    if ip.is_none() {
                        log::debug!("could not resolve {name}");
                    }
                    ip.map(|ip| ip.to_string()).unwrap_or_default()
                }
            },
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            _ => String::new(),
        };
        let domain = match parsed.host_str() {
            Some(_) if !parts.host.is_empty() => parts.host.to_owned(),
            Some(name) => name.to_owned(),
            None => String::new(),
        };

        let explicit_port = parts.port.or(parsed.port());
        let port = explicit_port.unwrap_or_else(|| default_port(&scheme));
        let hostname = match explicit_port {
            Some(port) => format!("{domain}:{port}"),
            None => domain.clone(),
        };

        Ok(ResolvedUrl {
            url: raw.to_owned(),
            scheme,
            domain,
            host,
            port,
            hostname,
            request_uri: parts.request_uri(),
        })
    }
}

/// Authority and target sliced from the URL text as written, so the request
/// carries the path exactly as given (no dot-segment removal, no
/// re-encoding) and an explicit port survives even when it is the default.
#[derive(Debug, PartialEq, Eq)]
struct RawParts<'a> {
    host: &'a str,
    port: Option<u16>,
    path: &'a str,
    query: &'a str,
    fragment: &'a str,
}

impl<'a> RawParts<'a> {
    fn split(raw: &'a str) -> Self {
        let after_scheme = raw.split_once(':').map_or(raw, |(_, rest)| rest);

        let (authority, target) = match after_scheme.strip_prefix("//") {
            Some(rest) => {
                let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
                rest.split_at(end)
            }
            None => ("", after_scheme),
        };

        let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
        let (host, port) = if host_port.starts_with('[') {
            match host_port.find(']') {
                Some(close) => (&host_port[..=close], host_port[close + 1..].strip_prefix(':')),
                None => (host_port, None),
            }
        } else {
            match host_port.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (host_port, None),
            }
        };
        let port = port.and_then(|p| p.parse::<u16>().ok());

        let (target, fragment) = target.split_once('#').unwrap_or((target, ""));
        let (path, query) = target.split_once('?').unwrap_or((target, ""));

        Self {
            host,
            port,
            path,
            query,
            fragment,
        }
    }

    fn request_uri(&self) -> String {
        let mut uri = match self.path {
            "" => String::from("/"),
            p if p.starts_with('/') => p.to_owned(),
            p => format!("/{p}"),
        };
        if !self.query.is_empty() {
            uri.push('?');
            uri.push_str(self.query);
        }
        if !self.fragment.is_empty() {
            uri.push('#');
            uri.push_str(self.fragment);
        }
        uri
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Resolver")
            .field("cached", &self.len())
            .finish_non_exhaustive()
    }
}

/// Resolves through the operating system, preferring IPv4 addresses.
fn system_lookup(name: &str) -> Option<IpAddr> {
    let addrs: Vec<IpAddr> = (name, 0)
        .to_socket_addrs()
        .ok()?
        .map(|addr| addr.ip())
        .collect();
    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}
