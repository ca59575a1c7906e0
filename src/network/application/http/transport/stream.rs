use super::{Transport, open, target_addr, timeout};
use crate::network::application::http::config::ClientConfig;
use crate::network::application::http::request;
use crate::network::error::Error;
use crate::network::url::ResolvedUrl;
use std::io::{BufRead, BufReader, Write};
use std::time::Duration;

/// How long the stream transport waits for a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Buffered stream transport.
///
/// Connects with a fixed [`CONNECT_TIMEOUT`], applies the configured timeout
/// to the open stream and reads the response line by line until end of
/// stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamTransport;

impl Transport for StreamTransport {
    fn send(&self, url: &ResolvedUrl, config: &ClientConfig) -> Result<Vec<u8>, Error> {
        let addr = target_addr(url, config)?;
        log::debug!("stream connect {addr}");

        let mut stream = open(addr, Some(CONNECT_TIMEOUT))?;
        if let Some(timeout) = timeout(config) {
            stream.set_read_timeout(Some(timeout)).map_err(|_| Error::ConnectionFailed)?;
            stream.set_write_timeout(Some(timeout)).map_err(|_| Error::ConnectionFailed)?;
        }

        let request = request::build(url, config);
        stream
            .write_all(request.as_bytes())
            .and_then(|()| stream.flush())
            .map_err(|_| Error::WriteError)?;

        let mut reader = BufReader::new(&stream);
        let mut response = Vec::new();
        loop {
            match reader.read_until(b'\n', &mut response) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    log::warn!("stream read from {addr} stopped after {} bytes: {err}", response.len());
                    break;
                }
            }
        }

        log::debug!("stream read {} bytes from {addr}", response.len());
        Ok(response)
    }
}
