use super::{Transport, READ_BLOCK, open, target_addr, timeout};
use crate::network::application::http::config::ClientConfig;
use crate::network::application::http::request;
use crate::network::error::Error;
use crate::network::url::ResolvedUrl;
use std::io::{Read, Write};

/// Raw TCP socket transport.
///
/// The connect is non-blocking and waits at most the configured timeout for
/// the socket to become ready. After that the socket is blocking with the
/// same timeout applied to reads, and the response is read until the server
/// closes the connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketTransport;

impl Transport for SocketTransport {
    fn send(&self, url: &ResolvedUrl, config: &ClientConfig) -> Result<Vec<u8>, Error> {
        let addr = target_addr(url, config)?;
        let timeout = timeout(config);
        log::debug!("socket connect {addr} (timeout {timeout:?})");

        let mut stream = open(addr, timeout)?;
        stream.set_nonblocking(false).map_err(|_| Error::ConnectionFailed)?;
        stream.set_read_timeout(timeout).map_err(|_| Error::ConnectionFailed)?;

        let request = request::build(url, config);
        stream
            .write_all(request.as_bytes())
            .and_then(|()| stream.flush())
            .map_err(|_| Error::WriteError)?;

        let mut response = Vec::new();
        let mut block = [0u8; READ_BLOCK];
        loop {
            match stream.read(&mut block) {
                Ok(0) => break,
                Ok(n) => response.extend_from_slice(&block[..n]),
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    if response.is_empty() {
                        return Err(Error::ReadError);
                    }
                    log::warn!("read from {addr} stopped after {} bytes: {err}", response.len());
                    break;
                }
            }
        }

        log::debug!("socket read {} bytes from {addr}", response.len());
        Ok(response)
    }
}
