#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A one-shot HTTP server on localhost.
///
/// Accepts a single connection, waits for a complete request, answers with
/// `response` and closes its side. Joining the handle yields every byte the
/// client sent.
pub struct MockServer {
    pub port: u16,
    handle: JoinHandle<Vec<u8>>,
}

impl MockServer {
    pub fn start(response: &[u8]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let port = listener.local_addr().unwrap().port();
        let response = response.to_vec();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            stream
                .set_read_timeout(Some(Duration::from_secs(5)))
                .unwrap();

            let mut received = Vec::new();
            let mut buf = [0u8; 512];
            while !request_complete(&received) {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => received.extend_from_slice(&buf[..n]),
                }
            }

            stream.write_all(&response).unwrap();
            stream.shutdown(Shutdown::Write).unwrap();

            // Drain whatever the client still sends until it hangs up.
            while let Ok(n) = stream.read(&mut buf) {
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            received
        });

        Self { port, handle }
    }

    /// Waits for the exchange to finish and returns the request as text.
    pub fn request(self) -> String {
        String::from_utf8(self.handle.join().expect("mock server panicked")).unwrap()
    }
}

/// Returns `true` once the head and a `Content-Length` body are in.
fn request_complete(data: &[u8]) -> bool {
    let Some(head_end) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&data[..head_end]);
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    data.len() >= head_end + 4 + length
}

/// A port on localhost that nothing listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
