mod common;

use common::{MockServer, closed_port, init_logging};
use rawhttp::network::application::http::{Client, ClientConfig, TransportKind};
use rawhttp::network::error::Error;
use rawhttp::network::url::Resolver;
use std::net::{IpAddr, Ipv4Addr};

const PLAIN: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello";
const CHUNKED: &[u8] =
    b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\nE\r\n in\r\n\r\nchunks.\r\n0\r\n\r\n";

fn client(transport: TransportKind) -> Client {
    init_logging();
    let config = ClientConfig {
        transport,
        timeout: 5,
        ..ClientConfig::default()
    };
    Client::with_config(config)
}

#[test]
fn socket_get() {
    let server = MockServer::start(PLAIN);
    let mut client = client(TransportKind::Socket);

    let port = server.port;
    let res = client.request(&format!("http://127.0.0.1:{port}/hello?x=1")).clone();

    assert_eq!(res.error, None);
    assert_eq!(res.status_code, Some(200));
    assert_eq!(res.header("content-type"), Some("text/plain"));
    assert_eq!(res.text().as_deref(), Some("hello"));

    let request = server.request();
    assert!(request.starts_with("GET /hello?x=1 HTTP/1.1\r\n"));
    assert!(request.contains(&format!("Host: 127.0.0.1:{port}\r\n")));
    assert!(request.ends_with("Connection: Close\r\n\r\n"));
}

#[test]
fn stream_get_decodes_chunked_body() {
    let server = MockServer::start(CHUNKED);
    let mut client = client(TransportKind::Stream);

    let res = client.fetch(&format!("http://127.0.0.1:{}/", server.port));
    assert_eq!(res.error, None);
    assert_eq!(res.text().as_deref(), Some("Wikipedia in\r\n\r\nchunks."));
    assert_eq!(res.header("transfer-encoding"), Some("chunked"));
    server.request();
}

#[test]
fn socket_post_form() {
    let server = MockServer::start(PLAIN);
    let mut client = client(TransportKind::Socket);
    client
        .use_http10()
        .set_user_agent("rawhttp-tests")
        .add_header("X-Trace", "abc")
        .set_post_form([("a", "1"), ("b", "2")]);

    let res = client.request(&format!("http://127.0.0.1:{}/submit", server.port));
    assert_eq!(res.status_code, Some(200));

    let request = server.request();
    assert!(request.starts_with("POST /submit HTTP/1.0\r\n"));
    assert!(request.contains("Content-Length: 7\r\n"));
    assert!(request.contains("User-Agent: rawhttp-tests\r\n"));
    assert!(request.contains("X-Trace: abc\r\n"));
    assert!(request.ends_with("\r\n\r\na=1&b=2\r\n\r\n"));
}

#[test]
fn proxy_overrides_connect_target() {
    let server = MockServer::start(PLAIN);
    init_logging();
    let resolver = Resolver::with_lookup(|_| Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))));
    let mut client = Client::with_resolver(ClientConfig::default(), resolver);
    client.use_socket().set_timeout(5);
    client
        .set_proxy(&format!("127.0.0.1:{}", server.port))
        .unwrap();

    let res = client.request("http://upstream.test:8081/via/proxy");
    assert_eq!(res.status_code, Some(200));

    let request = server.request();
    assert!(request.starts_with("GET /via/proxy HTTP/1.1\r\n"));
    assert!(request.contains("Host: upstream.test:8081\r\n"));
}

#[test]
fn connection_refused_is_reported() {
    let port = closed_port();
    for transport in [TransportKind::Socket, TransportKind::Stream] {
        let mut client = client(transport);
        let res = client.request(&format!("http://127.0.0.1:{port}/"));
        assert_eq!(res.error, Some(Error::ConnectionRefused), "{transport:?}");
        assert!(res.body.is_none());
        assert_eq!(client.last_error(), Some(&Error::ConnectionRefused));
    }
}

#[test]
fn silent_server_gives_empty_response() {
    let server = MockServer::start(b"");
    let mut client = client(TransportKind::Socket);
    let res = client.request(&format!("http://127.0.0.1:{}/", server.port));
    assert_eq!(res.error, Some(Error::EmptyResponse));
    server.request();
}

#[test]
fn each_request_replaces_the_result() {
    let server = MockServer::start(PLAIN);
    let mut client = client(TransportKind::Stream);
    client.request(&format!("http://127.0.0.1:{}/", server.port));
    assert_eq!(client.result().status_code, Some(200));
    server.request();

    client.request("gopher://127.0.0.1/");
    assert_eq!(client.last_error(), Some(&Error::MissingPort));
    assert_eq!(client.result().status_code, None);
}

#[cfg(feature = "curl")]
mod native {
    use super::*;

    #[test]
    fn native_get() {
        let server = MockServer::start(PLAIN);
        let mut client = client(TransportKind::Native);

        let port = server.port;
        let res = client.request(&format!("http://127.0.0.1:{port}/hello?x=1")).clone();
        assert_eq!(res.error, None);
        assert_eq!(res.status_code, Some(200));
        assert_eq!(res.text().as_deref(), Some("hello"));

        let request = server.request();
        assert!(request.starts_with("GET /hello?x=1 HTTP/1.1\r\n"));
        assert!(request.contains(&format!("Host: 127.0.0.1:{port}\r\n")));
    }

    #[test]
    fn native_body_is_not_decoded_twice() {
        let server = MockServer::start(CHUNKED);
        let mut client = client(TransportKind::Native);

        let res = client.request(&format!("http://127.0.0.1:{}/", server.port));
        assert_eq!(res.error, None);
        assert_eq!(res.text().as_deref(), Some("Wikipedia in\r\n\r\nchunks."));
        server.request();
    }

    #[test]
    fn native_post_sends_version_agent_and_body() {
        let server = MockServer::start(PLAIN);
        let mut client = client(TransportKind::Native);
        client
            .use_http10()
            .add_header("User-Agent", "from-list")
            .set_user_agent("rawhttp-tests")
            .add_header("X-Trace", "abc")
            .set_post_form([("a", "1"), ("b", "2")]);

        let res = client.request(&format!("http://127.0.0.1:{}/submit", server.port));
        assert_eq!(res.status_code, Some(200));

        let request = server.request();
        assert!(request.starts_with("POST /submit HTTP/1.0\r\n"));
        assert!(request.contains("User-Agent: rawhttp-tests\r\n"));
        assert!(!request.contains("from-list"));
        assert!(request.contains("X-Trace: abc\r\n"));
        assert!(!request.to_ascii_lowercase().contains("expect:"));
        assert!(request.ends_with("\r\n\r\na=1&b=2"));
    }

    #[test]
    fn native_connection_refused() {
        let port = closed_port();
        let mut client = client(TransportKind::Native);
        let res = client.request(&format!("http://127.0.0.1:{port}/"));
        assert_eq!(res.error, Some(Error::ConnectionRefused));
    }
}
