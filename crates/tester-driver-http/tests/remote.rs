//! Remote backend against a scripted local HTTP service.

use std::net::SocketAddr;
use std::time::Duration;
use tester_core::{aggregate, AcquisitionBackend, BackendMode, PinId, RawPinStatus};
use tester_driver_http::{HttpConfig, RemoteBackend};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Reply {
    status: u16,
    body: &'static str,
    delay: Duration,
}

impl Reply {
    fn ok(body: &'static str) -> Self {
        Self {
            status: 200,
            body,
            delay: Duration::ZERO,
        }
    }

    fn status(status: u16) -> Self {
        Self {
            status,
            body: "",
            delay: Duration::ZERO,
        }
    }

    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Serve `health` and `test` replies on an ephemeral port.
async fn serve(health: Reply, test: Reply) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let (health, test) = (health.clone(), test.clone());
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut len = 0;
                while !buf[..len].windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf[len..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => len += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..len]);
                let path = request.split_whitespace().nth(1).unwrap_or("");
                let reply = if path.ends_with("/health") {
                    health
                } else if path.ends_with("/test") {
                    test
                } else {
                    Reply::status(404)
                };

                tokio::time::sleep(reply.delay).await;
                let response = format!(
                    "HTTP/1.1 {} X\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{}",
                    reply.status,
                    reply.body.len(),
                    reply.body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn backend(addr: SocketAddr, timeout: Duration) -> RemoteBackend {
    let config = HttpConfig::new(format!("http://{addr}/api")).with_timeout(timeout);
    RemoteBackend::new(config).unwrap()
}

fn pins(n: usize) -> Vec<PinId> {
    (1..=n).map(PinId::from).collect()
}

#[tokio::test]
async fn test_healthy_service_and_passing_cable() {
    let addr = serve(
        Reply::ok(r#"{"status":"ok"}"#),
        Reply::ok(r#"{"1":"seen","2":"seen","3":"seen"}"#),
    )
    .await;
    let backend = backend(addr, Duration::from_secs(2));

    let health = backend.health().await;
    assert!(health.ok);
    assert_eq!(health.backend_mode, BackendMode::Http);
    assert_eq!(health.detail, "API OK");

    let result = aggregate(&backend.run_test(&pins(3)).await);
    assert!(result.passed);
}

#[tokio::test]
async fn test_server_error_reports_all_unknown() {
    let addr = serve(Reply::status(500), Reply::status(500)).await;
    let backend = backend(addr, Duration::from_secs(2));

    let health = backend.health().await;
    assert!(!health.ok);
    assert_eq!(health.detail, "HTTP 500");

    let request = pins(8);
    let raw = backend.run_test(&request).await;
    assert!(raw.covers_exactly(&request));
    assert!(raw.values().all(|s| *s == RawPinStatus::Unknown));
}

#[tokio::test]
async fn test_timeout_reports_all_unknown() {
    let slow = Duration::from_millis(500);
    let addr = serve(
        Reply::ok("{}").delayed(slow),
        Reply::ok(r#"{"1":"seen"}"#).delayed(slow),
    )
    .await;
    let backend = backend(addr, Duration::from_millis(100));

    let health = backend.health().await;
    assert!(!health.ok);
    assert!(health.detail.contains("timed out"));

    let raw = backend.run_test(&pins(1)).await;
    assert_eq!(raw.get("1"), Some(&RawPinStatus::Unknown));
}

#[tokio::test]
async fn test_unreachable_service_reports_all_unknown() {
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let backend = backend(addr, Duration::from_millis(500));

    assert!(!backend.health().await.ok);
    let raw = backend.run_test(&pins(4)).await;
    assert_eq!(raw.len(), 4);
    assert!(raw.values().all(|s| *s == RawPinStatus::Unknown));
}

#[tokio::test]
async fn test_https_base_url_reaches_the_network() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let config = HttpConfig::new(format!("https://{addr}/api"))
        .with_timeout(Duration::from_millis(500));
    assert!(config.validate().is_ok());
    let backend = RemoteBackend::new(config).unwrap();

    // Fails at connect time, not on the scheme.
    let health = backend.health().await;
    assert!(!health.ok);
    assert!(
        !health.detail.contains("scheme"),
        "unexpected detail: {}",
        health.detail
    );
}

#[tokio::test]
async fn test_malformed_body_reports_all_unknown() {
    for body in [r#"["seen","seen"]"#, "not json", r#""seen""#] {
        let addr = serve(Reply::ok("{}"), Reply::ok(body)).await;
        let backend = backend(addr, Duration::from_secs(2));

        let raw = backend.run_test(&pins(2)).await;
        assert_eq!(raw.len(), 2, "body: {body}");
        assert!(
            raw.values().all(|s| *s == RawPinStatus::Unknown),
            "body: {body}"
        );
    }
}

#[tokio::test]
async fn test_partial_and_extra_keys() {
    let addr = serve(
        Reply::ok("{}"),
        Reply::ok(r#"{"1":"seen","2":"MISS","7":"seen","shield":"seen"}"#),
    )
    .await;
    let backend = backend(addr, Duration::from_secs(2));

    let request = pins(3);
    let raw = backend.run_test(&request).await;
    assert!(raw.covers_exactly(&request));
    assert_eq!(raw.get("1"), Some(&RawPinStatus::Seen));
    assert_eq!(raw.get("2"), Some(&RawPinStatus::Missing));
    assert_eq!(raw.get("3"), Some(&RawPinStatus::Unknown));
    assert!(!raw.contains("7"));
    assert!(!aggregate(&raw).passed);
}
