//! Mock HTTP endpoints for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock endpoint on an ephemeral port.
///
/// `handler` receives the raw request head and returns a status code and body.
pub async fn start_endpoint<F>(handler: F) -> SocketAddr
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let mut read = 0;
                        loop {
                            match socket.read(&mut buf[read..]).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    read += n;
                                    let done = buf[..read].windows(4).any(|w| w == b"\r\n\r\n");
                                    if done || read == buf.len() {
                                        break;
                                    }
                                }
                                Err(_) => return,
                            }
                        }

                        let request = String::from_utf8_lossy(&buf[..read]).to_string();
                        let (status, body) = handler(&request);
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock endpoint that always answers with `status`.
#[allow(dead_code)]
pub async fn start_fixed_endpoint(status: u16) -> SocketAddr {
    start_endpoint(move |_| (status, "{}".to_string())).await
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn status_line(status: u16) -> String {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    format!("{} {}", status, reason)
}
