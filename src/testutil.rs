//! Minimal mock HTTP servers for wire-level tests.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Starts a mock HTTP server that serves `count` connections with the given
/// status and JSON body, returning the base URL and a handle yielding the
/// raw request bytes received on each connection.
pub(crate) async fn mock_server(
    status: u16,
    body: &str,
    count: usize,
) -> (String, JoinHandle<Vec<Vec<u8>>>) {
    mock_server_with_content_type(status, "application/json", body, count).await
}

/// Same as [`mock_server`], with an explicit response content type.
pub(crate) async fn mock_server_with_content_type(
    status: u16,
    content_type: &str,
    body: &str,
    count: usize,
) -> (String, JoinHandle<Vec<Vec<u8>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let url = format!("http://127.0.0.1:{port}");
    let content_type = content_type.to_string();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for _ in 0..count {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            requests.push(read_request(&mut stream).await);

            let resp = format!(
                "HTTP/1.1 {status} Mock\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len(),
            );
            let _ = stream.write_all(resp.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
        requests
    });

    (url, handle)
}

/// Reads a full HTTP request (headers plus body) from the stream.
async fn read_request(stream: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 4096];
    loop {
        let n = stream.read(&mut tmp).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);

        if let Some(headers_end) = find_headers_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..headers_end]).to_lowercase();
            if headers.contains("transfer-encoding: chunked") {
                if buf.ends_with(b"0\r\n\r\n") {
                    break;
                }
            } else if buf.len() >= headers_end + content_length(&headers) {
                break;
            }
        }
    }
    buf
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn content_length(headers: &str) -> usize {
    headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim() == "content-length" {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

/// Splits a captured request into (head, body) at the blank line.
pub(crate) fn split_request(raw: &[u8]) -> (String, Vec<u8>) {
    let headers_end = find_headers_end(raw).unwrap_or(raw.len());
    let head = String::from_utf8_lossy(&raw[..headers_end]).to_string();
    (head, raw[headers_end..].to_vec())
}
