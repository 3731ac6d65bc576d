//! Minimal HTTP/1.1 server serving one static payload for integration tests.
//!
//! Stands in for a WKD endpoint: answers every GET with a configurable status
//! line and body. Options cover the deployment defects the validator must
//! catch (wrong status, redirect hop) plus a trickle mode that stretches the
//! transfer out so cancellation can land mid-body.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct KeyServerOptions {
    /// Status line sent for GET (e.g. "200 OK", "404 Not Found").
    pub status: &'static str,
    /// When set, a `Location` header is included (pair with a 3xx status).
    pub location: Option<String>,
    /// When set, the body is written in small chunks with this pause between
    /// them instead of all at once.
    pub chunk_delay: Option<Duration>,
}

impl Default for KeyServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            location: None,
            chunk_delay: None,
        }
    }
}

/// Starts a server in a background thread serving `body` with 200 OK. Returns
/// the base URL (e.g. "http://127.0.0.1:12345/"). The server runs until the
/// process exits.
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, KeyServerOptions::default())
}

/// Like `start` but allows customizing the response (status, redirect, trickle).
pub fn start_with_options(body: Vec<u8>, opts: KeyServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &body, &opts));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: &KeyServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let method = request.split_whitespace().next().unwrap_or("");
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\n\r\n");
        return;
    }

    let location = match &opts.location {
        Some(target) => format!("Location: {}\r\n", target),
        None => String::new(),
    };
    let header = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        opts.status,
        body.len(),
        location
    );
    if stream.write_all(header.as_bytes()).is_err() {
        return;
    }

    match opts.chunk_delay {
        None => {
            let _ = stream.write_all(body);
        }
        Some(delay) => {
            for chunk in body.chunks(32) {
                if stream.write_all(chunk).is_err() {
                    return; // client hung up (e.g. transfer aborted)
                }
                let _ = stream.flush();
                thread::sleep(delay);
            }
        }
    }
}
