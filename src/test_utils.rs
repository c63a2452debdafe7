//! Test utilities for crate-digger tests.
//!
//! Provides a minimal local HTTP/1.1 stub so client tests can exercise full
//! request/response cycles without touching the real Discogs API.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// A tiny HTTP stub bound to an ephemeral localhost port.
///
/// Each registered route is a `(path, status, body)` triple; requests are
/// matched by path prefix (so query strings are ignored) in registration
/// order. Unmatched requests get a 404. The listener thread runs until the
/// test process exits.
pub struct StubServer {
    base_url: String,
}

impl StubServer {
    /// Start a stub serving the given routes.
    pub fn start(routes: &[(&str, u16, &[u8])]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind stub server");
        let base_url = format!("http://{}", listener.local_addr().expect("no local addr"));

        let routes: Vec<(String, u16, Vec<u8>)> = routes
            .iter()
            .map(|(path, status, body)| (path.to_string(), *status, body.to_vec()))
            .collect();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let routes = routes.clone();
                thread::spawn(move || respond(&mut stream, &routes));
            }
        });

        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path on this stub.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn respond(stream: &mut TcpStream, routes: &[(String, u16, Vec<u8>)]) {
    // Read the request head; stub routes never carry a request body
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let path = request.split_whitespace().nth(1).unwrap_or("/");

    let (status, body) = routes
        .iter()
        .find(|(prefix, _, _)| path.starts_with(prefix.as_str()))
        .map(|(_, status, body)| (*status, body.as_slice()))
        .unwrap_or((404, &[]));

    let head = format!(
        "HTTP/1.1 {status} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reason(status),
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
