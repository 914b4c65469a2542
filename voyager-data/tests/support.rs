//! A minimal HTTP server answering with canned responses.
//!
//! Each queued response serves exactly one connection, in order, after which
//! the server thread exits. Requests are recorded for later assertions.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Canned {
    status: u16,
    reason: &'static str,
    body: String,
}

impl Canned {
    /// `200 OK` with a JSON body.
    pub fn ok(body: &str) -> Self {
        Self::status(200, "OK", body)
    }

    /// Any status line with a JSON body.
    pub fn status(status: u16, reason: &'static str, body: &str) -> Self {
        Self {
            status,
            reason,
            body: body.to_owned(),
        }
    }
}

/// A request as received by the server.
#[derive(Debug, Clone, Default)]
pub struct Recorded {
    /// `METHOD /path?query HTTP/1.1`.
    pub request_line: String,
    /// Raw header lines.
    pub headers: Vec<String>,
    /// Request body.
    pub body: String,
}

/// Background server bound to an ephemeral local port.
#[derive(Debug)]
pub struct CannedServer {
    base_url: String,
    recorded: Arc<Mutex<Vec<Recorded>>>,
    handle: Option<JoinHandle<()>>,
}

impl CannedServer {
    /// Start serving `responses`, one per connection.
    pub fn start(responses: Vec<Canned>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("failed to bind test server: {err}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("test server has no address: {err}"));
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&recorded);
        let handle = thread::spawn(move || {
            for canned in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let (request, stream) = read_request(stream);
                // Record before answering so the client never observes a
                // response whose request is not yet visible.
                if let Ok(mut requests) = sink.lock() {
                    requests.push(request);
                }
                respond(stream, &canned);
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            recorded,
            handle: Some(handle),
        }
    }

    /// Base URL to point the client at.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        // The thread blocks in accept() when not every response was used;
        // detach rather than join in that case.
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                let _ = handle.join();
            }
        }
    }
}

fn read_request(stream: TcpStream) -> (Recorded, TcpStream) {
    let mut reader = BufReader::new(stream);
    let mut recorded = Recorded::default();
    let mut content_length = 0_usize;

    let mut line = String::new();
    if reader.read_line(&mut line).is_ok() {
        recorded.request_line = line.trim_end().to_owned();
    }
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = header.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
        recorded.headers.push(trimmed.to_owned());
    }

    let mut body = vec![0_u8; content_length];
    if reader.read_exact(&mut body).is_ok() {
        recorded.body = String::from_utf8_lossy(&body).into_owned();
    }
    (recorded, reader.into_inner())
}

fn respond(mut stream: TcpStream, canned: &Canned) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        canned.status,
        canned.reason,
        canned.body.len(),
        canned.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
