//! Minimal HTTP/1.1 server for integration tests.
//!
//! Routes:
//! - `/logo.png` returns the configured body with 200.
//! - `/agent` returns the request's User-Agent header as the body.
//! - `/slow.png` waits `SLOW_DELAY` before answering with the body.
//! - `/trickle.png` sends the body one byte per `TRICKLE_GAP`.
//! - anything else returns 404 with an HTML page.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const SLOW_DELAY: Duration = Duration::from_secs(3);

pub const TRICKLE_GAP: Duration = Duration::from_millis(400);

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, body: &[u8]) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (path, user_agent) = parse_request(request);

    match path {
        "/logo.png" => respond(&mut stream, "200 OK", body),
        "/agent" => respond(&mut stream, "200 OK", user_agent.as_bytes()),
        "/slow.png" => {
            thread::sleep(SLOW_DELAY);
            respond(&mut stream, "200 OK", body);
        }
        "/trickle.png" => trickle(&mut stream, body),
        _ => respond(
            &mut stream,
            "404 Not Found",
            b"<html><body>not found</body></html>",
        ),
    }
}

fn respond(stream: &mut TcpStream, status: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

/// Each gap is shorter than a test timeout, the whole body takes longer.
fn trickle(stream: &mut TcpStream, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }
    for byte in body {
        thread::sleep(TRICKLE_GAP);
        if stream.write_all(&[*byte]).and_then(|_| stream.flush()).is_err() {
            return;
        }
    }
}

/// Returns (path without query, User-Agent header value or "").
fn parse_request(request: &str) -> (&str, &str) {
    let mut lines = request.lines();
    let path = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|target| target.split('?').next())
        .unwrap_or("/");
    let user_agent = lines
        .take_while(|line| !line.trim().is_empty())
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("user-agent"))
        .map(|(_, value)| value.trim())
        .unwrap_or("");
    (path, user_agent)
}
