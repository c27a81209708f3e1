//! Minimal HTTP/1.1 stub of the VK method endpoints for integration tests.
//!
//! Serves canned JSON per method name and records every request line so
//! tests can assert on which calls were made and with what query.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use vkcc_cli::config::Config;

/// Canned answer for one method.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn ok(method: &'static str, body: &str) -> Self {
        Route {
            method,
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(method: &'static str, status: u16, body: &str) -> Self {
        Route {
            method,
            status,
            body: body.to_string(),
        }
    }
}

pub struct StubServer {
    /// Base URL to put in `Config::api_base`, e.g. "http://127.0.0.1:1234/method".
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Request targets seen so far ("/method/utils.getLinkStats?...").
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests that hit `method`.
    pub fn hits(&self, method: &str) -> usize {
        self.requests()
            .iter()
            .filter(|target| path_of(target).ends_with(&format!("/{}", method)))
            .count()
    }

    pub fn config(&self) -> Config {
        test_config(&self.base)
    }
}

pub fn test_config(base: &str) -> Config {
    Config {
        token: "secret-token".to_string(),
        api_base: base.to_string(),
        timeout: Duration::from_secs(5),
        private: false,
    }
}

/// Start a stub in a background thread. Unknown methods get a 404.
pub fn start(routes: Vec<Route>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let routes = Arc::new(routes);
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &routes, &seen));
        }
    });
    StubServer {
        base: format!("http://127.0.0.1:{}/method", port),
        requests,
    }
}

/// Accepts connections and never answers. Returns the base URL.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || {
                thread::sleep(Duration::from_secs(10));
                drop(stream);
            });
        }
    });
    format!("http://127.0.0.1:{}/method", port)
}

/// Base URL of a port nothing listens on.
pub fn closed_port_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/method", port)
}

fn path_of(target: &str) -> &str {
    target.split('?').next().unwrap_or(target)
}

fn read_head(stream: &mut TcpStream) -> Option<String> {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if data.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8(data).ok()
}

fn handle(mut stream: TcpStream, routes: &[Route], seen: &Mutex<Vec<String>>) {
    let Some(head) = read_head(&mut stream) else {
        return;
    };
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    seen.lock().unwrap().push(target.clone());

    let path = path_of(&target);
    let (status, body) = routes
        .iter()
        .find(|r| path.ends_with(&format!("/{}", r.method)))
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or((404, String::new()));

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Status",
    }
}
