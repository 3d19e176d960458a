//! Minimal GoTrue-style auth server for integration tests.
//!
//! Knows one password (`secret`) and issues `token-{email}` access tokens.
//! Sign-ups for addresses starting with `confirm` answer with the bare user,
//! as a service with email confirmation enabled would.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

pub const PASSWORD: &str = "secret";

/// Starts the server in a background thread and returns its base URL
/// (e.g. "http://127.0.0.1:12345"). The server runs until the process exits.
pub fn start() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || handle(stream));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

struct Request {
    method: String,
    target: String,
    bearer: Option<String>,
    body: serde_json::Value,
}

fn handle(mut stream: TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    let (status, body) = route(&request);
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        raw.extend_from_slice(&buf[..n]);
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = std::str::from_utf8(&raw[..header_end]).ok()?.to_string();

    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let mut content_length = 0usize;
    let mut bearer = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.trim().eq_ignore_ascii_case("authorization") {
                bearer = value.strip_prefix("Bearer ").map(str::to_string);
            }
        }
    }

    while raw.len() < header_end + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
    }
    let body = serde_json::from_slice(&raw[header_end..]).unwrap_or(serde_json::Value::Null);
    Some(Request {
        method,
        target,
        bearer,
        body,
    })
}

fn user_json(email: &str, username: Option<&str>) -> serde_json::Value {
    let mut user = serde_json::json!({ "id": format!("id-{email}"), "email": email });
    if let Some(name) = username {
        user["user_metadata"] = serde_json::json!({ "username": name });
    }
    user
}

fn route(req: &Request) -> (&'static str, String) {
    let email = req.body["email"].as_str().unwrap_or_default();
    match (req.method.as_str(), req.target.as_str()) {
        ("POST", "/auth/v1/signup") => {
            let username = req.body["data"]["username"].as_str();
            let user = user_json(email, username);
            if email.starts_with("confirm") {
                return ("200 OK", user.to_string());
            }
            let session = serde_json::json!({
                "access_token": format!("token-{email}"),
                "token_type": "bearer",
                "user": user,
            });
            ("200 OK", session.to_string())
        }
        ("POST", "/auth/v1/token?grant_type=password") => {
            if req.body["password"].as_str() != Some(PASSWORD) {
                let err = serde_json::json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid login credentials",
                });
                return ("400 Bad Request", err.to_string());
            }
            let session = serde_json::json!({
                "access_token": format!("token-{email}"),
                "user": user_json(email, None),
            });
            ("200 OK", session.to_string())
        }
        ("GET", "/auth/v1/user") => match req.bearer.as_deref().and_then(|t| t.strip_prefix("token-")) {
            Some(email) => ("200 OK", user_json(email, None).to_string()),
            None => ("401 Unauthorized", r#"{"msg":"invalid JWT"}"#.to_string()),
        },
        ("POST", "/auth/v1/logout") => ("204 No Content", String::new()),
        _ => ("404 Not Found", r#"{"msg":"no route"}"#.to_string()),
    }
}
