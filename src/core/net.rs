// src/core/net.rs
//! HTTP GET behind a small trait so fetch logic can run against scripted
//! responses in tests.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;

use crate::config::consts::API_USER_AGENT;
use crate::error::FetchError;

/// Anything that can answer a GET. Shared across worker threads, hence `Sync`.
pub trait Source: Sync {
    /// Body of a successful (2xx) response. `user_agent` overrides the
    /// source's default for this one request.
    fn get_text(&self, url: &str, user_agent: Option<&str>) -> Result<String, FetchError>;

    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let body = self.get_text(url, None)?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url: s!(url), source })
    }
}

/// Blocking reqwest client with a per-request timeout, so one hung call
/// can't stall a worker forever.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(API_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Transport { url: s!("<client builder>"), source })?;
        Ok(Self { client })
    }
}

impl Source for HttpSource {
    fn get_text(&self, url: &str, user_agent: Option<&str>) -> Result<String, FetchError> {
        let mut req = self.client.get(url);
        if let Some(ua) = user_agent {
            req = req.header(USER_AGENT, ua);
        }

        let resp = req
            .send()
            .map_err(|source| FetchError::Transport { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }

        resp.text().map_err(|source| FetchError::Transport { url: s!(url), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Instant;

    const OK_BODY: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";

    /// Answer exactly one request on a local port with `response`, after
    /// `delay`. The raw request head comes back on the channel.
    fn serve_once(response: &'static str, delay: Duration) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&chunk[..n]),
                }
            }
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
            thread::sleep(delay);
            let _ = stream.write_all(response.as_bytes());
        });
        (format!("http://{addr}/x"), rx)
    }

    fn client() -> HttpSource {
        HttpSource::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn non_success_status_is_reported() {
        let (url, _) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            Duration::ZERO,
        );
        let err = client().get_text(&url, None).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }), "{err}");
    }

    #[test]
    fn user_agent_override_is_sent() {
        let (url, head) = serve_once(OK_BODY, Duration::ZERO);
        assert_eq!(client().get_text(&url, Some("Mozilla/test-agent")).unwrap(), "ok");
        let head = head.recv().unwrap().to_ascii_lowercase();
        assert!(head.contains("user-agent: mozilla/test-agent"), "{head}");
        assert!(!head.contains("pl_pipeline/"), "default agent must be replaced: {head}");
    }

    #[test]
    fn default_user_agent_without_override() {
        let (url, head) = serve_once(OK_BODY, Duration::ZERO);
        client().get_text(&url, None).unwrap();
        let head = head.recv().unwrap().to_ascii_lowercase();
        assert!(head.contains(&format!("user-agent: {}", API_USER_AGENT.to_ascii_lowercase())), "{head}");
    }

    #[test]
    fn slow_server_hits_the_timeout() {
        let (url, _) = serve_once(OK_BODY, Duration::from_secs(5));
        let source = HttpSource::new(Duration::from_millis(300)).unwrap();
        let started = Instant::now();
        let err = source.get_text(&url, None).unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }), "{err}");
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let (url, _) = serve_once(OK_BODY, Duration::ZERO);
        assert!(matches!(client().get_json(&url), Err(FetchError::Decode { .. })));
    }
}
