//! JSON-over-HTTP plumbing shared by every client.

use std::time::Duration;

use lexigrade_core::{LexigradeError, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

const USER_AGENT: &str = concat!("lexigrade/", env!("CARGO_PKG_VERSION"));

/// A blocking client that posts JSON to one endpoint.
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: Client,
    url: String,
}

impl JsonClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| LexigradeError::Service(format!("building HTTP client: {err}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts `body` and decodes a JSON reply.
    ///
    /// Transport failures, non-success statuses and undecodable bodies are
    /// all service errors.
    pub fn post<B, R>(&self, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(event = "http_request", url = %self.url);
        let response = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .map_err(|err| self.error("request failed", err))?;
        let response = response
            .error_for_status()
            .map_err(|err| self.error("bad status", err))?;
        response
            .json::<R>()
            .map_err(|err| self.error("invalid JSON reply", err))
    }

    fn error(&self, what: &str, err: reqwest::Error) -> LexigradeError {
        LexigradeError::Service(format!("{} {what}: {err}", self.url))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! One-shot HTTP server for client tests.

    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serves a single request with `status` and `body`; the join handle
    /// yields the request body.
    pub fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let reply = format!(
                "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let mut stream = reader.into_inner();
            stream.write_all(reply.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8(request_body).unwrap()
        });
        (url, handle)
    }

    /// A URL nothing listens on.
    pub fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/api")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::testing::{closed_url, serve_once};
    use super::*;

    fn client(url: String) -> JsonClient {
        JsonClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_post_round_trip() {
        let (url, server) = serve_once(200, r#"{"ok": true}"#);
        let reply: BTreeMap<String, bool> = client(url).post(&BTreeMap::from([("q", 1)])).unwrap();
        assert_eq!(reply["ok"], true);
        assert_eq!(server.join().unwrap(), r#"{"q":1}"#);
    }

    #[test]
    fn test_error_status_is_a_service_error() {
        let (url, server) = serve_once(500, r#"{"error": "boom"}"#);
        let err = client(url)
            .post::<_, serde_json::Value>(&serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, LexigradeError::Service(message) if message.contains("bad status")));
        server.join().unwrap();
    }

    #[test]
    fn test_unreachable_service_is_a_service_error() {
        let err = client(closed_url())
            .post::<_, serde_json::Value>(&serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, LexigradeError::Service(_)));
    }
}
