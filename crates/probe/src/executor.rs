//! Probe execution with a hard per-request deadline.

use crate::types::{Outcome, ProbeSpec};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Issues outbound probe requests.
///
/// One executor is shared by all checks; the per-check deadline is applied
/// per request rather than on the client.
pub struct ProbeExecutor {
    client: reqwest::Client,
}

impl ProbeExecutor {
    /// Create a new probe executor with a shared HTTP client.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Perform one probe and resolve it to exactly one [`Outcome`].
    ///
    /// The race between response, transport error and deadline settles once;
    /// whichever event loses the race is dropped with the abandoned request
    /// future. A late response can never produce a second outcome.
    pub async fn probe(&self, spec: &ProbeSpec) -> Outcome {
        let start = Instant::now();
        let request = self.client.request(spec.method.to_reqwest(), spec.url());

        match timeout(spec.timeout, request.send()).await {
            Ok(Ok(response)) => {
                let code = response.status().as_u16();
                debug!(
                    target = %spec.target,
                    status = code,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Probe completed"
                );
                Outcome::response(code)
            }
            Ok(Err(e)) if e.is_timeout() => {
                warn!(target = %spec.target, "Probe timed out");
                Outcome::timeout()
            }
            Ok(Err(e)) => {
                warn!(target = %spec.target, error = %e, "Probe transport failed");
                Outcome::network(e.to_string())
            }
            Err(_) => {
                warn!(
                    target = %spec.target,
                    timeout_ms = spec.timeout.as_millis() as u64,
                    "Probe deadline exceeded"
                );
                Outcome::timeout()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorKind, Method, Protocol};
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    fn spec(target: String, timeout: Duration) -> ProbeSpec {
        ProbeSpec {
            protocol: Protocol::Http,
            method: Method::Get,
            target,
            timeout,
        }
    }

    /// Accepts connections and answers every request with the given status.
    async fn spawn_responder(status: u16) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    use tokio::io::AsyncReadExt;
                    let _ = stream.read(&mut buf).await;
                    let response =
                        format!("HTTP/1.1 {status} X\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
                    let _ = stream.write_all(response.as_bytes()).await;
                });
            }
        });
        addr
    }

    /// Accepts connections but never responds.
    async fn spawn_silent_listener() -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                held.push(stream);
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_response_code_captured() {
        let addr = spawn_responder(503).await;
        let executor = ProbeExecutor::new().unwrap();

        let outcome = executor
            .probe(&spec(format!("{addr}/health"), Duration::from_secs(2)))
            .await;

        assert_eq!(outcome.response_code, Some(503));
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        // Bind and drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let executor = ProbeExecutor::new().unwrap();
        let outcome = executor
            .probe(&spec(format!("{addr}/"), Duration::from_secs(2)))
            .await;

        let error = outcome.error.expect("expected an error outcome");
        assert_eq!(error.kind, ErrorKind::Network);
        assert_eq!(outcome.response_code, None);
    }

    #[tokio::test]
    async fn test_deadline_produces_exactly_one_timeout_outcome() {
        let addr = spawn_silent_listener().await;
        let executor = ProbeExecutor::new().unwrap();

        let start = Instant::now();
        let outcome = executor
            .probe(&spec(format!("{addr}/"), Duration::from_millis(200)))
            .await;
        let elapsed = start.elapsed();

        let error = outcome.error.expect("expected an error outcome");
        assert_eq!(error.kind, ErrorKind::Timeout);
        assert_eq!(outcome.response_code, None);
        // Resolves close to the deadline, not to some longer transport limit.
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_secs(2));
    }
}
