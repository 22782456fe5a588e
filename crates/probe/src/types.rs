//! Probe request and outcome types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Scheme used to reach a check's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Https => write!(f, "https"),
        }
    }
}

/// HTTP method a check is allowed to probe with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Lowercase wire name, matching the persisted record format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One probe attempt, fully specified.
#[derive(Debug, Clone)]
pub struct ProbeSpec {
    pub protocol: Protocol,

    pub method: Method,

    /// Hostname plus path, without a scheme.
    pub target: String,

    /// Hard deadline for the whole request.
    pub timeout: Duration,
}

impl ProbeSpec {
    /// Full request URL.
    pub fn url(&self) -> String {
        format!("{}://{}", self.protocol, self.target)
    }
}

/// Why a probe failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The deadline expired before any response arrived.
    Timeout,
    /// A transport-level failure (refused, reset, DNS, TLS).
    Network,
}

/// Probe failure with its underlying detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeError {
    pub kind: ErrorKind,
    pub detail: String,
}

/// The single, ephemeral result of one probe attempt.
///
/// Consumed immediately by the outcome processor; never persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub error: Option<OutcomeError>,
    pub response_code: Option<u16>,
}

impl Outcome {
    /// A response was received.
    pub fn response(code: u16) -> Self {
        Self {
            error: None,
            response_code: Some(code),
        }
    }

    /// The deadline expired.
    pub fn timeout() -> Self {
        Self {
            error: Some(OutcomeError {
                kind: ErrorKind::Timeout,
                detail: "deadline exceeded".to_string(),
            }),
            response_code: None,
        }
    }

    /// The transport failed.
    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            error: Some(OutcomeError {
                kind: ErrorKind::Network,
                detail: detail.into(),
            }),
            response_code: None,
        }
    }

    /// Whether this outcome counts as "up" for the given success codes.
    pub fn is_success(&self, success_codes: &[u16]) -> bool {
        self.error.is_none()
            && self
                .response_code
                .is_some_and(|code| success_codes.contains(&code))
    }
}
