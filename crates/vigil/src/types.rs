//! Core data model for the monitoring engine.

use probe::{Method, Outcome, ProbeSpec, Protocol};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Up/down classification of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Up,
    Down,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckState::Up => write!(f, "up"),
            CheckState::Down => write!(f, "down"),
        }
    }
}

/// A user-registered monitoring target.
///
/// Created and deleted externally; only the outcome processor mutates
/// `state` and `last_checked`. Concurrent external edits are resolved by the
/// record store's last-write-wins semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    /// Opaque fixed-length token.
    pub id: String,

    /// Identifier of the subject who registered the check.
    pub owner_id: String,

    pub protocol: Protocol,

    /// Hostname plus path, without a scheme.
    pub target: String,

    pub method: Method,

    /// Response codes that count as "up". Never empty.
    pub success_codes: Vec<u16>,

    /// Probe deadline, in [1, 5].
    pub timeout_seconds: u64,

    /// Defaults to down until the first probe.
    pub state: CheckState,

    /// Epoch milliseconds of the last probe; None means never probed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<u64>,
}

impl Check {
    /// The probe request this check describes.
    pub fn probe_spec(&self) -> ProbeSpec {
        ProbeSpec {
            protocol: self.protocol,
            method: self.method,
            target: self.target.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

/// One audit log line per probe attempt.
///
/// `check` is the validated snapshot taken before the state update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub check: Check,
    pub outcome: Outcome,
    pub state: CheckState,
    pub alert_warranted: bool,
    pub time: u64,
}

/// Milliseconds since the Unix epoch.
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check() -> Check {
        Check {
            id: "chk00000000000000001".to_string(),
            owner_id: "5551230000".to_string(),
            protocol: Protocol::Http,
            target: "example.com/health".to_string(),
            method: Method::Get,
            success_codes: vec![200],
            timeout_seconds: 3,
            state: CheckState::Down,
            last_checked: None,
        }
    }

    #[test]
    fn test_probe_spec_from_check() {
        let spec = check().probe_spec();
        assert_eq!(spec.url(), "http://example.com/health");
        assert_eq!(spec.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_never_probed_check_omits_last_checked() {
        let json = serde_json::to_value(check()).unwrap();
        assert!(json.get("last_checked").is_none());
        assert_eq!(json["state"], "down");
        assert_eq!(json["method"], "get");
    }

    #[test]
    fn test_check_round_trips_through_json() {
        let mut original = check();
        original.state = CheckState::Up;
        original.last_checked = Some(1_700_000_000_000);

        let json = serde_json::to_string(&original).unwrap();
        let restored: Check = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }
}
