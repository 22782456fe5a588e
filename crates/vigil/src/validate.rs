//! Sanity checking of raw check records before probing.
//!
//! Records come back from the record store as untyped JSON; this module is
//! the explicit parse-and-validate step that turns one into a [`Check`] or a
//! per-field rejection. A single invalid field drops that one check without
//! touching its siblings.

use crate::types::{Check, CheckState};
use probe::{Method, Protocol};
use serde_json::Value;
use thiserror::Error;

/// Length of a check id token.
pub const CHECK_ID_LEN: usize = 20;

/// Length of an owner identifier.
pub const OWNER_ID_LEN: usize = 10;

/// Probe deadline bounds, in seconds.
pub const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=5;

/// Rejection of a single raw check record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field `{0}` is missing or has the wrong type")]
    Missing(&'static str),

    #[error("field `{0}` is invalid: {1}")]
    Invalid(&'static str, String),
}

fn str_field<'a>(raw: &'a Value, name: &'static str) -> Result<&'a str, ValidationError> {
    raw.get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .ok_or(ValidationError::Missing(name))
}

fn fixed_len_field(
    raw: &Value,
    name: &'static str,
    len: usize,
) -> Result<String, ValidationError> {
    let value = str_field(raw, name)?;
    if value.len() != len {
        return Err(ValidationError::Invalid(
            name,
            format!("expected {len} characters, got {}", value.len()),
        ));
    }
    Ok(value.to_string())
}

fn protocol_field(raw: &Value) -> Result<Protocol, ValidationError> {
    match str_field(raw, "protocol")? {
        "http" => Ok(Protocol::Http),
        "https" => Ok(Protocol::Https),
        other => Err(ValidationError::Invalid("protocol", other.to_string())),
    }
}

fn method_field(raw: &Value) -> Result<Method, ValidationError> {
    match str_field(raw, "method")? {
        "get" => Ok(Method::Get),
        "post" => Ok(Method::Post),
        "put" => Ok(Method::Put),
        "delete" => Ok(Method::Delete),
        other => Err(ValidationError::Invalid("method", other.to_string())),
    }
}

fn success_codes_field(raw: &Value) -> Result<Vec<u16>, ValidationError> {
    let codes = raw
        .get("success_codes")
        .and_then(Value::as_array)
        .ok_or(ValidationError::Missing("success_codes"))?;
    if codes.is_empty() {
        return Err(ValidationError::Invalid(
            "success_codes",
            "empty set".to_string(),
        ));
    }
    codes
        .iter()
        .map(|code| {
            code.as_u64()
                .and_then(|c| u16::try_from(c).ok())
                .ok_or_else(|| {
                    ValidationError::Invalid("success_codes", format!("not a status code: {code}"))
                })
        })
        .collect()
}

fn timeout_field(raw: &Value) -> Result<u64, ValidationError> {
    let seconds = raw
        .get("timeout_seconds")
        .and_then(Value::as_u64)
        .ok_or(ValidationError::Missing("timeout_seconds"))?;
    if !TIMEOUT_RANGE.contains(&seconds) {
        return Err(ValidationError::Invalid(
            "timeout_seconds",
            format!("{seconds} not in [1,5]"),
        ));
    }
    Ok(seconds)
}

/// Validate one raw check record.
///
/// `state` and `last_checked` are worker-owned: when absent or malformed
/// they default to down / never-probed instead of dropping the record,
/// because that is exactly the shape of a check on its first-ever probe.
pub fn validate_check(raw: &Value) -> Result<Check, ValidationError> {
    let id = fixed_len_field(raw, "id", CHECK_ID_LEN)?;
    let owner_id = fixed_len_field(raw, "owner_id", OWNER_ID_LEN)?;
    let protocol = protocol_field(raw)?;

    let target = str_field(raw, "target")?;
    if target.is_empty() {
        return Err(ValidationError::Invalid("target", "empty".to_string()));
    }

    let method = method_field(raw)?;
    let success_codes = success_codes_field(raw)?;
    let timeout_seconds = timeout_field(raw)?;

    let state = match raw.get("state").and_then(Value::as_str) {
        Some("up") => CheckState::Up,
        _ => CheckState::Down,
    };

    let last_checked = raw
        .get("last_checked")
        .and_then(Value::as_u64)
        .filter(|&t| t > 0);

    Ok(Check {
        id,
        owner_id,
        protocol,
        target: target.to_string(),
        method,
        success_codes,
        timeout_seconds,
        state,
        last_checked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_check() -> Value {
        json!({
            "id": "chk00000000000000001",
            "owner_id": "5551230000",
            "protocol": "http",
            "target": "example.com/health",
            "method": "get",
            "success_codes": [200, 201],
            "timeout_seconds": 3,
        })
    }

    #[test]
    fn test_valid_record_with_defaults() {
        let check = validate_check(&raw_check()).unwrap();
        assert_eq!(check.id, "chk00000000000000001");
        assert_eq!(check.state, CheckState::Down);
        assert_eq!(check.last_checked, None);
        assert_eq!(check.success_codes, vec![200, 201]);
    }

    #[test]
    fn test_existing_state_is_preserved() {
        let mut raw = raw_check();
        raw["state"] = json!("up");
        raw["last_checked"] = json!(1_700_000_000_000u64);

        let check = validate_check(&raw).unwrap();
        assert_eq!(check.state, CheckState::Up);
        assert_eq!(check.last_checked, Some(1_700_000_000_000));
    }

    #[test]
    fn test_malformed_state_falls_back_to_down() {
        let mut raw = raw_check();
        raw["state"] = json!("sideways");
        assert_eq!(validate_check(&raw).unwrap().state, CheckState::Down);
    }

    #[test]
    fn test_wrong_id_length_is_rejected() {
        let mut raw = raw_check();
        raw["id"] = json!("short");
        assert!(matches!(
            validate_check(&raw),
            Err(ValidationError::Invalid("id", _))
        ));
    }

    #[test]
    fn test_wrong_owner_id_length_is_rejected() {
        let mut raw = raw_check();
        raw["owner_id"] = json!("555123");
        assert!(validate_check(&raw).is_err());
    }

    #[test]
    fn test_unknown_protocol_is_rejected() {
        let mut raw = raw_check();
        raw["protocol"] = json!("gopher");
        assert!(matches!(
            validate_check(&raw),
            Err(ValidationError::Invalid("protocol", _))
        ));
    }

    #[test]
    fn test_empty_target_is_rejected() {
        let mut raw = raw_check();
        raw["target"] = json!("   ");
        assert!(validate_check(&raw).is_err());
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let mut raw = raw_check();
        raw["method"] = json!("patch");
        assert!(validate_check(&raw).is_err());
    }

    #[test]
    fn test_empty_success_codes_are_rejected() {
        let mut raw = raw_check();
        raw["success_codes"] = json!([]);
        assert!(validate_check(&raw).is_err());
    }

    #[test]
    fn test_timeout_out_of_range_is_rejected() {
        for seconds in [0u64, 6, 120] {
            let mut raw = raw_check();
            raw["timeout_seconds"] = json!(seconds);
            assert!(validate_check(&raw).is_err(), "{seconds}s should fail");
        }
    }

    #[test]
    fn test_fractional_timeout_is_rejected() {
        let mut raw = raw_check();
        raw["timeout_seconds"] = json!(2.5);
        assert!(validate_check(&raw).is_err());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut raw = raw_check();
        raw.as_object_mut().unwrap().remove("protocol");
        assert_eq!(
            validate_check(&raw),
            Err(ValidationError::Missing("protocol"))
        );
    }
}
