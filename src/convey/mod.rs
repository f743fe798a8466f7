//! `X-WebPA-Convey` header decoding.
//!
//! The header carries device telemetry as base64-encoded JSON. Absence of the
//! header is normal; a present but malformed header is an error the caller is
//! expected to log and otherwise ignore.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the convey header on inbound requests.
pub const X_WEBPA_CONVEY: &str = "x-webpa-convey";

/// Error decoding a convey header value.
#[derive(Debug, Error)]
pub enum ConveyError {
    #[error("failed to decode base64 convey header: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to unmarshal decoded convey data: {0}")]
    Structure(#[from] serde_json::Error),
}

/// Device telemetry carried in the convey header. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConveyHeaderData {
    #[serde(rename = "webpa-protocol", default)]
    pub protocol: Option<String>,

    #[serde(rename = "webpa-interface-used", default)]
    pub interface_used: Option<String>,

    #[serde(rename = "hw-last-reboot-reason", default)]
    pub last_reboot_reason: Option<String>,

    #[serde(rename = "webpa-last-reconnect-reason", default)]
    pub last_reconnect_reason: Option<String>,

    #[serde(rename = "boot-time", default)]
    pub boot_time_epoch_seconds: Option<i64>,

    #[serde(rename = "fw-name", default)]
    pub firmware_name: Option<String>,
}

/// Decode a raw header value.
///
/// Returns `Ok(None)` for an empty value.
pub fn decode(raw: &str) -> Result<Option<ConveyHeaderData>, ConveyError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let bytes = STANDARD.decode(raw)?;
    let data = serde_json::from_slice(&bytes)?;
    Ok(Some(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(json: &str) -> String {
        STANDARD.encode(json)
    }

    #[test]
    fn test_empty_header_is_no_data() {
        assert!(decode("").unwrap().is_none());
        assert!(decode("   ").unwrap().is_none());
    }

    #[test]
    fn test_full_record() {
        let raw = encode(
            r#"{"webpa-protocol":"PARODUS-2.0","webpa-interface-used":"erouter0",
                "hw-last-reboot-reason":"factory-reset","webpa-last-reconnect-reason":"Ping-Miss",
                "boot-time":1700000000,"fw-name":"FW-1.2.3"}"#,
        );
        let data = decode(&raw).unwrap().unwrap();
        assert_eq!(data.protocol.as_deref(), Some("PARODUS-2.0"));
        assert_eq!(data.interface_used.as_deref(), Some("erouter0"));
        assert_eq!(data.last_reboot_reason.as_deref(), Some("factory-reset"));
        assert_eq!(data.last_reconnect_reason.as_deref(), Some("Ping-Miss"));
        assert_eq!(data.boot_time_epoch_seconds, Some(1_700_000_000));
        assert_eq!(data.firmware_name.as_deref(), Some("FW-1.2.3"));
    }

    #[test]
    fn test_partial_record() {
        let raw = encode(r#"{"fw-name":"FW-9","unknown":true}"#);
        let data = decode(&raw).unwrap().unwrap();
        assert_eq!(data.firmware_name.as_deref(), Some("FW-9"));
        assert!(data.protocol.is_none());
        assert!(data.boot_time_epoch_seconds.is_none());
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(decode("not base64!!"), Err(ConveyError::Base64(_))));
    }

    #[test]
    fn test_invalid_structure() {
        let raw = encode("this is not json");
        assert!(matches!(decode(&raw), Err(ConveyError::Structure(_))));

        let raw = encode(r#"{"boot-time":"yesterday"}"#);
        assert!(matches!(decode(&raw), Err(ConveyError::Structure(_))));
    }
}
