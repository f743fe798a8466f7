//! Resource update record built from request headers.

use axum::http::HeaderMap;
use serde::Serialize;

use crate::convey::ConveyHeaderData;

pub const X_REAL_IP: &str = "x-real-ip";
pub const X_ISSUER_CN: &str = "x-issuer-cn";
pub const X_CERT_EXPIRY_DATE: &str = "x-cert-expiry-date";
pub const X_DEVICE_CN: &str = "x-device-cn";

/// Certificate provider, guessed from the issuer common name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CertificateProvider {
    #[serde(rename = "DTSECURITY")]
    DtSecurity,
    #[serde(rename = "IRDETO")]
    Irdeto,
}

impl CertificateProvider {
    /// Issuers whose common name contains `C2` are Irdeto; all others are
    /// treated as DT Security.
    pub fn classify(issuer_cn: &str) -> Self {
        if issuer_cn.contains("C2") {
            CertificateProvider::Irdeto
        } else {
            CertificateProvider::DtSecurity
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateProvider::DtSecurity => "DTSECURITY",
            CertificateProvider::Irdeto => "IRDETO",
        }
    }
}

/// Body of the PUT sent to the resource store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdateRecord {
    pub ip_address: String,
    pub certificate_provider_type: CertificateProvider,
    pub certificate_expiry_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reboot_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wan_interface_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reconnect_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_boot_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
}

impl ResourceUpdateRecord {
    /// Build the base record (no convey data) from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            ip_address: header_str(headers, X_REAL_IP).to_string(),
            certificate_provider_type: CertificateProvider::classify(header_str(headers, X_ISSUER_CN)),
            certificate_expiry_date: header_str(headers, X_CERT_EXPIRY_DATE).to_string(),
            last_reboot_reason: None,
            wan_interface_used: None,
            last_reconnect_reason: None,
            management_protocol: None,
            last_boot_time: None,
            firmware_version: None,
        }
    }

    /// Copy the present, non-empty convey fields into the record.
    pub fn apply_convey(&mut self, data: ConveyHeaderData) {
        fn non_empty(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.is_empty())
        }

        self.last_reboot_reason = non_empty(data.last_reboot_reason);
        self.wan_interface_used = non_empty(data.interface_used);
        self.last_reconnect_reason = non_empty(data.last_reconnect_reason);
        self.management_protocol = non_empty(data.protocol);
        self.last_boot_time = data.boot_time_epoch_seconds.filter(|t| *t != 0);
        self.firmware_version = non_empty(data.firmware_name);
    }
}

/// Lowercased device identifier used as the resource key.
pub fn device_id(headers: &HeaderMap) -> String {
    header_str(headers, X_DEVICE_CN).to_lowercase()
}

pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
