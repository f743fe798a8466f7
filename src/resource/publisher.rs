//! PUT of device metadata to the resource store.

use std::time::Duration;

use axum::http::HeaderMap;
use thiserror::Error;

use super::record::{device_id, header_str, ResourceUpdateRecord};
use crate::convey::{self, X_WEBPA_CONVEY};

/// Headers copied from the inbound request onto the resource update.
pub const PROPAGATED_HEADERS: [&str; 2] = ["ENVIRONMENT", "X-TENANT-ID"];

#[derive(Debug, Error)]
pub enum ResourceUpdateError {
    #[error("resource update request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("resource store answered {status} for device {device:?}")]
    Status { status: u16, device: String },
}

/// Publishes device metadata to `{endpoint}/{device id}`.
#[derive(Debug, Clone)]
pub struct ResourcePublisher {
    client: reqwest::Client,
    endpoint: String,
}

impl ResourcePublisher {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ResourceUpdateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Build the record for this request.
    ///
    /// A malformed convey header is logged and left out of the record.
    pub fn build_record(headers: &HeaderMap) -> ResourceUpdateRecord {
        let mut record = ResourceUpdateRecord::from_headers(headers);
        match convey::decode(header_str(headers, X_WEBPA_CONVEY)) {
            Ok(Some(data)) => record.apply_convey(data),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring malformed convey header"),
        }
        record
    }

    /// Send the metadata update for the request carrying `headers`.
    pub async fn publish(&self, headers: &HeaderMap) -> Result<(), ResourceUpdateError> {
        let record = Self::build_record(headers);
        let device = device_id(headers);

        tracing::info!(
            device = %device,
            certificate_provider = record.certificate_provider_type.as_str(),
            certificate_expiry = %record.certificate_expiry_date,
            last_reboot_reason = ?record.last_reboot_reason,
            wan_interface = ?record.wan_interface_used,
            last_reconnect_reason = ?record.last_reconnect_reason,
            protocol = ?record.management_protocol,
            last_boot_time = ?record.last_boot_time,
            firmware = ?record.firmware_version,
            "Updating resource details"
        );

        let mut request = self
            .client
            .put(format!("{}/{}", self.endpoint, device))
            .json(&record);

        for name in PROPAGATED_HEADERS {
            if let Some(value) = headers.get(name) {
                request = request.header(name, value.clone());
            }
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResourceUpdateError::Status {
                status: status.as_u16(),
                device,
            });
        }

        tracing::debug!(device = %device, status = %status, "Resource details updated");
        Ok(())
    }
}
