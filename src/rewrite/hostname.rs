//! Internal → external node name translation.

use thiserror::Error;

/// Returned when a host cannot be translated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no match found for pattern {pattern:?} in host {host:?}")]
pub struct TranslateError {
    pub host: String,
    pub pattern: String,
}

/// Replace every occurrence of `internal` in `host` with `external`.
///
/// Fails when `internal` does not occur in `host` at all.
pub fn translate(host: &str, internal: &str, external: &str) -> Result<String, TranslateError> {
    if !host.contains(internal) {
        return Err(TranslateError {
            host: host.to_string(),
            pattern: internal.to_string(),
        });
    }
    Ok(host.replace(internal, external))
}

/// Join a translated node name and the public domain.
pub fn build_external_host(name: &str, domain: &str) -> String {
    let mut host = String::with_capacity(name.len() + domain.len() + 1);
    host.push_str(name);
    host.push('.');
    host.push_str(domain);
    host
}
