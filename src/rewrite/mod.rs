//! Redirect rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! resolver 307 response
//!     → location.rs (parse Location, pick output scheme)
//!     → hostname.rs (internal name → external name, append public domain)
//!     → body.rs (first quoted string → new Location)
//!     → rewritten response back to the forwarder
//! ```
//!
//! # Design Decisions
//! - Every function here is pure; no I/O, no shared state
//! - A host that does not contain the internal pattern is an error, never a
//!   best-effort substitution
//! - `RewriteRule` is loaded once and shared read-only across requests

pub mod body;
pub mod hostname;
pub mod location;
pub mod scheme;

use serde::{Deserialize, Serialize};

pub use body::rewrite_first_quoted;
pub use hostname::{build_external_host, translate, TranslateError};
pub use location::{rewrite_location, RewriteError};
pub use scheme::{normalize_scheme, original_scheme};

/// How internal node names in a redirect are mapped to public ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteRule {
    /// Literal substring identifying the internal part of a node host name.
    pub internal_pattern: String,

    /// Replacement for every occurrence of `internal_pattern`.
    pub external_replacement: String,

    /// Public domain appended to the translated name.
    pub domain: String,

    /// Scheme forced onto every rewritten Location ("http" or "https").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_scheme: Option<String>,
}

impl RewriteRule {
    /// Scheme the rewritten Location should carry.
    ///
    /// The fixed scheme wins when configured; otherwise the normalized scheme
    /// of the inbound request is used.
    pub fn output_scheme<'a>(&'a self, request_scheme: &'a str) -> &'a str {
        match self.fixed_scheme.as_deref() {
            Some(fixed) if !fixed.is_empty() => fixed,
            _ => request_scheme,
        }
    }
}
