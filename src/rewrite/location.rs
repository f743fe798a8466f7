//! Location header rewriting.
//!
//! Works on `http::Uri` parts so the host and domain keep the exact case the
//! resolver and the configuration use. Any scheme may be applied.

use axum::http::uri::{Authority, InvalidUri, PathAndQuery, Scheme, Uri};
use thiserror::Error;

use super::hostname::{build_external_host, translate, TranslateError};
use super::RewriteRule;

/// Failure to turn a resolver Location into a public one.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("invalid Location {location:?}: {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: InvalidUri,
    },

    #[error("Location {0:?} has no host")]
    MissingHost(String),

    #[error("scheme {scheme:?} cannot be applied to Location {location:?}")]
    Scheme { scheme: String, location: String },

    #[error("rewritten host {0:?} is not a valid host")]
    InvalidHost(String),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// Rewrite a resolver Location into its externally routable form.
///
/// `request_scheme` must already be normalized. When it is empty and no
/// fixed scheme is configured, the Location keeps its own scheme. The port,
/// if any, is dropped along with the internal host; user info and the path
/// are kept.
pub fn rewrite_location(
    location: &str,
    rule: &RewriteRule,
    request_scheme: &str,
) -> Result<Uri, RewriteError> {
    let uri: Uri = location.parse().map_err(|source| RewriteError::InvalidLocation {
        location: location.to_string(),
        source,
    })?;

    let authority = uri
        .authority()
        .filter(|a| !a.host().is_empty())
        .ok_or_else(|| RewriteError::MissingHost(location.to_string()))?;

    let name = translate(authority.host(), &rule.internal_pattern, &rule.external_replacement)?;
    let external = build_external_host(&name, &rule.domain);

    let scheme = match rule.output_scheme(request_scheme) {
        "" => uri.scheme().cloned(),
        wanted => Some(wanted.parse::<Scheme>().map_err(|_| RewriteError::Scheme {
            scheme: wanted.to_string(),
            location: location.to_string(),
        })?),
    }
    .ok_or_else(|| RewriteError::MissingHost(location.to_string()))?;

    let authority = match authority.as_str().rsplit_once('@') {
        Some((user_info, _)) => format!("{}@{}", user_info, external),
        None => external.clone(),
    };
    let authority: Authority = authority
        .parse()
        .map_err(|_| RewriteError::InvalidHost(external.clone()))?;

    let path_and_query = uri
        .path_and_query()
        .cloned()
        .unwrap_or_else(|| PathAndQuery::from_static("/"));

    Uri::builder()
        .scheme(scheme)
        .authority(authority)
        .path_and_query(path_and_query)
        .build()
        .map_err(|_| RewriteError::InvalidHost(external))
}
