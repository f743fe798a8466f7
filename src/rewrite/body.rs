//! Redirect body rewriting.
//!
//! The resolver answers a redirect with a one-anchor HTML snippet such as
//! `<a href="http://node:6200/api/v2/device">Temporary Redirect</a>.`. Only the
//! first quoted string is replaced; this is not a general link rewriter.

use once_cell::sync::Lazy;
use regex::bytes::{NoExpand, Regex};

// Greedy within a line: spans from the first to the last quote on that line.
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(.*)""#).expect("Invalid regex"));

/// Replace the first quoted string in `body` with `"replacement"`.
///
/// Bodies without a quoted string are returned unchanged.
pub fn rewrite_first_quoted(body: &[u8], replacement: &str) -> Vec<u8> {
    let quoted = format!("\"{}\"", replacement);
    QUOTED.replace(body, NoExpand(quoted.as_bytes())).into_owned()
}
