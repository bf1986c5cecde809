//! Canonical URL handling.
//!
//! A canonical URL is the origin (`scheme://host[:port]`) followed by the
//! path. Query strings and fragments are always dropped, so `/about/?x=1`
//! and `/about/` share one cache entry and one crawl unit.

use crate::error::{Result, ScanError};
use thiserror::Error;
use url::{ParseError, Url};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("malformed URL: {0}")]
    Malformed(String),

    #[error("link is off-origin or not resolvable")]
    OffOrigin,
}

/// Canonicalize `href` against `origin`.
///
/// Relative references whose path is longer than two characters are
/// resolved against the origin root. Anything else is accepted only if the
/// raw href text contains the origin.
pub fn canonicalize(href: &str, origin: &str) -> std::result::Result<String, Rejection> {
    check_escapes(href).map_err(Rejection::Malformed)?;

    match Url::parse(href) {
        Ok(parsed) => within_origin(href, origin, parsed.path()),
        Err(ParseError::RelativeUrlWithoutBase) => canonicalize_relative(href, origin),
        Err(e) => Err(Rejection::Malformed(e.to_string())),
    }
}

fn canonicalize_relative(href: &str, origin: &str) -> std::result::Result<String, Rejection> {
    let first_segment = href.split(['/', '?', '#']).next().unwrap_or_default();
    if first_segment.contains(':') {
        return Err(Rejection::Malformed(format!(
            "first path segment in '{}' contains a colon",
            href
        )));
    }

    let base = Url::parse(&format!("{}/", origin))
        .map_err(|e| Rejection::Malformed(format!("origin '{}': {}", origin, e)))?;
    let resolved = base
        .join(href)
        .map_err(|e| Rejection::Malformed(e.to_string()))?;

    // Scheme-relative hrefs ("//host/path") carry their own host.
    if href.starts_with("//") {
        return within_origin(href, origin, resolved.path());
    }

    let path_len = href.find(['?', '#']).unwrap_or(href.len());
    if path_len > 2 {
        Ok(format!("{}{}", origin, resolved.path()))
    } else {
        within_origin(href, origin, resolved.path())
    }
}

fn within_origin(href: &str, origin: &str, path: &str) -> std::result::Result<String, Rejection> {
    if href.contains(origin) {
        Ok(format!("{}{}", origin, path))
    } else {
        Err(Rejection::OffOrigin)
    }
}

/// Split `url_str` into its origin and its own canonical URL.
pub fn split_origin(url_str: &str) -> Result<(String, String)> {
    check_escapes(url_str).map_err(|reason| ScanError::invalid_seed(url_str, reason))?;
    let parsed = Url::parse(url_str).map_err(|e| ScanError::invalid_seed(url_str, e))?;
    let origin =
        origin_of(&parsed).ok_or_else(|| ScanError::invalid_seed(url_str, "URL has no host"))?;
    let canonical = format!("{}{}", origin, parsed.path());
    Ok((origin, canonical))
}

/// Every `%` must start a two hex digit escape.
fn check_escapes(raw: &str) -> std::result::Result<(), String> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            let end = raw.len().min(i + 3);
            let shown = raw.get(i..end).unwrap_or("%");
            return Err(format!("invalid URL escape \"{}\"", shown));
        }
    }
    Ok(())
}

fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}
