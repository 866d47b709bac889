//! Request path normalization.
//!
//! Every lookup sees the same canonical path:
//! - query string and fragment removed
//! - percent-escapes decoded per segment (best effort)
//! - dot segments resolved, including ones produced by decoding
//! - duplicate separators collapsed, including decoded `%2F`
//! - leading `/`, no trailing `/` (except the root itself)

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::sync::OnceLock;
use url::Url;

/// The canonical root path.
pub const ROOT: &str = "/";

/// Characters escaped when a segment is written back into a URL.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Host and canonical path extracted from a raw request URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUri {
    /// Host from an absolute URI, normalized; `None` for bare paths.
    pub host: Option<String>,
    /// Canonical decoded path.
    pub path: String,
}

impl RequestUri {
    /// Parse an absolute URI (`http://host/a/b?x`) or a bare path (`/a/b?x`).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let absolute = if raw.starts_with('/') {
            None
        } else {
            Url::parse(raw).ok().filter(Url::has_host)
        };
        if let Some(url) = absolute {
            return Self {
                host: url.host_str().map(normalize_host),
                path: canonicalize(url.path()),
            };
        }

        // "//a" would otherwise be read as a scheme-relative host.
        let input = collapse_slashes(raw);
        static BASE: OnceLock<Option<Url>> = OnceLock::new();
        let joined = BASE
            .get_or_init(|| Url::parse("http://localhost/").ok())
            .as_ref()
            .and_then(|base| base.join(&input).ok());

        let path = match &joined {
            Some(url) => canonicalize(url.path()),
            None => {
                tracing::debug!(uri = %raw, "Unparsable request URI, falling back to raw path");
                canonicalize(input.split(['?', '#']).next().unwrap_or_default())
            }
        };
        Self { host: None, path }
    }
}

/// Canonicalize an already extracted path: decode segments and collapse separators.
///
/// Decoding runs before splitting, so an escaped `/` separates segments and an
/// escaped `..` cannot climb above the root.
pub fn canonicalize(path: &str) -> String {
    let mut resolved: Vec<String> = Vec::new();
    for raw in path.split('/').filter(|s| !s.is_empty()) {
        let decoded = decode_segment(raw);
        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    resolved.pop();
                }
                _ => resolved.push(segment.to_string()),
            }
        }
    }
    join(resolved)
}

/// Non-empty segments of a canonical path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Split `/a/b/c` into (`/a/b`, `c`). The root has no last segment.
pub fn split_last_segment(path: &str) -> Option<(String, &str)> {
    let trimmed = path.trim_end_matches('/');
    let (parent, last) = trimmed.rsplit_once('/')?;
    if last.is_empty() {
        return None;
    }
    Some((canonicalize_plain(parent), last))
}

/// Build a canonical path from raw url segments.
pub fn from_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    join(segments)
}

/// Percent-encode each segment of a canonical path for use in a URL.
pub fn encode(path: &str) -> String {
    join(segments(path).map(|s| utf8_percent_encode(s, SEGMENT).to_string()))
}

/// Remove `prefix` from the start of `path` on segment boundaries, ignoring case.
///
/// Returns `None` if `path` is not under `prefix`.
pub fn strip_prefix(path: &str, prefix: &str) -> Option<String> {
    let mut rest = segments(path);
    for expected in segments(prefix) {
        match rest.next() {
            Some(segment) if segment.to_lowercase() == expected.to_lowercase() => {}
            _ => return None,
        }
    }
    Some(join(rest))
}

/// True if `path` equals `prefix` or lies below it.
pub fn has_prefix(path: &str, prefix: &str) -> bool {
    strip_prefix(path, prefix).is_some()
}

/// Lower-case a host and drop its port and trailing dot.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let without_port = if let Some(rest) = host.strip_prefix('[') {
        // IPv6 literal, optionally followed by ":port"
        match rest.find(']') {
            Some(end) => &host[..end + 2],
            None => host,
        }
    } else {
        match host.rsplit_once(':') {
            Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
            _ => host,
        }
    };
    without_port.trim_end_matches('.').to_lowercase()
}

fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(segment.as_ref());
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

fn canonicalize_plain(path: &str) -> String {
    join(segments(path))
}

fn decode_segment(segment: &str) -> String {
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            tracing::debug!(segment, "Segment does not decode to UTF-8, keeping it encoded");
            segment.to_string()
        }
    }
}

fn collapse_slashes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_slash = false;
    for c in raw.chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        out.push(c);
    }
    out
}
