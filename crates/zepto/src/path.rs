//! Path normalization and segment scanning.

use std::str::Split;

use crate::error::{Result, RouterError};

/// Leading character that marks a parameter segment (`/users/:id`).
pub const PARAM_MARKER: char = ':';

/// Canonicalizes a raw path.
///
/// An empty path becomes `/`, and one trailing slash is stripped unless the
/// path is the root itself. Never allocates.
///
/// # Example
///
/// ```
/// use zepto::normalize;
///
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("/"), "/");
/// assert_eq!(normalize("/foo/"), "/foo");
/// ```
#[must_use]
pub fn normalize(path: &str) -> &str {
    if path.is_empty() {
        return "/";
    }
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}

/// Joins a group prefix and a sub-path, then normalizes the result.
///
/// A trailing slash on the prefix is dropped so `/api/` and `/api` nest
/// the same way.
#[must_use]
pub(crate) fn join(prefix: &str, path: &str) -> String {
    let full = format!("{}{path}", prefix.trim_end_matches('/'));
    normalize(&full).to_string()
}

/// Iterator over the slash-delimited segments of a path.
///
/// One leading slash is skipped; every other slash is a boundary, so `//`
/// yields an empty segment. The root path has no segments. Segments borrow
/// from the input; nothing is collected.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    inner: Option<Split<'a, char>>,
}

impl<'a> Segments<'a> {
    /// Starts scanning `path`.
    #[must_use]
    pub fn new(path: &'a str) -> Self {
        let rest = path.strip_prefix('/').unwrap_or(path);
        Self {
            inner: (!rest.is_empty()).then(|| rest.split('/')),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.as_mut()?.next()
    }
}

/// Checks the shape shared by every registered path: a leading slash and
/// no empty segment.
pub(crate) fn check_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(RouterError::InvalidPattern(format!(
            "{path}: must start with '/'"
        )));
    }
    if Segments::new(path).any(str::is_empty) {
        return Err(RouterError::InvalidPattern(format!(
            "{path}: empty path segment"
        )));
    }
    Ok(())
}

/// One parsed segment of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternSegment<'a> {
    /// Matches exactly this text.
    Literal(&'a str),
    /// Binds any segment under this name.
    Param(&'a str),
}

impl<'a> PatternSegment<'a> {
    fn classify(segment: &'a str) -> Self {
        segment
            .strip_prefix(PARAM_MARKER)
            .map_or(Self::Literal(segment), Self::Param)
    }
}

/// Returns true if no segment of `path` is a parameter segment.
#[must_use]
pub(crate) fn is_static(path: &str) -> bool {
    Segments::new(path).all(|segment| !segment.starts_with(PARAM_MARKER))
}

/// Splits a pattern into literal and parameter segments.
///
/// Rejects malformed paths (see [`check_path`]), parameters without a name
/// and names repeated within the pattern.
pub(crate) fn parse_pattern(pattern: &str) -> Result<Vec<PatternSegment<'_>>> {
    check_path(pattern)?;
    let mut segments = Vec::new();
    for raw in Segments::new(pattern) {
        let segment = PatternSegment::classify(raw);
        if let PatternSegment::Param(name) = segment {
            if name.is_empty() {
                return Err(RouterError::InvalidPattern(format!(
                    "{pattern}: parameter segment has no name"
                )));
            }
            if segments.contains(&segment) {
                return Err(RouterError::DuplicateParam {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }
        }
        segments.push(segment);
    }
    Ok(segments)
}
