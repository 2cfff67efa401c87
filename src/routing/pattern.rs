//! Pattern parsing.
//!
//! # Syntax
//! ```text
//! /posts              literal segments
//! /posts/:id          named parameter, matches exactly one segment
//! /files/*path        trailing wildcard, matches zero or more segments
//! ```
//!
//! # Design Decisions
//! - One leading `/` is stripped, the rest is split on `/` verbatim
//! - No percent-decoding, no case folding, no slash collapsing
//! - Validation happens here, before the trie is touched

use crate::routing::error::SyntaxError;

const PARAM_SIGIL: char = ':';
const WILDCARD_SIGIL: char = '*';

/// One segment specifier of a registered pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Matches only identical text.
    Literal(&'a str),
    /// Captures exactly one segment under the given name.
    Param(&'a str),
    /// Captures the rest of the path under the given name.
    Wildcard(&'a str),
}

impl<'a> Segment<'a> {
    fn parse(raw: &'a str) -> Result<Self, SyntaxError> {
        if let Some(name) = raw.strip_prefix(PARAM_SIGIL) {
            if name.is_empty() {
                return Err(SyntaxError::MissingCaptureName);
            }
            return Ok(Segment::Param(name));
        }
        if let Some(name) = raw.strip_prefix(WILDCARD_SIGIL) {
            if name.is_empty() {
                return Err(SyntaxError::MissingCaptureName);
            }
            return Ok(Segment::Wildcard(name));
        }
        Ok(Segment::Literal(raw))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard(_))
    }
}

/// Split a request path into its `/`-delimited segments.
///
/// `/` and the empty path both produce a single empty segment.
pub fn split_path(path: &str) -> Vec<&str> {
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

/// Parse and validate a route pattern.
pub fn parse_pattern(pattern: &str) -> Result<Vec<Segment<'_>>, SyntaxError> {
    let segments = split_path(pattern)
        .into_iter()
        .map(Segment::parse)
        .collect::<Result<Vec<_>, _>>()?;

    let wildcards = segments.iter().filter(|s| s.is_wildcard()).count();
    if wildcards > 1 {
        return Err(SyntaxError::MultipleWildcards);
    }
    if wildcards == 1 && !segments.last().is_some_and(Segment::is_wildcard) {
        return Err(SyntaxError::WildcardNotFinal);
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/"), vec![""]);
        assert_eq!(split_path(""), vec![""]);
        assert_eq!(split_path("/posts/123"), vec!["posts", "123"]);
        assert_eq!(split_path("/posts/"), vec!["posts", ""]);
        assert_eq!(split_path("posts"), vec!["posts"]);
    }

    #[test]
    fn test_parse_segments() {
        let segments = parse_pattern("/posts/:id/*rest").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("posts"),
                Segment::Param("id"),
                Segment::Wildcard("rest"),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_multiple_wildcards() {
        assert_eq!(
            parse_pattern("/a/*b/*c"),
            Err(SyntaxError::MultipleWildcards)
        );
        assert_eq!(parse_pattern("/*a/*b"), Err(SyntaxError::MultipleWildcards));
    }

    #[test]
    fn test_parse_rejects_wildcard_in_the_middle() {
        assert_eq!(
            parse_pattern("/files/*path/raw"),
            Err(SyntaxError::WildcardNotFinal)
        );
    }

    #[test]
    fn test_parse_rejects_bare_sigils() {
        assert_eq!(parse_pattern("/files/*"), Err(SyntaxError::MissingCaptureName));
        assert_eq!(parse_pattern("/posts/:"), Err(SyntaxError::MissingCaptureName));
    }

    #[test]
    fn test_capture_name_keeps_inner_sigils() {
        // Only the leading sigil is stripped.
        assert_eq!(
            parse_pattern("/posts/:id:name").unwrap(),
            vec![Segment::Literal("posts"), Segment::Param("id:name")]
        );
    }
}
