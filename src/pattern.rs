//! Path patterns: compile `/product/:id` style patterns and match concrete paths.
//!
//! A pattern is a `/`-separated list of segments. Literal segments match
//! exactly (case-sensitive). Parameter segments start with `:` and may carry a
//! trailing modifier:
//!
//! | Segment  | Consumes                | Bound value                      |
//! |----------|-------------------------|----------------------------------|
//! | `:name`  | exactly one segment     | [`ParamValue::One`]              |
//! | `:name?` | zero or one segment     | [`ParamValue::One`], or absent   |
//! | `:name+` | one or more segments    | [`ParamValue::Many`]             |
//! | `:name*` | zero or more segments   | [`ParamValue::Many`], or absent  |
//!
//! Matching is total: every segment of the concrete path must be consumed. A
//! single trailing `/` on either side is ignored.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while compiling a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// A `:` segment with no name, e.g. `/product/:` or `/:?`.
    #[error("empty parameter name in pattern {pattern:?}")]
    EmptyParamName { pattern: String },
    /// The same parameter name is bound twice.
    #[error("parameter {name:?} appears more than once in pattern {pattern:?}")]
    DuplicateParam { pattern: String, name: String },
}

// ---------------------------------------------------------------------------
// Params
// ---------------------------------------------------------------------------

/// A single bound parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Bound by `:name` or `:name?`.
    One(String),
    /// Bound by `:name+` or `:name*`, one entry per path segment.
    Many(Vec<String>),
}

impl ParamValue {
    /// The value as a single string, if it was bound by a single-segment param.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::One(value) => Some(value),
            ParamValue::Many(_) => None,
        }
    }

    /// The value as a list of segments. A single value is a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            ParamValue::One(value) => std::slice::from_ref(value),
            ParamValue::Many(values) => values,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::One(value) => f.write_str(value),
            ParamValue::Many(values) => f.write_str(&values.join("/")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::One(value.to_owned())
    }
}

/// Parameters extracted from a matched path, keyed by parameter name.
pub type Params = BTreeMap<String, ParamValue>;

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathMatch {
    /// The bound parameters. Optional params that matched nothing are absent.
    pub params: Params,
}

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

/// How many path segments a parameter may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `:name`
    One,
    /// `:name?`
    Optional,
    /// `:name+`
    OneOrMore,
    /// `:name*`
    ZeroOrMore,
}

impl Modifier {
    /// Inclusive `(min, max)` number of segments this modifier may consume
    /// out of `available`.
    fn bounds(self, available: usize) -> (usize, usize) {
        match self {
            Modifier::One => (1, available.min(1)),
            Modifier::Optional => (0, available.min(1)),
            Modifier::OneOrMore => (1, available),
            Modifier::ZeroOrMore => (0, available),
        }
    }

    fn is_repeated(self) -> bool {
        matches!(self, Modifier::OneOrMore | Modifier::ZeroOrMore)
    }
}

/// One compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches the exact text.
    Literal(String),
    /// Binds path segments to `name`.
    Param { name: String, modifier: Modifier },
}

// ---------------------------------------------------------------------------
// PathPattern
// ---------------------------------------------------------------------------

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    rooted: bool,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let (rooted, parts) = split_path(pattern);

        let segments = parts
            .iter()
            .map(|raw| parse_segment(pattern, raw))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for segment in &segments {
            if let Segment::Param { name, .. } = segment {
                if !seen.insert(name.as_str()) {
                    return Err(PatternError::DuplicateParam {
                        pattern: pattern.to_owned(),
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            source: pattern.to_owned(),
            rooted,
            segments,
        })
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match a concrete path, returning the bound parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathMatch> {
        let (rooted, parts) = split_path(path);
        if rooted != self.rooted {
            return None;
        }

        let mut params = Params::new();
        if match_segments(&self.segments, &parts, &mut params) {
            Some(PathMatch { params })
        } else {
            None
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Match `path` against an uncompiled `pattern`.
///
/// A pattern that fails to compile never matches; the failure is logged.
pub fn match_path(path: &str, pattern: &str) -> Option<PathMatch> {
    match PathPattern::parse(pattern) {
        Ok(compiled) => compiled.matches(path),
        Err(err) => {
            tracing::warn!("ignoring invalid path pattern: {}", err);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Split a path into `(rooted, segments)`, ignoring one trailing `/`.
///
/// `/` and the empty string both have no segments.
fn split_path(path: &str) -> (bool, Vec<&str>) {
    let (rooted, rest) = match path.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, path),
    };
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        (rooted, Vec::new())
    } else {
        (rooted, rest.split('/').collect())
    }
}

fn parse_segment(pattern: &str, raw: &str) -> Result<Segment, PatternError> {
    let Some(body) = raw.strip_prefix(':') else {
        return Ok(Segment::Literal(raw.to_owned()));
    };

    let (name, modifier) = if let Some(name) = body.strip_suffix('?') {
        (name, Modifier::Optional)
    } else if let Some(name) = body.strip_suffix('+') {
        (name, Modifier::OneOrMore)
    } else if let Some(name) = body.strip_suffix('*') {
        (name, Modifier::ZeroOrMore)
    } else {
        (body, Modifier::One)
    };

    if name.is_empty() {
        return Err(PatternError::EmptyParamName {
            pattern: pattern.to_owned(),
        });
    }

    Ok(Segment::Param {
        name: name.to_owned(),
        modifier,
    })
}

/// Backtracking matcher. Repeated params are greedy.
///
/// Params are only written once the rest of the pattern has matched, so a
/// failed branch leaves `params` untouched.
fn match_segments(pattern: &[Segment], path: &[&str], params: &mut Params) -> bool {
    let Some((first, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    match first {
        Segment::Literal(literal) => match path.split_first() {
            Some((head, tail)) if *head == literal.as_str() => match_segments(rest, tail, params),
            _ => false,
        },
        Segment::Param { name, modifier } => {
            let (min, max) = modifier.bounds(path.len());
            for take in (min..=max).rev() {
                let run = &path[..take];
                // Params never bind empty segments (`/a//b`).
                if run.iter().any(|segment| segment.is_empty()) {
                    continue;
                }
                let Some(value) = bind(*modifier, run) else {
                    continue;
                };
                if match_segments(rest, &path[take..], params) {
                    if let Some(value) = value {
                        params.insert(name.clone(), value);
                    }
                    return true;
                }
            }
            false
        }
    }
}

/// Decode a run of segments into a param value. `None` if decoding fails,
/// `Some(None)` for an empty run.
fn bind(modifier: Modifier, run: &[&str]) -> Option<Option<ParamValue>> {
    if run.is_empty() {
        return Some(None);
    }

    let decoded = run
        .iter()
        .map(|segment| urlencoding::decode(segment).ok().map(|s| s.into_owned()))
        .collect::<Option<Vec<_>>>()?;

    if modifier.is_repeated() {
        Some(Some(ParamValue::Many(decoded)))
    } else {
        decoded.into_iter().next().map(|value| Some(ParamValue::One(value)))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, ParamValue)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    fn many(values: &[&str]) -> ParamValue {
        ParamValue::Many(values.iter().map(|v| (*v).to_owned()).collect())
    }

    // ── Literals ─────────────────────────────────────────────────────

    #[test]
    fn literal_match_has_no_params() {
        let m = match_path("/test", "/test").unwrap();
        assert!(m.params.is_empty());
    }

    #[test]
    fn root_does_not_match_child() {
        assert!(match_path("/test", "/").is_none());
        assert!(match_path("/", "/test").is_none());
    }

    #[test]
    fn root_matches_root() {
        assert!(match_path("/", "/").is_some());
    }

    #[test]
    fn literals_are_case_sensitive() {
        assert!(match_path("/Test", "/test").is_none());
    }

    #[test]
    fn whole_path_must_be_consumed() {
        assert!(match_path("/test/extra", "/test").is_none());
        assert!(match_path("/test", "/test/extra").is_none());
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert!(match_path("/test/", "/test").is_some());
        assert!(match_path("/test", "/test/").is_some());
    }

    #[test]
    fn rooted_and_relative_paths_do_not_mix() {
        assert!(match_path("test", "/test").is_none());
        assert!(match_path("/test", "test").is_none());
    }

    // ── Named params ─────────────────────────────────────────────────

    #[test]
    fn named_param_binds_one_segment() {
        let m = match_path("/test/123", "/test/:id").unwrap();
        assert_eq!(m.params, params(&[("id", "123".into())]));
    }

    #[test]
    fn named_param_requires_a_segment() {
        assert!(match_path("/test", "/test/:id").is_none());
    }

    #[test]
    fn named_param_does_not_bind_empty_segment() {
        assert!(match_path("/test//x", "/test/:id/x").is_none());
    }

    #[test]
    fn multiple_named_params() {
        let m = match_path("/product/7/variant/blue", "/product/:id/variant/:color").unwrap();
        assert_eq!(
            m.params,
            params(&[("id", "7".into()), ("color", "blue".into())])
        );
    }

    #[test]
    fn param_values_are_percent_decoded() {
        let m = match_path("/tag/hello%20world", "/tag/:name").unwrap();
        assert_eq!(m.params["name"].as_str(), Some("hello world"));
    }

    #[test]
    fn undecodable_param_does_not_match() {
        assert!(match_path("/tag/%FF", "/tag/:name").is_none());
    }

    // ── Optional params ──────────────────────────────────────────────

    #[test]
    fn optional_param_absent() {
        let m = match_path("/test", "/test/:id?").unwrap();
        assert!(m.params.is_empty());
    }

    #[test]
    fn optional_param_present() {
        let m = match_path("/test/9", "/test/:id?").unwrap();
        assert_eq!(m.params, params(&[("id", "9".into())]));
    }

    #[test]
    fn optional_param_consumes_at_most_one() {
        assert!(match_path("/test/9/10", "/test/:id?").is_none());
    }

    // ── Repeated params ──────────────────────────────────────────────

    #[test]
    fn one_or_more_binds_all_segments() {
        let m = match_path("/some/basic/route", "/:test+").unwrap();
        assert_eq!(
            m.params,
            params(&[("test", many(&["some", "basic", "route"]))])
        );
    }

    #[test]
    fn one_or_more_requires_a_segment() {
        assert!(match_path("/", "/:test+").is_none());
    }

    #[test]
    fn zero_or_more_may_be_empty() {
        let m = match_path("/files", "/files/:rest*").unwrap();
        assert!(m.params.is_empty());
        let m = match_path("/files/a/b", "/files/:rest*").unwrap();
        assert_eq!(m.params, params(&[("rest", many(&["a", "b"]))]));
    }

    #[test]
    fn repeated_param_backtracks_for_trailing_literal() {
        let m = match_path("/docs/a/b/edit", "/docs/:path+/edit").unwrap();
        assert_eq!(m.params, params(&[("path", many(&["a", "b"]))]));
    }

    #[test]
    fn param_value_display_joins_segments() {
        assert_eq!(many(&["a", "b", "c"]).to_string(), "a/b/c");
        assert_eq!(ParamValue::from("x").as_slice(), ["x".to_owned()]);
    }

    // ── Compilation ──────────────────────────────────────────────────

    #[test]
    fn parse_segments() {
        let pattern = PathPattern::parse("/a/:b?/:c+").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("a".into()),
                Segment::Param {
                    name: "b".into(),
                    modifier: Modifier::Optional
                },
                Segment::Param {
                    name: "c".into(),
                    modifier: Modifier::OneOrMore
                },
            ]
        );
        assert_eq!(pattern.to_string(), "/a/:b?/:c+");
    }

    #[test]
    fn empty_param_name_is_an_error() {
        let err = PathPattern::parse("/product/:?").unwrap_err();
        assert_eq!(
            err,
            PatternError::EmptyParamName {
                pattern: "/product/:?".into()
            }
        );
    }

    #[test]
    fn duplicate_param_is_an_error() {
        let err = PathPattern::parse("/:id/x/:id").unwrap_err();
        assert!(matches!(err, PatternError::DuplicateParam { ref name, .. } if name == "id"));
    }

    #[test]
    fn invalid_pattern_never_matches() {
        assert!(match_path("/product/", "/product/:").is_none());
    }

    #[test]
    fn error_messages() {
        let err = PathPattern::parse("/:").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @r#"empty parameter name in pattern "/:""#);
    }
}
