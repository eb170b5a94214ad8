//! Request-to-route matching.
//!
//! [`check`] is a pure function of a [`Request`] and a [`Route`]: it never
//! mutates the route and keeps no state between calls, so one route may
//! be checked from many threads at once. Matching runs in a single pass:
//!
//! 1. Basics: methods must agree, the pattern must be non-empty and the
//!    request path must contain a `/`.
//! 2. Both paths are split on `/` with empty segments dropped. A request
//!    with no segments only matches the pattern `/`.
//! 3. The request needs at least as many segments as the pattern, and no
//!    more than the pattern plus the route's [`MaxParams`](super::MaxParams).
//! 4. Pattern segments are compared positionally. Hinted segments append
//!    the request segment to the arguments, left to right.
//! 5. Request segments beyond the pattern are appended after that.

use super::segment::{split_path, PatternSegment};
use super::{HttpMethod, Request, Route};

/// Why a route did not match. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoMatch {
    #[error("wrong HTTP method (route wants {expected}, request is {found})")]
    WrongMethod {
        expected: HttpMethod,
        found: HttpMethod,
    },

    #[error("no match string specified in the route")]
    EmptyPattern,

    #[error("no slashes in the requested URI")]
    NoSlash,

    #[error("no requested segments, and the route is not the document root")]
    EmptyRequestNotRoot,

    #[error("not enough segments in the request ({found} of {required})")]
    TooFewSegments { required: usize, found: usize },

    #[error("too many segments in the request ({found}, at most {allowed})")]
    TooManySegments { allowed: usize, found: usize },

    #[error("literal segment '{expected}' did not match '{found}'")]
    LiteralMismatch { expected: String, found: String },

    #[error("segment '{found}' does not satisfy '{segment}'")]
    HintMismatch { segment: String, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Captured arguments: hinted segments in pattern order, then overflow.
    Matched(Vec<String>),
    Rejected(NoMatch),
}

impl MatchOutcome {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    #[must_use]
    pub fn arguments(&self) -> Option<&[String]> {
        match self {
            Self::Matched(args) => Some(args),
            Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn into_arguments(self) -> Option<Vec<String>> {
        match self {
            Self::Matched(args) => Some(args),
            Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub const fn reason(&self) -> Option<&NoMatch> {
        match self {
            Self::Matched(_) => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

impl From<Result<Vec<String>, NoMatch>> for MatchOutcome {
    fn from(result: Result<Vec<String>, NoMatch>) -> Self {
        match result {
            Ok(args) => Self::Matched(args),
            Err(reason) => Self::Rejected(reason),
        }
    }
}

#[must_use]
pub fn check(request: &Request, route: &Route) -> MatchOutcome {
    let outcome = MatchOutcome::from(run(request, route));
    if let MatchOutcome::Rejected(ref reason) = outcome {
        tracing::trace!(
            route = route.name(),
            method = %request.method(),
            uri = request.uri(),
            reason = %reason,
            "route rejected"
        );
    }
    outcome
}

fn run(request: &Request, route: &Route) -> Result<Vec<String>, NoMatch> {
    check_basics(request, route)?;

    let request_segments: Vec<&str> = split_path(request.uri()).collect();
    let pattern = route.segments();

    if request_segments.is_empty() {
        return if route.pattern() == "/" {
            Ok(Vec::new())
        } else {
            Err(NoMatch::EmptyRequestNotRoot)
        };
    }

    check_counts(request_segments.len(), route)?;

    let mut arguments = Vec::new();
    for (segment, candidate) in pattern.iter().zip(&request_segments) {
        if !segment.accepts(candidate) {
            return Err(mismatch(segment, candidate));
        }
        if segment.captures() {
            arguments.push((*candidate).to_string());
        }
    }

    arguments.extend(
        request_segments[pattern.len()..]
            .iter()
            .map(|s| (*s).to_string()),
    );

    Ok(arguments)
}

fn check_basics(request: &Request, route: &Route) -> Result<(), NoMatch> {
    if request.method() != route.method() {
        return Err(NoMatch::WrongMethod {
            expected: route.method(),
            found: request.method(),
        });
    }

    if route.pattern().is_empty() {
        return Err(NoMatch::EmptyPattern);
    }

    if !request.uri().contains('/') {
        return Err(NoMatch::NoSlash);
    }

    Ok(())
}

fn check_counts(found: usize, route: &Route) -> Result<(), NoMatch> {
    let required = route.segments().len();
    if found < required {
        return Err(NoMatch::TooFewSegments { required, found });
    }

    let max_params = route.max_params();
    if !max_params.allows(found - required) {
        return Err(NoMatch::TooManySegments {
            allowed: required + max_params.limit().unwrap_or_default(),
            found,
        });
    }

    Ok(())
}

fn mismatch(segment: &PatternSegment, candidate: &str) -> NoMatch {
    match segment {
        PatternSegment::Literal(expected) => NoMatch::LiteralMismatch {
            expected: expected.clone(),
            found: candidate.to_string(),
        },
        other => NoMatch::HintMismatch {
            segment: other.as_str().to_string(),
            found: candidate.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::MaxParams;

    fn get(uri: &str) -> Request {
        Request::new(HttpMethod::Get, uri)
    }

    fn route(pattern: &str) -> Route {
        Route::new("test").with_match(pattern)
    }

    #[test]
    fn literal_route() {
        let rt = route("/imaroute/");
        assert_eq!(check(&get("/imaroute/"), &rt), MatchOutcome::Matched(vec![]));
        assert!(!check(&get("/notaroute/"), &rt).is_match());
    }

    #[test]
    fn slashes_are_inert() {
        let rt = route("/a/b/");
        assert!(check(&get("a/b"), &rt).is_match());
        assert!(check(&get("//a///b//"), &rt).is_match());
    }

    #[test]
    fn method_must_agree() {
        let rt = route("/a/").with_method(HttpMethod::Post);
        assert_eq!(
            check(&get("/a/"), &rt).reason(),
            Some(&NoMatch::WrongMethod {
                expected: HttpMethod::Post,
                found: HttpMethod::Get
            })
        );
        assert!(check(&Request::new(HttpMethod::Post, "/a/"), &rt).is_match());
    }

    #[test]
    fn empty_pattern_never_matches() {
        assert_eq!(
            check(&get("/"), &route("")).reason(),
            Some(&NoMatch::EmptyPattern)
        );
    }

    #[test]
    fn uri_without_slash_is_rejected() {
        assert_eq!(
            check(&get("imaroute"), &route("/imaroute/")).reason(),
            Some(&NoMatch::NoSlash)
        );
    }

    #[test]
    fn root_matching() {
        assert!(check(&get("/"), &route("/")).is_match());
        assert!(check(&get("///"), &route("/")).is_match());
        assert_eq!(
            check(&get("/"), &route("/foo/")).reason(),
            Some(&NoMatch::EmptyRequestNotRoot)
        );
    }

    #[test]
    fn root_pattern_collects_everything_as_overflow() {
        let outcome = check(&get("/a/b/"), &route("/"));
        assert_eq!(outcome.arguments(), Some(&["a".to_string(), "b".to_string()][..]));

        let bounded = route("/").with_max_params(MaxParams::at_most(0));
        assert!(!check(&get("/a/"), &bounded).is_match());
    }

    #[test]
    fn hinted_arguments_interleave_in_pattern_order() {
        let rt = route("/view/:int/stuff/:str/");
        let outcome = check(&get("/view/42/stuff/abc/"), &rt);
        assert_eq!(
            outcome.into_arguments().unwrap(),
            vec!["42".to_string(), "abc".to_string()]
        );
    }

    #[test]
    fn overflow_arguments_follow_hints() {
        let rt = route("/view/:int/");
        let outcome = check(&get("/view/1234/abcd/xyz/"), &rt);
        assert_eq!(
            outcome.into_arguments().unwrap(),
            vec!["1234".to_string(), "abcd".to_string(), "xyz".to_string()]
        );

        let rt = rt.with_max_params(MaxParams::at_most(1));
        assert_eq!(
            check(&get("/view/1234/abcd/xyz/"), &rt).reason(),
            Some(&NoMatch::TooManySegments {
                allowed: 3,
                found: 4
            })
        );

        let rt = rt.with_max_params(MaxParams::at_most(2));
        assert!(check(&get("/view/1234/abcd/xyz/"), &rt).is_match());
    }

    #[test]
    fn too_few_segments() {
        assert_eq!(
            check(&get("/view/"), &route("/view/:int/")).reason(),
            Some(&NoMatch::TooFewSegments {
                required: 2,
                found: 1
            })
        );
    }

    #[test]
    fn mismatch_reasons_name_the_segment() {
        assert_eq!(
            check(&get("/view/Nope/"), &route("/view/:int/")).reason(),
            Some(&NoMatch::HintMismatch {
                segment: ":int".into(),
                found: "Nope".into()
            })
        );
        assert_eq!(
            check(&get("/edit/1/"), &route("/view/:int/")).reason(),
            Some(&NoMatch::LiteralMismatch {
                expected: "view".into(),
                found: "edit".into()
            })
        );
    }

    #[test]
    fn checking_does_not_touch_the_route() {
        let rt = route("/view/:int/");
        let before = rt.clone();
        let _ = check(&get("/view/1/"), &rt);
        let _ = check(&get("/view/x/"), &rt);
        assert_eq!(rt, before);
    }
}
