//! Route definitions and the matching engine.
//!
//! A [`Route`] names one endpoint: an HTTP method, a `/`-delimited match
//! pattern, an optional bound on trailing parameters, and the ordered
//! [`Action`]s to run. Patterns are parsed into [`PatternSegment`]s once,
//! when the match string is assigned.
//!
//! - [`segment`] -- per-segment comparison with `:int`, `:num` and `:str`
//!   hints and their `[...]` qualifiers.
//! - [`matcher`] -- the stateless [`check`](matcher::check) of a
//!   [`Request`] against a [`Route`].
//! - [`bank`] -- the ordered, named route registry.
//! - [`reverse`] -- building URLs back out of a route and arguments.

pub mod action;
pub mod bank;
pub mod matcher;
pub mod request;
pub mod reverse;
pub mod segment;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use action::Action;
pub use bank::{Bank, RouteMatch, RouteSummary};
pub use matcher::{check, MatchOutcome, NoMatch};
pub use request::Request;
pub use reverse::{decode_argument, Reverse};
pub use segment::{Hint, PatternSegment, Qualifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a supported HTTP method (expected GET, POST, PUT or DELETE)")]
pub struct UnknownMethod(pub String);

impl HttpMethod {
    pub const ALL: [Self; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bound on request segments beyond the pattern's own.
///
/// `MaxParams::UNBOUNDED` disables the bound in both the matcher's count
/// gate and the reverse builder's truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct MaxParams(Option<usize>);

impl MaxParams {
    pub const UNBOUNDED: Self = Self(None);

    #[must_use]
    pub const fn at_most(n: usize) -> Self {
        Self(Some(n))
    }

    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        self.0
    }

    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        self.0.is_none()
    }

    /// Whether `extra` trailing segments fit under this bound.
    #[must_use]
    pub fn allows(self, extra: usize) -> bool {
        self.0.map_or(true, |max| extra <= max)
    }
}

impl From<Option<usize>> for MaxParams {
    fn from(value: Option<usize>) -> Self {
        Self(value)
    }
}

impl fmt::Display for MaxParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("unbounded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    name: String,
    method: HttpMethod,
    pattern: String,
    segments: Vec<PatternSegment>,
    max_params: MaxParams,
    actions: Vec<Action>,
}

impl Route {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Get,
            pattern: String::new(),
            segments: Vec::new(),
            max_params: MaxParams::UNBOUNDED,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_match(mut self, pattern: impl Into<String>) -> Self {
        self.set_match(pattern);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_max_params(mut self, max_params: impl Into<MaxParams>) -> Self {
        self.max_params = max_params.into();
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn set_match(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.pattern = pattern.into();
        self.segments = segment::parse_pattern(&self.pattern);
        self
    }

    /// Assign the method from a string. Anything other than GET, POST, PUT
    /// or DELETE (in any case) leaves the current method in place.
    pub fn set_http_method(&mut self, method: &str) -> &mut Self {
        match method.parse() {
            Ok(parsed) => self.method = parsed,
            Err(e) => tracing::debug!(route = %self.name, error = %e, "ignoring HTTP method"),
        }
        self
    }

    pub fn set_max_params(&mut self, max_params: impl Into<MaxParams>) -> &mut Self {
        self.max_params = max_params.into();
        self
    }

    pub fn add_action(&mut self, action: Action) -> &mut Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// The raw match string as it was assigned.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    #[must_use]
    pub const fn max_params(&self) -> MaxParams {
        self.max_params
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// True when the route has at least one action and every action is ready.
    #[must_use]
    pub fn is_executable(&self) -> bool {
        !self.actions.is_empty() && self.actions.iter().all(Action::is_ready)
    }

    #[must_use]
    pub fn reverse(&self) -> Reverse<'_> {
        Reverse::new(self)
    }
}
