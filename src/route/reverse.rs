//! Building URLs from a route and argument values.
//!
//! Positional arguments fill the pattern's `:` placeholders left to right;
//! whatever is left is appended as trailing segments, up to the route's
//! [`MaxParams`](super::MaxParams). Values and query pairs are
//! form-urlencoded, so `"How dy"` becomes `How+dy`.

use std::fmt;

use url::form_urlencoded;

use super::Route;

#[derive(Debug, Clone)]
pub struct Reverse<'a> {
    route: &'a Route,
    args: Vec<String>,
    query: Vec<(String, String)>,
}

impl<'a> Reverse<'a> {
    #[must_use]
    pub const fn new(route: &'a Route) -> Self {
        Self {
            route,
            args: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn add_arg(&mut self, arg: impl ToString) -> &mut Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn add_args<I>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.args.extend(args.into_iter().map(|a| a.to_string()));
        self
    }

    pub fn clear_args(&mut self) -> &mut Self {
        self.args.clear();
        self
    }

    /// Set a query string pair. Setting an existing key replaces its value
    /// and keeps its position.
    pub fn add_get(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    pub fn clear_get_args(&mut self) -> &mut Self {
        self.query.clear();
        self
    }

    #[must_use]
    pub const fn route(&self) -> &'a Route {
        self.route
    }

    #[must_use]
    pub fn output(&self) -> String {
        let mut pending = self.args.iter();

        let mut segments: Vec<String> = self
            .route
            .segments()
            .iter()
            .map(|segment| match segment.is_placeholder().then(|| pending.next()).flatten() {
                Some(arg) => encode(arg),
                None => segment.as_str().to_string(),
            })
            .collect();

        let overflow = pending.map(|arg| encode(arg));
        match self.route.max_params().limit() {
            Some(max) => segments.extend(overflow.take(max)),
            None => segments.extend(overflow),
        }

        let mut out = format!("/{}", segments.join("/"));
        if !out.ends_with('/') {
            out.push('/');
        }

        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
                .collect();
            out.push('?');
            out.push_str(&pairs.join("&"));
        }

        out
    }
}

impl fmt::Display for Reverse<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output())
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Undo the form encoding applied by [`Reverse`] on a matched argument.
/// Invalid UTF-8 escapes leave the argument unchanged.
#[must_use]
pub fn decode_argument(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| raw.to_string(), |decoded| decoded.into_owned())
}
