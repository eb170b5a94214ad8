//! The route registry.
//!
//! A [`Bank`] keeps routes in insertion order, keyed by name. Lookups for
//! a request walk the routes newest first, so a route registered later
//! shadows an earlier one with an overlapping pattern. Re-adding a name
//! replaces the route in its original slot.
//!
//! [`global`] exposes one process-wide bank behind a [`RwLock`]. Loaders
//! fill it at startup; request handling only takes read locks.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{LazyLock, RwLock};

use serde::Serialize;

use super::matcher::{check, MatchOutcome};
use super::{HttpMethod, MaxParams, Request, Route};

/// A route selected for a request together with the arguments captured
/// from that request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub arguments: Vec<String>,
}

/// One row of [`Bank::dump`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub method: HttpMethod,
    pub pattern: String,
    pub max_params: MaxParams,
    pub actions: Vec<String>,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            name: route.name().to_string(),
            method: route.method(),
            pattern: route.pattern().to_string(),
            max_params: route.max_params(),
            actions: route.actions().iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Bank {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
}

impl Bank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, replacing any route with the same name.
    pub fn add_route(&mut self, route: Route) {
        if let Some(&slot) = self.by_name.get(route.name()) {
            tracing::debug!(route = route.name(), "replacing route");
            self.routes[slot] = route;
            return;
        }

        tracing::debug!(
            route = route.name(),
            method = %route.method(),
            pattern = route.pattern(),
            "adding route"
        );
        self.by_name.insert(route.name().to_string(), self.routes.len());
        self.routes.push(route);
    }

    #[must_use]
    pub fn named_route(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&slot| &self.routes[slot])
    }

    /// The newest route matching the request, if any.
    #[must_use]
    pub fn requested_route(&self, request: &Request) -> Option<RouteMatch<'_>> {
        let found = self
            .routes
            .iter()
            .rev()
            .find_map(|route| match check(request, route) {
                MatchOutcome::Matched(arguments) => Some(RouteMatch { route, arguments }),
                MatchOutcome::Rejected(_) => None,
            });

        match &found {
            Some(m) => tracing::debug!(
                route = m.route.name(),
                method = %request.method(),
                uri = request.uri(),
                arguments = m.arguments.len(),
                "route selected"
            ),
            None => tracing::debug!(
                method = %request.method(),
                uri = request.uri(),
                "no route matched"
            ),
        }

        found
    }

    /// Reverse the named route with positional arguments. An unknown name
    /// yields an empty string.
    #[must_use]
    pub fn build_uri<I>(&self, name: &str, args: I) -> String
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.named_route(name).map_or_else(String::new, |route| {
            let mut reverse = route.reverse();
            reverse.add_args(args);
            reverse.output()
        })
    }

    pub fn clear(&mut self) {
        self.routes.clear();
        self.by_name.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Route> {
        self.routes.iter()
    }

    /// Snapshot of every route, newest first.
    #[must_use]
    pub fn dump(&self) -> Vec<RouteSummary> {
        self.routes.iter().rev().map(RouteSummary::from).collect()
    }

    /// [`dump`](Self::dump) rendered as an HTML table.
    #[must_use]
    pub fn dump_html(&self) -> String {
        let mut out = String::from(
            "<table>\n  <thead>\n    <tr>\n      <td>Route Name</td>\n      \
             <td>HTTP Method</td>\n      <td>Match String</td>\n      \
             <td>Max Parameters</td>\n      <td>Action</td>\n    </tr>\n  \
             </thead>\n  <tbody>\n",
        );

        for row in self.dump() {
            let actions: Vec<String> = row.actions.iter().map(|a| escape_html(a)).collect();
            // write! to String is infallible
            let _ = write!(
                out,
                "    <tr>\n      <td>{}</td>\n      <td>{}</td>\n      <td>{}</td>\n      \
                 <td>{}</td>\n      <td>{}</td>\n    </tr>\n",
                escape_html(&row.name),
                row.method,
                escape_html(&row.pattern),
                row.max_params,
                actions.join("<br>"),
            );
        }

        out.push_str("  </tbody>\n</table>\n");
        out
    }
}

impl Extend<Route> for Bank {
    fn extend<I: IntoIterator<Item = Route>>(&mut self, iter: I) {
        for route in iter {
            self.add_route(route);
        }
    }
}

impl FromIterator<Route> for Bank {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        let mut bank = Self::new();
        bank.extend(iter);
        bank
    }
}

static GLOBAL: LazyLock<RwLock<Bank>> = LazyLock::new(|| RwLock::new(Bank::new()));

/// The process-wide bank.
#[must_use]
pub fn global() -> &'static RwLock<Bank> {
    &GLOBAL
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
