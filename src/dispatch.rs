//! Turning a request into the controller actions to run.
//!
//! The [`Dispatcher`] resolves a [`Request`] through a [`Bank`] and checks
//! every action of the selected route against a [`ControllerCatalog`],
//! which stands in for "does this controller and method exist". The two
//! failure modes stay distinct: no route matched
//! ([`DispatchError::RouteNotFound`]) versus a route matched but cannot be
//! executed ([`DispatchError::ActionNotFound`]).
//!
//! Running a controller is left to the caller's invoker passed to
//! [`Dispatch::execute`].

use std::collections::{HashMap, HashSet};

use crate::route::action::qualify_class;
use crate::route::{Action, Bank, HttpMethod, Request, Route};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DispatchError {
    #[error("no route found for {method} {uri}")]
    RouteNotFound { method: HttpMethod, uri: String },

    #[error("route '{route}' has an action that cannot be executed: '{action}'")]
    ActionNotFound { route: String, action: String },
}

/// Knows which controllers and methods can be invoked.
pub trait ControllerCatalog {
    fn has_controller(&self, class: &str) -> bool;
    fn has_method(&self, class: &str, method: &str) -> bool;
}

/// A fixed set of controllers and their methods. Class names are
/// normalized the same way [`Action`] normalizes them.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    controllers: HashMap<String, HashSet<String>>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_controller<I, S>(mut self, class: &str, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register(class, methods);
        self
    }

    pub fn register<I, S>(&mut self, class: &str, methods: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.controllers
            .entry(qualify_class(class))
            .or_default()
            .extend(methods.into_iter().map(Into::into));
        self
    }
}

impl ControllerCatalog for StaticCatalog {
    fn has_controller(&self, class: &str) -> bool {
        self.controllers.contains_key(class)
    }

    fn has_method(&self, class: &str, method: &str) -> bool {
        self.controllers
            .get(class)
            .is_some_and(|methods| methods.contains(method))
    }
}

/// A route that matched and passed verification, ready to run.
#[derive(Debug, Clone)]
pub struct Dispatch<'a> {
    route: &'a Route,
    arguments: Vec<String>,
}

impl<'a> Dispatch<'a> {
    #[must_use]
    pub const fn route(&self) -> &'a Route {
        self.route
    }

    #[must_use]
    pub fn actions(&self) -> &'a [Action] {
        self.route.actions()
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Call `invoke` for every action in order with the matched arguments.
    /// Returns the last action's result, or `None` for a route without
    /// actions.
    pub fn execute<T, F>(&self, mut invoke: F) -> Option<T>
    where
        F: FnMut(&Action, &[String]) -> T,
    {
        let mut last = None;
        for action in self.actions() {
            tracing::debug!(route = self.route.name(), action = %action, "executing action");
            last = Some(invoke(action, &self.arguments));
        }
        last
    }
}

pub struct Dispatcher<'a, C> {
    bank: &'a Bank,
    catalog: &'a C,
}

impl<'a, C: ControllerCatalog> Dispatcher<'a, C> {
    #[must_use]
    pub const fn new(bank: &'a Bank, catalog: &'a C) -> Self {
        Self { bank, catalog }
    }

    pub fn resolve(&self, request: &Request) -> Result<Dispatch<'a>, DispatchError> {
        let Some(found) = self.bank.requested_route(request) else {
            return Err(DispatchError::RouteNotFound {
                method: request.method(),
                uri: request.uri().to_string(),
            });
        };

        if let Some(action) = found.route.actions().iter().find(|a| !self.is_executable(a)) {
            tracing::warn!(
                route = found.route.name(),
                action = %action,
                "route matched but an action cannot be executed"
            );
            return Err(DispatchError::ActionNotFound {
                route: found.route.name().to_string(),
                action: action.to_string(),
            });
        }

        Ok(Dispatch {
            route: found.route,
            arguments: found.arguments,
        })
    }

    fn is_executable(&self, action: &Action) -> bool {
        action.is_ready()
            && self.catalog.has_controller(action.controller_class())
            && self
                .catalog
                .has_method(action.controller_class(), action.method())
    }
}
