//! Controller actions attached to a route.
//!
//! An [`Action`] names a controller and the method to call on it. Class
//! names are normalized to a fully qualified `::`-separated form, so
//! `Metrol\Controller\Stuff`, `Metrol/Controller/Stuff`,
//! `Metrol.Controller.Stuff` and `Metrol_Controller_Stuff` all become
//! `::Metrol::Controller::Stuff`.

use std::fmt;

const SEPARATOR: &str = "::";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    controller_class: String,
    method: String,
}

impl Action {
    #[must_use]
    pub fn new(controller_class: &str, method: &str) -> Self {
        let mut action = Self::default();
        action
            .set_controller_class(controller_class)
            .set_controller_method(method);
        action
    }

    /// Parse a `Class:method` string.
    ///
    /// Runs of `:` count as a single delimiter. Anything that does not leave
    /// exactly one delimiter produces an empty action that is not ready.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut action = Self::default();
        action.set_action(text);
        action
    }

    pub fn set_action(&mut self, text: &str) -> &mut Self {
        let collapsed = collapse_colons(text);
        let mut parts = collapsed.split(':');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(class), Some(method), None) => {
                self.set_controller_class(class).set_controller_method(method);
            }
            _ => tracing::debug!(action = text, "ignoring malformed action"),
        }

        self
    }

    pub fn set_controller_class(&mut self, class: &str) -> &mut Self {
        self.controller_class = qualify_class(class);
        self
    }

    /// Anything from the first `(` on is dropped and whitespace runs become `_`.
    pub fn set_controller_method(&mut self, method: &str) -> &mut Self {
        let name = method.split('(').next().unwrap_or_default();
        self.method = name.split_whitespace().collect::<Vec<_>>().join("_");
        self
    }

    #[must_use]
    pub fn controller_class(&self) -> &str {
        &self.controller_class
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.controller_class.is_empty() && !self.method.is_empty()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.controller_class, self.method)
    }
}

/// Normalize a controller class name to its fully qualified form.
///
/// Whitespace is removed, `\`, `/`, `.`, `_` and `:` all act as
/// separators, and the result is `::`-joined with a leading `::`. A name with no path parts
/// left yields an empty string.
#[must_use]
pub fn qualify_class(class: &str) -> String {
    let path: Vec<&str> = class
        .split(|c: char| matches!(c, '\\' | '/' | '.' | '_' | ':'))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    let mut qualified = String::with_capacity(class.len() + SEPARATOR.len());
    for part in path {
        qualified.push_str(SEPARATOR);
        qualified.extend(part.chars().filter(|c| !c.is_whitespace()));
    }
    qualified
}

fn collapse_colons(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == ':' && out.ends_with(':') {
            continue;
        }
        out.push(c);
    }
    out
}
