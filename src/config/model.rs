//! Serde data structures for route table files.
//!
//! A [`RouteTable`] is an optional action prefix plus a list of
//! [`RouteDef`]s. All types use `deny_unknown_fields` for strict parsing.
//!
//! ```yaml
//! action_prefix: Metrol\Controller
//! routes:
//!   - name: Stuff View
//!     match: /stuff/:int/
//!     method: GET
//!     params: 0
//!     action: Stuff:view
//! ```

use serde::{Deserialize, Serialize};

use crate::route::{Action, Bank, Route};

fn default_method() -> String {
    "GET".to_string()
}

fn is_default_method(v: &str) -> bool {
    v.eq_ignore_ascii_case("GET")
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTable {
    /// Controller namespace prepended to relative action strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_prefix: Option<String>,

    pub routes: Vec<RouteDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDef {
    pub name: String,

    #[serde(rename = "match")]
    pub pattern: String,

    #[serde(default = "default_method", skip_serializing_if = "is_default_method")]
    pub method: String,

    /// Trailing parameters allowed beyond the pattern. Absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<usize>,

    #[serde(default, skip_serializing_if = "ActionList::is_empty")]
    pub action: ActionList,
}

/// One `Class:method` string or a list of them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ActionList {
    One(String),
    Many(Vec<String>),
}

impl Default for ActionList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl ActionList {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(action) => std::slice::from_ref(action),
            Self::Many(actions) => actions,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl RouteTable {
    /// The action string a route definition resolves to, after the table's
    /// prefix is applied to relative class names.
    #[must_use]
    pub fn qualified_action(&self, action: &str) -> String {
        let absolute = action.starts_with(['\\', '/', '.']);
        match self.action_prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() && !absolute => format!("{prefix}\\{action}"),
            _ => action.to_string(),
        }
    }

    /// Build routes in file order. Call [`validate`](super::validation::validate)
    /// first; invalid methods fall back to GET and unparseable actions are kept
    /// as not-ready actions.
    #[must_use]
    pub fn to_routes(&self) -> Vec<Route> {
        self.routes
            .iter()
            .map(|def| {
                let mut route = Route::new(def.name.clone()).with_match(def.pattern.clone());
                route
                    .set_http_method(&def.method)
                    .set_max_params(def.params);
                for action in def.action.as_slice() {
                    route.add_action(Action::parse(&self.qualified_action(action)));
                }
                route
            })
            .collect()
    }

    /// Add every route to `bank`, in file order.
    pub fn load_into(&self, bank: &mut Bank) {
        bank.extend(self.to_routes());
    }
}
