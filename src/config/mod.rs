//! Route tables: loading, validation and the pluggable loader seam.
//!
//! Defines the [`RouteLoader`] trait for anything that can produce
//! [`Route`]s (files, in-memory lists, code generated at build time) and
//! [`LoaderSet`] for running several loaders into one [`Bank`]. Submodules
//! provide the serde data model, validation logic, and the file-backed
//! loaders.

pub mod model;
pub mod sources;
pub mod validation;

use async_trait::async_trait;

use crate::error::RouteBankError;
use crate::route::{Bank, Route};

// async_trait is required here because RouteLoader is used as Box<dyn RouteLoader>
// and native async fn in traits (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait RouteLoader: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<Vec<Route>, RouteBankError>;
}

/// Routes built in code.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    routes: Vec<Route>,
}

impl StaticLoader {
    #[must_use]
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }
}

#[async_trait]
impl RouteLoader for StaticLoader {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn load(&self) -> Result<Vec<Route>, RouteBankError> {
        Ok(self.routes.clone())
    }
}

/// Runs loaders in order into one bank. Routes from later loaders shadow
/// overlapping routes from earlier ones, and replace them on a name clash.
#[derive(Default)]
pub struct LoaderSet {
    loaders: Vec<Box<dyn RouteLoader>>,
}

impl LoaderSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, loader: impl RouteLoader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    pub fn push(&mut self, loader: Box<dyn RouteLoader>) -> &mut Self {
        self.loaders.push(loader);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Load every source into `bank`. Stops at the first failing loader;
    /// routes from loaders that already ran stay in the bank.
    pub async fn populate(&self, bank: &mut Bank) -> Result<usize, RouteBankError> {
        let mut total = 0;
        for loader in &self.loaders {
            let routes = loader.load().await.inspect_err(|e| {
                tracing::warn!(loader = loader.name(), error = %e, "route loader failed");
            })?;
            tracing::info!(loader = loader.name(), routes = routes.len(), "routes loaded");
            total += routes.len();
            bank.extend(routes);
        }
        Ok(total)
    }
}
