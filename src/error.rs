//! Unified error types for routebank.
//!
//! Matching and reversal never fail; errors only come from the edges:
//! loading route tables ([`RouteBankError`], [`ValidationError`]) and
//! dispatching ([`DispatchError`](crate::dispatch::DispatchError)).
//! Error messages include contextual hints to guide the user toward a fix.

use std::path::PathBuf;

use crate::dispatch::DispatchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub route: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  route {}: {} -- {}", self.route, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RouteBankError {
    #[error("Route table not found: {}", path.display())]
    TableNotFound { path: PathBuf },

    #[error("Route table parse error in {path}:\n  {source}")]
    TableParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Route table validation failed:\n{}", format_errors(.errors))]
    TableValidation { errors: Vec<ValidationError> },

    #[error("Unsupported route table format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Unknown route: '{0}'")]
    UnknownRoute(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
