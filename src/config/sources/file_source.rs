//! Route tables read from disk.
//!
//! [`FileSource`] reads a table asynchronously via Tokio, parses it in its
//! [`TableFormat`], validates it, and builds routes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::TableFormat;
use crate::config::model::RouteTable;
use crate::config::validation::validate;
use crate::config::RouteLoader;
use crate::error::RouteBankError;
use crate::route::Route;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: TableFormat,
}

impl FileSource {
    #[must_use]
    pub const fn new(path: PathBuf, format: TableFormat) -> Self {
        Self { path, format }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn format(&self) -> TableFormat {
        self.format
    }

    /// Read, parse and validate the table without building routes.
    pub async fn load_table(&self) -> Result<RouteTable, RouteBankError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => RouteBankError::TableNotFound {
                    path: self.path.clone(),
                },
                _ => RouteBankError::Io(e),
            })?;

        let table = self
            .format
            .parse(&content)
            .map_err(|source| RouteBankError::TableParse {
                path: self.path.display().to_string(),
                source,
            })?;

        validate(&table).map_err(|errors| RouteBankError::TableValidation { errors })?;
        Ok(table)
    }
}

#[async_trait]
impl RouteLoader for FileSource {
    fn name(&self) -> &'static str {
        self.format.name()
    }

    async fn load(&self) -> Result<Vec<Route>, RouteBankError> {
        let table = self.load_table().await?;
        tracing::debug!(
            path = %self.path.display(),
            format = %self.format,
            routes = table.routes.len(),
            "route table parsed"
        );
        Ok(table.to_routes())
    }
}
