//! File-backed route tables.
//!
//! [`TableFormat`] maps a file extension to a serde deserializer (YAML and
//! TOML gated by feature flags, JSON always on). [`FileSource`] is the
//! [`RouteLoader`](super::RouteLoader) over one table file, and
//! [`resolve_table_path`] finds the table when none is named.

pub mod file_source;

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::model::RouteTable;
use crate::error::RouteBankError;
pub use file_source::FileSource;

/// File names probed, in order, when no route table is given explicitly.
pub const DEFAULT_TABLES: &[&str] = &["routes.yaml", "routes.yml", "routes.json", "routes.toml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    #[cfg(feature = "yaml")]
    Yaml,
    Json,
    #[cfg(feature = "toml")]
    Toml,
}

impl TableFormat {
    pub fn from_extension(ext: &str) -> Result<Self, RouteBankError> {
        match ext.to_ascii_lowercase().as_str() {
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            #[cfg(feature = "toml")]
            "toml" => Ok(Self::Toml),
            _ => Err(RouteBankError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, RouteBankError> {
        Self::from_extension(path.extension().and_then(|e| e.to_str()).unwrap_or(""))
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "yaml")]
            Self::Yaml => "yaml",
            Self::Json => "json",
            #[cfg(feature = "toml")]
            Self::Toml => "toml",
        }
    }

    pub fn parse(self, content: &str) -> Result<RouteTable, Box<dyn Error + Send + Sync>> {
        match self {
            #[cfg(feature = "yaml")]
            Self::Yaml => Ok(serde_yml::from_str(content)?),
            Self::Json => Ok(serde_json::from_str(content)?),
            #[cfg(feature = "toml")]
            Self::Toml => Ok(toml::from_str(content)?),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a route table string based on file extension. `label` names the
/// table in parse errors.
pub fn parse_table_str(ext: &str, content: &str, label: &str) -> Result<RouteTable, RouteBankError> {
    TableFormat::from_extension(ext)?
        .parse(content)
        .map_err(|source| RouteBankError::TableParse {
            path: label.to_string(),
            source,
        })
}

/// Pick the loader for a route table file by its extension.
pub fn from_path(path: &Path) -> Result<FileSource, RouteBankError> {
    Ok(FileSource::new(path.to_path_buf(), TableFormat::from_path(path)?))
}

/// Use `explicit` when given, otherwise the first of [`DEFAULT_TABLES`]
/// present in the working directory.
pub async fn resolve_table_path(explicit: Option<&Path>) -> Result<PathBuf, RouteBankError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    for name in DEFAULT_TABLES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected route table");
            return Ok(path);
        }
    }

    Err(RouteBankError::TableNotFound {
        path: PathBuf::from(DEFAULT_TABLES[0]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_map_to_formats() {
        assert_eq!(TableFormat::from_extension("json").unwrap(), TableFormat::Json);
        assert_eq!(TableFormat::from_extension("JSON").unwrap(), TableFormat::Json);
        assert_eq!(
            TableFormat::from_path(Path::new("conf/routes.json")).unwrap().name(),
            "json"
        );
        assert!(TableFormat::from_path(Path::new("routes")).is_err());
        assert!(TableFormat::from_extension("ini").is_err());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yml_is_yaml() {
        assert_eq!(TableFormat::from_extension("yml").unwrap(), TableFormat::Yaml);
    }

    #[test]
    fn parse_errors_carry_the_label() {
        let err = parse_table_str("json", "[1, 2", "inline table").unwrap_err();
        assert!(matches!(err, RouteBankError::TableParse { ref path, .. } if path == "inline table"));
    }

    #[tokio::test]
    async fn explicit_path_wins() {
        let path = resolve_table_path(Some(Path::new("elsewhere.toml"))).await.unwrap();
        assert_eq!(path, PathBuf::from("elsewhere.toml"));
    }
}
