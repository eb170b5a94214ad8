//! Routebank is a URL routing and dispatch library.
//!
//! Routes pair an HTTP method with a `/`-delimited match pattern whose
//! segments are literals or typed placeholders (`:int`, `:num`, `:str`,
//! optionally bounded by `[n]` or `[min-max]`). A [`Bank`](route::Bank)
//! keeps routes by name and selects the newest route that accepts a
//! request. Routes can be reversed back into URLs, and a
//! [`Dispatcher`](dispatch::Dispatcher) checks that the selected route's
//! controller actions exist before handing them to the caller.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (validate, match, reverse, dump).
//! - [`config`] -- Route tables: serde model, validation, and the
//!   [`RouteLoader`](config::RouteLoader) trait with file-backed loaders.
//! - [`dispatch`] -- Resolving requests to executable controller actions.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`route`] -- Routes, segment matching, the registry, and URL reversal.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML route tables _(enabled by default)_ |
//! | `toml` | TOML route tables |
//! | `file-backends` | All file formats |
//! | `full` | All features |
//!
//! JSON route tables are always available.

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod route;
