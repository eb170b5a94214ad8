//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (validate, match, reverse, dump), and their associated
//! argument structs. The route table and logging flags have environment
//! variable equivalents.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::route::HttpMethod;

#[derive(Parser)]
#[command(
    name = "routebank",
    version,
    about = "Inspect route tables: match requests, reverse routes, dump the registry",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        routebank validate routes.yaml                 Check a route table\n  \
        routebank match GET /stuff/12/                 Which route handles a request\n  \
        routebank reverse 'Stuff View' 12 -q page=2    Build a URL for a route\n  \
        routebank dump --format html                   Render the registry"
)]
pub struct Cli {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a route table without loading it
    Validate(ValidateArgs),

    /// Find the route that handles a request
    Match(MatchArgs),

    /// Build a URL from a named route and arguments
    Reverse(ReverseArgs),

    /// List every registered route, newest first
    Dump(DumpArgs),
}

#[derive(Args)]
pub struct LogArgs {
    /// Log level
    #[arg(short, long, global = true, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, global = true, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
pub struct TableArgs {
    /// Route table path (.yaml, .json, .toml); defaults to ./routes.{yaml,yml,json,toml}
    #[arg(short, long, env = "ROUTE_TABLE")]
    pub table: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Route table to validate
    #[arg(default_value = "routes.yaml")]
    pub table: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        routebank match GET /view/1234/                Match against ./routes.yaml\n  \
        routebank match delete /stuff/9/ -t api.toml   Specific table\n  \
        routebank match GET '/search/?q=x' --format json")]
pub struct MatchArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// HTTP method (GET, POST, PUT, DELETE; any case)
    #[arg(value_parser = str::parse::<HttpMethod>)]
    pub method: HttpMethod,

    /// Request URI; any query string is ignored
    pub uri: String,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        routebank reverse 'Stuff View' 12              /stuff/12/\n  \
        routebank reverse Search -q q='how dy' -q p=2  /search/?q=how+dy&p=2")]
pub struct ReverseArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Route name
    pub name: String,

    /// Positional arguments, filling hint placeholders first
    pub args: Vec<String>,

    /// Query string pair (repeatable)
    #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub query: Vec<(String, String)>,
}

#[derive(Args)]
pub struct DumpArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: DumpFormat,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("'{raw}' is not KEY=VALUE"))
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum DumpFormat {
    Text,
    Json,
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_reverse_with_query_pairs() {
        let cli = Cli::try_parse_from([
            "routebank", "reverse", "Search", "a", "b", "-q", "q=how dy", "--query", "p=2",
        ])
        .unwrap();
        let Some(Commands::Reverse(args)) = cli.command else {
            panic!("expected reverse");
        };
        assert_eq!(args.name, "Search");
        assert_eq!(args.args, ["a", "b"]);
        assert_eq!(
            args.query,
            [("q".to_string(), "how dy".to_string()), ("p".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn rejects_query_without_equals() {
        assert!(Cli::try_parse_from(["routebank", "reverse", "Search", "-q", "novalue"]).is_err());
    }

    #[test]
    fn match_parses_the_method() {
        let cli = Cli::try_parse_from(["routebank", "match", "delete", "/stuff/9/"]).unwrap();
        let Some(Commands::Match(args)) = cli.command else {
            panic!("expected match");
        };
        assert_eq!(args.method, HttpMethod::Delete);
        assert_eq!(args.uri, "/stuff/9/");
    }

    #[test]
    fn match_rejects_unsupported_methods() {
        let err = Cli::try_parse_from(["routebank", "match", "PATCH", "/x/"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("'PATCH' is not a supported HTTP method"));
    }

    #[test]
    fn log_flags_are_global() {
        let cli = Cli::try_parse_from(["routebank", "dump", "--json", "-l", "debug"]).unwrap();
        assert!(cli.log.json);
        assert!(matches!(cli.log.log_level, LogLevel::Debug));
    }
}
