//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`validate`], [`match_route`], [`reverse`] or
//! [`dump`]. Each handler lives in its own submodule.

pub mod dump;
pub mod match_route;
pub mod reverse;
pub mod validate;

use crate::cli::{Cli, Commands, TableArgs};
use crate::config::sources::{from_path, resolve_table_path};
use crate::config::LoaderSet;
use crate::error::RouteBankError;
use crate::logging;
use crate::route::Bank;

pub async fn dispatch(cli: Cli) -> Result<(), RouteBankError> {
    let format = logging::resolve_format(cli.log.pretty, cli.log.json);
    logging::init(&cli.log.log_level, format);

    match cli.command {
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
        Some(Commands::Match(ref args)) => match_route::execute(args).await,
        Some(Commands::Reverse(ref args)) => reverse::execute(args).await,
        Some(Commands::Dump(ref args)) => dump::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

/// Resolve the table named on the command line (or the default one) and
/// load it into a fresh bank.
pub async fn load_bank(args: &TableArgs) -> Result<Bank, RouteBankError> {
    let path = resolve_table_path(args.table.as_deref()).await?;
    let loaders = LoaderSet::new().with(from_path(&path)?);

    let mut bank = Bank::new();
    loaders.populate(&mut bank).await?;
    Ok(bank)
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  routebank v{version}: URL routing tables\n\n  \
         No command provided. To get started:\n\n    \
         routebank validate routes.yaml          Check a route table\n    \
         routebank match GET /view/12/           Match against ./routes.yaml\n    \
         routebank dump -t api.json              List the routes of a table\n    \
         routebank --help                        See all commands and options\n"
    );
}
