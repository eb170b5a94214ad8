//! `routebank match`: find the route a request would be dispatched to.
//!
//! Prints the selected route and its captured arguments. When nothing
//! matches, the text format lists why each route turned the request down
//! and the command fails with [`DispatchError::RouteNotFound`].

use crate::cli::{MatchArgs, OutputFormat};
use crate::dispatch::DispatchError;
use crate::error::RouteBankError;
use crate::route::{check, decode_argument, Bank, MatchOutcome, Request};

use super::load_bank;

pub async fn execute(args: &MatchArgs) -> Result<(), RouteBankError> {
    let bank = load_bank(&args.table).await?;
    let request = Request::new(args.method, &args.uri);
    report(&bank, &request, &args.format)
}

fn report(bank: &Bank, request: &Request, format: &OutputFormat) -> Result<(), RouteBankError> {
    let Some(found) = bank.requested_route(request) else {
        match format {
            OutputFormat::Text => {
                eprintln!("\u{2717} no route for {} {}\n", request.method(), request.uri());
                for route in bank.iter().rev() {
                    if let MatchOutcome::Rejected(reason) = check(request, route) {
                        eprintln!("  {}: {reason}", route.name());
                    }
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "matched": false,
                        "method": request.method(),
                        "uri": request.uri(),
                    })
                );
            }
        }
        return Err(DispatchError::RouteNotFound {
            method: request.method(),
            uri: request.uri().to_string(),
        }
        .into());
    };

    let decoded: Vec<String> = found.arguments.iter().map(|a| decode_argument(a)).collect();

    match format {
        OutputFormat::Text => {
            println!(
                "\u{2713} {} {} -> {} ({} {})",
                request.method(),
                request.uri(),
                found.route.name(),
                found.route.method(),
                found.route.pattern()
            );
            for (i, arg) in decoded.iter().enumerate() {
                println!("    arg[{i}]: {arg}");
            }
            for action in found.route.actions() {
                println!("    action: {action}");
            }
        }
        OutputFormat::Json => {
            let actions: Vec<String> =
                found.route.actions().iter().map(ToString::to_string).collect();
            println!(
                "{}",
                serde_json::json!({
                    "matched": true,
                    "route": found.route.name(),
                    "pattern": found.route.pattern(),
                    "arguments": decoded,
                    "actions": actions,
                })
            );
        }
    }

    Ok(())
}
