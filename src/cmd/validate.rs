//! `routebank validate`: check a route table for errors.
//!
//! Loads the table through the same [`FileSource`](crate::config::sources::FileSource)
//! the other subcommands use and reports the outcome as human-readable
//! text or machine-readable JSON.

use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::model::RouteTable;
use crate::config::sources::from_path;
use crate::config::validation;
use crate::error::{RouteBankError, ValidationError};

pub async fn execute(args: &ValidateArgs) -> Result<(), RouteBankError> {
    let label = args.table.display().to_string();

    match from_path(&args.table)?.load_table().await {
        Ok(table) => {
            report_valid(&label, &table, &args.format);
            Ok(())
        }
        Err(RouteBankError::TableValidation { errors }) => {
            report_invalid(&label, &errors, &args.format);
            Err(RouteBankError::TableValidation { errors })
        }
        Err(e) => Err(e),
    }
}

fn report_valid(label: &str, table: &RouteTable, format: &OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("\u{2713} {}", validation::format_validation_report(label, table));
        }
        OutputFormat::Json => {
            let names: Vec<&str> = table.routes.iter().map(|r| r.name.as_str()).collect();
            let actions: usize = table.routes.iter().map(|r| r.action.as_slice().len()).sum();
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "routes": names,
                    "actions": actions,
                })
            );
        }
    }
}

fn report_invalid(label: &str, errors: &[ValidationError], format: &OutputFormat) {
    match format {
        OutputFormat::Text => {
            eprintln!("\u{2717} {label} has {} errors\n", errors.len());
            for error in errors {
                eprintln!("{error}");
            }
        }
        OutputFormat::Json => {
            let errors: Vec<serde_json::Value> = errors
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "route": e.route,
                        "field": e.field,
                        "message": e.message,
                        "suggestion": e.suggestion,
                    })
                })
                .collect();
            println!("{}", serde_json::json!({ "valid": false, "errors": errors }));
        }
    }
}
