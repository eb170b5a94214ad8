//! `routebank dump`: list the routes of a table, newest first.

use crate::cli::{DumpArgs, DumpFormat};
use crate::error::RouteBankError;

use super::load_bank;

pub async fn execute(args: &DumpArgs) -> Result<(), RouteBankError> {
    let bank = load_bank(&args.table).await?;

    match args.format {
        DumpFormat::Text => {
            for row in bank.dump() {
                println!("{}  {} {}", row.name, row.method, row.pattern);
                println!("    params: {}", row.max_params);
                for action in &row.actions {
                    println!("    action: {action}");
                }
            }
        }
        DumpFormat::Json => {
            let rows = serde_json::to_string_pretty(&bank.dump())
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            println!("{rows}");
        }
        DumpFormat::Html => print!("{}", bank.dump_html()),
    }

    Ok(())
}
