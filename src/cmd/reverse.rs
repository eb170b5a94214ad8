//! `routebank reverse`: build a URL from a named route.

use crate::cli::ReverseArgs;
use crate::error::RouteBankError;

use super::load_bank;

pub async fn execute(args: &ReverseArgs) -> Result<(), RouteBankError> {
    let bank = load_bank(&args.table).await?;

    let route = bank
        .named_route(&args.name)
        .ok_or_else(|| RouteBankError::UnknownRoute(args.name.clone()))?;

    let mut reverse = route.reverse();
    reverse.add_args(&args.args);
    for (key, value) in &args.query {
        reverse.add_get(key.as_str(), value);
    }

    println!("{reverse}");
    Ok(())
}
