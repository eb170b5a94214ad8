use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = routebank::cli::Cli::parse();
    if let Err(e) = routebank::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
