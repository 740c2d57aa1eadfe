use clap::Parser;
use library_catalog::cli::Cli;
use library_catalog::config::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, CATALOG_STORE, etc.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config().logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Fail on a broken template before accepting requests
    once_cell::sync::Lazy::force(&library_catalog::views::VIEWS);

    let cli = Cli::parse();

    if let Err(e) = library_catalog::cli::run(cli).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
