use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use household_tax_engine::api::{AppState, create_router};
use household_tax_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "household-tax-engine",
    about = "Household income tax, Medicare levy and negative gearing calculator"
)]
struct Cli {
    #[arg(long, default_value = "./config/au_2024_25", help = "Directory holding the rate set")]
    config: PathBuf,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let loader = match ConfigLoader::load(&cli.config) {
        Ok(loader) => loader,
        Err(e) => {
            tracing::error!(path = %cli.config.display(), error = %e, "Failed to load rate set");
            std::process::exit(1);
        }
    };

    let app = create_router(AppState::new(loader));
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "household tax engine listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
