use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use vehicle_cache::adapter::inbound::cli::command::Cli;
use vehicle_cache::adapter::inbound::cli::run;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match run::resolve_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(2);
        }
    };

    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "vehicle-cache starting");

    tokio::select! {
        result = run::execute(&cli, &config) => {
            if let Err(e) = result {
                error!(error = %e, code = e.status_code(), "Command failed");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }
}
