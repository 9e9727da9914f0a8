//! Command handlers.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use super::command::{BoxArgs, Cli, Commands, WatchArgs};
use crate::application::storage::VehicleStorage;
use crate::domain::{RefreshStatus, TripId, VehicleId};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Resolve configuration from the file (if present), environment and flags.
///
/// A missing config file is not an error as long as the flags or the
/// environment supply a base URL.
#[allow(clippy::result_large_err)]
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if cli.config.exists() {
        Config::from_file(&cli.config)?
    } else {
        Config::default()
    };
    config.apply_env_overrides();
    if let Some(base_url) = &cli.base_url {
        config.feed.base_url.clone_from(base_url);
    }
    if let Some(mode) = cli.mode {
        config.feed.position_mode = mode;
    }
    if let Some(level) = cli.log_level_override() {
        config.logging.level = level.to_string();
    }
    config.validate()?;
    Ok(config)
}

/// Execute the selected subcommand.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    let feed = bootstrap::build_feed(config)?;
    let storage = bootstrap::build_storage(config, feed);

    match &cli.command {
        Commands::All(args) => print_json(&storage.get_all(args.since).await?, cli.compact),
        Commands::Vehicle(args) => print_json(
            &storage.get_by_id(&VehicleId::new(args.id.as_str())).await?,
            cli.compact,
        ),
        Commands::Trip(args) => print_json(
            &storage.get_by_trip_id(&TripId::new(args.id.as_str())).await?,
            cli.compact,
        ),
        Commands::InBox(args) => in_box(&storage, args, cli.compact).await,
        Commands::Status => {
            let status = storage.ensure_fresh().await;
            print_json(&status_json(status.as_ref(), &storage), cli.compact)
        }
        Commands::Watch(args) => watch(&storage, args).await,
    }
}

async fn in_box(storage: &VehicleStorage, args: &BoxArgs, compact: bool) -> Result<()> {
    let list = storage
        .get_in_box(args.left, args.right, args.top, args.bottom, args.since.since)
        .await?;
    print_json(&list, compact)
}

async fn watch(storage: &VehicleStorage, args: &WatchArgs) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_millis(args.interval_ms.max(1)));
    let mut last_seen = 0;
    loop {
        interval.tick().await;
        match storage.get_all(0).await {
            Ok(list) if list.last_update != last_seen => {
                last_seen = list.last_update;
                info!(
                    vehicles = list.vehicles.len(),
                    last_update = list.last_update,
                    "Snapshot updated"
                );
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "Snapshot unavailable"),
        }
    }
}

fn status_json(status: Option<&RefreshStatus>, storage: &VehicleStorage) -> serde_json::Value {
    let store = storage.store();
    match status {
        Some(RefreshStatus::Success {
            last_update,
            timestamp,
        }) => json!({
            "status": "success",
            "lastUpdate": last_update,
            "timestamp": timestamp,
            "vehicles": store.len(),
            "watermark": store.watermark(),
        }),
        Some(RefreshStatus::Error {
            error,
            last_update,
            timestamp,
        }) => json!({
            "status": "error",
            "error": error.to_string(),
            "lastUpdate": last_update,
            "timestamp": timestamp,
            "vehicles": store.len(),
            "watermark": store.watermark(),
        }),
        None => json!({ "status": "unknown" }),
    }
}

#[allow(clippy::result_large_err)]
fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
