//! Command-line interface definitions.
//!
//! Every query subcommand triggers at most one feed refresh and prints its
//! result as JSON on stdout. Logs go to stderr.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::port::outbound::PositionMode;

/// Query live transit vehicle positions through a single-flight cache
#[derive(Parser, Debug)]
#[command(name = "vehicle-cache")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the feed base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the position mode [raw, corrected]
    #[arg(long, global = true)]
    pub mode: Option<PositionMode>,

    /// Print compact single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every known vehicle
    All(SinceArgs),

    /// Show one vehicle by id
    Vehicle(IdArgs),

    /// Show the vehicle serving a trip
    Trip(IdArgs),

    /// List vehicles inside a bounding box
    #[command(name = "box")]
    InBox(BoxArgs),

    /// Refresh once and print the refresh status
    Status,

    /// Keep polling the feed and log snapshot sizes until interrupted
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
pub struct SinceArgs {
    /// Only include vehicles updated at or after this watermark (epoch ms)
    #[arg(long, default_value_t = 0)]
    pub since: i64,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Identifier as reported by the feed
    pub id: String,
}

#[derive(Args, Debug)]
pub struct BoxArgs {
    /// Western longitude
    #[arg(allow_negative_numbers = true)]
    pub left: f64,
    /// Eastern longitude
    #[arg(allow_negative_numbers = true)]
    pub right: f64,
    /// Northern latitude
    #[arg(allow_negative_numbers = true)]
    pub top: f64,
    /// Southern latitude
    #[arg(allow_negative_numbers = true)]
    pub bottom: f64,

    #[command(flatten)]
    pub since: SinceArgs,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Poll interval; refreshes still respect the cache update delay
    #[arg(long, default_value_t = 1_000)]
    pub interval_ms: u64,
}

impl Cli {
    /// Log level implied by `-v` flags, if any.
    #[must_use]
    pub const fn log_level_override(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}
