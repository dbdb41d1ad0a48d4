// Command line and environment configuration

use clap::Parser;

/// Backend used when neither a flag nor the environment names one.
pub const DEFAULT_URL: &str = "http://localhost:5000";

/// Desktop dashboard for a MegaRAID controller backend.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Base URL of the controller backend
    #[arg(long, env = "RAID_DASHBOARD_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "RAID_DASHBOARD_LOG", default_value = "info")]
    pub log_level: String,

    /// Load every panel once, print it as text and exit
    #[arg(long)]
    pub snapshot: bool,
}
