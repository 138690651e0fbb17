use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "circlite")]
#[command(about = "Friend-circle feed reader with a fishing mini-game")]
#[command(version)]
pub struct Cli {
    /// Database path override
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Feed API base URL override (the document lives at <base>all.json)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Articles per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Cache time-to-live in milliseconds
    #[arg(long, global = true)]
    pub ttl_ms: Option<i64>,

    /// Disable the fishing mechanic (plain random picks, no counters)
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive widget
    Run,

    /// Fetch the feed and print the first page
    Fetch {
        /// Bypass the cache and hit the network
        #[arg(long)]
        refresh: bool,
    },

    /// Show feed statistics and fishing progress
    Stats,

    /// Inspect or clear the cached feed
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Report the cached payload's age and freshness
    Status,

    /// Drop the cached payload
    Clear,
}
