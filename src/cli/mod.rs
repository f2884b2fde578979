pub mod commands;

use clap::{Parser, Subcommand};

use crate::domain::Source;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Scrape, cache and serve trending movie charts", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/marquee/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Chart to scrape, overriding the config file (flixpatrol or trakt)
    #[arg(short, long, global = true)]
    pub source: Option<Source>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server and the scheduled updater
    Serve {
        /// Address to listen on (e.g., "0.0.0.0:8787")
        #[arg(short, long)]
        bind: Option<String>,

        /// Don't run the scheduled updater alongside the server
        #[arg(long)]
        no_schedule: bool,
    },
    /// Scrape once and store the result
    Update,
    /// Print the cached snapshot
    Show,
    /// Run only the scheduled updater, in the foreground
    Schedule {
        /// Update interval (e.g., "1h", "30m", "6h", "1d")
        #[arg(short, long)]
        interval: Option<String>,

        /// Skip initial update on start
        #[arg(long)]
        no_initial_update: bool,
    },
}
