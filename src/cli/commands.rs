use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogTarget;

#[derive(Parser)]
#[command(name = "tasklist", about = concat!("tasklist v", env!("CARGO_PKG_VERSION"), " - a to-do list seeded from the web"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fetch seed tasks from this URL
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Number of seed tasks to fetch
    #[arg(long, global = true, value_name = "N")]
    pub limit: Option<usize>,

    /// Log destination: off, stderr, or a file path
    #[arg(long, global = true, value_name = "off|stderr|FILE")]
    pub log: Option<LogTarget>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Fetch the seed tasks and print them
    List,
    /// Print the effective configuration
    Config,
}
