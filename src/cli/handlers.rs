use std::env;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, CONFIG_ENV, ConfigError};
use crate::io::seed::{self, HttpSource, TaskSource};
use crate::model::config::Config;
use crate::model::task::TaskStore;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Load the config file (if any) and apply the command-line overrides
pub fn effective_config(cli: &Cli, dir: &Path) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let (mut config, path) =
        config_io::load_config(cli.config.as_deref(), dir, env::var_os(CONFIG_ENV))?;
    apply_overrides(&mut config, cli);
    Ok((config, path))
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref endpoint) = cli.endpoint {
        config.seed.endpoint = endpoint.clone();
    }
    if let Some(limit) = cli.limit {
        config.seed.limit = limit;
    }
}

/// Filter directive used when RUST_LOG is unset
pub fn log_directive(cli: &Cli, config: &Config) -> String {
    if cli.verbose {
        "debug".to_string()
    } else {
        config.log.level.clone()
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(
    command: Commands,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::List => cmd_list(config, json),
        Commands::Config => cmd_config(config, json),
    }
}

fn cmd_list(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = HttpSource::new(&config.seed)?;
    let origin = source.describe();
    let mut store = TaskStore::new();
    if seed::seed_store(&mut store, &source, config.seed.limit).is_none() {
        return Err(format!("could not load tasks from {}", origin).into());
    }

    if json {
        let out = ListJson {
            endpoint: origin,
            fetched_at: Local::now(),
            tasks: store.tasks().iter().map(task_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if store.is_empty() {
        println!("(no tasks)");
    } else {
        for task in store.tasks() {
            for line in format_task_tree(task, 0) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cmd_config(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", config_io::render_config(config)?);
    }
    Ok(())
}
