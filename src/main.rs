use std::path::PathBuf;

use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::cli::handlers;
use tasklist::logging::{self, LogTarget};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = handlers::effective_config(&cli, &cwd)?;

    // The TUI owns the terminal, so it only logs to a file
    let target = match (&cli.log, cli.command) {
        (Some(target), _) => target.clone(),
        (None, None) => config
            .log
            .file
            .as_ref()
            .map_or(LogTarget::Off, |f| LogTarget::File(PathBuf::from(f))),
        (None, Some(_)) => LogTarget::Stderr,
    };
    logging::init_logging(&target, &handlers::log_directive(&cli, &config))?;
    if let Some(path) = &config_path {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    match cli.command {
        // No subcommand → launch TUI
        None => tasklist::tui::run(&config),
        Some(command) => handlers::dispatch(command, &config, cli.json),
    }
}
