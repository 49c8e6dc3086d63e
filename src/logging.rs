//! Tracing subscriber setup.
//!
//! Logs go to stderr, to a file (append mode, no ANSI), or nowhere. The TUI
//! owns the terminal, so it only ever logs to a file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stderr,
    File(PathBuf),
}

impl FromStr for LogTarget {
    type Err = std::convert::Infallible;

    /// `0`/`off`, `2`/`stderr`, anything else is a file path
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "0" | "off" | "" => LogTarget::Off,
            "2" | "stderr" => LogTarget::Stderr,
            path => LogTarget::File(PathBuf::from(path)),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid log filter '{0}'")]
    InvalidFilter(String),
    #[error("logging already initialized: {0}")]
    AlreadySet(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Build the filter: RUST_LOG when set, otherwise `default_directive`.
pub fn build_filter(default_directive: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|_| LoggingError::InvalidFilter(default_directive.to_string())),
    }
}

/// Install the global subscriber. Call once, before any other thread starts.
pub fn init_logging(target: &LogTarget, default_directive: &str) -> Result<(), LoggingError> {
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(build_filter(default_directive)?)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::OpenFile {
                    path: path.clone(),
                    source: e,
                })?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(build_filter(default_directive)?)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_target() {
        assert_eq!("off".parse::<LogTarget>(), Ok(LogTarget::Off));
        assert_eq!("0".parse::<LogTarget>(), Ok(LogTarget::Off));
        assert_eq!("stderr".parse::<LogTarget>(), Ok(LogTarget::Stderr));
        assert_eq!(
            "logs/tasklist.log".parse::<LogTarget>(),
            Ok(LogTarget::File(PathBuf::from("logs/tasklist.log")))
        );
    }

    #[test]
    fn off_target_installs_nothing() {
        assert!(init_logging(&LogTarget::Off, "warn").is_ok());
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let tmp = tempfile::TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let target = LogTarget::File(tmp.path().to_path_buf());
        assert!(matches!(
            init_logging(&target, "warn"),
            Err(LoggingError::OpenFile { .. })
        ));
    }
}
