use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "TASKLIST_CONFIG";
/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "tasklist.toml";

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Find the config file: the env override first, then `tasklist.toml` in `dir`.
pub fn discover_config(dir: &Path, env_value: Option<OsString>) -> Option<PathBuf> {
    if let Some(value) = env_value
        && !value.is_empty()
    {
        return Some(PathBuf::from(value));
    }
    let local = dir.join(CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Read and parse a config file
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Load the config from an explicit path, a discovered file, or defaults.
/// Returns the config and the file it came from (if any).
pub fn load_config(
    explicit: Option<&Path>,
    dir: &Path,
    env_value: Option<OsString>,
) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover_config(dir, env_value),
    };
    match path {
        Some(p) => {
            let config = read_config(&p)?;
            Ok((config, Some(p)))
        }
        None => Ok((Config::default(), None)),
    }
}

/// Serialize the effective config back to TOML
pub fn render_config(config: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::DEFAULT_ENDPOINT;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r##"[seed]
endpoint = "http://localhost:8080/todos"
limit = 5

[ui]
show_key_hints = false

[ui.colors]
highlight = "#112233"

[log]
file = "tasklist.log"
"##
    }

    #[test]
    fn defaults_when_nothing_found() {
        let tmp = TempDir::new().unwrap();
        let (config, path) = load_config(None, tmp.path(), None).unwrap();
        assert_eq!(path, None);
        assert_eq!(config, Config::default());
        assert_eq!(config.seed.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.seed.limit, 10);
        assert_eq!(config.seed.timeout_secs, 30);
        assert_eq!(config.log.level, "warn");
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), sample_config()).unwrap();

        let (config, path) = load_config(None, tmp.path(), None).unwrap();

        assert_eq!(path, Some(tmp.path().join(CONFIG_FILE)));
        assert_eq!(config.seed.endpoint, "http://localhost:8080/todos");
        assert_eq!(config.seed.limit, 5);
        assert_eq!(config.seed.timeout_secs, 30);
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.ui.colors.get("highlight").map(String::as_str), Some("#112233"));
        assert_eq!(config.log.file.as_deref(), Some("tasklist.log"));
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn env_value_wins_over_local_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        let other = tmp.path().join("other.toml");

        let found = discover_config(tmp.path(), Some(other.clone().into_os_string()));
        assert_eq!(found, Some(other));

        // An empty value is treated as unset
        let found = discover_config(tmp.path(), Some(OsString::new()));
        assert_eq!(found, Some(tmp.path().join(CONFIG_FILE)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = load_config(Some(&missing), tmp.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "[seed\nlimit = ").unwrap();
        assert!(matches!(read_config(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn rendered_config_parses_back() {
        let mut config = Config::default();
        config.seed.limit = 3;
        let text = render_config(&config).unwrap();
        assert!(text.contains("limit = 3"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
