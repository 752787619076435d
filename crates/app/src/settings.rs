use std::path::PathBuf;

use finance_engine::{DEFAULT_KEY, DEFAULT_RECENT_LIMIT};
use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/finance.toml";
const ENV_PREFIX: &str = "FINANCE";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding one JSON file per storage key.
    pub data_dir: PathBuf,
    /// Name of the slot holding the entries.
    pub storage_key: String,
    pub currency_symbol: String,
    pub recent_limit: usize,
    /// Default directory for CSV reports.
    pub export_dir: PathBuf,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage_key: DEFAULT_KEY.to_string(),
            currency_symbol: "$".to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            export_dir: PathBuf::from("."),
            level: "info".to_string(),
        }
    }
}

/// Layers the config file, `FINANCE_*` environment variables and command
/// line overrides, in increasing priority.
pub fn load(cli: &Cli) -> Result<AppConfig> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut settings = from_sources(config_path, ENV_PREFIX)?;

    if let Some(data_dir) = &cli.data_dir {
        settings.data_dir = data_dir.clone();
    }
    if let Some(symbol) = &cli.currency_symbol {
        settings.currency_symbol = symbol.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.level = level.clone();
    }

    Ok(settings)
}

fn from_sources(config_path: &str, env_prefix: &str) -> Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix(env_prefix).try_parsing(true));
    Ok(builder.build()?.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = from_sources(path.to_str().unwrap(), "FINANCE_TEST_ABSENT").unwrap();
        assert_eq!(settings, AppConfig::default());
        assert_eq!(settings.storage_key, "financeEntries");
        assert_eq!(settings.recent_limit, 50);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finance.toml");
        std::fs::write(
            &path,
            "data_dir = \"/var/lib/finance\"\ncurrency_symbol = \"€\"\nrecent_limit = 10\n",
        )
        .unwrap();

        let settings = from_sources(path.to_str().unwrap(), "FINANCE_TEST_FILE").unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/finance"));
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.recent_limit, 10);
        assert_eq!(settings.level, "info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "recent_limit = \"many\"\n").unwrap();
        assert!(from_sources(path.to_str().unwrap(), "FINANCE_TEST_BROKEN").is_err());
    }
}
