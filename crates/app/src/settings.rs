//! Runtime settings.
//!
//! Read in order from the optional TOML file, `SPENDLOG_*` environment
//! variables and command-line overrides; later sources win.
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/spendlog.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the storage slots.
    pub data_dir: String,
    /// Slot the transaction list is kept in.
    pub storage_key: String,
    /// Log level for `spendlog` and `engine` targets.
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            storage_key: engine::DEFAULT_KEY.to_string(),
            level: "info".to_string(),
        }
    }
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub config: Option<&'a str>,
    pub data_dir: Option<&'a str>,
}

pub fn load(overrides: &Overrides<'_>) -> Result<AppConfig> {
    let config_path = overrides.config.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPENDLOG"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_dir) = overrides.data_dir {
        settings.data_dir = data_dir.to_string();
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = load(&Overrides {
            config: Some("does/not/exist.toml"),
            data_dir: None,
        })
        .unwrap();
        assert_eq!(settings.storage_key, "transactions");
        assert_eq!(settings.level, "info");
    }

    #[test]
    fn cli_data_dir_wins() {
        let settings = load(&Overrides {
            config: Some("does/not/exist.toml"),
            data_dir: Some("/tmp/spendlog-test"),
        })
        .unwrap();
        assert_eq!(settings.data_dir, "/tmp/spendlog-test");
    }
}
