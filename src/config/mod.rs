mod file_config;

pub use file_config::{FileConfig, SessionConfig};

use crate::reading_list::StorageKeys;
use crate::session::SessionSettings;
use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub initial_tabs: usize,
    pub logging_level: LevelFilter,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            db_path: None,
            initial_tabs: 1,
            logging_level: LevelFilter::INFO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    /// None keeps the reading list in memory for the lifetime of the process.
    pub db_path: Option<PathBuf>,
    pub initial_tabs: usize,
    pub logging_level: LevelFilter,
    pub session: SessionSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("catalog_path must be given on the command line or in config file")
            })?;
        if !catalog_path.is_file() {
            bail!("Catalog file does not exist: {:?}", catalog_path);
        }

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone());
        if let Some(parent) = db_path.as_ref().and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let initial_tabs = file.initial_tabs.unwrap_or(cli.initial_tabs);
        if initial_tabs == 0 {
            bail!("initial_tabs must be at least 1");
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or(cli.logging_level);

        // Session settings - merge file config with defaults
        let session_file = file.session.unwrap_or_default();
        let defaults = SessionSettings::default();
        let session = SessionSettings {
            channel_name: session_file
                .channel_name
                .unwrap_or(defaults.channel_name),
            storage_keys: StorageKeys {
                reading_list: session_file
                    .reading_list_key
                    .unwrap_or(defaults.storage_keys.reading_list),
                available: session_file
                    .available_key
                    .unwrap_or(defaults.storage_keys.available),
            },
            refresh_available_on_filter_change: session_file
                .refresh_available_on_filter_change
                .unwrap_or(defaults.refresh_available_on_filter_change),
        };
        if session.storage_keys.reading_list == session.storage_keys.available {
            bail!(
                "reading_list_key and available_key must differ (both are {:?})",
                session.storage_keys.available
            );
        }

        Ok(Self {
            catalog_path,
            db_path,
            initial_tabs,
            logging_level,
            session,
        })
    }
}

fn parse_logging_level(s: &str) -> Option<LevelFilter> {
    s.trim().parse().ok()
}
