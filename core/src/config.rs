//! Handles the configuration of the top50 tools.
//!
//! this module is responsible for parsing the Top50.toml file and merging in
//! environment overrides.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use std::{path::PathBuf, str::FromStr};

pub static DEFAULT_CONFIG: &str = include_str!("../Top50.toml");

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Where the chart snapshots live and whose charts are tracked.
    #[serde(default)]
    pub charts: ChartSettings,
}

impl Settings {
    /// Load settings from the config file and environment variables.
    ///
    /// The environment variables are prefixed with `TOP50_`.
    ///
    /// # Arguments
    ///
    /// * `config` - Path to the config file.
    /// * `data_dir` - Overrides the snapshot directory when given.
    /// * `log_level` - Overrides the configured log level when given.
    ///
    /// # Errors
    ///
    /// This function will return an error if the config file is not found or
    /// if the config file is invalid.
    #[inline]
    pub fn init(
        config: PathBuf,
        data_dir: Option<PathBuf>,
        log_level: Option<log::LevelFilter>,
    ) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from(config))
            .add_source(Environment::with_prefix("TOP50"))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        settings.charts.data_dir = shellexpand::tilde(&settings.charts.data_dir.to_string_lossy())
            .into_owned()
            .into();

        if let Some(data_dir) = data_dir {
            settings.charts.data_dir = data_dir;
        }

        if let Some(log_level) = log_level {
            settings.charts.log_level = log_level;
        }

        Ok(settings)
    }

    /// Get the (default) path to the config file.
    /// If the config file does not exist at this path, it will be created with the default config.
    ///
    /// See [`crate::get_config_dir`] for more information about where this default path is located.
    ///
    /// # Errors
    ///
    /// This function will return an error if the system config directory (e.g., `~/.config` on linux) could not be found, or if the config file was missing and could not be created.
    #[inline]
    pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
        match crate::get_config_dir() {
            Ok(config_dir) => {
                // if the config directory does not exist, create it
                if !config_dir.exists() {
                    std::fs::create_dir_all(&config_dir)?;
                }
                let config_file = config_dir.join("Top50.toml");

                if !config_file.exists() {
                    std::fs::write(&config_file, DEFAULT_CONFIG)?;
                }

                Ok(config_file)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Unable to find the config directory for top50.",
                ))
            }
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ChartSettings {
    /// Directory holding the chart snapshots, one subdirectory per user,
    /// one `YYYY-Www.json` file per imported week.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Users whose charts are tracked. The first entry is the default user
    /// for commands that take none.
    #[serde(default = "default_users")]
    pub users: Box<[String]>,
    /// What level of logging to use.
    /// Default is "info".
    #[serde(default = "default_log_level")]
    #[serde(deserialize_with = "de_log_level")]
    pub log_level: log::LevelFilter,
}

fn de_log_level<'de, D>(deserializer: D) -> Result<log::LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(log::LevelFilter::from_str(&s).unwrap_or_else(|_| default_log_level()))
}

fn default_data_dir() -> PathBuf {
    shellexpand::tilde("~/.local/share/top50").into_owned().into()
}

fn default_users() -> Box<[String]> {
    vec!["Walter".to_owned(), "Signe".to_owned()].into_boxed_slice()
}

const fn default_log_level() -> log::LevelFilter {
    log::LevelFilter::Info
}

impl Default for ChartSettings {
    #[inline]
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            users: default_users(),
            log_level: default_log_level(),
        }
    }
}
