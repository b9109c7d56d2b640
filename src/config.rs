use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{dlog_debug, Error, Result};

/// Clock refresh period used when the config does not set one.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Locale tag such as `fr-FR`; falls back to the environment when unset.
    pub locale: Option<String>,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Directory holding `<lang>.toml` message overrides.
    pub messages_dir: Option<String>,
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            messages_dir: None,
        }
    }
}

impl Config {
    pub fn datenum_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".datenum"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::datenum_dir()?.join("config.toml"))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn messages_dir(&self) -> Option<PathBuf> {
        self.messages_dir.as_deref().map(expand_tilde)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        dlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            dlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        dlog_debug!(
            "Config loaded: locale={:?}, tick_interval_ms={}, messages_dir={:?}",
            config.locale,
            config.tick_interval_ms,
            config.messages_dir
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
