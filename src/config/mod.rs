use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::errors::BookingError;
use crate::utils;

const TMP_SUFFIX: &str = "tmp";

/// User preferences and simulated timings for the booking wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub plain_mode: bool,
    pub high_contrast: bool,
    pub location_delay_ms: u64,
    pub payment_delay_ms: u64,
    pub tracking_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            plain_mode: false,
            high_contrast: false,
            location_delay_ms: 1500,
            payment_delay_ms: 2000,
            tracking_interval_ms: 3000,
        }
    }
}

impl Config {
    pub fn location_delay(&self) -> Duration {
        Duration::from_millis(self.location_delay_ms)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    pub fn tracking_interval(&self) -> Duration {
        Duration::from_millis(self.tracking_interval_ms)
    }

    /// Formats an integer rupee amount with the configured symbol.
    pub fn money(&self, amount: i64) -> String {
        if amount < 0 {
            format!("-{}{}", self.currency_symbol, -amount)
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(utils::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: utils::config_file_in(&base),
        }
    }

    /// Loads the configuration, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<Config, BookingError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config = serde_json::from_str(&data)?;
            tracing::debug!(path = %self.path.display(), "loaded configuration");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), BookingError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), BookingError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tracking_interval(), Duration::from_secs(3));
    }

    #[test]
    fn save_then_load_keeps_preferences() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().join("nested"));
        let config = Config {
            plain_mode: true,
            payment_delay_ms: 0,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(!manager.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        fs::write(manager.path(), r#"{ "tracking_interval_ms": 10 }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.tracking_interval_ms, 10);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn money_prefixes_symbol() {
        let config = Config::default();
        assert_eq!(config.money(135), "₹135");
        assert_eq!(config.money(-100), "-₹100");
    }
}
