use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, WeatherClient},
    model::Coordinates,
};

/// Location used when no coordinates are given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 30
///
/// [default_location]
/// latitude = 50.6107
/// longitude = 36.5802
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    pub default_location: Option<Location>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            default_location: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "informer", "informer-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `informer configure` or set YANDEX_WEATHER_API_KEY."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_default_location(&mut self, coordinates: Coordinates) {
        self.default_location = Some(Location {
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
        });
    }

    /// The stored default location, validated.
    pub fn default_coordinates(&self) -> Result<Coordinates> {
        let loc = self.default_location.ok_or_else(|| {
            anyhow!(
                "No coordinates given and no default location configured.\n\
                 Hint: pass --lat and --lon, or run `informer configure`."
            )
        })?;

        Coordinates::new(loc.latitude, loc.longitude)
            .context("Invalid default location in config file")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Construct a client from config.
pub fn client_from_config(config: &Config) -> Result<WeatherClient> {
    let api_key = config.api_key()?;

    if config.timeout_secs == 0 {
        return Err(anyhow!("timeout_secs must be greater than zero"));
    }

    Ok(WeatherClient::new(api_key)
        .with_endpoint(config.endpoint.clone())
        .with_timeout(config.timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `informer configure`"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());

        assert!(cfg.api_key().is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = Config::from_toml(r#"api_key = "KEY""#).unwrap();

        assert_eq!(cfg.api_key().unwrap(), "KEY");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert!(cfg.default_location.is_none());
    }

    #[test]
    fn toml_roundtrip_keeps_location() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_default_location(Coordinates::new(50.6107, 36.5802).unwrap());

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = Config::from_toml(&text).unwrap();

        let coords = back.default_coordinates().unwrap();
        assert_eq!(coords.latitude(), 50.6107);
        assert_eq!(coords.longitude(), 36.5802);
    }

    #[test]
    fn default_coordinates_error_when_missing_or_invalid() {
        let cfg = Config::default();
        let err = cfg.default_coordinates().unwrap_err();
        assert!(err.to_string().contains("no default location configured"));

        let cfg = Config {
            default_location: Some(Location { latitude: 123.0, longitude: 0.0 }),
            ..Config::default()
        };
        assert!(cfg.default_coordinates().is_err());
    }

    #[test]
    fn client_from_config_errors_when_missing_api_key() {
        let err = client_from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn client_from_config_applies_timeout() {
        let mut cfg = Config::from_toml("api_key = \"KEY\"\ntimeout_secs = 5").unwrap();

        let client = client_from_config(&cfg).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));

        cfg.timeout_secs = 0;
        assert!(client_from_config(&cfg).is_err());
    }
}
