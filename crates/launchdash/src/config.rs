//! Configuration management for launchdash.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "launchdash";

/// Default dataset file name, resolved against the working directory.
const DEFAULT_CSV_FILE: &str = "spacex_launch_dash.csv";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "LAUNCHDASH_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LAUNCHDASH_`, `__` between sections,
///    e.g. `LAUNCHDASH_SERVER__PORT=9000`)
/// 2. TOML config file at `~/.config/launchdash/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset configuration.
    pub data: DataConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Payload slider configuration.
    pub slider: SliderConfig,
    /// Page configuration.
    pub dashboard: DashboardConfig,
}

/// Dataset-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the launch records CSV.
    /// Defaults to `spacex_launch_dash.csv` in the working directory.
    pub csv_path: Option<PathBuf>,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: IpAddr,
    /// Port to bind.
    pub port: u16,
    /// Open the dashboard in a browser once the server is listening.
    pub open_browser: bool,
}

/// Payload range selector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Lowest selectable payload mass (kg).
    pub min: u32,
    /// Highest selectable payload mass (kg).
    pub max: u32,
    /// Step between selectable values (kg).
    pub step: u32,
}

/// Page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Heading shown at the top of the page.
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8050,
            open_browser: false,
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0,
            max: 10_000,
            step: 1000,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.slider.step == 0 {
            return Err(Error::ConfigValidation {
                message: "slider step must be greater than 0".to_string(),
            });
        }

        if self.slider.min >= self.slider.max {
            return Err(Error::ConfigValidation {
                message: format!(
                    "slider min ({}) must be less than slider max ({})",
                    self.slider.min, self.slider.max
                ),
            });
        }

        if self.server.port == 0 {
            return Err(Error::ConfigValidation {
                message: "server port must be greater than 0".to_string(),
            });
        }

        if self.dashboard.title.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "dashboard title must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the dataset path, resolving the default if not set.
    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.data
            .csv_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_FILE))
    }

    /// Get the socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.data.csv_path.is_none());
        assert_eq!(config.server.port, 8050);
        assert!(!config.server.open_browser);
        assert_eq!(config.slider, SliderConfig::default());
        assert_eq!(config.dashboard.title, "SpaceX Launch Records Dashboard");
    }

    #[test]
    fn test_default_slider_config() {
        let slider = SliderConfig::default();

        assert_eq!(slider.min, 0);
        assert_eq!(slider.max, 10_000);
        assert_eq!(slider.step, 1000);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_step() {
        let mut config = Config::default();
        config.slider.step = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slider step"));
    }

    #[test]
    fn test_validate_inverted_slider_bounds() {
        let mut config = Config::default();
        config.slider.min = 5000;
        config.slider.max = 1000;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slider min"));
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("port"));
    }

    #[test]
    fn test_validate_blank_title() {
        let mut config = Config::default();
        config.dashboard.title = "   ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_csv_path_default() {
        let config = Config::default();
        assert_eq!(config.csv_path(), PathBuf::from("spacex_launch_dash.csv"));
    }

    #[test]
    fn test_csv_path_custom() {
        let mut config = Config::default();
        config.data.csv_path = Some(PathBuf::from("/data/launches.csv"));

        assert_eq!(config.csv_path(), PathBuf::from("/data/launches.csv"));
    }

    #[test]
    fn test_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8050");
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("launchdash"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .expect("defaults should load");
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "launchdash.toml",
                r#"
                [data]
                csv_path = "launches.csv"

                [server]
                port = 9000

                [slider]
                step = 500
                "#,
            )?;

            let config = Config::load_from(Some(PathBuf::from("launchdash.toml")))
                .expect("config should load");
            assert_eq!(config.csv_path(), PathBuf::from("launches.csv"));
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.slider.step, 500);
            assert_eq!(config.slider.max, 10_000);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("launchdash.toml", "[server]\nport = 9000\n")?;
            jail.set_env("LAUNCHDASH_SERVER__PORT", "9100");
            jail.set_env("LAUNCHDASH_DATA__CSV_PATH", "/srv/launches.csv");

            let config = Config::load_from(Some(PathBuf::from("launchdash.toml")))
                .expect("config should load");
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.csv_path(), PathBuf::from("/srv/launches.csv"));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("launchdash.toml", "[slider]\nstep = 0\n")?;

            let result = Config::load_from(Some(PathBuf::from("launchdash.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("csv_path"));
        assert!(json.contains("open_browser"));
    }

    #[test]
    fn test_slider_config_deserialize() {
        let json = r#"{"max": 8000}"#;
        let slider: SliderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(slider.max, 8000);
        assert_eq!(slider.step, 1000);
    }
}
