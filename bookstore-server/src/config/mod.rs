//! Parse Config from config file

use std::{fs::read_to_string, path::Path, str::FromStr};

use leptos::config::LeptosOptions;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::LevelParseError;

use crate::catalog::{CatalogClient, UpdateMethod};

/// Where the config is read from unless `BOOKSTORE_CONFIG` points elsewhere
pub const DEFAULT_CONFIG_PATH: &str = "/etc/bookstore/config.toml";
pub const CONFIG_PATH_ENV: &str = "BOOKSTORE_CONFIG";

#[derive(Debug)]
pub enum ConfigError {
    TomlParse(toml::de::Error),
    ConfigFileRead(std::io::Error),
    LogLevel(LevelParseError),
    SiteAddrParse(std::net::AddrParseError),
    CatalogUrlParse(url::ParseError),
    HttpClient(reqwest::Error),
}
impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::TomlParse(e) => {
                write!(f, "Unable to parse config file as toml: {e}")
            }
            Self::ConfigFileRead(e) => {
                write!(f, "Unable to read config file: {e}")
            }
            Self::LogLevel(e) => {
                write!(f, "Unable to parse log_level: {e}")
            }
            Self::SiteAddrParse(e) => {
                write!(f, "Unable to interpret web.site_addr as socket address: {e}")
            }
            Self::CatalogUrlParse(e) => {
                write!(f, "Unable to interpret catalog.base_url as url: {e}")
            }
            Self::HttpClient(e) => {
                write!(f, "Unable to build http client for the catalog: {e}")
            }
        }
    }
}
impl From<LevelParseError> for ConfigError {
    fn from(value: LevelParseError) -> Self {
        Self::LogLevel(value)
    }
}
impl From<std::net::AddrParseError> for ConfigError {
    fn from(value: std::net::AddrParseError) -> Self {
        Self::SiteAddrParse(value)
    }
}
impl From<url::ParseError> for ConfigError {
    fn from(value: url::ParseError) -> Self {
        Self::CatalogUrlParse(value)
    }
}
impl From<reqwest::Error> for ConfigError {
    fn from(value: reqwest::Error) -> Self {
        Self::HttpClient(value)
    }
}
impl std::error::Error for ConfigError {}

#[derive(Deserialize)]
struct WebConfigData {
    /// The address to host the website on (e.g. 127.0.0.1:3000)
    #[serde(default = "default_site_addr")]
    site_addr: String,
    /// Only send the session cookie over https
    ///
    /// Turn this on when the shop is served behind a TLS-terminating proxy.
    #[serde(default)]
    secure_cookies: bool,
    #[serde(default = "default_session_expiry_hours")]
    session_expiry_hours: u32,
}
impl Default for WebConfigData {
    fn default() -> Self {
        Self {
            site_addr: default_site_addr(),
            secure_cookies: false,
            session_expiry_hours: default_session_expiry_hours(),
        }
    }
}
fn default_site_addr() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_session_expiry_hours() -> u32 {
    24
}

#[derive(Deserialize)]
struct CatalogConfigData {
    /// Every catalog path is appended to this
    #[serde(default = "default_catalog_base_url")]
    base_url: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default)]
    update_method: UpdateMethod,
}
impl Default for CatalogConfigData {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            timeout_secs: default_timeout_secs(),
            update_method: UpdateMethod::default(),
        }
    }
}
fn default_catalog_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

/// The config data as it is present in (a well-formed) toml config file
#[derive(Deserialize)]
struct ConfigData {
    #[serde(default)]
    web: WebConfigData,
    #[serde(default)]
    catalog: CatalogConfigData,
    log_level: Option<String>,
    /// If set, logs are additionally written to a daily rotated file in this directory
    log_directory: Option<String>,
}

/// The main config object that will be available across the Serverside application
#[derive(Debug)]
pub struct Config {
    pub catalog: CatalogClient,
    pub leptos_options: LeptosOptions,
    pub log_level: LevelFilter,
    pub log_directory: Option<String>,
    pub secure_cookies: bool,
    pub session_expiry: time::Duration,
}
impl Config {
    fn try_from_config_data(value: ConfigData) -> Result<Self, ConfigError> {
        let addr = std::net::SocketAddr::from_str(&value.web.site_addr)?;

        let leptos_options = LeptosOptions::builder()
            .output_name("bookstore")
            .site_root("target/site")
            .site_pkg_dir("pkg")
            .site_addr(addr)
            .build();
        let log_level = LevelFilter::from_str(&value.log_level.unwrap_or("INFO".to_string()))?;

        let base_url = url::Url::parse(&value.catalog.base_url)?;
        let catalog = CatalogClient::new(
            &base_url,
            std::time::Duration::from_secs(value.catalog.timeout_secs),
            value.catalog.update_method,
        )?;

        Ok(Self {
            catalog,
            leptos_options,
            log_level,
            log_directory: value.log_directory,
            secure_cookies: value.web.secure_cookies,
            session_expiry: time::Duration::hours(i64::from(value.web.session_expiry_hours)),
        })
    }

    /// Build the config from the contents of a toml file
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config_data: ConfigData = toml::from_str(content).map_err(ConfigError::TomlParse)?;
        Self::try_from_config_data(config_data)
    }

    /// Read the config from [`DEFAULT_CONFIG_PATH`] or the file named in `BOOKSTORE_CONFIG`
    pub fn try_create() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or(DEFAULT_CONFIG_PATH.to_string());
        let content = read_to_string(Path::new(&path)).map_err(ConfigError::ConfigFileRead)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.log_level, LevelFilter::INFO);
        assert_eq!(config.catalog.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(config.session_expiry, time::Duration::hours(24));
        assert!(!config.secure_cookies);
        assert_eq!(config.log_directory, None);
        assert_eq!(
            config.leptos_options.site_addr,
            "127.0.0.1:3000".parse().unwrap()
        );
        assert_eq!(&*config.leptos_options.output_name, "bookstore");
    }

    #[test]
    fn full_file() {
        let config = Config::from_toml(
            r#"
            log_level = "debug"
            log_directory = "/var/log/bookstore"

            [web]
            site_addr = "0.0.0.0:8000"
            secure_cookies = true
            session_expiry_hours = 2

            [catalog]
            base_url = "https://catalog.internal/api/v1/"
            timeout_secs = 3
            update_method = "put"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, LevelFilter::DEBUG);
        assert_eq!(config.log_directory.as_deref(), Some("/var/log/bookstore"));
        assert!(config.secure_cookies);
        assert_eq!(config.session_expiry, time::Duration::hours(2));
        // trailing slash is dropped so paths can be appended
        assert_eq!(config.catalog.base_url(), "https://catalog.internal/api/v1");
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(matches!(
            Config::from_toml("log_level = \"loud\""),
            Err(ConfigError::LogLevel(_))
        ));
        assert!(matches!(
            Config::from_toml("[web]\nsite_addr = \"localhost\""),
            Err(ConfigError::SiteAddrParse(_))
        ));
        assert!(matches!(
            Config::from_toml("[catalog]\nbase_url = \"not a url\""),
            Err(ConfigError::CatalogUrlParse(_))
        ));
        assert!(matches!(
            Config::from_toml("[catalog]\nupdate_method = \"patch\""),
            Err(ConfigError::TomlParse(_))
        ));
        assert!(matches!(
            Config::from_toml("[web"),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
