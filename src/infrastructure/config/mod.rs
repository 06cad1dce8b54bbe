use crate::application::use_cases::csv_cleaner::DEFAULT_PREVIEW_ROWS;
use crate::application::use_cases::web_scraper::{
    DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "data_tools_hub.toml";
pub const ENV_PREFIX: &str = "DATA_TOOLS_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub csv: CsvConfig,
    pub scraper: ScraperConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CsvConfig {
    pub preview_rows: usize,
    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScraperConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: "sqlite://data/app.db".to_string(),
                max_connections: 4,
            },
            csv: CsvConfig {
                preview_rows: DEFAULT_PREVIEW_ROWS,
                cache_capacity: 32,
                cache_ttl_secs: 15 * 60,
                max_upload_bytes: 10 * 1024 * 1024,
            },
            scraper: ScraperConfig {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
                max_results: DEFAULT_MAX_RESULTS,
            },
            log: LogConfig {
                filter: "info".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Defaults, then `data_tools_hub.toml` if present, then `DATA_TOOLS_*`
    /// environment variables (`__` separates nested keys).
    pub fn load() -> Result<Self> {
        let config: Self = Self::figment().extract().map_err(|e| {
            AppError::ConfigError(format!("Failed to load configuration: {}", e))
        })?;
        config.validated()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validated(self) -> Result<Self> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::ConfigError("database.url must not be empty".to_string()));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::ConfigError("scraper.timeout_secs must be > 0".to_string()));
        }
        if self.scraper.max_results == 0 {
            return Err(AppError::ConfigError("scraper.max_results must be > 0".to_string()));
        }
        if self.csv.preview_rows == 0 {
            return Err(AppError::ConfigError("csv.preview_rows must be > 0".to_string()));
        }
        if self.csv.max_upload_bytes == 0 {
            return Err(AppError::ConfigError("csv.max_upload_bytes must be > 0".to_string()));
        }
        Ok(self)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
