pub mod cli;
pub mod toml_config;

use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

pub use cli::CliArgs;

pub const DEFAULT_KEEPA_BASE_URL: &str = "https://api.keepa.com";
pub const DEFAULT_BARCODE_LOOKUP_BASE_URL: &str = "https://api.barcodelookup.com";
pub const DEFAULT_UPCITEMDB_BASE_URL: &str = "https://api.upcitemdb.com";

/// 啟動時建立一次、之後唯讀的服務配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub providers: ProviderSettings,
    pub lookup: LookupSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub upload_dir: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "./static".to_string(),
            upload_dir: "./uploads".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub keepa_api_key: Option<String>,
    pub barcode_lookup_api_key: Option<String>,
    pub keepa_base_url: String,
    pub barcode_lookup_base_url: String,
    pub upcitemdb_base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            keepa_api_key: None,
            barcode_lookup_api_key: None,
            keepa_base_url: DEFAULT_KEEPA_BASE_URL.to_string(),
            barcode_lookup_base_url: DEFAULT_BARCODE_LOOKUP_BASE_URL.to_string(),
            upcitemdb_base_url: DEFAULT_UPCITEMDB_BASE_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl ProviderSettings {
    pub fn keepa_key(&self) -> Option<&str> {
        usable_key(self.keepa_api_key.as_deref())
    }

    pub fn barcode_lookup_key(&self) -> Option<&str> {
        usable_key(self.barcode_lookup_api_key.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    pub demo_table: bool,
    pub trial_provider: bool,
    pub strict_upc: bool,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            demo_table: true,
            trial_provider: true,
            strict_upc: false,
        }
    }
}

/// Blank keys and unresolved `${VAR}` placeholders count as "no key".
fn usable_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && !(k.starts_with("${") && k.ends_with('}')))
}

impl AppConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|e| AppError::InvalidConfigValueError {
            field: "server.host".to_string(),
            value: addr.clone(),
            reason: format!("Invalid listen address: {}", e),
        })
    }

    pub fn static_dir(&self) -> PathBuf {
        PathBuf::from(&self.server.static_dir)
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.server.upload_dir)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::InvalidConfigValueError {
                field: "server.port".to_string(),
                value: "0".to_string(),
                reason: "Port cannot be zero".to_string(),
            });
        }
        self.socket_addr()?;
        validate_path("server.static_dir", &self.server.static_dir)?;
        validate_path("server.upload_dir", &self.server.upload_dir)?;

        validate_url("providers.keepa_base_url", &self.providers.keepa_base_url)?;
        validate_url(
            "providers.barcode_lookup_base_url",
            &self.providers.barcode_lookup_base_url,
        )?;
        validate_url("providers.upcitemdb_base_url", &self.providers.upcitemdb_base_url)?;
        validate_range("providers.timeout_seconds", self.providers.timeout_seconds, 1, 60)?;

        Ok(())
    }
}
