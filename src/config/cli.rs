use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// 命令列參數；有指定時覆蓋 TOML 與預設值
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "upc-lookup")]
#[command(about = "Barcode lookup service with a static web UI")]
pub struct CliArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "UPC_LOOKUP_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "UPC_LOOKUP_HOST")]
    pub host: Option<String>,

    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory holding index.html and other static assets
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<String>,

    /// Directory where uploaded CSV files are stored
    #[arg(long, env = "UPLOAD_DIR")]
    pub upload_dir: Option<String>,

    #[arg(long, env = "KEEPA_API_KEY", hide_env_values = true)]
    pub keepa_api_key: Option<String>,

    #[arg(long, env = "BARCODE_LOOKUP_API_KEY", hide_env_values = true)]
    pub barcode_lookup_api_key: Option<String>,

    /// Outbound request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Disable the built-in demo table
    #[arg(long)]
    pub no_demo: bool,

    /// Disable the keyless trial provider
    #[arg(long)]
    pub no_trial: bool,

    /// Reject codes that are not 12 or 13 digits
    #[arg(long)]
    pub strict_upc: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliArgs {
    /// 合併順序：預設值 < TOML 檔案 < 命令列/環境變數
    pub fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.server.static_dir = dir;
        }
        if let Some(dir) = self.upload_dir {
            config.server.upload_dir = dir;
        }
        if self.keepa_api_key.is_some() {
            config.providers.keepa_api_key = self.keepa_api_key;
        }
        if self.barcode_lookup_api_key.is_some() {
            config.providers.barcode_lookup_api_key = self.barcode_lookup_api_key;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.providers.timeout_seconds = timeout;
        }
        if self.no_demo {
            config.lookup.demo_table = false;
        }
        if self.no_trial {
            config.lookup.trial_provider = false;
        }
        if self.strict_upc {
            config.lookup.strict_upc = true;
        }
    }
}
