use crate::config::AppConfig;
use crate::utils::error::{AppError, Result};
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            message: format!("Cannot read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的區段使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// 替換環境變數 (例如 ${KEEPA_API_KEY})；未設定的變數保留原樣
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8080
static_dir = "./public"
upload_dir = "/tmp/uploads"

[providers]
barcode_lookup_api_key = "bl-key"
upcitemdb_base_url = "http://localhost:9999"
timeout_seconds = 8

[lookup]
demo_table = false
strict_upc = true
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, "./public");
        assert_eq!(config.providers.barcode_lookup_key(), Some("bl-key"));
        assert_eq!(config.providers.keepa_key(), None);
        assert_eq!(config.providers.upcitemdb_base_url, "http://localhost:9999");
        assert_eq!(config.providers.timeout_seconds, 8);
        assert!(!config.lookup.demo_table);
        assert!(config.lookup.trial_provider);
        assert!(config.lookup.strict_upc);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.providers.keepa_base_url, crate::config::DEFAULT_KEEPA_BASE_URL);
    }

    #[test]
    fn test_unresolved_env_var_means_no_key() {
        let toml_content = r#"
[providers]
keepa_api_key = "${UPC_LOOKUP_TEST_UNSET_VARIABLE_XYZ}"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.providers.keepa_api_key.as_deref(),
            Some("${UPC_LOOKUP_TEST_UNSET_VARIABLE_XYZ}")
        );
        assert_eq!(config.providers.keepa_key(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        // PATH is set in every test environment
        let path = std::env::var("PATH").unwrap();
        let substituted = substitute_env_vars("value = \"${PATH}\"");
        assert_eq!(substituted, format!("value = \"{}\"", path));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, AppError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 6100").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 6100);
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, AppError::ConfigError { .. }));
    }
}
