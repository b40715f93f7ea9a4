use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unexpected upstream response from {provider}: {message}")]
    UpstreamError { provider: String, message: String },
}

impl AppError {
    pub fn upstream(provider: &str, message: impl Into<String>) -> Self {
        Self::UpstreamError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::ApiError(e) if e.is_timeout() => "上游服務逾時".to_string(),
            AppError::ApiError(_) => "無法連線到上游服務".to_string(),
            AppError::IoError(e) => format!("檔案操作失敗: {}", e),
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => format!("配置錯誤: {}", self),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::ApiError(_) | AppError::UpstreamError { .. } => {
                "Check network access and the provider base URLs"
            }
            AppError::CsvError(_) => "Make sure the file is valid CSV with a header row",
            AppError::IoError(_) => "Check that the static and upload directories exist and are writable",
            AppError::SerializationError(_) => "The upstream payload was not valid JSON",
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => {
                "Review the TOML file, command line flags and environment variables"
            }
        }
    }

    /// 依錯誤類型決定行程結束碼
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => 1,
            AppError::IoError(_) => 3,
            _ => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = AppError::InvalidConfigValueError {
            field: "server.port".to_string(),
            value: "0".to_string(),
            reason: "Port cannot be zero".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("server.port"));
    }

    #[test]
    fn test_io_error_exit_code() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.exit_code(), 3);
    }
}
