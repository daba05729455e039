use crate::core::module::{DEFAULT_DATA_PATH, DEFAULT_NAMESPACE};
use crate::utils::error::{CraftError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub data_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CraftError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CraftError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BASE_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CraftError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得資料來源位址
    pub fn base_url(&self) -> &str {
        self.source.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn data_path(&self) -> &str {
        self.source.data_path.as_deref().unwrap_or(DEFAULT_DATA_PATH)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    /// 取得物品命名空間
    pub fn namespace(&self) -> &str {
        self.game.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .log_format
            .as_deref()
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        // 驗證資料來源
        validation::validate_url("source.base_url", self.base_url())?;
        validation::validate_path("source.data_path", self.data_path())?;
        validation::validate_non_empty_string("game.namespace", self.namespace())?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }

        // 驗證日誌格式
        if let Some(format) = &self.logging.log_format {
            if LogFormat::parse(format).is_none() {
                return Err(CraftError::InvalidConfigValueError {
                    field: "logging.log_format".to_string(),
                    value: format.clone(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }
}
