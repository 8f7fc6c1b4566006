use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::errors::Result;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 设备名称查询表的选择策略
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NameLookupMode {
    /// Current table first, legacy table as fallback
    #[default]
    Auto,
    Current,
    Legacy,
    None,
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - database: 数据库连接配置
/// - logging: 日志配置
/// - capture: 设备/区域采集配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：ODC，分隔符：__
    /// 示例：ODC__CAPTURE__CHECKOUT_BASE_PATH=shop
    pub fn load() -> Self {
        match Self::load_from(DEFAULT_CONFIG_PATH) {
            Ok(config) => {
                if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", DEFAULT_CONFIG_PATH);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// Load from an explicit TOML path (optional file) plus `ODC__*` env overrides
    pub fn load_from(path: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("ODC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize::<StaticConfig>()?)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 采集配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Storefront checkout route; REST calls whose referer path contains
    /// it are attributed to the storefront. Empty disables the check.
    #[serde(default = "default_checkout_base_path")]
    pub checkout_base_path: String,
    /// `false` runs without a device detection capability
    #[serde(default = "default_device_detection")]
    pub device_detection: bool,
    #[serde(default)]
    pub name_lookup: NameLookupMode,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_database_url() -> String {
    "order_device.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_checkout_base_path() -> String {
    "checkout".to_string()
}

fn default_device_detection() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            checkout_base_path: default_checkout_base_path(),
            device_detection: default_device_detection(),
            name_lookup: NameLookupMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.capture.checkout_base_path, "checkout");
        assert!(config.capture.device_detection);
        assert_eq!(config.capture.name_lookup, NameLookupMode::Auto);
        assert_eq!(config.database.retry_count, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_name_lookup_mode_from_str() {
        assert_eq!(NameLookupMode::from_str("legacy").unwrap(), NameLookupMode::Legacy);
        assert_eq!(NameLookupMode::from_str("CURRENT").unwrap(), NameLookupMode::Current);
        assert!(NameLookupMode::from_str("newest").is_err());
    }

    #[test]
    fn test_sample_config_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = StaticConfig::default();
        config.capture.checkout_base_path = "shop".to_string();
        config.capture.device_detection = false;
        config.save_to_file(&path).unwrap();

        let loaded = StaticConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.capture.checkout_base_path, "shop");
        assert!(!loaded.capture.device_detection);
        assert_eq!(loaded.database.database_url, "order_device.db");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = StaticConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.capture.checkout_base_path, "checkout");
    }

    #[test]
    fn test_generate_sample_config_contains_sections() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[database]"));
        assert!(sample.contains("[logging]"));
        assert!(sample.contains("[capture]"));
        assert!(sample.contains("checkout_base_path"));
    }
}
