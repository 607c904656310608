//! 应用配置加载和管理

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::env;

/// 应用配置结构
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub redis: RedisSettings,
    #[serde(default)]
    pub stock_api: StockApiSettings,
    #[serde(default)]
    pub simulator: SimulatorSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

/// 持久化后端类型
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Redis,
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// 文件后端的存储路径
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Redis 键命名空间
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: default_storage_path(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_storage_path() -> String {
    "data/sitemaster.json".to_string()
}

fn default_key_prefix() -> String {
    "sitemaster".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    #[serde(default = "default_redis_timeout")]
    pub connect_timeout_seconds: u64,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: default_redis_timeout(),
        }
    }
}

fn default_redis_timeout() -> u64 {
    5
}

/// 库存 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct StockApiSettings {
    /// 为 false 时直接使用本地模拟数据
    #[serde(default)]
    pub use_real_api: bool,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_site_id")]
    pub default_site_id: String,
    /// 定时刷新间隔（秒）
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for StockApiSettings {
    fn default() -> Self {
        Self {
            use_real_api: false,
            auth_url: default_auth_url(),
            api_url: default_api_url(),
            client_id: String::new(),
            scope: default_scope(),
            default_site_id: default_site_id(),
            refresh_interval_seconds: default_refresh_interval(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_auth_url() -> String {
    "https://auth-dsp.bp.com/oauth2/token".to_string()
}

fn default_api_url() -> String {
    "https://api-dsp.bp.com".to_string()
}

fn default_scope() -> String {
    "stock-api/stock.read".to_string()
}

fn default_site_id() -> String {
    "10441".to_string()
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_request_timeout() -> u64 {
    10
}

/// 咖啡机模拟器配置
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorSettings {
    #[serde(default = "default_brew_delay")]
    pub brew_delay_ms: u64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            brew_delay_ms: default_brew_delay(),
        }
    }
}

fn default_brew_delay() -> u64 {
    3000
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    /// pretty | json
    pub format: String,
}

impl Settings {
    /// 从配置文件和环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let settings = Config::builder()
            // 加载默认配置
            .add_source(File::with_name("config/development"))
            // 根据环境加载对应配置
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // 环境变量覆盖，前缀 SITEMASTER，分隔符 __
            .add_source(
                Environment::with_prefix("SITEMASTER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 校验取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stock_api.refresh_interval_seconds == 0 {
            return Err(ConfigError::Message(
                "stock_api.refresh_interval_seconds 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 获取 Redis 连接 URL（从环境变量）
    pub fn redis_url() -> Option<SecretString> {
        env::var("REDIS_URL").ok().map(SecretString::new)
    }

    /// 获取库存 API 客户端密钥（从环境变量）
    pub fn stock_api_client_secret() -> Option<SecretString> {
        env::var("STOCK_API_CLIENT_SECRET").ok().map(SecretString::new)
    }

    /// 获取服务器地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
