//! Redis 连接管理

use crate::config::Settings;
use crate::errors::AppError;
use redis::aio::ConnectionManager;
use redis::Client;
use secrecy::ExposeSecret;
use std::time::Duration;

/// Redis 连接包装
#[derive(Clone)]
pub struct RedisPool {
    manager: ConnectionManager,
}

impl RedisPool {
    /// 创建新的 Redis 连接
    pub async fn new(settings: &Settings) -> Result<Self, AppError> {
        let redis_url = Settings::redis_url()
            .ok_or_else(|| AppError::ConfigError("REDIS_URL 未设置".to_string()))?;

        let client = Client::open(redis_url.expose_secret().as_str())
            .map_err(|e| AppError::ConfigError(format!("Redis URL 无效: {}", e)))?;

        let timeout = Duration::from_secs(settings.redis.connect_timeout_seconds);
        let manager = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| AppError::StorageError("Redis 连接超时".to_string()))?
            .map_err(|e| {
                tracing::error!("Redis 连接失败: {}", e);
                AppError::RedisError(e)
            })?;

        tracing::info!("Redis 连接已建立");

        Ok(Self { manager })
    }

    /// 获取连接管理器
    pub fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }

    /// 健康检查
    pub async fn health_check(&self) -> Result<(), AppError> {
        let mut conn = self.manager.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(AppError::RedisError)
    }

    /// 读取原始字符串值
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.manager.clone();
        redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(AppError::RedisError)
    }

    /// 写入原始字符串值（不过期）
    pub async fn set_raw(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut conn = self.manager.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async(&mut conn)
            .await
            .map_err(AppError::RedisError)
    }

    /// 删除键
    pub async fn del(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.manager.clone();
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(AppError::RedisError)
    }
}
