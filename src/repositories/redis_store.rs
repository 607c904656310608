//! Redis 键值存储

use super::KeyValueStore;
use crate::db::RedisPool;
use crate::errors::AppError;
use std::sync::Arc;

pub struct RedisStore {
    pool: Arc<RedisPool>,
    key_prefix: String,
}

impl RedisStore {
    pub fn new(pool: Arc<RedisPool>, key_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            key_prefix: key_prefix.into(),
        }
    }

    /// 加命名空间后的实际键名
    pub fn namespaced(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.pool.get_raw(&self.namespaced(key)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.pool.set_raw(&self.namespaced(key), value).await
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.pool.del(&self.namespaced(key)).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.pool.health_check().await
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
