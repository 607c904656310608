//! 数据访问层（Repository）
//!
//! 所有持久化都经过 [`KeyValueStore`] 端口，键名固定，值为 JSON 文本。

mod equipment_repo;
mod file_store;
mod memory_store;
mod preference_repo;
mod redis_store;

pub use equipment_repo::{EquipmentRepository, LoadOutcome};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use preference_repo::PreferenceRepository;
pub use redis_store::RedisStore;

use crate::errors::AppError;

/// 固定存储键
pub mod storage_keys {
    pub const EQUIPMENT_DATA: &str = "equipmentData";
    pub const VIEW_MODE: &str = "viewMode";
    pub const VISIBLE_ASSET_TYPES: &str = "visibleAssetTypes";
}

/// 键值持久化端口
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;

    async fn health_check(&self) -> Result<(), AppError>;

    fn backend_name(&self) -> &'static str;
}
