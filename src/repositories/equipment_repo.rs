//! 设备集合仓库

use super::{storage_keys, KeyValueStore};
use crate::errors::AppError;
use crate::models::Equipment;
use std::sync::Arc;

/// 读取持久化设备集合的结果
#[derive(Debug)]
pub enum LoadOutcome {
    /// 尚未保存过
    Missing,
    Loaded(Vec<Equipment>),
    /// 内容无法解析
    Malformed(String),
}

/// 设备集合仓库
#[derive(Clone)]
pub struct EquipmentRepository {
    store: Arc<dyn KeyValueStore>,
}

impl EquipmentRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// 读取整个设备集合
    pub async fn load(&self) -> Result<LoadOutcome, AppError> {
        let raw = match self.store.get(storage_keys::EQUIPMENT_DATA).await? {
            Some(raw) => raw,
            None => return Ok(LoadOutcome::Missing),
        };

        match serde_json::from_str::<Vec<Equipment>>(&raw) {
            Ok(list) => Ok(LoadOutcome::Loaded(list)),
            Err(e) => Ok(LoadOutcome::Malformed(e.to_string())),
        }
    }

    /// 整体保存设备集合
    pub async fn save(&self, equipment: &[Equipment]) -> Result<(), AppError> {
        let serialized = serde_json::to_string(equipment)?;
        self.store
            .set(storage_keys::EQUIPMENT_DATA, &serialized)
            .await
    }
}
