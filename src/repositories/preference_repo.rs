//! 视图偏好仓库

use super::{storage_keys, KeyValueStore};
use crate::errors::AppError;
use crate::models::{default_visible_asset_types, ViewMode, ViewPreferences};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct PreferenceRepository {
    store: Arc<dyn KeyValueStore>,
}

impl PreferenceRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 读取偏好，缺失或损坏时使用默认值
    pub async fn load(&self) -> Result<ViewPreferences, AppError> {
        let view_mode = self
            .read_or_default(storage_keys::VIEW_MODE, ViewMode::default)
            .await?;
        let visible_asset_types = self
            .read_or_default(storage_keys::VISIBLE_ASSET_TYPES, default_visible_asset_types)
            .await?;

        Ok(ViewPreferences {
            view_mode,
            visible_asset_types,
        })
    }

    pub async fn save_view_mode(&self, mode: ViewMode) -> Result<(), AppError> {
        let serialized = serde_json::to_string(&mode)?;
        self.store.set(storage_keys::VIEW_MODE, &serialized).await
    }

    /// 以数组形式保存
    pub async fn save_visible_asset_types(&self, types: &BTreeSet<String>) -> Result<(), AppError> {
        let list: Vec<&String> = types.iter().collect();
        let serialized = serde_json::to_string(&list)?;
        self.store
            .set(storage_keys::VISIBLE_ASSET_TYPES, &serialized)
            .await
    }

    async fn read_or_default<T, F>(&self, key: &str, default: F) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
        F: FnOnce() -> T,
    {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(key = key, error = %e, "偏好设置格式损坏，使用默认值");
                Ok(default())
            }
        }
    }
}
