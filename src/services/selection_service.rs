//! 筛选选择与视图偏好服务
//!
//! 区域、类别和选中设备只保存在进程内；视图模式与可见资产类型持久化。

use crate::errors::AppError;
use crate::models::{
    FilterSelection, SelectionState, UpdateSelectionRequest, ViewMode, ViewPreferences,
};
use crate::repositories::PreferenceRepository;
use std::collections::BTreeSet;
use tokio::sync::RwLock;

pub struct SelectionService {
    prefs_repo: PreferenceRepository,
    filter: RwLock<FilterSelection>,
    preferences: RwLock<ViewPreferences>,
}

impl SelectionService {
    pub fn new(prefs_repo: PreferenceRepository) -> Self {
        Self {
            prefs_repo,
            filter: RwLock::new(FilterSelection::default()),
            preferences: RwLock::new(ViewPreferences::default()),
        }
    }

    /// 从存储恢复持久化的视图偏好
    pub async fn load(&self) -> Result<(), AppError> {
        let prefs = self.prefs_repo.load().await?;
        tracing::debug!(view_mode = ?prefs.view_mode, "已恢复视图偏好");
        *self.preferences.write().await = prefs;
        Ok(())
    }

    pub async fn state(&self) -> SelectionState {
        SelectionState {
            filter: self.filter.read().await.clone(),
            preferences: self.preferences.read().await.clone(),
        }
    }

    pub async fn filter(&self) -> FilterSelection {
        self.filter.read().await.clone()
    }

    /// 更新筛选选择，未提供的字段保持不变
    pub async fn update(&self, request: UpdateSelectionRequest) -> SelectionState {
        {
            let mut filter = self.filter.write().await;
            if let Some(zone) = request.zone {
                filter.zone = zone;
            }
            if let Some(category) = request.category {
                filter.category = category;
            }
            if let Some(selected) = request.selected_equipment_id {
                filter.selected_equipment_id = selected;
            }
        }
        self.state().await
    }

    pub async fn set_view_mode(&self, mode: ViewMode) -> Result<SelectionState, AppError> {
        let mut prefs = self.preferences.write().await;
        self.prefs_repo.save_view_mode(mode).await?;
        prefs.view_mode = mode;
        drop(prefs);
        Ok(self.state().await)
    }

    pub async fn set_visible_asset_types(
        &self,
        types: BTreeSet<String>,
    ) -> Result<SelectionState, AppError> {
        let mut prefs = self.preferences.write().await;
        self.prefs_repo.save_visible_asset_types(&types).await?;
        prefs.visible_asset_types = types;
        drop(prefs);
        Ok(self.state().await)
    }

    /// 选中设备被移除后清空选择
    pub async fn clear_selection_if_missing<F>(&self, exists: F)
    where
        F: Fn(&str) -> bool,
    {
        let mut filter = self.filter.write().await;
        if let Some(id) = filter.selected_equipment_id.as_deref() {
            if !exists(id) {
                filter.selected_equipment_id = None;
            }
        }
    }
}
