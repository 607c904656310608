//! 设备集合存储服务
//!
//! 持有设备集合的权威副本。每次修改都在写锁内先落盘，成功后才替换内存副本，
//! 因此内存与持久化存储不会出现可观察的分歧。

use crate::errors::AppError;
use crate::models::{Alert, Equipment, UpdateEquipmentRequest};
use crate::repositories::{EquipmentRepository, LoadOutcome};
use std::collections::HashSet;
use tokio::sync::RwLock;
use validator::Validate;

use super::alert_policy;
use super::seed_data::seed_equipment;

/// 设备集合存储
pub struct EquipmentStore {
    repo: EquipmentRepository,
    equipment: RwLock<Vec<Equipment>>,
}

impl EquipmentStore {
    pub fn new(repo: EquipmentRepository) -> Self {
        Self {
            repo,
            equipment: RwLock::new(Vec::new()),
        }
    }

    pub fn repository(&self) -> &EquipmentRepository {
        &self.repo
    }

    /// 加载持久化集合，为空时写入初始数据
    ///
    /// 已加载过非空集合时直接返回。返回集合中的记录数。
    pub async fn initialize(&self) -> Result<usize, AppError> {
        let mut guard = self.equipment.write().await;
        if !guard.is_empty() {
            return Ok(guard.len());
        }

        let list = match self.repo.load().await? {
            LoadOutcome::Loaded(list) if !list.is_empty() => {
                tracing::info!(count = list.len(), "已加载设备集合");
                list
            }
            LoadOutcome::Loaded(_) | LoadOutcome::Missing => {
                let seed = seed_equipment();
                self.repo.save(&seed).await?;
                tracing::info!(count = seed.len(), "设备集合为空，已写入初始数据");
                seed
            }
            LoadOutcome::Malformed(reason) => {
                tracing::warn!(reason = %reason, "持久化设备数据损坏，重置为初始数据");
                let seed = seed_equipment();
                self.repo.save(&seed).await?;
                seed
            }
        };

        *guard = list;
        Ok(guard.len())
    }

    /// 整体替换设备集合
    pub async fn set_equipment(&self, list: Vec<Equipment>) -> Result<usize, AppError> {
        ensure_unique_ids(&list)?;

        let mut guard = self.equipment.write().await;
        self.repo.save(&list).await?;
        *guard = list;

        tracing::info!(count = guard.len(), "设备集合已替换");
        Ok(guard.len())
    }

    /// 局部更新单条记录，ID 不存在时返回 `None`
    pub async fn update_equipment(
        &self,
        id: &str,
        patch: UpdateEquipmentRequest,
    ) -> Result<Option<Equipment>, AppError> {
        patch
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        self.mutate(id, move |eq| {
            patch.apply_to(eq);
            true
        })
        .await
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Equipment> {
        let guard = self.equipment.read().await;
        guard.iter().find(|e| e.id == id).cloned()
    }

    /// 当前集合的快照
    pub async fn list(&self) -> Vec<Equipment> {
        self.equipment.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.equipment.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.equipment.read().await.is_empty()
    }

    /// 添加告警并联动状态
    pub async fn add_alert(&self, id: &str, alert: Alert) -> Result<Option<Equipment>, AppError> {
        self.mutate(id, move |eq| alert_policy::add_alert(eq, alert))
            .await
    }

    /// 移除单条告警并重新推导状态
    pub async fn resolve_alert(
        &self,
        id: &str,
        message: &str,
    ) -> Result<Option<Equipment>, AppError> {
        self.mutate(id, |eq| alert_policy::resolve_alert(eq, message).is_some())
            .await
    }

    /// 清除全部告警
    pub async fn resolve_all(&self, id: &str) -> Result<Option<Equipment>, AppError> {
        self.mutate(id, |eq| {
            alert_policy::resolve_all(eq);
            true
        })
        .await
    }

    /// 对单条记录执行修改
    ///
    /// 闭包返回 `false` 表示没有实际变化，此时跳过持久化。
    pub async fn mutate<F>(&self, id: &str, f: F) -> Result<Option<Equipment>, AppError>
    where
        F: FnOnce(&mut Equipment) -> bool,
    {
        let mut guard = self.equipment.write().await;
        let Some(index) = guard.iter().position(|e| e.id == id) else {
            tracing::debug!(equipment_id = id, "设备不存在，忽略修改");
            return Ok(None);
        };

        let mut updated = guard[index].clone();
        if !f(&mut updated) {
            return Ok(Some(updated));
        }

        let mut next = guard.clone();
        next[index] = updated.clone();
        self.repo.save(&next).await?;
        *guard = next;

        Ok(Some(updated))
    }
}

fn ensure_unique_ids(list: &[Equipment]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(list.len());
    for eq in list {
        if !seen.insert(eq.id.as_str()) {
            return Err(AppError::ValidationError(format!(
                "设备 ID 重复: {}",
                eq.id
            )));
        }
    }
    Ok(())
}
