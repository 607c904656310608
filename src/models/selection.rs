//! 筛选选择与视图偏好

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 区域筛选的“全部”哨兵值
pub const ALL_ZONES: &str = "All Zones";
/// 类别筛选的“全部”哨兵值
pub const ALL_CATEGORIES: &str = "All Categories";

/// 布局视图模式
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "2d")]
    TwoD,
}

/// 默认可见的资产类别
pub const DEFAULT_VISIBLE_ASSET_TYPES: [&str; 11] = [
    "buildings",
    "fuel",
    "ev-charging",
    "energy",
    "security",
    "service",
    "infrastructure",
    "food-service",
    "refrigeration",
    "car-wash",
    "other",
];

pub fn default_visible_asset_types() -> BTreeSet<String> {
    DEFAULT_VISIBLE_ASSET_TYPES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// 当前筛选选择（进程内，不持久化）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub zone: String,
    pub category: String,
    pub selected_equipment_id: Option<String>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            zone: ALL_ZONES.to_string(),
            category: ALL_CATEGORIES.to_string(),
            selected_equipment_id: None,
        }
    }
}

/// 持久化的视图偏好
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewPreferences {
    pub view_mode: ViewMode,
    pub visible_asset_types: BTreeSet<String>,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            visible_asset_types: default_visible_asset_types(),
        }
    }
}

/// 选择状态快照（返回给客户端）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    #[serde(flatten)]
    pub filter: FilterSelection,
    #[serde(flatten)]
    pub preferences: ViewPreferences,
}

/// 更新筛选选择请求
///
/// `selectedEquipmentId` 传 `null` 表示清除选中设备，不传表示保持不变。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSelectionRequest {
    pub zone: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub selected_equipment_id: Option<Option<String>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateViewModeRequest {
    pub view_mode: ViewMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVisibleAssetTypesRequest {
    pub visible_asset_types: BTreeSet<String>,
}
