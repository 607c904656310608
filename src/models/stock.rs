//! 站点库存位置模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单个商品的库存位置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    pub product_id: String,
    pub product_name: String,
    pub category_id: String,
    pub category_name: String,
    pub current_stock: f64,
    pub max_stock: f64,
    pub min_stock: f64,
    pub last_updated: String,
    pub unit_of_measure: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub shelf_zone: Option<String>,
    /// 水位，由快照填入
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub level: Option<StockLevel>,
}

/// 库存水位
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Critical,
    Low,
    Healthy,
}

impl StockPosition {
    pub fn level(&self) -> StockLevel {
        if self.current_stock <= self.min_stock {
            StockLevel::Critical
        } else if self.max_stock > 0.0 && self.current_stock <= self.max_stock * 0.25 {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }

    /// 类别或商品名包含关键字（不区分大小写）
    pub fn matches_category(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.category_name.to_lowercase().contains(&needle)
            || self.product_name.to_lowercase().contains(&needle)
    }
}

/// 上游接口返回的原始记录（字段名不统一）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStockPosition {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub current_level: Option<f64>,
    #[serde(default)]
    pub current_stock: Option<f64>,
    #[serde(default)]
    pub capacity: Option<f64>,
    #[serde(default)]
    pub max_stock: Option<f64>,
    #[serde(default)]
    pub minimum_level: Option<f64>,
    #[serde(default)]
    pub min_stock: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tank: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub shelf_zone: Option<String>,
}

/// 上游接口的包装格式
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStockEnvelope {
    #[serde(default)]
    pub site_id: Option<String>,
    pub positions: Vec<RawStockPosition>,
}

/// 数据来源
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockSource {
    BpApi,
    MockData,
    FallbackMockData,
}

/// 一次库存查询的结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub site_id: String,
    pub category: Option<String>,
    pub source: StockSource,
    pub positions: Vec<StockPosition>,
    pub record_count: usize,
    pub fetched_at: DateTime<Utc>,
    /// 仅在用户主动重试仍失败时返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 库存查询参数
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuery {
    pub site_id: Option<String>,
    pub category: Option<String>,
}

/// 库存订阅选择
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSelection {
    pub site_id: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl StockSelection {
    /// 去掉空白，空类别和 "All" 统一为 `None`
    pub fn normalized(self) -> Self {
        let category = self.category.as_deref().and_then(normalize_category);
        Self {
            site_id: self.site_id.trim().to_string(),
            category,
        }
    }
}

/// 类别为空或 "All" 时返回 `None`，表示不过滤
pub fn normalize_category(category: &str) -> Option<String> {
    let category = category.trim();
    if category.is_empty()
        || category.eq_ignore_ascii_case("all")
        || category.eq_ignore_ascii_case("all categories")
    {
        None
    } else {
        Some(category.to_string())
    }
}
