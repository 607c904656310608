//! 库存位置服务与定时订阅
//!
//! 查询永远返回数据：上游不可用或未启用时使用固定的本地数据集。
//! 只有用户主动重试仍失败时才把错误信息带给调用方。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::StockApiClient;
use crate::errors::AppError;
use crate::models::{
    normalize_category, StockPosition, StockSelection, StockSnapshot, StockSource,
};

/// 定时刷新的最小间隔
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// 库存数据来源端口
#[async_trait]
pub trait StockFetcher: Send + Sync {
    async fn fetch_positions(&self, site_id: &str) -> Result<Vec<StockPosition>, AppError>;
}

#[async_trait]
impl StockFetcher for StockApiClient {
    async fn fetch_positions(&self, site_id: &str) -> Result<Vec<StockPosition>, AppError> {
        self.request_positions(site_id).await
    }
}

#[allow(clippy::too_many_arguments)]
fn position(
    site_id: &str,
    product_id: &str,
    product_name: &str,
    category: (&str, &str),
    levels: (f64, f64, f64),
    unit: &str,
    location: &str,
    shelf_zone: &str,
) -> StockPosition {
    StockPosition {
        site_id: Some(site_id.to_string()),
        product_id: product_id.to_string(),
        product_name: product_name.to_string(),
        category_id: category.0.to_string(),
        category_name: category.1.to_string(),
        current_stock: levels.0,
        max_stock: levels.1,
        min_stock: levels.2,
        last_updated: Utc::now().to_rfc3339(),
        unit_of_measure: unit.to_string(),
        location: Some(location.to_string()),
        shelf_zone: Some(shelf_zone.to_string()),
        level: None,
    }
}

/// 本地备用库存数据（六条）
pub fn fallback_positions(site_id: &str) -> Vec<StockPosition> {
    let fuel = ("FUEL", "Fuel");
    let food = ("FOOD", "Food");
    vec![
        position(
            site_id,
            "BP001",
            "BP Ultimate 98",
            fuel,
            (8500.0, 10000.0, 2000.0),
            "L",
            "Tank 1",
            "Fuel Dispensers Zone A",
        ),
        position(
            site_id,
            "BP002",
            "BP Regular 91",
            fuel,
            (12000.0, 15000.0, 3000.0),
            "L",
            "Tank 2",
            "Fuel Dispensers Zone B",
        ),
        position(
            site_id,
            "CONV001",
            "Coca Cola 600ml",
            ("BVRG", "Beverages"),
            (45.0, 60.0, 10.0),
            "units",
            "Fridge 1",
            "Cold Beverages",
        ),
        position(
            site_id,
            "CONV002",
            "Mars Bar",
            ("SNCK", "Snacks"),
            (8.0, 50.0, 15.0),
            "units",
            "Shelf 2A",
            "Confectionery",
        ),
        position(
            site_id,
            "CONV003",
            "Coffee Beans 1kg",
            food,
            (25.0, 30.0, 5.0),
            "kg",
            "Storage",
            "Coffee Station",
        ),
        position(
            site_id,
            "CONV004",
            "Fresh Bread Rolls",
            food,
            (2.0, 20.0, 5.0),
            "units",
            "Shelf 1B",
            "Fresh Food",
        ),
    ]
}

/// 类别为空或 "All" 时不过滤
pub fn category_filter(category: Option<&str>) -> Option<String> {
    category.and_then(normalize_category)
}

pub fn filter_positions(
    positions: Vec<StockPosition>,
    category: Option<&str>,
) -> Vec<StockPosition> {
    match category_filter(category) {
        Some(needle) => positions
            .into_iter()
            .filter(|p| p.matches_category(&needle))
            .collect(),
        None => positions,
    }
}

/// 库存查询服务
pub struct StockService {
    fetcher: Option<Arc<dyn StockFetcher>>,
    default_site_id: String,
}

impl StockService {
    /// `fetcher` 为 `None` 时只使用本地数据
    pub fn new(fetcher: Option<Arc<dyn StockFetcher>>, default_site_id: impl Into<String>) -> Self {
        Self {
            fetcher,
            default_site_id: default_site_id.into(),
        }
    }

    pub fn default_site_id(&self) -> &str {
        &self.default_site_id
    }

    /// 查询库存，上游失败时静默使用备用数据
    pub async fn positions(&self, site_id: &str, category: Option<&str>) -> StockSnapshot {
        let (source, positions, _) = self.load(site_id).await;
        snapshot(site_id, category, source, positions, None)
    }

    /// 用户主动重试，失败时附带错误信息
    pub async fn retry(&self, site_id: &str, category: Option<&str>) -> StockSnapshot {
        let (source, positions, error) = self.load(site_id).await;
        snapshot(site_id, category, source, positions, error)
    }

    async fn load(&self, site_id: &str) -> (StockSource, Vec<StockPosition>, Option<String>) {
        let Some(fetcher) = self.fetcher.as_ref() else {
            return (StockSource::MockData, fallback_positions(site_id), None);
        };

        match fetcher.fetch_positions(site_id).await {
            Ok(positions) => (StockSource::BpApi, positions, None),
            Err(e) => {
                tracing::warn!(site_id = site_id, error = %e, "库存接口不可用，使用备用数据");
                (
                    StockSource::FallbackMockData,
                    fallback_positions(site_id),
                    Some(e.to_string()),
                )
            }
        }
    }
}

fn snapshot(
    site_id: &str,
    category: Option<&str>,
    source: StockSource,
    positions: Vec<StockPosition>,
    error: Option<String>,
) -> StockSnapshot {
    let positions: Vec<StockPosition> = filter_positions(positions, category)
        .into_iter()
        .map(|mut p| {
            p.level = Some(p.level());
            p
        })
        .collect();
    StockSnapshot {
        site_id: site_id.to_string(),
        category: category_filter(category),
        source,
        record_count: positions.len(),
        positions,
        fetched_at: Utc::now(),
        error,
    }
}

/// 当前站点库存订阅
///
/// 响应到达时若选择已变化（站点或类别不同），该响应被丢弃。
pub struct StockFeed {
    service: Arc<StockService>,
    selection: RwLock<StockSelection>,
    latest: RwLock<Option<StockSnapshot>>,
}

impl StockFeed {
    pub fn new(service: Arc<StockService>) -> Self {
        let selection = StockSelection {
            site_id: service.default_site_id().to_string(),
            category: None,
        };
        Self {
            service,
            selection: RwLock::new(selection),
            latest: RwLock::new(None),
        }
    }

    pub async fn selection(&self) -> StockSelection {
        self.selection.read().await.clone()
    }

    pub async fn current(&self) -> Option<StockSnapshot> {
        self.latest.read().await.clone()
    }

    /// 切换选择并立即刷新
    ///
    /// 类别先归一化，"All"、空串和未指定视为同一选择。
    pub async fn select(&self, selection: StockSelection) -> Option<StockSnapshot> {
        *self.selection.write().await = selection.normalized();
        self.refresh().await
    }

    /// 按当前选择刷新，返回 `None` 表示响应已过期
    pub async fn refresh(&self) -> Option<StockSnapshot> {
        let key = self.selection().await;
        let snapshot = self
            .service
            .positions(&key.site_id, key.category.as_deref())
            .await;
        self.apply(&key, snapshot).await
    }

    /// 用户主动重试
    pub async fn retry(&self) -> Option<StockSnapshot> {
        let key = self.selection().await;
        let snapshot = self
            .service
            .retry(&key.site_id, key.category.as_deref())
            .await;
        self.apply(&key, snapshot).await
    }

    async fn apply(&self, key: &StockSelection, snapshot: StockSnapshot) -> Option<StockSnapshot> {
        // 持有读锁直到写入完成，避免与 select 交错
        let current = self.selection.read().await;
        if *current != *key {
            tracing::debug!(
                dispatched_site = %key.site_id,
                current_site = %current.site_id,
                "丢弃过期的库存响应"
            );
            return None;
        }
        *self.latest.write().await = Some(snapshot.clone());
        Some(snapshot)
    }

    /// 启动定时刷新任务
    ///
    /// 间隔不小于 `MIN_REFRESH_INTERVAL`。
    pub fn spawn_refresh_loop(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let interval = interval.max(MIN_REFRESH_INTERVAL);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Some(snapshot) = self.refresh().await {
                    tracing::debug!(
                        site_id = %snapshot.site_id,
                        count = snapshot.record_count,
                        "库存定时刷新完成"
                    );
                }
            }
        })
    }
}
