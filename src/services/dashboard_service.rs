//! 仪表盘汇总服务

use std::sync::Arc;

use chrono::NaiveDate;

use super::derived;
use super::{EquipmentStore, SelectionService};
use crate::models::{ComplianceCounts, DashboardSummary, StatusCounts};
use crate::utils::today;

/// 仪表盘汇总服务
pub struct DashboardService {
    store: Arc<EquipmentStore>,
    selection: Arc<SelectionService>,
}

impl DashboardService {
    pub fn new(store: Arc<EquipmentStore>, selection: Arc<SelectionService>) -> Self {
        Self { store, selection }
    }

    /// 当前筛选下的完整汇总
    pub async fn summary(&self) -> DashboardSummary {
        self.summary_at(today()).await
    }

    /// 指定日期的汇总
    ///
    /// 只有设备列表受筛选影响，各项统计与类别、区域列表都基于整个集合。
    pub async fn summary_at(&self, today: NaiveDate) -> DashboardSummary {
        let all = self.store.list().await;
        let selection = self.selection.state().await;
        let filtered = derived::filter_by_selection(&all, &selection.filter);

        DashboardSummary {
            total: all.len(),
            status_counts: derived::status_counts(&all),
            compliance: derived::compliance_counts(&all, today),
            categories: derived::categories(&all),
            zones: derived::zones(&all),
            equipment: filtered,
            selection,
        }
    }

    pub async fn status_counts(&self) -> StatusCounts {
        derived::status_counts(&self.store.list().await)
    }

    pub async fn compliance(&self) -> ComplianceCounts {
        derived::compliance_counts(&self.store.list().await, today())
    }

    pub async fn zones(&self) -> Vec<String> {
        derived::zones(&self.store.list().await)
    }

    pub async fn categories(&self) -> Vec<String> {
        derived::categories(&self.store.list().await)
    }
}
