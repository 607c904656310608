//! 仪表盘派生聚合

use serde::Serialize;

use super::{Equipment, EquipmentStatus, SelectionState};

/// 各状态设备数量（四个键始终存在）
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub operational: usize,
    pub warning: usize,
    pub critical: usize,
    pub offline: usize,
}

impl StatusCounts {
    pub fn increment(&mut self, status: EquipmentStatus) {
        match status {
            EquipmentStatus::Operational => self.operational += 1,
            EquipmentStatus::Warning => self.warning += 1,
            EquipmentStatus::Critical => self.critical += 1,
            EquipmentStatus::Offline => self.offline += 1,
        }
    }

    pub fn get(&self, status: EquipmentStatus) -> usize {
        match status {
            EquipmentStatus::Operational => self.operational,
            EquipmentStatus::Warning => self.warning,
            EquipmentStatus::Critical => self.critical,
            EquipmentStatus::Offline => self.offline,
        }
    }

    pub fn total(&self) -> usize {
        self.operational + self.warning + self.critical + self.offline
    }
}

/// 维护合规统计
///
/// 合规、不合规、即将到期三项相互独立：一台 10 天后保养且运行正常的设备
/// 同时计入 `compliant` 和 `maintenance_due_soon`。
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCounts {
    pub compliant: usize,
    pub non_compliant: usize,
    pub maintenance_due_soon: usize,
    /// 下次保养日期无法解析的设备数
    pub indeterminate: usize,
}

/// 仪表盘汇总
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub equipment: Vec<Equipment>,
    pub categories: Vec<String>,
    pub zones: Vec<String>,
    pub status_counts: StatusCounts,
    pub compliance: ComplianceCounts,
    pub selection: SelectionState,
}
