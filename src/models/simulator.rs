//! 咖啡机模拟器状态

use serde::{Deserialize, Serialize};

use super::IssueKind;

/// 模拟器传感器读数
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorState {
    pub water_level: u32,
    pub coffee_beans_level: u32,
    pub milk_level: u32,
    pub temperature: u32,
    pub pressure: u32,
    pub brewing: bool,
    pub cleaning_needed: bool,
}

impl Default for SimulatorState {
    fn default() -> Self {
        Self {
            water_level: 100,
            coffee_beans_level: 80,
            milk_level: 60,
            temperature: 92,
            pressure: 9,
            brewing: false,
            cleaning_needed: false,
        }
    }
}

impl SimulatorState {
    /// 故障触发后的传感器读数
    pub fn apply_issue(&mut self, kind: IssueKind) {
        match kind {
            IssueKind::WaterLow => self.water_level = 15,
            IssueKind::BeansEmpty => self.coffee_beans_level = 0,
            IssueKind::BeansLow => self.coffee_beans_level = 5,
            IssueKind::CleaningRequired => self.cleaning_needed = true,
            IssueKind::TempIssue => self.temperature = 65,
            IssueKind::PressureIssue => self.pressure = 4,
        }
    }

    /// 故障解除后恢复对应读数
    pub fn restore(&mut self, kind: IssueKind) {
        let defaults = SimulatorState::default();
        match kind {
            IssueKind::WaterLow => self.water_level = defaults.water_level,
            IssueKind::BeansEmpty | IssueKind::BeansLow => {
                self.coffee_beans_level = defaults.coffee_beans_level
            }
            IssueKind::CleaningRequired => self.cleaning_needed = false,
            IssueKind::TempIssue => self.temperature = defaults.temperature,
            IssueKind::PressureIssue => self.pressure = defaults.pressure,
        }
    }
}

/// 触发故障请求
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerIssueRequest {
    pub kind: IssueKind,
}

/// 模拟器视图（读数 + 当前设备记录）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorView {
    pub state: SimulatorState,
    pub equipment: super::Equipment,
}
