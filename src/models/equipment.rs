//! 设备资产数据模型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::Alert;

/// 设备运行状态
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    #[default]
    Operational,
    Warning,
    Critical,
    Offline,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 4] = [
        EquipmentStatus::Operational,
        EquipmentStatus::Warning,
        EquipmentStatus::Critical,
        EquipmentStatus::Offline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "operational",
            EquipmentStatus::Warning => "warning",
            EquipmentStatus::Critical => "critical",
            EquipmentStatus::Offline => "offline",
        }
    }

    /// 严重和离线设备不满足合规
    pub fn blocks_compliance(&self) -> bool {
        matches!(self, EquipmentStatus::Critical | EquipmentStatus::Offline)
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "operational" => Ok(EquipmentStatus::Operational),
            "warning" => Ok(EquipmentStatus::Warning),
            "critical" => Ok(EquipmentStatus::Critical),
            "offline" => Ok(EquipmentStatus::Offline),
            other => Err(format!("未知设备状态: {}", other)),
        }
    }
}

/// 设备类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentType {
    Refrigerator,
    Freezer,
    Hvac,
    PosTerminal,
    SecurityCamera,
    Lighting,
    DoorSensor,
    FuelPump,
    FuelTank,
    EvCharger,
    SolarPanel,
    Vacuum,
    Atm,
    FireAlarm,
    Building,
    Structure,
    EmergencySystem,
    CoffeeMachine,
    BeverageDispenser,
    Oven,
    Microwave,
    HotFoodCabinet,
    CarWash,
    PressureWasher,
    WaterRecycler,
}

impl EquipmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Refrigerator => "refrigerator",
            EquipmentType::Freezer => "freezer",
            EquipmentType::Hvac => "hvac",
            EquipmentType::PosTerminal => "pos-terminal",
            EquipmentType::SecurityCamera => "security-camera",
            EquipmentType::Lighting => "lighting",
            EquipmentType::DoorSensor => "door-sensor",
            EquipmentType::FuelPump => "fuel-pump",
            EquipmentType::FuelTank => "fuel-tank",
            EquipmentType::EvCharger => "ev-charger",
            EquipmentType::SolarPanel => "solar-panel",
            EquipmentType::Vacuum => "vacuum",
            EquipmentType::Atm => "atm",
            EquipmentType::FireAlarm => "fire-alarm",
            EquipmentType::Building => "building",
            EquipmentType::Structure => "structure",
            EquipmentType::EmergencySystem => "emergency-system",
            EquipmentType::CoffeeMachine => "coffee-machine",
            EquipmentType::BeverageDispenser => "beverage-dispenser",
            EquipmentType::Oven => "oven",
            EquipmentType::Microwave => "microwave",
            EquipmentType::HotFoodCabinet => "hot-food-cabinet",
            EquipmentType::CarWash => "car-wash",
            EquipmentType::PressureWasher => "pressure-washer",
            EquipmentType::WaterRecycler => "water-recycler",
        }
    }

    /// 是否带温度传感器
    pub fn has_temperature(&self) -> bool {
        matches!(
            self,
            EquipmentType::Refrigerator | EquipmentType::Freezer | EquipmentType::Hvac
        )
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_string()))
            .map_err(|_| format!("未知设备类型: {}", s))
    }
}

/// 业务重要性等级（与运行状态无关）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Criticality {
    T1,
    T2,
    T3,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::T1 => "T1",
            Criticality::T2 => "T2",
            Criticality::T3 => "T3",
        }
    }
}

impl FromStr for Criticality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "T1" => Ok(Criticality::T1),
            "T2" => Ok(Criticality::T2),
            "T3" => Ok(Criticality::T3),
            other => Err(format!("未知重要性等级: {}", other)),
        }
    }
}

/// 设备资产记录
///
/// JSON 字段名与仪表盘前端的持久化格式一致（camelCase）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EquipmentType,
    pub location: String,
    pub zone: String,
    pub status: EquipmentStatus,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    pub last_maintenance: String,
    pub next_maintenance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criticality: Option<Criticality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_cycle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpis: Option<String>,
}

impl Equipment {
    pub fn has_alert(&self, message: &str) -> bool {
        self.alerts.iter().any(|a| a.message == message)
    }

    pub fn alert_messages(&self) -> Vec<&str> {
        self.alerts.iter().map(|a| a.message.as_str()).collect()
    }
}

/// 设备局部更新请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentRequest {
    #[validate(length(min = 1, max = 200, message = "设备名称长度应在 1-200 字符之间"))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<EquipmentType>,

    #[validate(length(min = 1, max = 200, message = "位置长度应在 1-200 字符之间"))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 100, message = "区域长度应在 1-100 字符之间"))]
    pub zone: Option<String>,

    pub status: Option<EquipmentStatus>,

    pub alerts: Option<Vec<Alert>>,

    pub last_maintenance: Option<String>,
    pub next_maintenance: Option<String>,

    #[validate(range(min = -60.0, max = 400.0, message = "温度应在 -60 到 400 摄氏度之间"))]
    pub temperature: Option<f64>,

    #[validate(range(min = -60.0, max = 400.0, message = "目标温度应在 -60 到 400 摄氏度之间"))]
    pub target_temp: Option<f64>,

    pub category: Option<String>,
    pub criticality: Option<Criticality>,
    pub maintenance_mode: Option<String>,
    pub service_frequency: Option<String>,
    pub replacement_cycle: Option<String>,
    pub compliance: Option<String>,
    pub kpis: Option<String>,
}

impl UpdateEquipmentRequest {
    /// 将补丁应用到记录上（只覆盖提供了的字段）
    pub fn apply_to(self, eq: &mut Equipment) {
        if let Some(v) = self.name {
            eq.name = v;
        }
        if let Some(v) = self.kind {
            eq.kind = v;
        }
        if let Some(v) = self.location {
            eq.location = v;
        }
        if let Some(v) = self.zone {
            eq.zone = v;
        }
        if let Some(v) = self.status {
            eq.status = v;
        }
        if let Some(v) = self.alerts {
            eq.alerts = v;
        }
        if let Some(v) = self.last_maintenance {
            eq.last_maintenance = v;
        }
        if let Some(v) = self.next_maintenance {
            eq.next_maintenance = v;
        }
        eq.temperature = self.temperature.or(eq.temperature.take());
        eq.target_temp = self.target_temp.or(eq.target_temp.take());
        eq.category = self.category.or(eq.category.take());
        eq.criticality = self.criticality.or(eq.criticality.take());
        eq.maintenance_mode = self.maintenance_mode.or(eq.maintenance_mode.take());
        eq.service_frequency = self.service_frequency.or(eq.service_frequency.take());
        eq.replacement_cycle = self.replacement_cycle.or(eq.replacement_cycle.take());
        eq.compliance = self.compliance.or(eq.compliance.take());
        eq.kpis = self.kpis.or(eq.kpis.take());
    }
}

/// 设备列表查询参数（缺省时使用当前筛选选择）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentListQuery {
    pub zone: Option<String>,
    pub category: Option<String>,
}

/// 导入文件格式
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    /// 资产维护映射表
    #[default]
    Mapping,
    /// 导出格式的设备表
    Equipment,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub format: ImportFormat,
}
