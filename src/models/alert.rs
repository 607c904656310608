//! 设备告警模型
//!
//! 告警在创建时即带有结构化的严重级别，状态推导不再依赖告警文本。
//! 历史数据中的纯文本告警在加载时按关键字推断一次级别。

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EquipmentStatus;

/// 纯文本告警中表示严重故障的关键字
pub const SEVERE_KEYWORDS: [&str; 4] = ["empty", "failure", "malfunction", "leak"];

/// 告警级别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    /// 该级别对应的最低设备状态
    pub fn implied_status(&self) -> EquipmentStatus {
        match self {
            AlertSeverity::Warning => EquipmentStatus::Warning,
            AlertSeverity::Critical => EquipmentStatus::Critical,
        }
    }

    /// 从历史纯文本告警推断级别
    pub fn infer_from_text(message: &str) -> Self {
        if SEVERE_KEYWORDS.iter().any(|k| message.contains(k)) {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        }
    }
}

/// 模拟器可触发的故障类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    WaterLow,
    BeansEmpty,
    BeansLow,
    CleaningRequired,
    TempIssue,
    PressureIssue,
}

impl IssueKind {
    pub const ALL: [IssueKind; 6] = [
        IssueKind::WaterLow,
        IssueKind::BeansEmpty,
        IssueKind::BeansLow,
        IssueKind::CleaningRequired,
        IssueKind::TempIssue,
        IssueKind::PressureIssue,
    ];

    /// 按告警文本反查故障类型
    pub fn from_message(message: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.message() == message)
    }

    pub fn message(&self) -> &'static str {
        match self {
            IssueKind::WaterLow => "Water reservoir low - refill required",
            IssueKind::BeansEmpty => "Coffee beans empty - machine inoperable",
            IssueKind::BeansLow => "Coffee beans running low - restock soon",
            IssueKind::CleaningRequired => "Cleaning cycle overdue - maintenance required",
            IssueKind::TempIssue => "Temperature regulation malfunction detected",
            IssueKind::PressureIssue => "Pressure system anomaly - check pump",
        }
    }

    pub fn severity(&self) -> AlertSeverity {
        match self {
            IssueKind::BeansEmpty | IssueKind::TempIssue => AlertSeverity::Critical,
            IssueKind::WaterLow
            | IssueKind::BeansLow
            | IssueKind::CleaningRequired
            | IssueKind::PressureIssue => AlertSeverity::Warning,
        }
    }
}

/// 设备告警
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "AlertRepr")]
pub struct Alert {
    pub message: String,
    pub severity: AlertSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<IssueKind>,
}

impl Alert {
    pub fn new(message: impl Into<String>, severity: AlertSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
            code: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, AlertSeverity::Warning)
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(message, AlertSeverity::Critical)
    }

    /// 从纯文本构造（仅用于历史数据和 CSV 导入）
    pub fn from_legacy_text(message: impl Into<String>) -> Self {
        let message = message.into();
        let severity = AlertSeverity::infer_from_text(&message);
        Self::new(message, severity)
    }

    pub fn is_critical(&self) -> bool {
        self.severity == AlertSeverity::Critical
    }

    /// 告警对应的故障类型（无标记时按文本反查）
    pub fn issue_kind(&self) -> Option<IssueKind> {
        self.code.or_else(|| IssueKind::from_message(&self.message))
    }
}

impl From<IssueKind> for Alert {
    fn from(kind: IssueKind) -> Self {
        Self {
            message: kind.message().to_string(),
            severity: kind.severity(),
            code: Some(kind),
        }
    }
}

/// 兼容两种存储格式：纯文本和结构化对象
#[derive(Deserialize)]
#[serde(untagged)]
enum AlertRepr {
    Text(String),
    Structured(StructuredAlert),
}

#[derive(Deserialize)]
struct StructuredAlert {
    message: String,
    severity: AlertSeverity,
    #[serde(default)]
    code: Option<IssueKind>,
}

impl From<AlertRepr> for Alert {
    fn from(repr: AlertRepr) -> Self {
        match repr {
            AlertRepr::Text(text) => Alert::from_legacy_text(text),
            AlertRepr::Structured(s) => Alert {
                message: s.message,
                severity: s.severity,
                code: s.code,
            },
        }
    }
}

/// 添加告警请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddAlertRequest {
    #[validate(length(min = 1, max = 500, message = "告警内容长度应在 1-500 字符之间"))]
    pub message: String,
    pub severity: AlertSeverity,
}

impl AddAlertRequest {
    pub fn into_alert(self) -> Alert {
        Alert::new(self.message.trim(), self.severity)
    }
}

/// 移除单条告警请求
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveAlertRequest {
    pub message: String,
}
