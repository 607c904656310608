//! 告警与设备状态联动规则

use crate::models::{Alert, AlertSeverity, Equipment, EquipmentStatus};

/// 状态严重程度排序（offline 不参与告警推导）
fn severity_rank(status: EquipmentStatus) -> u8 {
    match status {
        EquipmentStatus::Operational => 0,
        EquipmentStatus::Warning => 1,
        EquipmentStatus::Critical => 2,
        EquipmentStatus::Offline => 3,
    }
}

/// 添加告警
///
/// 同文本告警已存在时不做任何修改并返回 `false`。否则追加告警，并把状态
/// 提升到告警级别对应的状态；已离线或更严重的状态保持不变。
pub fn add_alert(eq: &mut Equipment, alert: Alert) -> bool {
    if eq.has_alert(&alert.message) {
        return false;
    }

    let implied = alert.severity.implied_status();
    if eq.status != EquipmentStatus::Offline && severity_rank(implied) > severity_rank(eq.status) {
        eq.status = implied;
    }
    eq.alerts.push(alert);
    true
}

/// 移除单条告警
///
/// 告警清空后状态恢复为 operational；仍有告警且原状态为 critical 时，
/// 只有剩余告警中存在 critical 级别才维持 critical，否则降为 warning。
pub fn resolve_alert(eq: &mut Equipment, message: &str) -> Option<Alert> {
    let index = eq.alerts.iter().position(|a| a.message == message)?;
    let removed = eq.alerts.remove(index);

    if eq.alerts.is_empty() {
        eq.status = EquipmentStatus::Operational;
    } else if eq.status == EquipmentStatus::Critical {
        eq.status = match highest_severity(eq) {
            Some(AlertSeverity::Critical) => EquipmentStatus::Critical,
            _ => EquipmentStatus::Warning,
        };
    }

    Some(removed)
}

/// 清除全部告警并恢复正常
pub fn resolve_all(eq: &mut Equipment) -> Vec<Alert> {
    eq.status = EquipmentStatus::Operational;
    std::mem::take(&mut eq.alerts)
}

/// 当前告警中的最高级别
pub fn highest_severity(eq: &Equipment) -> Option<AlertSeverity> {
    eq.alerts.iter().map(|a| a.severity).max()
}
