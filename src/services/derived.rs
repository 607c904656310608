//! 派生状态计算
//!
//! 全部为纯函数，不修改输入。

use chrono::NaiveDate;

use crate::models::{
    ComplianceCounts, Equipment, FilterSelection, StatusCounts, ALL_CATEGORIES, ALL_ZONES,
};
use crate::utils::{days_until, parse_maintenance_date};

/// 维护即将到期的天数窗口
pub const DUE_SOON_DAYS: i64 = 30;

/// 按区域和类别筛选，保持原有顺序
pub fn filter_equipment(list: &[Equipment], zone: &str, category: &str) -> Vec<Equipment> {
    list.iter()
        .filter(|eq| matches_filter(eq, zone, category))
        .cloned()
        .collect()
}

/// 按当前筛选选择过滤
pub fn filter_by_selection(list: &[Equipment], selection: &FilterSelection) -> Vec<Equipment> {
    filter_equipment(list, &selection.zone, &selection.category)
}

pub fn matches_filter(eq: &Equipment, zone: &str, category: &str) -> bool {
    let zone_ok = zone == ALL_ZONES || eq.zone == zone;
    let category_ok =
        category == ALL_CATEGORIES || eq.category.as_deref() == Some(category);
    zone_ok && category_ok
}

/// 类别列表，首项为 "All Categories"，其余按首次出现顺序去重
pub fn categories(list: &[Equipment]) -> Vec<String> {
    distinct_with_head(ALL_CATEGORIES, list.iter().filter_map(|e| e.category.as_deref()))
}

/// 区域列表，首项为 "All Zones"
pub fn zones(list: &[Equipment]) -> Vec<String> {
    distinct_with_head(ALL_ZONES, list.iter().map(|e| e.zone.as_str()))
}

fn distinct_with_head<'a>(head: &str, values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out = vec![head.to_string()];
    for value in values {
        if !out[1..].iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}

pub fn status_counts(list: &[Equipment]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for eq in list {
        counts.increment(eq.status);
    }
    counts
}

/// 合规统计（仅比较日期）
///
/// 合规、不合规、即将到期三项互相独立：30 天内到期且运行正常的设备
/// 同时计入合规和即将到期。下次维护日期无法解析的记录只计入
/// `indeterminate`。
pub fn compliance_counts(list: &[Equipment], today: NaiveDate) -> ComplianceCounts {
    let mut counts = ComplianceCounts::default();

    for eq in list {
        let Some(next) = parse_maintenance_date(&eq.next_maintenance) else {
            counts.indeterminate += 1;
            continue;
        };

        let days = days_until(next, today);
        let blocked = eq.status.blocks_compliance();

        if days > 0 && !blocked {
            counts.compliant += 1;
        }
        if days <= 0 || blocked {
            counts.non_compliant += 1;
        }
        if days > 0 && days <= DUE_SOON_DAYS {
            counts.maintenance_due_soon += 1;
        }
    }

    counts
}
