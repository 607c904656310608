//! 资产维护映射表导入
//!
//! 把维护映射表（每行一个资产）转换为设备记录。运行状态、温度和维护日期
//! 是按重要性等级随机生成的演示数据。

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::errors::AppError;
use crate::models::{Alert, Criticality, Equipment, EquipmentStatus, EquipmentType};
use crate::utils::format_date;

const COL_ASSET: &str = "Asset";
const COL_CATEGORY: &str = "Category";
const COL_CRITICALITY: &str = "Criticality";
const COL_MAINTENANCE_MODE: &str = "Maintenance Mode";
const COL_SERVICE_FREQUENCY: &str = "Typical Service Frequency";
const COL_REPLACEMENT_CYCLE: &str = "Typical Replacement Cycle";
const COL_COMPLIANCE: &str = "Compliance";
const COL_KPIS: &str = "Primary KPIs";

const DEFAULT_ZONE: &str = "Fresh Produce";
const TARGET_TEMP: f64 = 4.0;

fn type_for_category(category: &str) -> EquipmentType {
    match category {
        "Refrigeration" => EquipmentType::Refrigerator,
        "HVAC" => EquipmentType::Hvac,
        "Security" => EquipmentType::SecurityCamera,
        "Store Equipment" => EquipmentType::Freezer,
        "Energy" | "Electrical" => EquipmentType::Lighting,
        _ => EquipmentType::PosTerminal,
    }
}

fn zone_for_category(category: &str) -> &'static str {
    match category {
        "Refrigeration" | "Energy" => "Dairy & Eggs",
        "Store Equipment" | "Electrical" => "Bakery",
        "HVAC" => "Meat & Seafood",
        _ => DEFAULT_ZONE,
    }
}

/// 按重要性等级抽取运行状态
fn random_status<R: Rng>(criticality: Option<Criticality>, rng: &mut R) -> EquipmentStatus {
    let roll: f64 = rng.gen();
    match criticality {
        Some(Criticality::T1) if roll > 0.9 => EquipmentStatus::Critical,
        Some(Criticality::T1) if roll > 0.7 => EquipmentStatus::Warning,
        Some(Criticality::T2) if roll > 0.85 => EquipmentStatus::Warning,
        Some(Criticality::T1) | Some(Criticality::T2) => EquipmentStatus::Operational,
        _ if roll > 0.9 => EquipmentStatus::Offline,
        _ => EquipmentStatus::Operational,
    }
}

fn alerts_for_status(status: EquipmentStatus) -> Vec<Alert> {
    match status {
        EquipmentStatus::Operational => Vec::new(),
        EquipmentStatus::Warning => vec![Alert::warning("Scheduled maintenance approaching")],
        EquipmentStatus::Critical => vec![
            Alert::critical("Immediate attention required"),
            Alert::critical("Performance degradation detected"),
        ],
        EquipmentStatus::Offline => vec![
            Alert::warning("System offline"),
            Alert::warning("Service required"),
        ],
    }
}

/// 将映射表 CSV 转换为设备集合
///
/// 设备 ID 依行号生成为 `ASSET-001`、`ASSET-002` ……
pub fn import_asset_mapping<R: Rng>(
    text: &str,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<Equipment>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let idx_asset = column(COL_ASSET)
        .ok_or_else(|| AppError::ValidationError(format!("缺少列: {}", COL_ASSET)))?;
    let idx_category = column(COL_CATEGORY);
    let idx_criticality = column(COL_CRITICALITY);
    let idx_mode = column(COL_MAINTENANCE_MODE);
    let idx_frequency = column(COL_SERVICE_FREQUENCY);
    let idx_replacement = column(COL_REPLACEMENT_CYCLE);
    let idx_compliance = column(COL_COMPLIANCE);
    let idx_kpis = column(COL_KPIS);

    let mut list = Vec::new();
    for row in reader.records() {
        let row = row?;
        let get = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let Some(name) = get(Some(idx_asset)) else {
            continue;
        };
        let category = get(idx_category).unwrap_or_default();
        let criticality = get(idx_criticality).and_then(|c| c.parse::<Criticality>().ok());

        let kind = type_for_category(&category);
        let status = random_status(criticality, rng);
        let (temperature, target_temp) = if kind.has_temperature() {
            let reading: f64 = rng.gen_range(2.0..7.0);
            (Some((reading * 10.0).round() / 10.0), Some(TARGET_TEMP))
        } else {
            (None, None)
        };
        let last = today - Duration::days(rng.gen_range(30..90));
        let next = today + Duration::days(rng.gen_range(30..120));

        list.push(Equipment {
            id: format!("ASSET-{:03}", list.len() + 1),
            name,
            kind,
            location: format!("{} Section", category),
            zone: zone_for_category(&category).to_string(),
            status,
            alerts: alerts_for_status(status),
            last_maintenance: format_date(last),
            next_maintenance: format_date(next),
            temperature,
            target_temp,
            category: Some(category).filter(|c| !c.is_empty()),
            criticality,
            maintenance_mode: get(idx_mode),
            service_frequency: get(idx_frequency),
            replacement_cycle: get(idx_replacement),
            compliance: get(idx_compliance),
            kpis: get(idx_kpis),
        });
    }

    tracing::info!(count = list.len(), "资产映射表导入完成");
    Ok(list)
}
