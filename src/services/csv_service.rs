//! 设备集合 CSV 导出与导入

use crate::errors::AppError;
use crate::models::{Alert, Criticality, Equipment, EquipmentStatus, EquipmentType};

/// 导出文件名
pub const EXPORT_FILE_NAME: &str = "Retail_Assets_Maintenance_Mapping.csv";

/// 告警在单元格内的分隔符
pub const ALERT_SEPARATOR: &str = "; ";

/// 固定的 18 列表头
pub const CSV_HEADERS: [&str; 18] = [
    "Asset ID",
    "Asset Name",
    "Asset Type",
    "Location",
    "Zone",
    "Status",
    "Temperature",
    "Target Temperature",
    "Last Maintenance",
    "Next Maintenance",
    "Alerts",
    "Category",
    "Criticality",
    "Maintenance Mode",
    "Service Frequency",
    "Replacement Cycle",
    "Compliance",
    "KPIs",
];

fn opt_num(v: Option<f64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

fn opt_str(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

fn to_record(eq: &Equipment) -> [String; 18] {
    [
        eq.id.clone(),
        eq.name.clone(),
        eq.kind.as_str().to_string(),
        eq.location.clone(),
        eq.zone.clone(),
        eq.status.as_str().to_string(),
        opt_num(eq.temperature),
        opt_num(eq.target_temp),
        eq.last_maintenance.clone(),
        eq.next_maintenance.clone(),
        eq.alert_messages().join(ALERT_SEPARATOR),
        opt_str(&eq.category),
        eq.criticality.map(|c| c.as_str().to_string()).unwrap_or_default(),
        opt_str(&eq.maintenance_mode),
        opt_str(&eq.service_frequency),
        opt_str(&eq.replacement_cycle),
        opt_str(&eq.compliance),
        opt_str(&eq.kpis),
    ]
}

/// 导出设备集合
///
/// 只有包含逗号、引号或换行的字段才加引号。
pub fn export_equipment_csv(list: &[Equipment]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for eq in list {
        writer.write_record(to_record(eq))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV 写入失败: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalError(format!("CSV 编码错误: {}", e)))
}

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// 文本列原样保留，空单元格视为缺失
fn get_string(row: &csv::StringRecord, idx: usize) -> Option<String> {
    row.get(idx)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// 枚举和数值列去掉首尾空白
fn get_trimmed(row: &csv::StringRecord, idx: usize) -> Option<String> {
    row.get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn parse_value<T: std::str::FromStr>(
    value: String,
    column: &str,
    line: usize,
) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| AppError::ValidationError(format!("第 {} 行 {} 列无效: {}", line, column, e)))
}

fn parse_field<T: std::str::FromStr>(
    value: Option<String>,
    column: &str,
    line: usize,
) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    value.map(|v| parse_value(v, column, line)).transpose()
}

/// 解析导出格式的 CSV
///
/// 纯文本告警按关键字推断级别，与加载历史数据的规则一致。
pub fn parse_equipment_csv(text: &str) -> Result<Vec<Equipment>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut idx = [0usize; 18];
    for (slot, name) in idx.iter_mut().zip(CSV_HEADERS) {
        *slot = header_index(&headers, name)
            .ok_or_else(|| AppError::ValidationError(format!("缺少列: {}", name)))?;
    }

    let mut list = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // 表头占第 1 行
        let line = i + 2;
        let text_at = |n: usize| get_string(&row, idx[n]);
        let value_at = |n: usize| get_trimmed(&row, idx[n]);
        let required = |value: Option<String>, n: usize| {
            value.ok_or_else(|| {
                AppError::ValidationError(format!("第 {} 行缺少 {}", line, CSV_HEADERS[n]))
            })
        };

        let kind: EquipmentType = parse_value(required(value_at(2), 2)?, CSV_HEADERS[2], line)?;
        let status: EquipmentStatus =
            parse_value(required(value_at(5), 5)?, CSV_HEADERS[5], line)?;

        let alerts = text_at(10)
            .map(|cell| {
                cell.split(ALERT_SEPARATOR)
                    .filter(|s| !s.is_empty())
                    .map(Alert::from_legacy_text)
                    .collect()
            })
            .unwrap_or_default();

        list.push(Equipment {
            id: required(text_at(0), 0)?,
            name: text_at(1).unwrap_or_default(),
            kind,
            location: text_at(3).unwrap_or_default(),
            zone: text_at(4).unwrap_or_default(),
            status,
            alerts,
            last_maintenance: text_at(8).unwrap_or_default(),
            next_maintenance: text_at(9).unwrap_or_default(),
            temperature: parse_field(value_at(6), CSV_HEADERS[6], line)?,
            target_temp: parse_field(value_at(7), CSV_HEADERS[7], line)?,
            category: text_at(11),
            criticality: parse_field::<Criticality>(value_at(12), CSV_HEADERS[12], line)?,
            maintenance_mode: text_at(13),
            service_frequency: text_at(14),
            replacement_cycle: text_at(15),
            compliance: text_at(16),
            kpis: text_at(17),
        });
    }

    Ok(list)
}
