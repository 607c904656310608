//! 时间处理工具

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// 当前 UTC 日期
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 解析维护日期
///
/// 接受 `YYYY-MM-DD` 或带时间的 RFC 3339 字符串，只保留日期部分。
pub fn parse_maintenance_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    parse_iso8601(s).ok().map(|dt| dt.date_naive())
}

/// `date` 距 `today` 的天数（过去为负数）
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// 以 `YYYY-MM-DD` 格式化日期
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 相对今天偏移 N 天的日期
pub fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// 解析 ISO 8601 时间字符串
pub fn parse_iso8601(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}
