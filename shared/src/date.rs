//! 时间字段的宽松解析
//!
//! 后端返回的时间字段形态不一：
//! - RFC 3339 字符串 (`2024-05-01T12:00:00Z`)
//! - 不带时区的日期时间 / 纯日期（按 UTC 处理）
//! - 毫秒时间戳数字
//! - MongoDB 扩展 JSON `{"$date": ...}`

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 将原始 JSON 值转换为 UTC 时间，无法识别时返回 `fallback`
pub fn coerce_timestamp(raw: Option<&Value>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    match raw {
        None | Some(Value::Null) => fallback,
        Some(value) => parse_value(value).unwrap_or_else(|| {
            tracing::debug!(raw = %value, "unrecognised timestamp, using fallback");
            fallback
        }),
    }
}

/// 解析单个时间值；无法识别时返回 `None`
pub fn parse_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_str(s),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        Value::Object(obj) => obj.get("$date").and_then(parse_value),
        _ => None,
    }
}

/// 解析时间字符串
pub fn parse_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 页面上展示的日期，例如 `May 01, 2024`
pub fn display_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %d, %Y").to_string()
}

/// 新闻等字段里的日期字符串：能解析就格式化，否则原样返回
pub fn display_date_str(raw: &str) -> String {
    parse_str(raw)
        .map(|dt| display_date(&dt))
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fallback() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_rfc3339_with_offset_is_converted_to_utc() {
        let raw = json!("2024-05-01T14:00:00+02:00");
        let dt = coerce_timestamp(Some(&raw), fallback());
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_naive_datetime_and_date() {
        let raw = json!("2024-05-01T12:30:00.123456");
        let dt = coerce_timestamp(Some(&raw), fallback());
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-05-01 12:30");

        let raw = json!("2024-05-01");
        let dt = coerce_timestamp(Some(&raw), fallback());
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_epoch_millis_and_mongo_wrapper() {
        let raw = json!(1_714_564_800_000i64);
        assert_eq!(
            coerce_timestamp(Some(&raw), fallback()),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );

        let raw = json!({ "$date": "2024-05-01T12:00:00Z" });
        assert_eq!(
            coerce_timestamp(Some(&raw), fallback()),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_garbage_and_missing_use_fallback() {
        assert_eq!(coerce_timestamp(None, fallback()), fallback());
        assert_eq!(coerce_timestamp(Some(&json!("yesterday")), fallback()), fallback());
        assert_eq!(coerce_timestamp(Some(&json!(true)), fallback()), fallback());
    }

    #[test]
    fn test_display_date_str_keeps_unparseable_text() {
        assert_eq!(display_date_str("2024-05-01"), "May 01, 2024");
        assert_eq!(display_date_str("last week"), "last week");
    }
}
