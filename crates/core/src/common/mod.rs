pub mod time;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// 可接受的无时区日期时间格式，统一按 UTC 解释。
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// # Summary
/// 将客户端提交的日期字符串解析为 UTC 时间点。
///
/// # Logic
/// 1. 优先按 RFC 3339 (带时区偏移) 解析。
/// 2. 其次尝试无时区的日期时间格式，视为 UTC。
/// 3. 最后尝试纯日期 `YYYY-MM-DD`，取当天 UTC 零点。
///
/// # Arguments
/// * `text`: 原始字符串，两端空白会被忽略。
///
/// # Returns
/// 成功返回 `DateTime<Utc>`，否则返回描述性错误。
pub fn parse_datetime(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("Empty date string".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("Unrecognized date: {}", text))
}

/// # Summary
/// 查询用的闭区间 `[start, end]`。
///
/// # Invariants
/// - 两端均包含在内。
/// - 允许 `start > end`，此时区间为空而非错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// 判断时间点是否落在区间内 (含两端)
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        *at >= self.start && *at <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_plain_date_is_utc_midnight() {
        let dt = parse_datetime("2023-06-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_datetime("2023-11-15T10:00:00-03:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 11, 15, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_datetime(" 2023-11-15 10:30 ").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 11, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("not-a-date").is_err());
        assert!(parse_datetime("2023-13-40").is_err());
        assert!(parse_datetime("").is_err());
    }

    #[test]
    fn test_range_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2023, 6, 3, 0, 0, 0).unwrap();
        let range = DateRange::new(start, end);
        assert!(range.contains(&start));
        assert!(range.contains(&end));
        assert!(!range.contains(&(end + chrono::Duration::seconds(1))));

        let inverted = DateRange::new(end, start);
        assert!(!inverted.contains(&start));
    }
}
