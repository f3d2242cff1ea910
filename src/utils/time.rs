//! 时间边界模块
//!
//! 系统内部（存储、比较）一律使用 UTC；固定的 UTC+8 民用时区只在
//! 输入解析和展示格式化两个边界使用，不考虑夏令时。
//! 除本模块外，任何代码都不应出现时区换算。

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::errors::{DocReviewError, Result};

/// 固定民用时区偏移：UTC+8（秒）
const CIVIL_OFFSET_SECS: i32 = 8 * 3600;

const CIVIL_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// 民用时区偏移
pub fn civil_offset() -> FixedOffset {
    FixedOffset::east_opt(CIVIL_OFFSET_SECS).expect("fixed UTC+8 offset is valid")
}

/// 解析民用时间字符串为 UTC 时刻
///
/// 输入按 UTC+8 解释，支持 `2024-05-01 12:00:00`、`2024-05-01T12:00:00`
/// 和省略秒的 `2024-05-01 12:00`。
pub fn parse_civil_datetime(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    let naive = CIVIL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            DocReviewError::date_parse(format!("无法解析时间: {trimmed}，期望格式 YYYY-MM-DD HH:MM:SS"))
        })?;

    let local = civil_offset()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| DocReviewError::date_parse(format!("时间不明确: {trimmed}")))?;

    Ok(local.with_timezone(&Utc))
}

/// 将 UTC 时刻格式化为民用时间字符串（UTC+8）
pub fn format_civil(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&civil_offset())
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Unix 秒 → UTC 时刻（存储层读取用）
pub fn from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_civil_is_utc_plus_8() {
        // UTC+8 的 2024-05-01 12:00:00 等于 UTC 的 04:00:00
        let parsed = parse_civil_datetime("2024-05-01 12:00:00").unwrap();
        assert_eq!(parsed.timestamp(), 1714536000);
    }

    #[test]
    fn test_parse_accepts_t_separator_and_minute_precision() {
        let a = parse_civil_datetime("2024-05-01T12:00:00").unwrap();
        let b = parse_civil_datetime("2024-05-01 12:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_civil_datetime("not a date").is_err());
        assert!(parse_civil_datetime("2024-13-40 99:00:00").is_err());
    }

    #[test]
    fn test_format_round_trip() {
        let parsed = parse_civil_datetime("2024-05-01 08:30:00").unwrap();
        assert_eq!(format_civil(parsed), "2024-05-01 08:30:00");
    }

    #[test]
    fn test_from_unix() {
        assert_eq!(from_unix(1714536000).timestamp(), 1714536000);
    }
}
