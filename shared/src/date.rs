//! 时间类型模块
//!
//! 后端（FastAPI + `datetime.utcnow()`）输出的时间不带时区，例如
//! `2024-03-01T10:00:00.123000`；也可能是带偏移的 RFC 3339。
//! `Timestamp` 同时接受两种格式，无时区的一律按 UTC 处理。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 可传输的 UTC 时间戳
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[inline]
    pub const fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// 解析 RFC 3339 或无时区的 ISO 8601 字符串
    ///
    /// 返回 None 如果两种格式都不匹配
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| Self(naive.and_utc()))
    }

    #[inline]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    #[inline]
    pub fn date_naive(&self) -> NaiveDate {
        self.0.date_naive()
    }

    #[inline]
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
