use crate::shared::error::AppError;
use chrono::{DateTime, TimeZone, Utc};

/// 永続化されたミリ秒タイムスタンプを復元する。
pub(super) fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, AppError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| AppError::Serialization(format!("Invalid timestamp: {millis}")))
}
