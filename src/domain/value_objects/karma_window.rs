use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// カルマ集計の時間ウィンドウ `[start, end]`。
///
/// 境界はどちらも含む。ミリ秒精度で永続化された created_at と
/// 比較されるため、境界値ちょうどのトランザクションは集計対象になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KarmaWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl KarmaWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, String> {
        if start > end {
            return Err("KarmaWindow start must not be after end".to_string());
        }
        Ok(Self { start, end })
    }

    /// `end` から遡って `hours` 時間のウィンドウを作る。
    pub fn trailing_hours(end: DateTime<Utc>, hours: i64) -> Self {
        Self {
            start: end - Duration::hours(hours),
            end,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}
