use crate::application::services::LeaderboardEntry;
use serde::{Deserialize, Serialize};

/// リーダーボード 1 行のワイヤ表現。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntryResponse {
    pub user_id: String,
    pub username: String,
    pub daily_karma: i64,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            user_id: entry.user_id.to_string(),
            username: entry.username,
            daily_karma: entry.daily_karma,
        }
    }
}
