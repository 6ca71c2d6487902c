use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub engagement: EngagementConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// SQLITE_BUSY を諦めるまでの待ち時間(秒)。
    pub busy_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementConfig {
    /// リーダーボードの集計対象となる直近ウィンドウ(時間)。
    pub leaderboard_window_hours: i64,
    /// リーダーボードに載せる最大ユーザー数。
    pub leaderboard_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:enishi.db".to_string(),
            max_connections: 5,
            busy_timeout_secs: 5,
        }
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            leaderboard_window_hours: crate::domain::constants::LEADERBOARD_WINDOW_HOURS,
            leaderboard_size: crate::domain::constants::LEADERBOARD_SIZE,
        }
    }
}
