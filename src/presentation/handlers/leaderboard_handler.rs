use crate::application::services::LeaderboardService;
use crate::presentation::dto::{ApiResponse, LeaderboardEntryResponse};
use crate::shared::Result;
use chrono::Utc;
use std::sync::Arc;

/// カルマリーダーボード API の薄いハンドラ。
pub struct LeaderboardHandler {
    service: Arc<LeaderboardService>,
}

impl LeaderboardHandler {
    pub fn new(service: Arc<LeaderboardService>) -> Self {
        Self { service }
    }

    /// 直近 24 時間の上位 5 名。呼び出し時刻を基準にする。
    pub async fn daily_leaderboard(&self) -> ApiResponse<Vec<LeaderboardEntryResponse>> {
        ApiResponse::from_result(self.daily_leaderboard_inner().await)
    }

    async fn daily_leaderboard_inner(&self) -> Result<Vec<LeaderboardEntryResponse>> {
        let entries = self.service.daily_top(Utc::now()).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}
