pub mod engagement_dto;
pub mod feed_dto;
pub mod leaderboard_dto;

pub use engagement_dto::LikeToggleResponse;
pub use feed_dto::{CommentResponse, PostResponse};
pub use leaderboard_dto::LeaderboardEntryResponse;

use crate::shared::AppError;
use serde::{Deserialize, Serialize};

/// API 層へ返す共通レスポンス型。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub error_code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
        }
    }

    pub fn from_app_error(error: AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            error_code: Some(error.code().to_string()),
        }
    }

    pub fn from_result(result: crate::shared::Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_app_error(err),
        }
    }
}
