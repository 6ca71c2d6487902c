use crate::application::services::ToggleResult;
use serde::{Deserialize, Serialize};

/// トグル API のレスポンスボディ。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeToggleResponse {
    pub liked: bool,
    pub like_count: i64,
}

impl From<ToggleResult> for LikeToggleResponse {
    fn from(result: ToggleResult) -> Self {
        Self {
            liked: result.liked,
            like_count: result.like_count,
        }
    }
}
