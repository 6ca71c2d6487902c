use crate::application::ports::repositories::LikeRepository;
use crate::domain::entities::LikeTarget;
use crate::domain::value_objects::UserId;
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::info;

/// トグル 1 回の結果。`like_count` はトグル後の再読込値。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleResult {
    pub liked: bool,
    pub like_count: i64,
}

/// Like トグルのアプリケーションサービス。
///
/// 原子性(Like とカルマ台帳エントリの同時生成・同時破棄)は
/// `LikeRepository` の実装が保証する。ここでは結果の組み立てと
/// ロギングのみ行う。
pub struct EngagementService {
    likes: Arc<dyn LikeRepository>,
}

impl EngagementService {
    pub fn new(likes: Arc<dyn LikeRepository>) -> Self {
        Self { likes }
    }

    /// (user, target) の Like をトグルし、トグル後の Like 数とともに返す。
    ///
    /// 同一ユーザーが同一対象に 2 回続けて呼ぶと `(true, false)` になり、
    /// Like もカルマ台帳も元の状態に戻る。
    pub async fn toggle_like(
        &self,
        user_id: &UserId,
        target: &LikeTarget,
    ) -> Result<ToggleResult, AppError> {
        let liked = self.likes.toggle_like(user_id, target).await?;
        let like_count = self.likes.like_count(target).await?;

        info!(
            user_id = %user_id,
            target_kind = target.kind(),
            target_id = target.target_id(),
            liked,
            like_count,
            "like toggled"
        );

        Ok(ToggleResult { liked, like_count })
    }
}
