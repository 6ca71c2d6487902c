use crate::application::services::EngagementService;
use crate::domain::entities::LikeTarget;
use crate::domain::value_objects::{CommentId, PostId, UserId};
use crate::presentation::dto::{ApiResponse, LikeToggleResponse};
use crate::shared::{AppError, Result};
use std::sync::Arc;

/// Like トグル API の薄いハンドラ。
///
/// 文字列 ID の検証とレスポンスの詰め替えのみを行い、
/// トグル自体は `EngagementService` に委譲する。
pub struct EngagementHandler {
    service: Arc<EngagementService>,
}

impl EngagementHandler {
    pub fn new(service: Arc<EngagementService>) -> Self {
        Self { service }
    }

    pub async fn toggle_post_like(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> ApiResponse<LikeToggleResponse> {
        ApiResponse::from_result(self.toggle_post_like_inner(user_id, post_id).await)
    }

    pub async fn toggle_comment_like(
        &self,
        user_id: &str,
        comment_id: &str,
    ) -> ApiResponse<LikeToggleResponse> {
        ApiResponse::from_result(self.toggle_comment_like_inner(user_id, comment_id).await)
    }

    async fn toggle_post_like_inner(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> Result<LikeToggleResponse> {
        let user_id = parse_user_id(user_id)?;
        let post_id = PostId::new(post_id.to_string()).map_err(AppError::InvalidInput)?;
        let result = self
            .service
            .toggle_like(&user_id, &LikeTarget::Post(post_id))
            .await?;
        Ok(result.into())
    }

    async fn toggle_comment_like_inner(
        &self,
        user_id: &str,
        comment_id: &str,
    ) -> Result<LikeToggleResponse> {
        let user_id = parse_user_id(user_id)?;
        let comment_id = CommentId::new(comment_id.to_string()).map_err(AppError::InvalidInput)?;
        let result = self
            .service
            .toggle_like(&user_id, &LikeTarget::Comment(comment_id))
            .await?;
        Ok(result.into())
    }
}

pub(super) fn parse_user_id(user_id: &str) -> Result<UserId> {
    UserId::new(user_id.to_string()).map_err(AppError::InvalidInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repositories::LikeRepository;
    use crate::domain::entities::Like;
    use async_trait::async_trait;

    /// ID 検証だけを見るので、呼ばれたら成功を返すスタブで足りる。
    struct AlwaysLikedRepository;

    #[async_trait]
    impl LikeRepository for AlwaysLikedRepository {
        async fn toggle_like(&self, _: &UserId, _: &LikeTarget) -> Result<bool> {
            Ok(true)
        }

        async fn like_count(&self, _: &LikeTarget) -> Result<i64> {
            Ok(1)
        }

        async fn find_like(&self, _: &UserId, _: &LikeTarget) -> Result<Option<Like>> {
            Ok(None)
        }
    }

    fn handler() -> EngagementHandler {
        EngagementHandler::new(Arc::new(EngagementService::new(Arc::new(
            AlwaysLikedRepository,
        ))))
    }

    #[tokio::test]
    async fn malformed_ids_become_invalid_input() {
        let response = handler()
            .toggle_post_like("not-a-uuid", &PostId::random().to_string())
            .await;
        assert!(!response.success);
        assert_eq!(response.error_code.as_deref(), Some("invalid_input"));

        let response = handler()
            .toggle_comment_like(&UserId::random().to_string(), "")
            .await;
        assert!(!response.success);
        assert_eq!(response.error_code.as_deref(), Some("invalid_input"));
    }

    #[tokio::test]
    async fn valid_ids_pass_through_to_the_service() {
        let response = handler()
            .toggle_post_like(
                &UserId::random().to_string(),
                &PostId::random().to_string(),
            )
            .await;
        assert!(response.success);
        assert_eq!(
            response.data,
            Some(LikeToggleResponse {
                liked: true,
                like_count: 1
            })
        );
    }
}
