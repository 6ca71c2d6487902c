use crate::application::services::FeedService;
use crate::domain::value_objects::{CommentId, PostId};
use crate::presentation::dto::{ApiResponse, PostResponse};
use crate::presentation::handlers::engagement_handler::parse_user_id;
use crate::shared::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub author_id: String,
    pub post_id: String,
    pub parent_id: Option<String>,
    pub content: String,
}

/// 投稿・コメント API の薄いハンドラ。
pub struct FeedHandler {
    service: Arc<FeedService>,
}

impl FeedHandler {
    pub fn new(service: Arc<FeedService>) -> Self {
        Self { service }
    }

    /// 投稿を作成し、作成直後の投稿 ID を返す。
    pub async fn create_post(&self, request: CreatePostRequest) -> ApiResponse<String> {
        ApiResponse::from_result(self.create_post_inner(request).await)
    }

    pub async fn create_comment(&self, request: CreateCommentRequest) -> ApiResponse<String> {
        ApiResponse::from_result(self.create_comment_inner(request).await)
    }

    /// 全投稿を新しい順に、コメントを入れ子にして返す。
    pub async fn list_posts(&self) -> ApiResponse<Vec<PostResponse>> {
        ApiResponse::from_result(self.list_posts_inner().await)
    }

    async fn create_post_inner(&self, request: CreatePostRequest) -> Result<String> {
        let author_id = parse_user_id(&request.author_id)?;
        let post = self.service.create_post(&author_id, &request.content).await?;
        Ok(post.id.to_string())
    }

    async fn create_comment_inner(&self, request: CreateCommentRequest) -> Result<String> {
        let author_id = parse_user_id(&request.author_id)?;
        let post_id = PostId::new(request.post_id).map_err(AppError::InvalidInput)?;
        let parent_id = request
            .parent_id
            .map(|id| CommentId::new(id).map_err(AppError::InvalidInput))
            .transpose()?;
        let comment = self
            .service
            .create_comment(&author_id, &post_id, parent_id.as_ref(), &request.content)
            .await?;
        Ok(comment.id.to_string())
    }

    async fn list_posts_inner(&self) -> Result<Vec<PostResponse>> {
        let threads = self.service.list_posts().await?;
        Ok(threads.iter().map(PostResponse::from).collect())
    }
}
