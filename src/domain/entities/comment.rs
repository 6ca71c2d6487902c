use crate::domain::value_objects::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 投稿へのコメント。`parent_id` が同一投稿内の別コメントを指すことで
/// 返信ツリーを形成する。
///
/// 不変条件:
/// - `parent_id` が指すコメントは同じ `post_id` に属する
/// - コメントの `created_at` は親の `created_at` 以上(親が先に存在する)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        post_id: PostId,
        author_id: UserId,
        parent_id: Option<CommentId>,
        content: String,
    ) -> Self {
        Self {
            id: CommentId::random(),
            post_id,
            author_id,
            parent_id,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn from_parts(
        id: CommentId,
        post_id: PostId,
        author_id: UserId,
        parent_id: Option<CommentId>,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            post_id,
            author_id,
            parent_id,
            content,
            created_at,
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
