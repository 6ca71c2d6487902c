use crate::domain::value_objects::{PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// コミュニティへの投稿。作成後は削除以外で変更されない。
/// 削除時はコメントと Like がカスケードで消える(ストレージ制約)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author_id: UserId, content: String) -> Self {
        Self {
            id: PostId::random(),
            author_id,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn from_parts(
        id: PostId,
        author_id: UserId,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            content,
            created_at,
        }
    }
}
