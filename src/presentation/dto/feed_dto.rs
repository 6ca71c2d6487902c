//! 投稿一覧のワイヤ表現。
//!
//! 構築済みのフォレスト(arena + インデックス)を受け取って入れ子の
//! `replies` に変換する。変換はクエリ実行から切り離された純粋な処理で、
//! ここだけが任意深さの再帰を持つ。

use crate::application::ports::repositories::CommentWithCount;
use crate::application::services::PostThread;
use crate::domain::comment_tree::CommentForest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub author_username: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub created_at: i64,
    pub like_count: i64,
    pub replies: Vec<CommentResponse>,
}

impl CommentResponse {
    fn from_forest(forest: &CommentForest<CommentWithCount>, index: usize) -> Self {
        let node = forest.node(index);
        Self {
            id: node.comment.id.to_string(),
            post_id: node.comment.post_id.to_string(),
            author_id: node.comment.author_id.to_string(),
            author_username: node.author_username.clone(),
            parent_id: node.comment.parent_id.as_ref().map(|id| id.to_string()),
            content: node.comment.content.clone(),
            created_at: node.comment.created_at.timestamp_millis(),
            like_count: node.like_count,
            replies: forest
                .replies_of(index)
                .iter()
                .map(|&reply| Self::from_forest(forest, reply))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub author_username: String,
    pub content: String,
    pub created_at: i64,
    pub like_count: i64,
    pub comments: Vec<CommentResponse>,
}

impl From<&PostThread> for PostResponse {
    fn from(thread: &PostThread) -> Self {
        Self {
            id: thread.post.post.id.to_string(),
            author_id: thread.post.post.author_id.to_string(),
            author_username: thread.post.author_username.clone(),
            content: thread.post.post.content.clone(),
            created_at: thread.post.post.created_at.timestamp_millis(),
            like_count: thread.post.like_count,
            comments: thread
                .comments
                .roots()
                .iter()
                .map(|&root| CommentResponse::from_forest(&thread.comments, root))
                .collect(),
        }
    }
}
