use crate::domain::constants::{COMMENT_KARMA, POST_KARMA};
use crate::domain::value_objects::{CommentId, LikeId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Like の対象。投稿かコメントのどちらか一方のみ。
///
/// 「ちょうど一つの対象」は実行時チェックではなく型の構築で保証する。
/// ストレージ側の CHECK 制約はあくまでバックストップ。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum LikeTarget {
    Post(PostId),
    Comment(CommentId),
}

impl LikeTarget {
    /// この対象への Like 1 件でコンテンツ投稿者に入るカルマ量。
    pub fn karma_amount(&self) -> i64 {
        match self {
            LikeTarget::Post(_) => POST_KARMA,
            LikeTarget::Comment(_) => COMMENT_KARMA,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LikeTarget::Post(_) => "post",
            LikeTarget::Comment(_) => "comment",
        }
    }

    pub fn target_id(&self) -> &str {
        match self {
            LikeTarget::Post(id) => id.as_str(),
            LikeTarget::Comment(id) => id.as_str(),
        }
    }
}

/// ユーザーが対象に付けた Like。(user, target) の組で一意。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    id: LikeId,
    user_id: UserId,
    target: LikeTarget,
    created_at: DateTime<Utc>,
}

impl Like {
    /// 現在時刻で新しい Like を作成する。
    pub fn new(user_id: UserId, target: LikeTarget) -> Self {
        Self {
            id: LikeId::random(),
            user_id,
            target,
            created_at: Utc::now(),
        }
    }

    /// 既存レコードから Like を復元する。
    pub fn from_parts(
        id: LikeId,
        user_id: UserId,
        target: LikeTarget,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            target,
            created_at,
        }
    }

    pub fn id(&self) -> &LikeId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn target(&self) -> &LikeTarget {
        &self.target
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
