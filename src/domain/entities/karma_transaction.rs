use crate::domain::value_objects::{KarmaTransactionId, LikeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Like に紐づくカルマ台帳エントリ。
///
/// `source_like_id` の Like と 1:1 で、Like と同じトランザクション内で
/// 生成・破棄される。編集されることはない(追記専用)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KarmaTransaction {
    id: KarmaTransactionId,
    user_id: UserId,
    amount: i64,
    source_like_id: LikeId,
    created_at: DateTime<Utc>,
}

impl KarmaTransaction {
    /// 現在時刻で新しい台帳エントリを作成する。`user_id` は受領者。
    pub fn new(user_id: UserId, amount: i64, source_like_id: LikeId) -> Self {
        Self {
            id: KarmaTransactionId::random(),
            user_id,
            amount,
            source_like_id,
            created_at: Utc::now(),
        }
    }

    /// 既存レコードから台帳エントリを復元する。
    pub fn from_parts(
        id: KarmaTransactionId,
        user_id: UserId,
        amount: i64,
        source_like_id: LikeId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            amount,
            source_like_id,
            created_at,
        }
    }

    pub fn id(&self) -> &KarmaTransactionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn source_like_id(&self) -> &LikeId {
        &self.source_like_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
