//! Like トグルの永続化実装。
//!
//! トグル 1 回は `BEGIN IMMEDIATE` トランザクション 1 つとして実行する。
//! 対象の解決・既存 Like の確認・Like とカルマ台帳エントリの書き込みが
//! すべて同じ書き込みロック下で起きるため、同一 (user, target) への
//! 並行トグルが両方「未 Like」を観測して二重挿入することはない。

use super::SqliteRepository;
use super::mapper::millis_to_datetime;
use super::queries::{
    COUNT_LIKES_FOR_COMMENT, COUNT_LIKES_FOR_POST, DELETE_KARMA_BY_SOURCE_LIKE,
    DELETE_LIKE_BY_ID, INSERT_KARMA_TRANSACTION, INSERT_LIKE, SELECT_COMMENT_AUTHOR,
    SELECT_LIKE_FOR_COMMENT, SELECT_LIKE_FOR_POST, SELECT_POST_AUTHOR,
};
use crate::application::ports::repositories::LikeRepository;
use crate::domain::entities::{KarmaTransaction, Like, LikeTarget};
use crate::domain::value_objects::{CommentId, LikeId, PostId, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use sqlx::{FromRow, Row, SqliteConnection};
use tracing::warn;

#[derive(Debug, FromRow)]
struct LikeRow {
    id: String,
    user_id: String,
    post_id: Option<String>,
    comment_id: Option<String>,
    created_at: i64,
}

impl LikeRow {
    fn into_domain(self) -> Result<Like, AppError> {
        let id = LikeId::new(self.id).map_err(AppError::Serialization)?;
        let user_id = UserId::new(self.user_id).map_err(AppError::Serialization)?;
        let target = match (self.post_id, self.comment_id) {
            (Some(post_id), None) => {
                LikeTarget::Post(PostId::new(post_id).map_err(AppError::Serialization)?)
            }
            (None, Some(comment_id)) => {
                LikeTarget::Comment(CommentId::new(comment_id).map_err(AppError::Serialization)?)
            }
            _ => {
                return Err(AppError::Database(
                    "Like row violates the exactly-one-target constraint".to_string(),
                ));
            }
        };
        Ok(Like::from_parts(
            id,
            user_id,
            target,
            millis_to_datetime(self.created_at)?,
        ))
    }
}

/// 対象を解決してコンテンツ投稿者を返す。対象が存在しなければ NotFound。
async fn resolve_target(
    conn: &mut SqliteConnection,
    target: &LikeTarget,
) -> Result<UserId, AppError> {
    let query = match target {
        LikeTarget::Post(_) => SELECT_POST_AUTHOR,
        LikeTarget::Comment(_) => SELECT_COMMENT_AUTHOR,
    };
    let row = sqlx::query(query)
        .bind(target.target_id())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "{} {} does not exist",
                target.kind(),
                target.target_id()
            ))
        })?;

    let author_id: String = row.try_get("author_id")?;
    UserId::new(author_id).map_err(AppError::Serialization)
}

async fn find_like_on(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    target: &LikeTarget,
) -> Result<Option<Like>, AppError> {
    let query = match target {
        LikeTarget::Post(_) => SELECT_LIKE_FOR_POST,
        LikeTarget::Comment(_) => SELECT_LIKE_FOR_COMMENT,
    };
    let row = sqlx::query_as::<_, LikeRow>(query)
        .bind(user_id.as_str())
        .bind(target.target_id())
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(Some(row.into_domain()?)),
        None => Ok(None),
    }
}

/// 台帳エントリ → Like の順で削除する。どちらも同じトランザクション内。
async fn revoke_like(conn: &mut SqliteConnection, like_id: &LikeId) -> Result<(), AppError> {
    sqlx::query(DELETE_KARMA_BY_SOURCE_LIKE)
        .bind(like_id.as_str())
        .execute(&mut *conn)
        .await?;
    sqlx::query(DELETE_LIKE_BY_ID)
        .bind(like_id.as_str())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Like を挿入する。一意制約違反の判別に使うため sqlx のエラーを
/// そのまま返す。
async fn insert_like_row(conn: &mut SqliteConnection, like: &Like) -> Result<(), sqlx::Error> {
    let (post_id, comment_id) = match like.target() {
        LikeTarget::Post(id) => (Some(id.as_str()), None),
        LikeTarget::Comment(id) => (None, Some(id.as_str())),
    };
    sqlx::query(INSERT_LIKE)
        .bind(like.id().as_str())
        .bind(like.user_id().as_str())
        .bind(post_id)
        .bind(comment_id)
        .bind(like.created_at().timestamp_millis())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn insert_karma_row(
    conn: &mut SqliteConnection,
    transaction: &KarmaTransaction,
) -> Result<(), AppError> {
    sqlx::query(INSERT_KARMA_TRANSACTION)
        .bind(transaction.id().as_str())
        .bind(transaction.user_id().as_str())
        .bind(transaction.amount())
        .bind(transaction.source_like_id().as_str())
        .bind(transaction.created_at().timestamp_millis())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

async fn toggle_in_tx(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    target: &LikeTarget,
) -> Result<bool, AppError> {
    let author_id = resolve_target(conn, target).await?;

    if let Some(existing) = find_like_on(conn, user_id, target).await? {
        revoke_like(conn, existing.id()).await?;
        return Ok(false);
    }

    let like = Like::new(user_id.clone(), target.clone());
    match insert_like_row(conn, &like).await {
        Ok(()) => {
            let transaction =
                KarmaTransaction::new(author_id, target.karma_amount(), like.id().clone());
            insert_karma_row(conn, &transaction).await?;
            Ok(true)
        }
        Err(err) if is_unique_violation(&err) => {
            // アプリ層の存在確認をすり抜けた一意制約違反。Like が既に
            // あったものとして扱い直し、取り消しで決着させる。
            warn!(
                user_id = %user_id,
                target_id = target.target_id(),
                "like uniqueness backstop hit, resolving as existing like"
            );
            match find_like_on(conn, user_id, target).await? {
                Some(existing) => {
                    revoke_like(conn, existing.id()).await?;
                    Ok(false)
                }
                None => Err(AppError::Conflict(
                    "Like uniqueness race could not be resolved".to_string(),
                )),
            }
        }
        Err(err) => Err(err.into()),
    }
}

#[async_trait]
impl LikeRepository for SqliteRepository {
    async fn toggle_like(&self, user_id: &UserId, target: &LikeTarget) -> Result<bool, AppError> {
        let user_id = user_id.clone();
        let target = target.clone();
        self.pool
            .immediate_transaction(move |conn| {
                Box::pin(async move { toggle_in_tx(conn, &user_id, &target).await })
            })
            .await
    }

    async fn like_count(&self, target: &LikeTarget) -> Result<i64, AppError> {
        let query = match target {
            LikeTarget::Post(_) => COUNT_LIKES_FOR_POST,
            LikeTarget::Comment(_) => COUNT_LIKES_FOR_COMMENT,
        };
        let count: i64 = sqlx::query_scalar(query)
            .bind(target.target_id())
            .fetch_one(self.pool.get_pool())
            .await?;
        Ok(count)
    }

    async fn find_like(
        &self,
        user_id: &UserId,
        target: &LikeTarget,
    ) -> Result<Option<Like>, AppError> {
        let mut conn = self.pool.get_pool().acquire().await?;
        find_like_on(&mut *conn, user_id, target).await
    }
}
