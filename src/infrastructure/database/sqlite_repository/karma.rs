use super::SqliteRepository;
use super::mapper::millis_to_datetime;
use super::queries::{
    SELECT_KARMA_BY_SOURCE_LIKE, SELECT_KARMA_TOTALS_IN_WINDOW, SUM_KARMA_FOR_USER_IN_WINDOW,
};
use crate::application::ports::repositories::{KarmaLedger, UserKarmaTotal};
use crate::domain::entities::KarmaTransaction;
use crate::domain::value_objects::{KarmaTransactionId, KarmaWindow, LikeId, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
struct KarmaRow {
    id: String,
    user_id: String,
    amount: i64,
    source_like_id: String,
    created_at: i64,
}

impl KarmaRow {
    fn into_domain(self) -> Result<KarmaTransaction, AppError> {
        let id = KarmaTransactionId::new(self.id).map_err(AppError::Serialization)?;
        let user_id = UserId::new(self.user_id).map_err(AppError::Serialization)?;
        let source_like_id = LikeId::new(self.source_like_id).map_err(AppError::Serialization)?;
        Ok(KarmaTransaction::from_parts(
            id,
            user_id,
            self.amount,
            source_like_id,
            millis_to_datetime(self.created_at)?,
        ))
    }
}

#[derive(Debug, FromRow)]
struct KarmaTotalRow {
    user_id: String,
    username: String,
    amount: i64,
}

impl KarmaTotalRow {
    fn into_read_model(self) -> Result<UserKarmaTotal, AppError> {
        Ok(UserKarmaTotal {
            user_id: UserId::new(self.user_id).map_err(AppError::Serialization)?,
            username: self.username,
            amount: self.amount,
        })
    }
}

#[async_trait]
impl KarmaLedger for SqliteRepository {
    async fn sum_for_user(
        &self,
        user_id: &UserId,
        window: &KarmaWindow,
    ) -> Result<i64, AppError> {
        let sum: i64 = sqlx::query_scalar(SUM_KARMA_FOR_USER_IN_WINDOW)
            .bind(user_id.as_str())
            .bind(window.start_millis())
            .bind(window.end_millis())
            .fetch_one(self.pool.get_pool())
            .await?;
        Ok(sum)
    }

    async fn window_totals(&self, window: &KarmaWindow) -> Result<Vec<UserKarmaTotal>, AppError> {
        let rows = sqlx::query_as::<_, KarmaTotalRow>(SELECT_KARMA_TOTALS_IN_WINDOW)
            .bind(window.start_millis())
            .bind(window.end_millis())
            .fetch_all(self.pool.get_pool())
            .await?;

        rows.into_iter()
            .map(KarmaTotalRow::into_read_model)
            .collect()
    }

    async fn find_by_source(
        &self,
        like_id: &LikeId,
    ) -> Result<Option<KarmaTransaction>, AppError> {
        let row = sqlx::query_as::<_, KarmaRow>(SELECT_KARMA_BY_SOURCE_LIKE)
            .bind(like_id.as_str())
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_domain()?)),
            None => Ok(None),
        }
    }
}
