use super::SqliteRepository;
use super::mapper::millis_to_datetime;
use super::queries::{INSERT_USER, SELECT_USER_BY_ID};
use crate::application::ports::repositories::UserRepository;
use crate::domain::entities::User;
use crate::domain::value_objects::UserId;
use crate::shared::error::AppError;
use async_trait::async_trait;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    username: String,
    created_at: i64,
}

impl UserRow {
    fn into_domain(self) -> Result<User, AppError> {
        let id = UserId::new(self.id).map_err(AppError::Serialization)?;
        Ok(User::from_parts(
            id,
            self.username,
            millis_to_datetime(self.created_at)?,
        ))
    }
}

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(INSERT_USER)
            .bind(user.id.as_str())
            .bind(&user.username)
            .bind(user.created_at.timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_USER_BY_ID)
            .bind(id.as_str())
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_domain()?)),
            None => Ok(None),
        }
    }
}
