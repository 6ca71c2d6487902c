use super::SqliteRepository;
use super::mapper::millis_to_datetime;
use super::queries::{INSERT_POST, SELECT_POST_BY_ID, SELECT_POSTS_WITH_COUNTS};
use crate::application::ports::repositories::{PostRepository, PostWithCount};
use crate::domain::entities::Post;
use crate::domain::value_objects::{PostId, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
struct PostRow {
    id: String,
    author_id: String,
    content: String,
    created_at: i64,
}

impl PostRow {
    fn into_domain(self) -> Result<Post, AppError> {
        let id = PostId::new(self.id).map_err(AppError::Serialization)?;
        let author_id = UserId::new(self.author_id).map_err(AppError::Serialization)?;
        Ok(Post::from_parts(
            id,
            author_id,
            self.content,
            millis_to_datetime(self.created_at)?,
        ))
    }
}

#[derive(Debug, FromRow)]
struct PostWithCountRow {
    id: String,
    author_id: String,
    author_username: String,
    content: String,
    created_at: i64,
    like_count: i64,
}

impl PostWithCountRow {
    fn into_read_model(self) -> Result<PostWithCount, AppError> {
        let post = PostRow {
            id: self.id,
            author_id: self.author_id,
            content: self.content,
            created_at: self.created_at,
        }
        .into_domain()?;
        Ok(PostWithCount {
            post,
            author_username: self.author_username,
            like_count: self.like_count,
        })
    }
}

#[async_trait]
impl PostRepository for SqliteRepository {
    async fn create_post(&self, post: &Post) -> Result<(), AppError> {
        sqlx::query(INSERT_POST)
            .bind(post.id.as_str())
            .bind(post.author_id.as_str())
            .bind(&post.content)
            .bind(post.created_at.timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(SELECT_POST_BY_ID)
            .bind(id.as_str())
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_domain()?)),
            None => Ok(None),
        }
    }

    async fn list_posts(&self) -> Result<Vec<PostWithCount>, AppError> {
        let rows = sqlx::query_as::<_, PostWithCountRow>(SELECT_POSTS_WITH_COUNTS)
            .fetch_all(self.pool.get_pool())
            .await?;

        rows.into_iter()
            .map(PostWithCountRow::into_read_model)
            .collect()
    }
}
