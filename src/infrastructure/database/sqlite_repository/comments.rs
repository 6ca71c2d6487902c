use super::SqliteRepository;
use super::mapper::millis_to_datetime;
use super::queries::{INSERT_COMMENT, SELECT_COMMENT_BY_ID};
use crate::application::ports::repositories::{CommentRepository, CommentWithCount};
use crate::domain::entities::Comment;
use crate::domain::value_objects::{CommentId, PostId, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite};

#[derive(Debug, FromRow)]
struct CommentRow {
    id: String,
    post_id: String,
    author_id: String,
    parent_id: Option<String>,
    content: String,
    created_at: i64,
}

impl CommentRow {
    fn into_domain(self) -> Result<Comment, AppError> {
        let id = CommentId::new(self.id).map_err(AppError::Serialization)?;
        let post_id = PostId::new(self.post_id).map_err(AppError::Serialization)?;
        let author_id = UserId::new(self.author_id).map_err(AppError::Serialization)?;
        let parent_id = self
            .parent_id
            .map(CommentId::new)
            .transpose()
            .map_err(AppError::Serialization)?;
        Ok(Comment::from_parts(
            id,
            post_id,
            author_id,
            parent_id,
            self.content,
            millis_to_datetime(self.created_at)?,
        ))
    }
}

#[async_trait]
impl CommentRepository for SqliteRepository {
    async fn create_comment(&self, comment: &Comment) -> Result<(), AppError> {
        sqlx::query(INSERT_COMMENT)
            .bind(comment.id.as_str())
            .bind(comment.post_id.as_str())
            .bind(comment.author_id.as_str())
            .bind(comment.parent_id.as_ref().map(|id| id.as_str()))
            .bind(&comment.content)
            .bind(comment.created_at.timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(SELECT_COMMENT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_domain()?)),
            None => Ok(None),
        }
    }

    async fn list_for_posts(
        &self,
        post_ids: &[PostId],
    ) -> Result<Vec<CommentWithCount>, AppError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        // IN リストが可変長なので QueryBuilder で組み立てる。
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT c.id, c.post_id, c.author_id, u.username AS author_username, \
             c.parent_id, c.content, c.created_at, \
             (SELECT COUNT(*) FROM likes l WHERE l.comment_id = c.id) AS like_count \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.post_id IN (",
        );
        let mut separated = builder.separated(", ");
        for post_id in post_ids {
            separated.push_bind(post_id.as_str());
        }
        separated.push_unseparated(")");
        builder.push(" ORDER BY c.created_at ASC, c.id ASC");

        let rows = builder.build().fetch_all(self.pool.get_pool()).await?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in rows {
            let comment = CommentRow {
                id: row.try_get("id")?,
                post_id: row.try_get("post_id")?,
                author_id: row.try_get("author_id")?,
                parent_id: row.try_get("parent_id")?,
                content: row.try_get("content")?,
                created_at: row.try_get("created_at")?,
            }
            .into_domain()?;
            comments.push(CommentWithCount {
                comment,
                author_username: row.try_get("author_username")?,
                like_count: row.try_get("like_count")?,
            });
        }
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repositories::{PostRepository, UserRepository};
    use crate::domain::entities::{Post, User};
    use crate::infrastructure::database::connection_pool::ConnectionPool;
    use chrono::{DateTime, Duration, Utc};

    struct Fixture {
        repo: SqliteRepository,
        author: User,
        post: Post,
    }

    async fn setup_fixture() -> Fixture {
        let pool = ConnectionPool::from_memory().await.expect("pool");
        pool.migrate().await.expect("migrate");
        let repo = SqliteRepository::new(pool);

        let author = User::new("alice".to_string());
        repo.create_user(&author).await.expect("author");
        let post = Post::new(author.id.clone(), "post".to_string());
        repo.create_post(&post).await.expect("post");

        Fixture { repo, author, post }
    }

    fn comment_at(
        fixture: &Fixture,
        parent: Option<&CommentId>,
        at: DateTime<Utc>,
        content: &str,
    ) -> Comment {
        Comment::from_parts(
            CommentId::random(),
            fixture.post.id.clone(),
            fixture.author.id.clone(),
            parent.cloned(),
            content.to_string(),
            at,
        )
    }

    #[tokio::test]
    async fn create_and_get_comment() {
        let fixture = setup_fixture().await;
        let comment = comment_at(&fixture, None, Utc::now(), "hello");

        fixture.repo.create_comment(&comment).await.expect("create");
        let fetched = fixture
            .repo
            .get_comment(&comment.id)
            .await
            .expect("get")
            .expect("some");

        assert_eq!(fetched.id, comment.id);
        assert_eq!(fetched.post_id, comment.post_id);
        assert_eq!(fetched.parent_id, None);
        assert_eq!(fetched.content, "hello");
        // 永続化でミリ秒に丸められる。
        assert_eq!(
            fetched.created_at.timestamp_millis(),
            comment.created_at.timestamp_millis()
        );
    }

    #[tokio::test]
    async fn list_for_posts_orders_by_created_at_ascending() {
        let fixture = setup_fixture().await;
        let base = Utc::now();

        let root = comment_at(&fixture, None, base, "root");
        let reply = comment_at(&fixture, Some(&root.id), base + Duration::minutes(1), "reply");
        let late_root = comment_at(&fixture, None, base + Duration::minutes(2), "late");

        // 挿入順をばらして順序が SQL で決まることを確かめる。
        for comment in [&late_root, &root, &reply] {
            fixture.repo.create_comment(comment).await.expect("insert");
        }

        let comments = fixture
            .repo
            .list_for_posts(std::slice::from_ref(&fixture.post.id))
            .await
            .expect("list");

        let ids: Vec<&CommentId> = comments.iter().map(|c| &c.comment.id).collect();
        assert_eq!(ids, vec![&root.id, &reply.id, &late_root.id]);
        assert!(comments.iter().all(|c| c.author_username == "alice"));
    }

    #[tokio::test]
    async fn list_for_posts_with_no_ids_is_empty() {
        let fixture = setup_fixture().await;
        let comments = fixture.repo.list_for_posts(&[]).await.expect("list");
        assert!(comments.is_empty());
    }
}
