use crate::application::ports::repositories::{
    CommentRepository, CommentWithCount, PostRepository, PostWithCount,
};
use crate::domain::comment_tree::CommentForest;
use crate::domain::entities::{Comment, Post};
use crate::domain::value_objects::{CommentId, PostId, UserId};
use crate::shared::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 投稿 1 件とそのコメントフォレスト。
#[derive(Debug, Clone)]
pub struct PostThread {
    pub post: PostWithCount,
    pub comments: CommentForest<CommentWithCount>,
}

/// 投稿・コメントの作成と一覧のアプリケーションサービス。
///
/// 一覧は投稿を created_at 降順で引いた後、対象投稿のコメントを
/// 一括で引いて投稿ごとにフォレストへ組み立てる。
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl FeedService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn create_post(&self, author_id: &UserId, content: &str) -> Result<Post, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::InvalidInput(
                "Post content cannot be empty".to_string(),
            ));
        }

        let post = Post::new(author_id.clone(), content.to_string());
        self.posts.create_post(&post).await?;
        debug!(post_id = %post.id, author_id = %author_id, "post created");
        Ok(post)
    }

    /// コメントを作成する。
    ///
    /// `parent_id` を指定する場合、親コメントが存在し、かつ同じ投稿に
    /// 属していなければならない。別投稿の親を指す入力は不正として弾く。
    pub async fn create_comment(
        &self,
        author_id: &UserId,
        post_id: &PostId,
        parent_id: Option<&CommentId>,
        content: &str,
    ) -> Result<Comment, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::InvalidInput(
                "Comment content cannot be empty".to_string(),
            ));
        }

        self.posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {post_id} does not exist")))?;

        if let Some(parent_id) = parent_id {
            let parent = self
                .comments
                .get_comment(parent_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Parent comment {parent_id} does not exist"))
                })?;
            if parent.post_id != *post_id {
                return Err(AppError::InvalidInput(
                    "Parent comment belongs to a different post".to_string(),
                ));
            }
        }

        let comment = Comment::new(
            post_id.clone(),
            author_id.clone(),
            parent_id.cloned(),
            content.to_string(),
        );
        self.comments.create_comment(&comment).await?;
        debug!(comment_id = %comment.id, post_id = %post_id, "comment created");
        Ok(comment)
    }

    /// 全投稿を created_at 降順で返す。各投稿はコメントフォレスト付き。
    pub async fn list_posts(&self) -> Result<Vec<PostThread>, AppError> {
        let posts = self.posts.list_posts().await?;
        let post_ids: Vec<PostId> = posts.iter().map(|p| p.post.id.clone()).collect();
        let comments = self.comments.list_for_posts(&post_ids).await?;

        // 投稿ごとに分配する。created_at 昇順は list_for_posts が保証する。
        let mut by_post: HashMap<PostId, Vec<CommentWithCount>> = HashMap::new();
        for comment in comments {
            by_post
                .entry(comment.comment.post_id.clone())
                .or_default()
                .push(comment);
        }

        let threads = posts
            .into_iter()
            .map(|post| {
                let post_comments = by_post.remove(&post.post.id).unwrap_or_default();
                PostThread {
                    comments: CommentForest::build(post_comments),
                    post,
                }
            })
            .collect();
        Ok(threads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryContentStore {
        posts: Mutex<Vec<Post>>,
        comments: Mutex<Vec<Comment>>,
    }

    #[async_trait]
    impl PostRepository for InMemoryContentStore {
        async fn create_post(&self, post: &Post) -> Result<(), AppError> {
            self.posts.lock().unwrap().push(post.clone());
            Ok(())
        }

        async fn get_post(&self, id: &PostId) -> Result<Option<Post>, AppError> {
            Ok(self
                .posts
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == *id)
                .cloned())
        }

        async fn list_posts(&self) -> Result<Vec<PostWithCount>, AppError> {
            let mut posts = self.posts.lock().unwrap().clone();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(posts
                .into_iter()
                .map(|post| PostWithCount {
                    post,
                    author_username: "author".to_string(),
                    like_count: 0,
                })
                .collect())
        }
    }

    #[async_trait]
    impl CommentRepository for InMemoryContentStore {
        async fn create_comment(&self, comment: &Comment) -> Result<(), AppError> {
            self.comments.lock().unwrap().push(comment.clone());
            Ok(())
        }

        async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>, AppError> {
            Ok(self
                .comments
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == *id)
                .cloned())
        }

        async fn list_for_posts(
            &self,
            post_ids: &[PostId],
        ) -> Result<Vec<CommentWithCount>, AppError> {
            let mut comments: Vec<Comment> = self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|c| post_ids.contains(&c.post_id))
                .cloned()
                .collect();
            comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Ok(comments
                .into_iter()
                .map(|comment| CommentWithCount {
                    comment,
                    author_username: "author".to_string(),
                    like_count: 0,
                })
                .collect())
        }
    }

    fn service_with_store() -> (FeedService, Arc<InMemoryContentStore>) {
        let store = Arc::new(InMemoryContentStore::default());
        (FeedService::new(store.clone(), store.clone()), store)
    }

    #[tokio::test]
    async fn create_comment_rejects_cross_post_parent() {
        let (service, _store) = service_with_store();
        let author = User::new("alice".to_string());

        let post_a = service
            .create_post(&author.id, "post a")
            .await
            .expect("post a");
        let post_b = service
            .create_post(&author.id, "post b")
            .await
            .expect("post b");
        let parent = service
            .create_comment(&author.id, &post_a.id, None, "root on a")
            .await
            .expect("parent comment");

        let err = service
            .create_comment(&author.id, &post_b.id, Some(&parent.id), "reply")
            .await
            .expect_err("parent belongs to post a");
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn create_comment_requires_existing_post_and_parent() {
        let (service, _store) = service_with_store();
        let author = User::new("alice".to_string());

        let err = service
            .create_comment(&author.id, &PostId::random(), None, "orphan")
            .await
            .expect_err("post missing");
        assert!(matches!(err, AppError::NotFound(_)));

        let post = service.create_post(&author.id, "post").await.expect("post");
        let err = service
            .create_comment(&author.id, &post.id, Some(&CommentId::random()), "reply")
            .await
            .expect_err("parent missing");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_content_is_rejected() {
        let (service, _store) = service_with_store();
        let author = User::new("alice".to_string());

        let err = service
            .create_post(&author.id, "   ")
            .await
            .expect_err("blank post");
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn list_posts_groups_comment_forests_per_post() {
        let (service, store) = service_with_store();
        let author = User::new("alice".to_string());

        let post_a = service
            .create_post(&author.id, "post a")
            .await
            .expect("post a");
        let post_b = service
            .create_post(&author.id, "post b")
            .await
            .expect("post b");

        // c1 (root) -> c2 (reply), c3 (root) を post_a に、c4 を post_b に置く。
        let base = Utc::now();
        let c1 = Comment::from_parts(
            CommentId::random(),
            post_a.id.clone(),
            author.id.clone(),
            None,
            "c1".to_string(),
            base + Duration::minutes(1),
        );
        let c2 = Comment::from_parts(
            CommentId::random(),
            post_a.id.clone(),
            author.id.clone(),
            Some(c1.id.clone()),
            "c2".to_string(),
            base + Duration::minutes(2),
        );
        let c3 = Comment::from_parts(
            CommentId::random(),
            post_a.id.clone(),
            author.id.clone(),
            None,
            "c3".to_string(),
            base + Duration::minutes(3),
        );
        let c4 = Comment::from_parts(
            CommentId::random(),
            post_b.id.clone(),
            author.id.clone(),
            None,
            "c4".to_string(),
            base + Duration::minutes(4),
        );
        for comment in [&c1, &c2, &c3, &c4] {
            store.create_comment(comment).await.expect("insert comment");
        }

        let threads = service.list_posts().await.expect("list");
        assert_eq!(threads.len(), 2);

        let thread_a = threads
            .iter()
            .find(|t| t.post.post.id == post_a.id)
            .expect("post a thread");
        let roots: Vec<&CommentId> = thread_a
            .comments
            .roots()
            .iter()
            .map(|&i| &thread_a.comments.node(i).comment.id)
            .collect();
        assert_eq!(roots, vec![&c1.id, &c3.id]);

        let c1_index = thread_a.comments.roots()[0];
        let replies: Vec<&CommentId> = thread_a
            .comments
            .replies_of(c1_index)
            .iter()
            .map(|&i| &thread_a.comments.node(i).comment.id)
            .collect();
        assert_eq!(replies, vec![&c2.id]);

        let thread_b = threads
            .iter()
            .find(|t| t.post.post.id == post_b.id)
            .expect("post b thread");
        assert_eq!(thread_b.comments.len(), 1);
    }
}
