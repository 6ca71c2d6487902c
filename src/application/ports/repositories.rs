use crate::domain::comment_tree::ThreadNode;
use crate::domain::entities::{Comment, KarmaTransaction, Like, LikeTarget, Post, User};
use crate::domain::value_objects::{CommentId, KarmaWindow, LikeId, PostId, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// 投稿一覧用の読み取りモデル。like_count と投稿者名を抱き合わせる。
#[derive(Debug, Clone)]
pub struct PostWithCount {
    pub post: Post,
    pub author_username: String,
    pub like_count: i64,
}

/// コメント一覧用の読み取りモデル。
#[derive(Debug, Clone)]
pub struct CommentWithCount {
    pub comment: Comment,
    pub author_username: String,
    pub like_count: i64,
}

impl ThreadNode for CommentWithCount {
    fn comment_id(&self) -> &CommentId {
        &self.comment.id
    }

    fn parent_comment_id(&self) -> Option<&CommentId> {
        self.comment.parent_id.as_ref()
    }
}

/// ウィンドウ内のユーザー別カルマ合計(未ソート)。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserKarmaTotal {
    pub user_id: UserId,
    pub username: String,
    pub amount: i64,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), AppError>;
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: &Post) -> Result<(), AppError>;
    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, AppError>;
    /// created_at 降順の全投稿。like_count 付き。
    async fn list_posts(&self) -> Result<Vec<PostWithCount>, AppError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, comment: &Comment) -> Result<(), AppError>;
    async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>, AppError>;
    /// 指定した投稿群の全コメントを created_at 昇順で返す。
    /// フォレスト構築の入力順序はここで保証される。
    async fn list_for_posts(
        &self,
        post_ids: &[PostId],
    ) -> Result<Vec<CommentWithCount>, AppError>;
}

/// Like のトグルとカルマ台帳エントリの作成・破棄を
/// ひとつの原子的な単位として実行するポート。
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// (user, target) の Like をトグルする。
    ///
    /// 付与なら `true`、取り消しなら `false`。対象が存在しなければ
    /// `NotFound`。存在確認と書き込みは対象のロック下で直列化され、
    /// 途中で失敗した場合はどちらの書き込みも残らない。
    async fn toggle_like(&self, user_id: &UserId, target: &LikeTarget) -> Result<bool, AppError>;

    async fn like_count(&self, target: &LikeTarget) -> Result<i64, AppError>;

    async fn find_like(
        &self,
        user_id: &UserId,
        target: &LikeTarget,
    ) -> Result<Option<Like>, AppError>;
}

/// カルマ台帳の読み取りポート。書き込みはトグル経由でしか起きない。
#[async_trait]
pub trait KarmaLedger: Send + Sync {
    /// ウィンドウ内のユーザーのカルマ合計。該当がなければ 0。
    async fn sum_for_user(&self, user_id: &UserId, window: &KarmaWindow)
        -> Result<i64, AppError>;

    /// ウィンドウ内に 1 件以上トランザクションを持つ全ユーザーの合計。
    /// 順序は保証しない(ソートは集計側の責務)。
    async fn window_totals(&self, window: &KarmaWindow) -> Result<Vec<UserKarmaTotal>, AppError>;

    async fn find_by_source(
        &self,
        like_id: &LikeId,
    ) -> Result<Option<KarmaTransaction>, AppError>;
}
