mod comments;
mod karma;
mod likes;
mod mapper;
mod posts;
mod queries;
mod users;

use super::connection_pool::ConnectionPool;

/// 全リポジトリポートを 1 つの SQLite 実装にまとめる。
/// ポートごとの実装は兄弟モジュールに分かれている。
pub struct SqliteRepository {
    pub(super) pool: ConnectionPool,
}

impl SqliteRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}
