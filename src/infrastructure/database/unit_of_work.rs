//! 明示的なトランザクション境界。
//!
//! Like トグルは「存在確認 → 書き込み」を対象行のロック下で行う必要が
//! あるため、`BEGIN IMMEDIATE` で先に書き込みロックを取ってから
//! クロージャを実行する。SQLite の書き込みロックは DB 単位だが、
//! 同一対象へのトグル同士を直列化するという要件はこれで満たされる。

use super::connection_pool::ConnectionPool;
use crate::shared::error::AppError;
use futures::future::BoxFuture;
use sqlx::SqliteConnection;
use tracing::warn;

impl ConnectionPool {
    /// 書き込みロックを取得して `op` を実行し、成功なら COMMIT、
    /// 失敗なら ROLLBACK する。途中で失敗した場合に一部だけ適用された
    /// 状態は残らない。COMMIT 前に future ごと破棄された場合も
    /// `Transaction` の Drop がロールバックするため、コネクションが
    /// トランザクションを開いたままプールへ戻ることはない。
    ///
    /// ロック待ちタイムアウト(SQLITE_BUSY)は `AppError::Conflict` に
    /// 変換されて返る。呼び出し側は操作全体を最初からリトライしてよい。
    pub async fn immediate_transaction<T, F>(&self, op: F) -> Result<T, AppError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, AppError>> + Send,
    {
        let mut tx = self.get_pool().begin_with("BEGIN IMMEDIATE").await?;

        match op(&mut *tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("rollback failed: {rollback_err}");
                }
                Err(err)
            }
        }
    }
}
