use crate::application::ports::repositories::KarmaLedger;
use crate::domain::value_objects::{KarmaWindow, UserId};
use crate::shared::config::EngagementConfig;
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// リーダーボードの 1 行。`daily_karma` はウィンドウ内の合計。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub username: String,
    pub daily_karma: i64,
}

/// 時間ウィンドウ付きカルマリーダーボードの集計サービス。
///
/// 台帳からウィンドウ内のユーザー別合計を受け取り、合計降順・
/// 同点はユーザー ID 昇順で並べて上位 k 件を返す。ウィンドウ内に
/// トランザクションを持たないユーザーはそもそも行が来ないので
/// 0 点として載ることはない。
pub struct LeaderboardService {
    ledger: Arc<dyn KarmaLedger>,
    config: EngagementConfig,
}

impl LeaderboardService {
    pub fn new(ledger: Arc<dyn KarmaLedger>) -> Self {
        Self::with_config(ledger, EngagementConfig::default())
    }

    pub fn with_config(ledger: Arc<dyn KarmaLedger>, config: EngagementConfig) -> Self {
        Self { ledger, config }
    }

    /// `now` から `window_hours` 遡ったウィンドウの上位 `k` 件。
    pub async fn top_karma(
        &self,
        now: DateTime<Utc>,
        window_hours: i64,
        k: usize,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let window = KarmaWindow::trailing_hours(now, window_hours);
        let mut totals = self.ledger.window_totals(&window).await?;

        // 同点はユーザー ID 昇順で安定させる。
        totals.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        totals.truncate(k);

        debug!(entries = totals.len(), window_hours, "leaderboard computed");

        Ok(totals
            .into_iter()
            .map(|total| LeaderboardEntry {
                user_id: total.user_id,
                username: total.username,
                daily_karma: total.amount,
            })
            .collect())
    }

    /// 設定されたウィンドウと件数で集計する。既定は直近 24 時間・上位 5 件。
    pub async fn daily_top(&self, now: DateTime<Utc>) -> Result<Vec<LeaderboardEntry>, AppError> {
        self.top_karma(
            now,
            self.config.leaderboard_window_hours,
            self.config.leaderboard_size,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repositories::UserKarmaTotal;
    use crate::domain::entities::KarmaTransaction;
    use crate::domain::value_objects::LikeId;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::Mutex;

    /// (username, transactions) をそのまま覚えるインメモリ台帳。
    #[derive(Default)]
    struct InMemoryLedger {
        entries: Mutex<Vec<(String, KarmaTransaction)>>,
    }

    impl InMemoryLedger {
        fn credit(&self, username: &str, user_id: &UserId, amount: i64, at: DateTime<Utc>) {
            let tx = KarmaTransaction::from_parts(
                crate::domain::value_objects::KarmaTransactionId::random(),
                user_id.clone(),
                amount,
                LikeId::random(),
                at,
            );
            self.entries
                .lock()
                .unwrap()
                .push((username.to_string(), tx));
        }
    }

    #[async_trait]
    impl KarmaLedger for InMemoryLedger {
        async fn sum_for_user(
            &self,
            user_id: &UserId,
            window: &KarmaWindow,
        ) -> Result<i64, AppError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, tx)| tx.user_id() == user_id && window.contains(tx.created_at()))
                .map(|(_, tx)| tx.amount())
                .sum())
        }

        async fn window_totals(
            &self,
            window: &KarmaWindow,
        ) -> Result<Vec<UserKarmaTotal>, AppError> {
            let entries = self.entries.lock().unwrap();
            let mut totals: Vec<UserKarmaTotal> = Vec::new();
            for (username, tx) in entries.iter() {
                if !window.contains(tx.created_at()) {
                    continue;
                }
                match totals.iter_mut().find(|t| t.user_id == *tx.user_id()) {
                    Some(total) => total.amount += tx.amount(),
                    None => totals.push(UserKarmaTotal {
                        user_id: tx.user_id().clone(),
                        username: username.clone(),
                        amount: tx.amount(),
                    }),
                }
            }
            Ok(totals)
        }

        async fn find_by_source(
            &self,
            like_id: &LikeId,
        ) -> Result<Option<KarmaTransaction>, AppError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .find(|(_, tx)| tx.source_like_id() == like_id)
                .map(|(_, tx)| tx.clone()))
        }
    }

    fn user(n: u8) -> UserId {
        UserId::new(format!("00000000-0000-4000-8000-0000000000{n:02x}")).unwrap()
    }

    #[tokio::test]
    async fn orders_by_sum_descending() {
        let ledger = Arc::new(InMemoryLedger::default());
        let now = Utc::now();
        let (a, b) = (user(1), user(2));

        ledger.credit("alice", &a, 5, now - Duration::hours(1));
        ledger.credit("alice", &a, 5, now - Duration::hours(2));
        ledger.credit("bob", &b, 1, now - Duration::hours(1));

        let service = LeaderboardService::new(ledger);
        let entries = service.daily_top(now).await.expect("leaderboard");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].username, "alice");
        assert_eq!(entries[0].daily_karma, 10);
        assert_eq!(entries[1].username, "bob");
        assert_eq!(entries[1].daily_karma, 1);
    }

    #[tokio::test]
    async fn window_excludes_old_transactions() {
        // 直近 1 時間の 5 と 30 時間前の 1。24 時間ウィンドウでは 5 だけ。
        let ledger = Arc::new(InMemoryLedger::default());
        let now = Utc::now();
        let a = user(1);

        ledger.credit("alice", &a, 5, now - Duration::hours(1));
        ledger.credit("alice", &a, 1, now - Duration::hours(30));

        let service = LeaderboardService::new(ledger.clone());
        let entries = service.daily_top(now).await.expect("leaderboard");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].daily_karma, 5);

        let window = KarmaWindow::trailing_hours(now, 24);
        assert_eq!(ledger.sum_for_user(&a, &window).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn users_without_window_activity_are_excluded() {
        let ledger = Arc::new(InMemoryLedger::default());
        let now = Utc::now();

        ledger.credit("stale", &user(1), 100, now - Duration::hours(48));

        let service = LeaderboardService::new(ledger);
        let entries = service.daily_top(now).await.expect("leaderboard");
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn ties_break_by_user_id_ascending() {
        let ledger = Arc::new(InMemoryLedger::default());
        let now = Utc::now();
        let (a, b) = (user(1), user(2));

        ledger.credit("second", &b, 5, now - Duration::hours(1));
        ledger.credit("first", &a, 5, now - Duration::hours(1));

        let service = LeaderboardService::new(ledger);
        let entries = service.daily_top(now).await.expect("leaderboard");

        assert_eq!(entries[0].user_id, a);
        assert_eq!(entries[1].user_id, b);
    }

    #[tokio::test]
    async fn config_overrides_window_and_size() {
        let ledger = Arc::new(InMemoryLedger::default());
        let now = Utc::now();

        ledger.credit("recent", &user(1), 5, now - Duration::minutes(30));
        ledger.credit("small", &user(2), 1, now - Duration::minutes(10));
        // 2 時間前はウィンドウ 1 時間の設定では対象外。
        ledger.credit("old", &user(3), 50, now - Duration::hours(2));

        let service = LeaderboardService::with_config(
            ledger,
            EngagementConfig {
                leaderboard_window_hours: 1,
                leaderboard_size: 1,
            },
        );
        let entries = service.daily_top(now).await.expect("leaderboard");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].username, "recent");
        assert_eq!(entries[0].daily_karma, 5);
    }

    #[tokio::test]
    async fn truncates_to_top_k() {
        let ledger = Arc::new(InMemoryLedger::default());
        let now = Utc::now();

        for n in 1..=7u8 {
            ledger.credit(
                &format!("user{n}"),
                &user(n),
                i64::from(n),
                now - Duration::hours(1),
            );
        }

        let service = LeaderboardService::new(ledger);
        let entries = service.daily_top(now).await.expect("leaderboard");

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].daily_karma, 7);
        assert_eq!(entries[4].daily_karma, 3);
    }
}
