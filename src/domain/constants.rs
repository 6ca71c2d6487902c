/// 投稿への Like 1 件で投稿者に入るカルマ量。
pub const POST_KARMA: i64 = 5;

/// コメントへの Like 1 件でコメント投稿者に入るカルマ量。
pub const COMMENT_KARMA: i64 = 1;

/// リーダーボードの集計ウィンドウ(時間)。
pub const LEADERBOARD_WINDOW_HOURS: i64 = 24;

/// リーダーボードの上位件数。
pub const LEADERBOARD_SIZE: usize = 5;
