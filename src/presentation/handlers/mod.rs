pub mod engagement_handler;
pub mod feed_handler;
pub mod leaderboard_handler;

pub use engagement_handler::EngagementHandler;
pub use feed_handler::{CreateCommentRequest, CreatePostRequest, FeedHandler};
pub use leaderboard_handler::LeaderboardHandler;
