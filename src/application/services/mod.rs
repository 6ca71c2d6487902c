pub mod engagement_service;
pub mod feed_service;
pub mod leaderboard_service;

pub use engagement_service::{EngagementService, ToggleResult};
pub use feed_service::{FeedService, PostThread};
pub use leaderboard_service::{LeaderboardEntry, LeaderboardService};
