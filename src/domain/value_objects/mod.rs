pub mod ids;
pub mod karma_window;

pub use ids::{CommentId, KarmaTransactionId, LikeId, PostId, UserId};
pub use karma_window::KarmaWindow;
