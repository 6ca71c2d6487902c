pub mod repositories;

pub use repositories::{
    CommentRepository, CommentWithCount, KarmaLedger, LikeRepository, PostRepository,
    PostWithCount, UserKarmaTotal, UserRepository,
};
