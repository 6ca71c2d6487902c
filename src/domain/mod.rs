pub mod comment_tree;
pub mod constants;
pub mod entities;
pub mod value_objects;

pub use comment_tree::{CommentForest, ThreadNode};
pub use entities::{Comment, KarmaTransaction, Like, LikeTarget, Post, User};
pub use value_objects::{CommentId, KarmaTransactionId, KarmaWindow, LikeId, PostId, UserId};
