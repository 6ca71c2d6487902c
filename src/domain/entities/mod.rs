pub mod comment;
pub mod karma_transaction;
pub mod like;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use karma_transaction::KarmaTransaction;
pub use like::{Like, LikeTarget};
pub use post::Post;
pub use user::User;
