pub mod comment;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentWithAuthor};
pub use post::Post;
pub use user::{PublicUser, User};
