//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{Comment, CommentId, CommentInput};
pub use post::{Category, NewPost, Post, PostId, PostPatch, TagList};
pub use user::{User, validate_nickname};
