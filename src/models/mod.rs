//! Data models
//!
//! Entity structs and input types shared by the repository and service
//! layers.

pub mod comment;
pub mod news;
pub mod note;
pub mod session;
pub mod user;

pub use comment::{Comment, CommentWithAuthor, CreateCommentInput};
pub use news::{CreateNewsInput, News, NewsWithComments};
pub use note::{CreateNoteInput, Note, UpdateNoteInput};
pub use session::Session;
pub use user::User;
