//! Database models.

mod author;
mod learner;
mod post;
mod worksheet;

pub use author::{Author, CreateAuthor, UpdateAuthor};
pub use learner::{Learner, hash_password, verify_password};
pub use post::{CreatePost, CreatePostCategory, Post, PostCategory, UpdatePost};
pub use worksheet::{
    CreateWorksheet, CreateWorksheetCategory, UpdateWorksheet, Worksheet, WorksheetCategory,
};
