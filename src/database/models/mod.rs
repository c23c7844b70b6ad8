pub mod category;
pub mod comment;
pub mod news;
pub mod user;

pub use category::{Category, NewCategory};
pub use comment::{Comment, NewComment};
pub use news::{News, NewNews};
pub use user::{NewUser, User};
