// Public handlers (no authentication required)
pub mod auth;
pub mod categories;
pub mod comments;
pub mod home;
pub mod news;
