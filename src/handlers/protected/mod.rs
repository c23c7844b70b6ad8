// Protected handlers; the router layers `require_identity` over these, so the
// caller's `Identity` is always present in request extensions.
pub mod comments;
pub mod users;
