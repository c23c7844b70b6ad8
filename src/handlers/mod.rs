// handlers/mod.rs - two-tier handler layout
//
// public    - no credential required (reads, registration, login, health)
// protected - bearer credential resolved by `middleware::require_identity`
pub mod protected;
pub mod public;
