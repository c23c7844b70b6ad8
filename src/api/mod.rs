pub mod extract;
pub mod schemas;

pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use schemas::Validate;
