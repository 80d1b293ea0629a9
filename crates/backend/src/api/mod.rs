pub mod error;
pub mod extract;
pub mod handlers;

pub use error::ApiError;
pub use extract::{ApiJson, ApiQuery};
