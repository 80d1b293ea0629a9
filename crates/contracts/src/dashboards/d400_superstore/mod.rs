pub mod dto;
pub mod selection;

pub use dto::*;
pub use selection::*;
