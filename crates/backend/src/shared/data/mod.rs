pub mod dataset;
pub mod state_abbrev;

pub use dataset::{DatasetError, SalesDataset, SalesRecord};
