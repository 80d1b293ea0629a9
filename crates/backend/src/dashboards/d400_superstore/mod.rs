pub mod charts;
pub mod controller;
pub mod service;

pub use controller::{SelectionError, ViewController};
