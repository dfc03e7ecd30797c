//! Data module - CSV loading and series extraction

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError, Row};
pub use processor::{DataProcessor, Series};
