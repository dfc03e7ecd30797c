//! Confidence Viewer - Stock Market Confidence Index Viewer
//!
//! Loads the monthly confidence index CSV, extracts the institutional and
//! individual series of one index and charts them raw or as a 6 month
//! rolling average.

pub mod args;
pub mod charts;
pub mod config;
pub mod data;
pub mod downloads;
pub mod gui;
pub mod state;
pub mod stats;
pub mod views;
