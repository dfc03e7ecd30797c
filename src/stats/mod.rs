//! Stats module - Rolling averages

mod calculator;

pub use calculator::{RollingCalculator, ROLLING_WINDOW};
