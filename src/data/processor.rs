//! Data Processor Module
//! Turns loaded rows into the date / institutional / individual series of one index.

use crate::data::Row;
use crate::stats::{RollingCalculator, ROLLING_WINDOW};
use crate::views::IndexSelector;

/// Parallel, index-aligned sequences for one confidence index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub dates: Vec<String>,
    pub institutional: Vec<Option<f64>>,
    pub individual: Vec<Option<f64>>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// 6 month rolling average of both populations, same dates.
    pub fn rolling(&self) -> Series {
        Series {
            dates: self.dates.clone(),
            institutional: RollingCalculator::rolling_average(&self.institutional, ROLLING_WINDOW),
            individual: RollingCalculator::rolling_average(&self.individual, ROLLING_WINDOW),
        }
    }
}

/// Handles extraction of index series from raw rows.
pub struct DataProcessor;

impl DataProcessor {
    /// Parse a cell as a number. Missing, empty, non-numeric and NaN cells are `None`.
    pub fn parse_value(field: Option<&str>) -> Option<f64> {
        field?
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
    }

    /// Extract the series for `selector`. One entry per row, in row order.
    pub fn extract_series(rows: &[Row], selector: IndexSelector) -> Series {
        let columns = selector.columns();
        let mut series = Series {
            dates: Vec::with_capacity(rows.len()),
            institutional: Vec::with_capacity(rows.len()),
            individual: Vec::with_capacity(rows.len()),
        };

        for row in rows {
            series.dates.push(row.date().to_string());
            series
                .institutional
                .push(Self::parse_value(row.field(columns.institutional)));
            series
                .individual
                .push(Self::parse_value(row.field(columns.individual)));
        }

        series
    }
}
