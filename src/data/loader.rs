//! CSV Data Loader Module
//! Reads the confidence index CSV into rows of string fields using Polars.

use log::debug;
use polars::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// One data row: field 0 is the date, the rest are index values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Field at `idx`, or `None` when the row is too short.
    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    pub fn date(&self) -> &str {
        self.field(0).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Loads the index CSV. Malformed rows are kept; their missing or broken
/// cells become empty fields and parse to nulls downstream.
pub struct DataLoader;

impl DataLoader {
    /// Read a CSV file and return its data rows (header discarded).
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Row>, LoaderError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoaderError::Fetch {
            path: path.display().to_string(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let rows = Self::parse_csv(&text)?;
        debug!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    /// Parse CSV text: trim lines, drop blank ones, drop the header.
    pub fn parse_csv(text: &str) -> Result<Vec<Row>, LoaderError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .skip(1)
            .collect();
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        // Widest row decides the schema so short rows are padded, never truncated
        let width = lines
            .iter()
            .map(|line| line.split(',').count())
            .max()
            .unwrap_or(1);
        let mut schema = Schema::with_capacity(width);
        for i in 0..width {
            schema.with_column(format!("column_{}", i + 1).into(), DataType::String);
        }

        // Quotes are plain characters: every line splits on commas only
        let body = lines.join("\n").into_bytes();
        let df = CsvReadOptions::default()
            .with_has_header(false)
            .with_schema(Some(Arc::new(schema)))
            .with_ignore_errors(true)
            .map_parse_options(|opts| {
                opts.with_truncate_ragged_lines(true)
                    .with_quote_char(None)
            })
            .into_reader_with_file_handle(Cursor::new(body))
            .finish()?;

        Self::rows_from_dataframe(&df)
    }

    /// Convert an all-string DataFrame into rows. Nulls become empty fields.
    pub fn rows_from_dataframe(df: &DataFrame) -> Result<Vec<Row>, LoaderError> {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| col.as_materialized_series().str())
            .collect::<PolarsResult<Vec<_>>>()?;

        let rows = (0..df.height())
            .map(|i| {
                columns
                    .iter()
                    .map(|ca| ca.get(i).unwrap_or("").trim().to_string())
                    .collect()
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;

    #[test]
    fn test_header_and_blank_lines_are_dropped() {
        let text = "\nDate,A,B\n\n2001-01,1.5,2.5\n   \n2001-02,3,4\n";
        let rows = DataLoader::parse_csv(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date(), "2001-01");
        assert_eq!(rows[0].field(1), Some("1.5"));
        assert_eq!(rows[1].field(2), Some("4"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let text = "Date,A,B,C\n2001-01,1\n2001-02,1,2,3\n";
        let rows = DataLoader::parse_csv(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0].field(2), Some(""));
        assert_eq!(rows[0].field(3), Some(""));
        assert_eq!(rows[1].field(3), Some("3"));
    }

    #[test]
    fn test_empty_cells() {
        let text = "Date,A,B\n2001-01,,55.2\n";
        let rows = DataLoader::parse_csv(text).unwrap();
        assert_eq!(rows[0].field(1), Some(""));
        assert_eq!(rows[0].field(2), Some("55.2"));
    }

    #[test]
    fn test_stray_quote_keeps_every_row() {
        let text = "Date,A,B\n2001-01,\"80,70\n2001-02,81,71\n2001-03,82,72\n";
        let rows = DataLoader::parse_csv(text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].field(1), Some("\"80"));
        assert_eq!(rows[0].field(2), Some("70"));
        assert_eq!(rows[1].field(1), Some("81"));
        assert_eq!(rows[2].field(2), Some("72"));
        assert_eq!(DataProcessor::parse_value(rows[0].field(1)), None);
        assert_eq!(DataProcessor::parse_value(rows[0].field(2)), Some(70.0));
    }

    #[test]
    fn test_quoted_cell_keeps_quotes() {
        let text = "Date,A,B\n2001-01,\"80,5\",70\n";
        let rows = DataLoader::parse_csv(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0].field(1), Some("\"80"));
        assert_eq!(rows[0].field(2), Some("5\""));
        assert_eq!(rows[0].field(3), Some("70"));
    }

    #[test]
    fn test_header_only() {
        assert!(DataLoader::parse_csv("Date,A,B\n").unwrap().is_empty());
        assert!(DataLoader::parse_csv("").unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_fetch_failure() {
        let err = DataLoader::load_csv("/nonexistent/confidence_indices.csv").unwrap_err();
        assert!(matches!(err, LoaderError::Fetch { .. }));
    }

    #[test]
    fn test_rows_from_dataframe() {
        let df = df!(
            "column_1" => ["2001-01", "2001-02"],
            "column_2" => [Some("80.5"), None]
        )
        .unwrap();
        let rows = DataLoader::rows_from_dataframe(&df).unwrap();
        assert_eq!(rows[0], Row::from_iter(["2001-01", "80.5"]));
        assert_eq!(rows[1], Row::from_iter(["2001-02", ""]));
    }
}
