//! Download Artifacts
//! Static files offered next to the chart: the index spreadsheet, the
//! extended calculations and the survey questionnaire. Copied as-is.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Download source not found: {0}")]
    Missing(String),
    #[error("Failed to copy {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Download {
    Indices,
    ExtendedCalculations,
    Questionnaire,
}

impl Download {
    pub const ALL: [Download; 3] = [
        Download::Indices,
        Download::ExtendedCalculations,
        Download::Questionnaire,
    ];

    /// File name inside the asset directory.
    pub fn source_name(self) -> &'static str {
        match self {
            Download::Indices => "confidence_indices.xlsx",
            Download::ExtendedCalculations => "Extended-Index-Calculations.xlsx",
            Download::Questionnaire => "US_Questions - Copy.pdf",
        }
    }

    /// File name suggested to the user.
    pub fn download_name(self) -> &'static str {
        match self {
            Download::Indices => "yale_confidence_indices.xlsx",
            Download::ExtendedCalculations => "Extended-Index-Calculations.xlsx",
            Download::Questionnaire => "US_Questions.pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Download::Indices => "Download Data",
            Download::ExtendedCalculations => "Download Extended Calculations",
            Download::Questionnaire => "Download Questionnaire",
        }
    }

    /// (filter name, extensions) for the save dialog.
    pub fn filter(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Download::Indices | Download::ExtendedCalculations => ("Excel Workbook", &["xlsx"]),
            Download::Questionnaire => ("PDF Document", &["pdf"]),
        }
    }

    pub fn source_path(self, asset_dir: &Path) -> PathBuf {
        asset_dir.join(self.source_name())
    }

    /// Copy the artifact to `dest`. Returns the number of bytes written.
    pub fn save_to(self, asset_dir: &Path, dest: &Path) -> Result<u64, DownloadError> {
        let source = self.source_path(asset_dir);
        if !source.is_file() {
            return Err(DownloadError::Missing(source.display().to_string()));
        }
        let bytes = fs::copy(&source, dest).map_err(|source| DownloadError::Io {
            path: dest.display().to_string(),
            source,
        })?;
        info!("Saved {} to {} ({} bytes)", self.source_name(), dest.display(), bytes);
        Ok(bytes)
    }
}
