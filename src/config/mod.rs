use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::args::Args;
use crate::charts::{ChartPlotter, StaticChartRenderer};
use crate::state::DisplayMode;
use crate::views::{IndexSelector, ViewError};

pub const DEFAULT_DATA_PATH: &str = "static/data/confidence_indices.csv";
pub const DEFAULT_ASSET_DIR: &str = "static/data";
pub const DEFAULT_RANGE_START: &str = "2001-01-01";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("Invalid range start date: {0:?}")]
    RangeStart(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub asset_dir: PathBuf,
    pub initial_view: IndexSelector,
    pub initial_mode: DisplayMode,
    /// Left edge of the date window shown at startup.
    pub range_start: String,
    pub export_size: (u32, u32),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            initial_view: IndexSelector::default(),
            initial_mode: DisplayMode::default(),
            range_start: DEFAULT_RANGE_START.to_string(),
            export_size: StaticChartRenderer::DEFAULT_SIZE,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Start from the config file (if any), then apply command line flags.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(data) = &args.data {
            config.data_path = PathBuf::from(data);
        }
        if let Some(assets) = &args.assets {
            config.asset_dir = PathBuf::from(assets);
        }
        if let Some(view) = &args.view {
            config.initial_view = view.parse()?;
        }
        if args.rolling {
            config.initial_mode = DisplayMode::Rolling;
        }
        if let Some(width) = args.width {
            config.export_size.0 = width;
        }
        if let Some(height) = args.height {
            config.export_size.1 = height;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ChartPlotter::parse_date(&self.range_start)
            .map(|_| ())
            .ok_or_else(|| ConfigError::RangeStart(self.range_start.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_args(&Args::default()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.initial_view, IndexSelector::OneYear);
        assert_eq!(config.initial_mode, DisplayMode::Raw);
        assert_eq!(config.export_size, (700, 500));
    }

    #[test]
    fn test_flags_override() {
        let args = Args {
            data: Some("other.csv".to_string()),
            view: Some("valuation".to_string()),
            rolling: true,
            width: Some(1400),
            ..Args::default()
        };
        let config = AppConfig::from_args(&args).unwrap();
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.initial_view, IndexSelector::Valuation);
        assert_eq!(config.initial_mode, DisplayMode::Rolling);
        assert_eq!(config.export_size, (1400, 500));
    }

    #[test]
    fn test_unknown_view_flag() {
        let args = Args {
            view: Some("sentiment".to_string()),
            ..Args::default()
        };
        let err = AppConfig::from_args(&args).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::View(ViewError::UnknownViewIdentifier(_))
        ));
    }

    #[test]
    fn test_partial_json() {
        let config: AppConfig =
            serde_json::from_str(r#"{"initial_view": "buy-dips", "initial_mode": "rolling"}"#)
                .unwrap();
        assert_eq!(config.initial_view, IndexSelector::BuyDips);
        assert_eq!(config.initial_mode, DisplayMode::Rolling);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "confidence_viewer_{}_{}.json",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_from_file() {
        let path = scratch_file(
            "config",
            r#"{"data_path": "data/indices.csv", "initial_view": "crash", "export_size": [1024, 768]}"#,
        );
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/indices.csv"));
        assert_eq!(config.initial_view, IndexSelector::Crash);
        assert_eq!(config.export_size, (1024, 768));
        assert_eq!(config.range_start, DEFAULT_RANGE_START);

        // Flags win over the file
        let args = Args {
            config: Some(path.display().to_string()),
            view: Some("buy-dips".to_string()),
            ..Args::default()
        };
        let config = AppConfig::from_args(&args).unwrap();
        assert_eq!(config.initial_view, IndexSelector::BuyDips);
        assert_eq!(config.data_path, PathBuf::from("data/indices.csv"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_bad_files() {
        let err = AppConfig::load("/nonexistent/confidence_viewer.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let path = scratch_file("broken", "{ not json");
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Json(_))));
        fs::remove_file(&path).unwrap();

        let path = scratch_file("range", r#"{"range_start": "someday"}"#);
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::RangeStart(_))
        ));
        fs::remove_file(&path).unwrap();

        let path = scratch_file("view", r#"{"initial_view": "sentiment"}"#);
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Json(_))));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_bad_range_start() {
        let config = AppConfig {
            range_start: "soon".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::RangeStart(_))));
    }
}
