//! View State Module
//! The selected index, the display mode and the most recently loaded series.
//! Input handlers mutate this state; rendering reads it through `chart_data`.

use crate::charts::ChartData;
use crate::data::Series;
use crate::views::{IndexSelector, ViewError};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Raw monthly values or the 6 month rolling average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Raw,
    Rolling,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Raw => DisplayMode::Rolling,
            DisplayMode::Rolling => DisplayMode::Raw,
        }
    }

    /// Caption of the button that switches away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            DisplayMode::Raw => "Show 6 Month Rolling Avg",
            DisplayMode::Rolling => "Show Raw Monthly",
        }
    }
}

/// Series loaded for one index, raw and smoothed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSeries {
    pub selector: IndexSelector,
    pub raw: Series,
    pub rolling: Series,
}

impl LoadedSeries {
    pub fn new(selector: IndexSelector, raw: Series) -> Self {
        let rolling = raw.rolling();
        Self {
            selector,
            raw,
            rolling,
        }
    }

    pub fn for_mode(&self, mode: DisplayMode) -> &Series {
        match mode {
            DisplayMode::Raw => &self.raw,
            DisplayMode::Rolling => &self.rolling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    selector: IndexSelector,
    mode: DisplayMode,
    current: Option<LoadedSeries>,
}

impl ViewState {
    pub fn new(selector: IndexSelector, mode: DisplayMode) -> Self {
        Self {
            selector,
            mode,
            current: None,
        }
    }

    pub fn selector(&self) -> IndexSelector {
        self.selector
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn current(&self) -> Option<&LoadedSeries> {
        self.current.as_ref()
    }

    /// Switch to the index named `id`. The previous series stays until the
    /// caller installs the new one with `set_series`.
    pub fn select_view(&mut self, id: &str) -> Result<IndexSelector, ViewError> {
        let selector: IndexSelector = id.parse()?;
        info!("Selected view {}", selector);
        self.selector = selector;
        Ok(selector)
    }

    pub fn toggle_smoothing(&mut self) -> DisplayMode {
        self.mode = self.mode.toggled();
        debug!("Display mode is now {:?}", self.mode);
        self.mode
    }

    /// Install a freshly loaded series. Data for any index other than the
    /// selected one is ignored and `false` is returned.
    pub fn set_series(&mut self, selector: IndexSelector, series: Series) -> bool {
        if selector != self.selector {
            debug!("Dropping series for {} while {} is selected", selector, self.selector);
            return false;
        }
        self.current = Some(LoadedSeries::new(selector, series));
        true
    }

    /// What to draw right now, or `None` before any data has arrived for the
    /// selected index.
    pub fn chart_data(&self) -> Option<ChartData> {
        let loaded = self.current.as_ref().filter(|l| l.selector == self.selector)?;
        Some(ChartData::from_series(
            self.selector.title(),
            loaded.for_mode(self.mode),
            self.mode,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Series {
        let values: Vec<Option<f64>> = (1..=8).map(|v| Some(v as f64 * 10.0)).collect();
        Series {
            dates: (1..=8).map(|m| format!("2001-{:02}", m)).collect(),
            institutional: values.clone(),
            individual: values.into_iter().rev().collect(),
        }
    }

    fn loaded_state() -> ViewState {
        let mut state = ViewState::default();
        assert!(state.set_series(IndexSelector::OneYear, series()));
        state
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut state = loaded_state();
        let before = state.chart_data().unwrap();

        state.toggle_smoothing();
        let smoothed = state.chart_data().unwrap();
        assert_ne!(before, smoothed);
        assert_eq!(smoothed.mode, DisplayMode::Rolling);
        assert_eq!(smoothed.traces[0].values[5], Some(35.0));

        state.toggle_smoothing();
        assert_eq!(state.chart_data().unwrap(), before);
    }

    #[test]
    fn test_unknown_view_fails_loudly() {
        let mut state = loaded_state();
        let err = state.select_view("bogus").unwrap_err();
        assert_eq!(err, ViewError::UnknownViewIdentifier("bogus".to_string()));
        // State is untouched
        assert_eq!(state.selector(), IndexSelector::OneYear);
        assert!(state.chart_data().is_some());
    }

    #[test]
    fn test_switch_waits_for_new_series() {
        let mut state = loaded_state();
        assert_eq!(state.select_view("crash"), Ok(IndexSelector::Crash));
        assert!(state.chart_data().is_none());

        // A late result for the old view is ignored
        assert!(!state.set_series(IndexSelector::OneYear, series()));
        assert!(state.chart_data().is_none());

        assert!(state.set_series(IndexSelector::Crash, series()));
        let chart = state.chart_data().unwrap();
        assert_eq!(chart.title, "U.S. Crash Confidence Index");
    }

    #[test]
    fn test_toggle_label() {
        assert_eq!(DisplayMode::Raw.toggle_label(), "Show 6 Month Rolling Avg");
        assert_eq!(DisplayMode::Rolling.toggle_label(), "Show Raw Monthly");
        assert_eq!(DisplayMode::Raw.toggled().toggled(), DisplayMode::Raw);
    }
}
