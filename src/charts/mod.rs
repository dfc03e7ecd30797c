//! Charts module - Chart data, interactive plotting and static export

mod plotter;
mod renderer;

pub use plotter::{ChartData, ChartPlotter, Trace, INDIVIDUAL_COLOR, INSTITUTIONAL_COLOR};
pub use renderer::{ExportError, StaticChartRenderer};
