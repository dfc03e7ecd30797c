use clap::Parser;

/// Desktop viewer for the U.S. stock market confidence indices.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) JSON settings file. Flags given on the command line take precedence.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, default static/data/confidence_indices.csv) The monthly index CSV.
    #[clap(short, long, value_parser)]
    pub data: Option<String>,

    /// (directory, default static/data) Where the downloadable spreadsheets and questionnaire live.
    #[clap(long, value_parser)]
    pub assets: Option<String>,

    /// (one-year, crash, buy-dips or valuation) The index shown at startup.
    #[clap(long, value_parser)]
    pub view: Option<String>,

    /// Start with the 6 month rolling average instead of raw monthly values.
    #[clap(long, takes_value = false)]
    pub rolling: bool,

    /// (file path, .svg or .png) Render the chart to this file and exit without opening a window.
    #[clap(short, long, value_parser)]
    pub export: Option<String>,

    /// (pixels, default 700) Width of the exported chart.
    #[clap(long, value_parser)]
    pub width: Option<u32>,

    /// (pixels, default 500) Height of the exported chart.
    #[clap(long, value_parser)]
    pub height: Option<u32>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
