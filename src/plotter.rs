use std::path::{Path, PathBuf};

use crate::color::SeriesColors;
use crate::config::PlotConfig;
use crate::data::loader::load_results;
use crate::data::model::ResultSet;
use crate::error::Result;
use crate::render::{output_path_for, write_chart};

/// Result of a successful [`ResultPlotter::plot_file`].
#[derive(Debug, Clone)]
pub struct PlotOutcome {
    /// Path of the written image.
    pub output: PathBuf,
    /// Rows the chart was drawn from.
    pub results: ResultSet,
}

// ---------------------------------------------------------------------------
// ResultPlotter
// ---------------------------------------------------------------------------

/// Turns a results file into a chart image saved next to it.
#[derive(Debug, Clone, Default)]
pub struct ResultPlotter {
    config: PlotConfig,
}

impl ResultPlotter {
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Load `path`, draw expected (solid) against actual (dashed) and save the
    /// chart as `<path without extension>.<png|svg>`.
    ///
    /// Returns the path of the written image. An existing image is replaced.
    pub fn plot(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.plot_file(path.as_ref()).map(|outcome| outcome.output)
    }

    /// Same as [`ResultPlotter::plot`], but hands back the loaded rows as well.
    pub fn plot_file(&self, path: &Path) -> Result<PlotOutcome> {
        let results = load_results(path, self.config.delimiter_byte())?;
        let output = output_path_for(path, self.config.format);
        self.plot_rows(&results, &output)?;
        Ok(PlotOutcome { output, results })
    }

    /// Render an already loaded set of rows to an explicit output path.
    pub fn plot_rows(&self, results: &ResultSet, output: &Path) -> Result<()> {
        let colors = SeriesColors::resolve(&self.config.expected_color, &self.config.actual_color)?;

        if let Some(mae) = results.mean_absolute_error() {
            log::info!("{} rows, mean absolute error {mae:.4}", results.len());
        }

        write_chart(results, &self.config, &colors, output)
    }
}
