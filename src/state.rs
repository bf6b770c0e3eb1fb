use std::path::PathBuf;

use crate::color::SeriesColors;
use crate::config::PlotConfig;
use crate::data::model::ResultSet;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Everything the viewer draws, independent of rendering.
pub struct ViewerState {
    /// Rows being displayed.
    pub results: ResultSet,

    /// Title, axis labels.
    pub config: PlotConfig,

    /// Series colours, shared with the saved image.
    pub colors: SeriesColors,

    /// Where the static chart was written.
    pub output: Option<PathBuf>,

    pub show_expected: bool,
    pub show_actual: bool,
}

impl ViewerState {
    pub fn new(results: ResultSet, config: PlotConfig, colors: SeriesColors) -> Self {
        Self {
            results,
            config,
            colors,
            output: None,
            show_expected: true,
            show_actual: true,
        }
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    /// One-line description for the top bar.
    pub fn summary(&self) -> String {
        let mut text = format!("{} rows", self.results.len());
        if let Some(mae) = self.results.mean_absolute_error() {
            text.push_str(&format!(", mean |expected - actual| = {mae:.4}"));
        }
        text
    }

    /// Number of series currently switched on.
    pub fn visible_series(&self) -> usize {
        usize::from(self.show_expected) + usize::from(self.show_actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ResultRow;

    fn state() -> ViewerState {
        let results = ResultSet::from_rows(vec![
            ResultRow::new(0.0, 0.0, 0.0),
            ResultRow::new(1.0, 0.84, 0.83),
        ]);
        let colors = SeriesColors::resolve("#0000ff", "#ff0000").unwrap();
        ViewerState::new(results, PlotConfig::default(), colors)
    }

    #[test]
    fn both_series_start_visible() {
        let state = state();
        assert_eq!(state.visible_series(), 2);
        assert!(state.output.is_none());
    }

    #[test]
    fn hidden_series_are_counted() {
        let mut state = state();
        state.show_actual = false;
        assert_eq!(state.visible_series(), 1);
        state.show_expected = false;
        assert_eq!(state.visible_series(), 0);
    }

    #[test]
    fn summary_mentions_rows_and_error() {
        let summary = state().summary();
        assert!(summary.starts_with("2 rows"));
        assert!(summary.contains("0.0050"));
    }
}
