use std::path::PathBuf;

// ---------------------------------------------------------------------------
// ResultRow – one line of the results file
// ---------------------------------------------------------------------------

/// A single observation: the input fed to the model and the two outputs
/// being compared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRow {
    pub input: f64,
    pub expected: f64,
    pub actual: f64,
}

impl ResultRow {
    pub fn new(input: f64, expected: f64, actual: f64) -> Self {
        Self {
            input,
            expected,
            actual,
        }
    }

    /// Absolute difference between the expected and the actual output.
    pub fn abs_error(&self) -> f64 {
        (self.expected - self.actual).abs()
    }
}

// ---------------------------------------------------------------------------
// ResultSet – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All rows of a results file, in file order.
///
/// Rows are assumed to be sorted by input already; the set never re-orders
/// them, so the lines are drawn exactly as the producer wrote them.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    rows: Vec<ResultRow>,
    /// File the rows were read from, if any.
    pub source: Option<PathBuf>,
}

impl ResultSet {
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        ResultSet { rows, source: None }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(input, expected)` pairs in file order.
    pub fn expected_points(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.rows.iter().map(|r| (r.input, r.expected))
    }

    /// `(input, actual)` pairs in file order.
    pub fn actual_points(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.rows.iter().map(|r| (r.input, r.actual))
    }

    /// Smallest and largest input value, `None` when empty.
    pub fn input_range(&self) -> Option<(f64, f64)> {
        min_max(self.rows.iter().map(|r| r.input))
    }

    /// Smallest and largest output over both series, `None` when empty.
    pub fn output_range(&self) -> Option<(f64, f64)> {
        min_max(self.rows.iter().flat_map(|r| [r.expected, r.actual]))
    }

    /// Mean of `|expected - actual|` over all rows.
    pub fn mean_absolute_error(&self) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        let total: f64 = self.rows.iter().map(ResultRow::abs_error).sum();
        Some(total / self.rows.len() as f64)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet::from_rows(vec![
            ResultRow::new(0.0, 0.0, 0.0),
            ResultRow::new(1.0, 0.84, 0.83),
            ResultRow::new(2.0, 0.91, 0.89),
        ])
    }

    #[test]
    fn ranges_cover_both_series() {
        let set = sample();
        assert_eq!(set.input_range(), Some((0.0, 2.0)));
        assert_eq!(set.output_range(), Some((0.0, 0.91)));
    }

    #[test]
    fn mean_absolute_error_averages_rows() {
        let mae = sample().mean_absolute_error().unwrap();
        assert!((mae - 0.01).abs() < 1e-9);
    }

    #[test]
    fn empty_set_has_no_ranges() {
        let set = ResultSet::default();
        assert!(set.is_empty());
        assert_eq!(set.input_range(), None);
        assert_eq!(set.mean_absolute_error(), None);
    }

    #[test]
    fn points_keep_file_order() {
        let set = ResultSet::from_rows(vec![
            ResultRow::new(2.0, 1.0, 1.5),
            ResultRow::new(-1.0, 0.5, 0.0),
        ]);
        let xs: Vec<f64> = set.actual_points().map(|(x, _)| x).collect();
        assert_eq!(xs, vec![2.0, -1.0]);
    }
}
