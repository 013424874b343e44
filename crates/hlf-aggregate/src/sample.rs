//! Summary statistics over a list of observations.

use hlf_types::StatisticValues;

/// Sorted set of observations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
    sorted: Vec<f64>,
}

impl Sample {
    /// Creates a sample, discarding non-finite values.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        Self { sorted }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Arithmetic mean, zero when empty.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.sorted.is_empty() {
            return 0.0;
        }
        self.sorted.iter().sum::<f64>() / self.sorted.len() as f64
    }

    /// Median, averaging the middle pair for even sizes. Zero when empty.
    #[must_use]
    pub fn median(&self) -> f64 {
        let n = self.sorted.len();
        match n {
            0 => 0.0,
            _ if n % 2 == 1 => self.sorted[n / 2],
            _ => (self.sorted[n / 2 - 1] + self.sorted[n / 2]) / 2.0,
        }
    }

    /// Sample standard deviation (n - 1 denominator). Zero below two observations.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        let n = self.sorted.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .sorted
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        variance.sqrt()
    }

    /// Smallest observation, zero when empty.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.sorted.first().copied().unwrap_or(0.0)
    }

    /// Largest observation, zero when empty.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.sorted.last().copied().unwrap_or(0.0)
    }

    /// Nearest-rank percentile: the element at `floor(n * p / 100)`, clamped
    /// to the last element. Zero when empty.
    #[must_use]
    pub fn percentile(&self, p: f64) -> f64 {
        if self.sorted.is_empty() {
            return 0.0;
        }
        let index = (self.sorted.len() as f64 * (p / 100.0)) as usize;
        self.sorted[index.min(self.sorted.len() - 1)]
    }

    /// Mean, median, bounds and standard deviation.
    #[must_use]
    pub fn summary(&self) -> StatisticValues {
        StatisticValues::new(self.mean(), self.median(), self.min(), self.max())
            .with_std(self.std_dev())
    }

    /// Mean, median and bounds only.
    #[must_use]
    pub fn basic_summary(&self) -> StatisticValues {
        StatisticValues::new(self.mean(), self.median(), self.min(), self.max())
    }
}

impl FromIterator<f64> for Sample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter)
    }
}
