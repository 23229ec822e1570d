//! Streaming log-scale histogram of value sizes.
//!
//! Samples are folded in one at a time; only the running count, sum, max and
//! one counter per logarithmic level are retained, so memory stays O(levels)
//! no matter how many values are scanned.

mod report;

pub use report::{render_report, write_report};

use thiserror::Error;

/// Base used when the configured base is zero or negative.
pub const DEFAULT_BASE: u64 = 4;

/// Default maximum bar length in the rendered report.
pub const DEFAULT_BAR_WIDTH: usize = 20;

/// Errors raised while configuring a histogram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistogramError {
    /// Division by the base would never reach zero.
    #[error("invalid histogram base {0}: must be at least 2 (or <= 0 for the default)")]
    InvalidBase(i64),
}

/// Log-scale distribution of observed sizes.
///
/// Level 0 counts sizes in `[0, base)`, level `k` counts sizes in
/// `[base^k, base^(k+1))`. Levels are appended lazily as larger samples
/// arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeHistogram {
    sample_count: u64,
    size_sum: u128,
    max_size: u64,
    base: u64,
    buckets: Vec<u64>,
}

impl SizeHistogram {
    /// Create an empty histogram.
    ///
    /// A base `<= 0` is normalized to [`DEFAULT_BASE`] here, once, so every
    /// sample of a run is bucketed against the same base.
    pub fn new(base: i64) -> Result<Self, HistogramError> {
        let base = match base {
            b if b <= 0 => DEFAULT_BASE,
            1 => return Err(HistogramError::InvalidBase(base)),
            b => b as u64,
        };
        Ok(Self {
            sample_count: 0,
            size_sum: 0,
            max_size: 0,
            base,
            buckets: Vec::new(),
        })
    }

    /// Fold one observed size into the distribution.
    pub fn record(&mut self, size: u64) {
        self.sample_count += 1;
        self.size_sum += u128::from(size);
        self.max_size = self.max_size.max(size);

        let level = self.level_of(size);
        if self.buckets.len() <= level {
            self.buckets.resize(level + 1, 0);
        }
        self.buckets[level] += 1;
    }

    /// Level at which repeated division of `size` by the base first reaches 0.
    pub fn level_of(&self, size: u64) -> usize {
        let mut level = 0;
        let mut v = size / self.base;
        while v != 0 {
            v /= self.base;
            level += 1;
        }
        level
    }

    /// Number of recorded samples.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Sum of all recorded sizes.
    pub fn size_sum(&self) -> u128 {
        self.size_sum
    }

    /// Largest recorded size, 0 when empty.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Normalized logarithmic base.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Per-level counts, index = level.
    pub fn buckets(&self) -> &[u64] {
        &self.buckets
    }

    /// Arithmetic mean of recorded sizes. NaN when nothing was recorded.
    pub fn mean(&self) -> f64 {
        self.size_sum as f64 / self.sample_count as f64
    }
}

impl Default for SizeHistogram {
    fn default() -> Self {
        Self {
            sample_count: 0,
            size_sum: 0,
            max_size: 0,
            base: DEFAULT_BASE,
            buckets: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_lands_in_level_zero() {
        for base in [2, 3, 4, 10, 256] {
            let mut hist = SizeHistogram::new(base).unwrap();
            hist.record(0);
            assert_eq!(hist.buckets(), &[1]);
        }
    }

    #[test]
    fn non_positive_base_defaults_to_four() {
        for base in [0, -1, i64::MIN] {
            let hist = SizeHistogram::new(base).unwrap();
            assert_eq!(hist.base(), DEFAULT_BASE);
        }
    }

    #[test]
    fn base_one_is_rejected() {
        assert_eq!(SizeHistogram::new(1), Err(HistogramError::InvalidBase(1)));
    }

    #[test]
    fn powers_of_base_open_their_level() {
        let hist = SizeHistogram::new(4).unwrap();
        assert_eq!(hist.level_of(3), 0);
        assert_eq!(hist.level_of(4), 1);
        assert_eq!(hist.level_of(15), 1);
        assert_eq!(hist.level_of(16), 2);
        assert_eq!(hist.level_of(100), 3);
    }

    #[test]
    fn mixed_samples_fill_expected_levels() {
        let mut hist = SizeHistogram::new(4).unwrap();
        for size in [0, 3, 4, 16, 100] {
            hist.record(size);
        }
        assert_eq!(hist.sample_count(), 5);
        assert_eq!(hist.max_size(), 100);
        assert_eq!(hist.buckets(), &[2, 1, 1, 1]);
        assert!((hist.mean() - 24.6).abs() < 1e-9);
    }

    #[test]
    fn gaps_between_levels_are_zero_filled() {
        let mut hist = SizeHistogram::new(2).unwrap();
        hist.record(1);
        hist.record(16);
        assert_eq!(hist.buckets(), &[1, 0, 0, 0, 1]);
    }

    #[test]
    fn huge_sizes_do_not_overflow() {
        let mut hist = SizeHistogram::new(2).unwrap();
        hist.record(u64::MAX);
        hist.record(u64::MAX);
        assert_eq!(hist.buckets().len(), 64);
        assert_eq!(hist.size_sum(), 2 * u128::from(u64::MAX));
    }

    #[test]
    fn empty_mean_is_nan() {
        assert!(SizeHistogram::default().mean().is_nan());
    }
}
