//! Single-pass scan driver.
//!
//! Walks one cursor from start to end, printing each key and feeding each
//! value length into a [`SizeHistogram`], then writes the size report.

mod quote;

pub use quote::{quote_key, KeyStyle};

use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::histogram::{
    write_report, HistogramError, SizeHistogram, DEFAULT_BAR_WIDTH, DEFAULT_BASE,
};
use crate::locator::StoreLocator;
use crate::store::{BackendRegistry, Cursor, KeyRange, Store, StoreError, StoreOptions};

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The histogram could not be configured.
    #[error(transparent)]
    Histogram(#[from] HistogramError),

    /// No cursor could be obtained; nothing was scanned.
    #[error("cannot start scan")]
    Open(#[source] StoreError),

    /// The cursor failed mid-scan. It was still closed.
    #[error("scan aborted")]
    Read(#[source] StoreError),

    /// Every entry was scanned but the cursor failed to close.
    ///
    /// Keys already written stay written; the finished histogram is kept
    /// here so callers can still use it.
    #[error("scan completed but the iterator did not close cleanly")]
    Close {
        /// Close failure reported by the backend.
        source: StoreError,
        /// Histogram accumulated over the full scan.
        histogram: SizeHistogram,
    },

    /// Writing keys or the report failed.
    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Scan parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Logarithmic bucket base; `<= 0` selects the default.
    pub base: i64,
    /// Length of a bar covering every sample.
    pub bar_width: usize,
    /// Keys to visit.
    pub range: KeyRange,
    /// How keys are printed.
    pub key_style: KeyStyle,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE as i64,
            bar_width: DEFAULT_BAR_WIDTH,
            range: KeyRange::full(),
            key_style: KeyStyle::Quoted,
        }
    }
}

impl ScanConfig {
    /// Set the bucket base.
    pub fn with_base(mut self, base: i64) -> Self {
        self.base = base;
        self
    }

    /// Set the full bar length.
    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    /// Restrict the scan to `range`.
    pub fn with_range(mut self, range: KeyRange) -> Self {
        self.range = range;
        self
    }

    /// Choose how keys are printed.
    pub fn with_key_style(mut self, key_style: KeyStyle) -> Self {
        self.key_style = key_style;
        self
    }

    /// Check the configuration without touching any store.
    pub fn validate(&self) -> Result<(), HistogramError> {
        SizeHistogram::new(self.base).map(|_| ())
    }
}

/// Runs scans with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `store`, writing one quoted key per line followed by the report.
    ///
    /// The cursor is closed exactly once whether or not the walk succeeds.
    /// The report is only written when both the walk and the close succeed.
    pub fn scan<S, W>(&self, store: &S, out: &mut W) -> Result<SizeHistogram, ScanError>
    where
        S: Store + ?Sized,
        W: Write,
    {
        let mut histogram = SizeHistogram::new(self.config.base)?;
        let mut cursor = store.iterator(&self.config.range).map_err(ScanError::Open)?;
        debug!(backend = store.backend(), range = ?self.config.range, "iterator opened");

        let walked = self.walk(&mut *cursor, &mut histogram, out);
        let closed = cursor.close();
        drop(cursor);

        match (walked, closed) {
            (Ok(()), Ok(())) => debug!("iterator closed"),
            (Ok(()), Err(source)) => return Err(ScanError::Close { source, histogram }),
            (Err(err), Ok(())) => return Err(err),
            (Err(err), Err(close_err)) => {
                warn!(error = %close_err, "iterator failed to close after aborted scan");
                return Err(err);
            }
        }

        write_report(out, &histogram, self.config.bar_width)?;
        info!(
            backend = store.backend(),
            keys = histogram.sample_count(),
            max = histogram.max_size(),
            "scan complete"
        );
        Ok(histogram)
    }

    /// Open the store named by `locator` and scan it.
    ///
    /// The configuration is validated first, so a bad base is reported
    /// without opening anything.
    pub fn scan_located<W: Write>(
        &self,
        registry: &BackendRegistry,
        locator: &StoreLocator,
        options: &StoreOptions,
        out: &mut W,
    ) -> Result<SizeHistogram, ScanError> {
        self.config.validate()?;
        let store = registry
            .open(&locator.backend, &locator.path, options)
            .map_err(ScanError::Open)?;
        debug!(%locator, "store opened");
        self.scan(store.as_ref(), out)
    }

    fn walk<W: Write>(
        &self,
        cursor: &mut dyn Cursor,
        histogram: &mut SizeHistogram,
        out: &mut W,
    ) -> Result<(), ScanError> {
        while cursor.valid() {
            histogram.record(cursor.value().len() as u64);
            writeln!(out, "{}", quote_key(cursor.key(), self.config.key_style))?;
            cursor.advance().map_err(ScanError::Read)?;
        }
        Ok(())
    }
}
