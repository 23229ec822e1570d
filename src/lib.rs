//! # dbkeys
//!
//! Scan an embedded key-value store, print every key, and summarize value
//! sizes as a log-scale histogram.
//!
//! ## Pipeline
//!
//! 1. **Locate**: parse `backend:path` into a [`StoreLocator`]
//! 2. **Open**: resolve the backend through the [`BackendRegistry`]
//! 3. **Scan**: walk one [`Cursor`](store::Cursor), printing keys and
//!    recording value lengths in a [`SizeHistogram`]
//! 4. **Report**: render count, max, mean and one bar per size level
//!
//! ## Usage Example
//!
//! ```
//! use dbkeys::{MemStore, ScanConfig, Scanner};
//!
//! let store: MemStore = [("alpha", "1234"), ("beta", "")].into_iter().collect();
//! let mut out = Vec::new();
//! let histogram = Scanner::new(ScanConfig::default()).scan(&store, &mut out)?;
//! assert_eq!(histogram.sample_count(), 2);
//! assert!(String::from_utf8_lossy(&out).starts_with("\"alpha\"\n\"beta\"\nn = 2\n"));
//! # Ok::<(), dbkeys::ScanError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod histogram; // Log-scale size accumulator and report
pub mod locator;   // backend:path parsing
pub mod scan;      // Scan driver and key quoting
pub mod store;     // Store/cursor traits and backends

pub use histogram::{render_report, write_report, HistogramError, SizeHistogram};
pub use locator::{LocatorError, StoreLocator};
pub use scan::{quote_key, KeyStyle, ScanConfig, ScanError, Scanner};
pub use store::{BackendRegistry, KeyRange, MemStore, RedbStore, Store, StoreError, StoreOptions};
