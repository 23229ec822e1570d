use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use dbkeys::histogram::{DEFAULT_BAR_WIDTH, DEFAULT_BASE};
use dbkeys::store::DEFAULT_TABLE;
use dbkeys::{
    BackendRegistry, KeyRange, KeyStyle, ScanConfig, ScanError, Scanner, StoreLocator,
    StoreOptions,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dbkeys",
    about = "Print every key of a key-value store and a histogram of value sizes"
)]
struct Cli {
    /// Database locator (`backend:path`).
    #[arg(long, value_name = "BACKEND:PATH", required_unless_present = "list_backends")]
    db: Option<String>,

    /// Histogram sample base (values <= 0 select the default).
    #[arg(long, default_value_t = DEFAULT_BASE as i64, allow_negative_numbers = true)]
    base: i64,

    /// Histogram bar length.
    #[arg(long, default_value_t = DEFAULT_BAR_WIDTH)]
    bar: usize,

    /// First key to scan (inclusive).
    #[arg(long)]
    start: Option<String>,

    /// Key to stop at (exclusive).
    #[arg(long)]
    end: Option<String>,

    /// Table to scan, for backends with several.
    #[arg(long, default_value = DEFAULT_TABLE)]
    table: String,

    /// Print keys in backquotes when no escaping is needed.
    #[arg(long)]
    backquote: bool,

    /// List available backends and exit.
    #[arg(long)]
    list_backends: bool,
}

impl Cli {
    fn scan_config(&self) -> ScanConfig {
        let range = KeyRange::new(
            self.start.as_ref().map(|s| s.as_bytes().to_vec()),
            self.end.as_ref().map(|s| s.as_bytes().to_vec()),
        );
        let key_style = if self.backquote {
            KeyStyle::Backquoted
        } else {
            KeyStyle::Quoted
        };
        ScanConfig::default()
            .with_base(self.base)
            .with_bar_width(self.bar)
            .with_range(range)
            .with_key_style(key_style)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let registry = BackendRegistry::with_builtin();

    if cli.list_backends {
        return list_backends(&registry);
    }

    run_scan(&cli, &registry)
}

/// Logs go to stderr so stdout carries only keys and the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn list_backends(registry: &BackendRegistry) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for info in registry.list() {
        writeln!(stdout, "{}\t{}", info.name, info.description)?;
    }
    Ok(())
}

fn run_scan(cli: &Cli, registry: &BackendRegistry) -> Result<()> {
    let Some(raw) = cli.db.as_deref() else {
        bail!("--db is required");
    };
    let locator = StoreLocator::parse(raw).context("parsing --db")?;
    let options = StoreOptions {
        table: cli.table.clone(),
    };

    let scanner = Scanner::new(cli.scan_config());
    let mut stdout = io::stdout().lock();
    match scanner.scan_located(registry, &locator, &options, &mut stdout) {
        Ok(_) => Ok(()),
        Err(err @ ScanError::Histogram(_)) => Err(err).context("invalid --base"),
        Err(err @ ScanError::Open(_)) => {
            Err(err).with_context(|| format!("failed to open {}", locator))
        }
        Err(ScanError::Close { source, histogram }) => {
            error!(keys = histogram.sample_count(), "scan finished before close failed");
            Err(source).context("closing iterator")
        }
        Err(err) => Err(err).with_context(|| format!("scanning {}", locator)),
    }
}
