use std::io::{self, Write};

use super::SizeHistogram;

const BAR_MARK: &str = "=";

/// Write the fixed-format size report.
///
/// Each bucket line carries the level, its raw count and a bar of
/// `floor(bar_width * count / n)` marks.
pub fn write_report<W: Write>(
    writer: &mut W,
    hist: &SizeHistogram,
    bar_width: usize,
) -> io::Result<()> {
    let n = hist.sample_count();
    writeln!(writer, "n = {}", n)?;
    writeln!(writer, "max = {}", hist.max_size())?;
    writeln!(writer, "avg = {:.1}", hist.mean())?;
    writeln!(writer, "[{}^i]", hist.base())?;

    for (level, &count) in hist.buckets().iter().enumerate() {
        let len = (bar_width as f64 * count as f64 / n as f64) as usize;
        writeln!(writer, "{:<2} {:<6} {}", level, count, BAR_MARK.repeat(len))?;
    }

    writer.flush()
}

/// Render the report into a string (useful for tests and snapshots).
pub fn render_report(hist: &SizeHistogram, bar_width: usize) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_report(&mut buffer, hist, bar_width);
    String::from_utf8_lossy(&buffer).into_owned()
}
