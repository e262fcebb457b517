//! Utilities for displaying a progress monitor to track compression/decompression
//!
//! The bar itself is drawn by `tracing-indicatif`, attached to the span of the
//! running operation, see <https://docs.rs/tracing-indicatif>

use std::{
    io::{Read, Seek, SeekFrom},
    time::{Duration, Instant},
};

use indicatif::{style::TemplateError, ProgressStyle};
use tracing::{info, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// A generic wrapper around a reader that keeps track of how many bytes have been read
/// from the total.
///
/// Seeking is passed through untouched, bytes read again after a seek count
/// towards the total a second time.
pub struct ProgressMonitor<R: Read> {
    /// The total amount that the reader will read
    pub total: u64,
    /// Amount read so far
    pub read: u64,
    /// The internal reader
    reader: R,
    span: Span,
    started: Instant,
    finished: bool,
}

impl<R: Read> ProgressMonitor<R> {
    /// Create a new progress monitor reporting through `span`, initialized with zero bytes read
    pub fn new(reader: R, total: u64, span: Span) -> Result<Self, TemplateError> {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template(
            "{wide_bar} {binary_bytes}/{binary_total_bytes}  \n[est. {eta} remaining]",
        )?;
        span.pb_set_style(&style);
        span.pb_set_length(total);
        Ok(Self {
            total,
            read: 0,
            reader,
            span,
            started: Instant::now(),
            finished: false,
        })
    }

    /// This function is called whenever a new read is made, and is responsible for updating the UI
    fn update(&mut self, delta: u64) {
        self.span.pb_inc(delta);
        if self.read >= self.total && !self.finished {
            self.finished = true;
            let elapsed = self.started.elapsed();
            info!(
                "processed {} in {} ({}/s avg)",
                fmt_size(self.total as f64),
                fmt_duration(elapsed),
                fmt_size(self.total as f64 / elapsed.as_secs_f64().max(f64::EPSILON))
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        // Fall back on the internally stored reader, but filch the number of bytes read
        // along the way
        let out = self.reader.read(buf)?;
        self.read += out as u64;
        self.update(out as u64);
        Ok(out)
    }
}

impl<R: Read + Seek> Seek for ProgressMonitor<R> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.reader.seek(pos)
    }
}

const SIZE_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Converts a quantity in bytes to a human readable size, "GiB, MiB, KiB, etc"
///
/// Moves up a unit once there would be four figures before the decimal point.
pub fn fmt_size(size_in_bytes: f64) -> String {
    let mut size = size_in_bytes;
    let mut unit = 0;
    while size >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{:.0}{}", size, SIZE_UNITS[0])
    } else {
        format!("{:.2}{}", size, SIZE_UNITS[unit])
    }
}

/// Converts a [`std::time::Duration`] to a human readable format
fn fmt_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        return format!("{:.2}ms", secs * 1000.0);
    }
    if secs < 60.0 {
        let precision = if secs > 4.0 { 1 } else { 2 };
        return format!("{:.*}s", precision, secs);
    }

    let total = secs.round() as u64;
    [(total / 3600, "h"), (total / 60 % 60, "m"), (total % 60, "s")]
        .iter()
        .filter(|&&(amount, _)| amount > 0)
        .map(|(amount, unit)| format!("{}{}", amount, unit))
        .collect::<Vec<_>>()
        .join(" ")
}
