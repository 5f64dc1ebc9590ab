//! Line-oriented staging on top of [`RingBuffer`]: block-wise pass-through
//! (`pipe`) and bounded history (`tail`).

use anyhow::Result;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, trace};

use crate::error::RingError;
use crate::ring_buffer::RingBuffer;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub lines_in:   usize,
    pub lines_out:  usize,
    /// Highest buffer occupancy seen
    pub high_water: usize,
    /// Times a read block did not fit and had to wait for a drain
    pub stalls:     usize,
}

/// Copies `reader` to `writer` line by line, staging through a buffer of
/// `capacity` slots. Lines are read and written `block_size` at a time.
pub fn pipe<R: BufRead, W: Write>(reader: R, mut writer: W, capacity: usize, block_size: usize) -> Result<StageReport> {
    if block_size == 0 {
        return Err(RingError::InvalidArgument { reason: "block size must be positive" }.into());
    }
    let mut rb: RingBuffer<String> = RingBuffer::new(capacity)?;
    let mut report = StageReport::default();

    let mut lines   = reader.lines();
    let mut pending = Vec::with_capacity(block_size);
    let mut pos     = 0;
    let mut out     = vec![None; block_size];
    let mut eof     = false;

    loop {
        if pos == pending.len() && !eof {
            pending.clear();
            pos = 0;
            while pending.len() < block_size {
                match lines.next() {
                    Some(line) => pending.push(line?),
                    None       => { eof = true; break; }
                }
            }
            report.lines_in += pending.len();
        }

        pos += rb.fill_from(&pending, pos);
        report.high_water = report.high_water.max(rb.len());
        let stalled = pos < pending.len();
        if stalled {
            report.stalls += 1;
        }

        if stalled || eof || rb.len() >= block_size {
            let n = rb.drain_into(&mut out, 0)?;
            for line in out.iter_mut().take(n).filter_map(Option::take) {
                writeln!(writer, "{line}")?;
            }
            report.lines_out += n;
            trace!(drained = n, buffered = rb.len(), "block flushed");
        }

        if eof && pos == pending.len() && rb.is_empty() {
            break;
        }
    }
    writer.flush()?;
    debug!(?report, "pipe finished");
    Ok(report)
}

/// Returns the last `capacity` lines of `reader`, oldest first.
pub fn tail<R: BufRead>(reader: R, capacity: usize) -> Result<Vec<String>> {
    let mut rb = RingBuffer::new(capacity)?;
    for line in reader.lines() {
        let line = line?;
        if rb.is_full() {
            rb.pop()?;
        }
        rb.push(line)?;
    }
    if rb.is_empty() {
        return Ok(Vec::new());
    }
    let mut out = vec![None; rb.len()];
    rb.peek(&mut out, 0, 0)?;
    Ok(out.into_iter().flatten().collect())
}
