//! Single-writer fan-in: drains per-file results and writes one line each.
//!
//! The aggregator is the only code that touches the sink, so lines never
//! interleave and no lock is needed around it. Run it with
//! `tokio::task::spawn_blocking`; it receives with `blocking_recv` and
//! writes synchronously.

use std::collections::BTreeMap;
use std::io::Write;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::report::ChecksumResult;
use crate::sink::SinkError;

/// Counts reported back once the channel closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub succeeded: usize,
    pub failed: usize,
}

impl Tally {
    pub fn lines(&self) -> usize {
        self.succeeded + self.failed
    }

    fn record(&mut self, result: &ChecksumResult) {
        if result.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// How results are turned into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormat {
    pub checksum_only: bool,
    /// Buffer and emit in candidate-list order rather than completion order.
    pub ordered: bool,
}

/// Drain `rx` until every sender is dropped, writing one newline-terminated
/// line per result. Returns the sink (flushed) and the tally.
pub fn drain<W: Write>(
    mut rx: UnboundedReceiver<ChecksumResult>,
    mut sink: W,
    format: LineFormat,
) -> Result<(W, Tally), SinkError> {
    let mut tally = Tally::default();
    let mut pending: BTreeMap<usize, ChecksumResult> = BTreeMap::new();
    let mut next = 0usize;

    while let Some(result) = rx.blocking_recv() {
        if !format.ordered {
            write_line(&mut sink, &result, format.checksum_only)?;
            tally.record(&result);
            continue;
        }
        pending.insert(result.index(), result);
        while let Some(ready) = pending.remove(&next) {
            write_line(&mut sink, &ready, format.checksum_only)?;
            tally.record(&ready);
            next += 1;
        }
    }

    // Gaps only occur if a producer never reported; still emit what arrived.
    if !pending.is_empty() {
        tracing::warn!(
            missing_from = next,
            buffered = pending.len(),
            "result channel closed with out-of-order results pending"
        );
        for result in pending.into_values() {
            write_line(&mut sink, &result, format.checksum_only)?;
            tally.record(&result);
        }
    }

    sink.flush().map_err(SinkError::Write)?;
    Ok((sink, tally))
}

fn write_line<W: Write>(
    sink: &mut W,
    result: &ChecksumResult,
    checksum_only: bool,
) -> Result<(), SinkError> {
    let line = result.render(checksum_only);
    writeln!(sink, "{}", line).map_err(SinkError::Write)
}
