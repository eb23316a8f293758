use std::io::{BufRead, Write};

use log::warn;

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::queue::PriorityQueue;
use crate::receiver::{ReceiveStats, Receiver};

/// How [`run`] treats rejected lines and renders drained instructions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Stop at the first rejected line instead of logging and continuing.
    pub strict: bool,
    /// Write JSON lines instead of wire lines.
    pub json: bool,
}

/// Feeds every non-empty line of `input` to `receiver`.
///
/// A trailing `\r` is stripped. In strict mode the first failure is returned
/// as [`Error::Rejected`] with its 1-based line number.
pub fn receive_lines<C: Clock>(
    receiver: &mut Receiver<C>,
    input: impl BufRead,
    strict: bool,
) -> Result<()> {
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.is_empty() {
            continue;
        }
        if let Err(err) = receiver.receive(line) {
            let line = index + 1;
            if strict {
                return Err(Error::Rejected {
                    line,
                    source: Box::new(err),
                });
            }
            warn!("line {line}: {}", err.to_string().replace('\n', "; "));
        }
    }
    Ok(())
}

/// Drains `queue` into `out` in priority order. Returns how many were written.
pub fn write_drained(queue: &mut PriorityQueue, mut out: impl Write, json: bool) -> Result<usize> {
    let mut written = 0;
    for instruction in queue.drain() {
        if json {
            serde_json::to_writer(&mut out, &instruction)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{instruction}")?;
        }
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

/// Receives all of `input`, then drains the queue into `out`.
pub fn run<C: Clock>(
    mut receiver: Receiver<C>,
    input: impl BufRead,
    out: impl Write,
    options: IngestOptions,
) -> Result<ReceiveStats> {
    receive_lines(&mut receiver, input, options.strict)?;
    write_drained(receiver.queue_mut(), out, options.json)?;
    Ok(receiver.stats())
}
