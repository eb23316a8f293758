use log::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::ReceiverConfig;
use crate::error::{Error, Result};
use crate::parser::parse;
use crate::queue::PriorityQueue;
use crate::validator::Validator;

/// Running totals for a [`Receiver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiveStats {
    pub received: u64,
    pub accepted: u64,
    pub parse_failures: u64,
    pub validation_failures: u64,
    pub rejected_full: u64,
}

impl ReceiveStats {
    pub fn rejected(&self) -> u64 {
        self.parse_failures + self.validation_failures + self.rejected_full
    }
}

/// Parses, validates and enqueues raw instruction messages.
///
/// Each step runs only when the previous one succeeded, and the first
/// failure is returned unchanged. The queue grows only on full success.
#[derive(Debug)]
pub struct Receiver<C = SystemClock> {
    validator: Validator<C>,
    queue: PriorityQueue,
    config: ReceiverConfig,
    stats: ReceiveStats,
}

impl Receiver {
    pub fn new() -> Self {
        Self::with_config(ReceiverConfig::default())
    }

    pub fn with_config(config: ReceiverConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Receiver<C> {
    pub fn with_clock(config: ReceiverConfig, clock: C) -> Self {
        Self {
            validator: Validator::with_clock(clock),
            queue: PriorityQueue::with_capacity(config.effective_capacity()),
            config,
            stats: ReceiveStats::default(),
        }
    }

    pub fn receive(&mut self, raw: &str) -> Result<()> {
        self.stats.received += 1;

        let instruction = match parse(raw) {
            Ok(instruction) => instruction,
            Err(err) => {
                self.stats.parse_failures += 1;
                debug!("rejected unparseable message: {err}");
                return Err(err);
            }
        };

        if let Err(err) = self.validator.check(&instruction) {
            self.stats.validation_failures += 1;
            debug!(
                "rejected invalid instruction {}: {}",
                instruction,
                err.to_string().replace('\n', "; ")
            );
            return Err(Error::Validation(err));
        }

        if let Some(max_pending) = self.config.max_pending {
            if self.queue.count() >= max_pending {
                self.stats.rejected_full += 1;
                debug!("rejected {instruction}: queue holds {max_pending} instructions");
                return Err(Error::QueueFull);
            }
        }

        trace!("accepted {instruction}");
        self.queue.push(instruction);
        self.stats.accepted += 1;
        Ok(())
    }

    pub fn queue(&self) -> &PriorityQueue {
        &self.queue
    }

    /// Consumer side of the queue.
    pub fn queue_mut(&mut self) -> &mut PriorityQueue {
        &mut self.queue
    }

    pub fn into_queue(self) -> PriorityQueue {
        self.queue
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    pub fn stats(&self) -> ReceiveStats {
        self.stats
    }
}
