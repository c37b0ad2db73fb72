//! Decides when the write buffer goes to the store, and commits it.

use crate::core::buffer::WriteBuffer;
use crate::core::store::EventStore;
use crate::errors::{AppError, AppResult};
use std::time::{Duration, Instant};

pub const DEFAULT_FLUSH_INTERVAL_SECONDS: u64 = 600;
pub const DEFAULT_FLUSH_MAX_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushSettings {
    /// Max staleness of buffered events before an automatic flush.
    pub interval: Duration,
    /// Buffer length that forces an earlier flush.
    pub max_size: usize,
}

impl Default for FlushSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_FLUSH_INTERVAL_SECONDS),
            max_size: DEFAULT_FLUSH_MAX_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Not forced and not due yet.
    NotDue,
    /// Due (or forced) but the buffer held nothing.
    Empty,
    /// This many events were committed and removed from the buffer.
    Flushed(usize),
}

#[derive(Debug, Clone)]
pub struct FlushController {
    settings: FlushSettings,
    last_flush: Instant,
}

impl FlushController {
    pub fn new(settings: FlushSettings, now: Instant) -> Self {
        Self {
            settings,
            last_flush: now,
        }
    }

    pub fn settings(&self) -> FlushSettings {
        self.settings
    }

    pub fn last_flush(&self) -> Instant {
        self.last_flush
    }

    pub fn should_flush(&self, now: Instant, buffered: usize) -> bool {
        now.saturating_duration_since(self.last_flush) >= self.settings.interval
            || buffered >= self.settings.max_size
    }

    /// Commit the whole buffer as one batch when forced or due.
    ///
    /// On failure the buffer and `last_flush` are left exactly as they were
    /// and the error reports how many events are still pending.
    pub fn flush<S: EventStore>(
        &mut self,
        buffer: &mut WriteBuffer,
        store: &mut S,
        force: bool,
        now: Instant,
    ) -> AppResult<FlushOutcome> {
        if !force && !self.should_flush(now, buffer.len()) {
            return Ok(FlushOutcome::NotDue);
        }
        if buffer.is_empty() {
            return Ok(FlushOutcome::Empty);
        }

        let batch = buffer.drain();
        let committed = batch.len();

        store
            .append_batch(batch)
            .map_err(|e| AppError::FlushFailed {
                pending: committed,
                source: Box::new(e),
            })?;

        buffer.clear();
        self.last_flush = now;
        Ok(FlushOutcome::Flushed(committed))
    }
}
