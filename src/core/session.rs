//! One tally session: the buffer, its flush controller and the store they
//! feed, owned together. Callers (CLI one-shots, the interactive loop,
//! tests) only talk to this type.

use crate::core::aggregator;
use crate::core::buffer::WriteBuffer;
use crate::core::flush::{FlushController, FlushOutcome, FlushSettings};
use crate::core::store::EventStore;
use crate::core::undo::{self, UndoResult};
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::event_kind::EventKind;
use crate::models::summary::Summary;
use chrono::NaiveDate;
use std::num::NonZeroU32;
use std::time::Instant;

pub struct TallySession<S: EventStore> {
    store: S,
    buffer: WriteBuffer,
    flush: FlushController,
}

impl<S: EventStore> TallySession<S> {
    /// Empty buffer, `last_flush_time = now`.
    pub fn new(store: S, settings: FlushSettings) -> Self {
        Self::started_at(store, settings, Instant::now())
    }

    pub fn started_at(store: S, settings: FlushSettings, now: Instant) -> Self {
        Self {
            store,
            buffer: WriteBuffer::new(),
            flush: FlushController::new(settings, now),
        }
    }

    /// Accept an event locally. Never touches the store.
    pub fn enqueue(&mut self, kind: EventKind, day: NaiveDate, count: NonZeroU32) {
        self.buffer.append(Event::new(kind, day, count));
    }

    pub fn undo(&mut self, day: NaiveDate) -> AppResult<UndoResult> {
        undo::undo(&mut self.store, &mut self.buffer, day)
    }

    pub fn summary(&self, day: NaiveDate) -> AppResult<Summary> {
        aggregator::summary(&self.store, &self.buffer, day)
    }

    /// Explicit flush trigger. `force = false` only flushes when due.
    pub fn sync(&mut self, force: bool) -> AppResult<FlushOutcome> {
        self.sync_at(force, Instant::now())
    }

    pub fn sync_at(&mut self, force: bool, now: Instant) -> AppResult<FlushOutcome> {
        self.flush.flush(&mut self.buffer, &mut self.store, force, now)
    }

    /// Timer entry point.
    pub fn flush_if_needed(&mut self, now: Instant) -> AppResult<FlushOutcome> {
        self.sync_at(false, now)
    }

    pub fn should_flush(&self, now: Instant) -> bool {
        self.flush.should_flush(now, self.buffer.len())
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffered(&self) -> &[Event] {
        self.buffer.drain()
    }

    pub fn last_flush(&self) -> Instant {
        self.flush.last_flush()
    }

    pub fn settings(&self) -> FlushSettings {
        self.flush.settings()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Drop whatever is still buffered and hand back the store.
    pub fn into_store(self) -> S {
        self.store
    }
}
