//! Background re-wrap of the whole document, one chunk per step.
//!
//! The host owns the schedule (a timer, an idle callback, a frame tick) and
//! calls [`RewrapScheduler::poll`]; nothing here blocks or spawns. Each chunk's
//! `wrap()` leaves that chunk consistent, so rendering between steps is safe
//! even while later chunks still hold breaks for the old width.

use std::time::{Duration, Instant};

use crate::document::Document;

/// Resumable pass over the chunk sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewrapTask {
    next: usize,
}

impl RewrapTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) from chunk `index`
    pub fn starting_at(index: usize) -> Self {
        Self { next: index }
    }

    pub fn restart_from(&mut self, index: usize) {
        self.next = index;
    }

    /// Step back to the lowest chunk that moved since the last step, so a
    /// chunk shifted below `next` by a split or removal still gets wrapped.
    pub fn resync(&mut self, document: &mut Document) {
        if let Some(index) = document.take_restructured() {
            if index < self.next {
                tracing::trace!(from = self.next, to = index, "rewrap resuming earlier");
                self.next = index;
            }
        }
    }

    pub fn is_done(&self, document: &Document) -> bool {
        self.next >= document.chunk_count()
    }

    /// Wrap one chunk. Returns true while chunks remain after this one.
    pub fn step(&mut self, document: &mut Document) -> bool {
        self.resync(document);
        if document.wrap_chunk(self.next) {
            self.next += 1;
        }
        !self.is_done(document)
    }

    /// Run the remaining chunks without yielding
    pub fn run_to_end(&mut self, document: &mut Document) {
        while self.step(document) {}
    }
}

/// Coalesces rewrap requests and drives the pass once things go quiet
#[derive(Debug, Clone)]
pub struct RewrapScheduler {
    quiet_period: Duration,
    requested_at: Option<Instant>,
    task: Option<RewrapTask>,
}

impl RewrapScheduler {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            requested_at: None,
            task: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Change the quiet period, keeping any pending request and pass
    pub fn set_quiet_period(&mut self, quiet_period: Duration) {
        self.quiet_period = quiet_period;
    }

    /// Ask for a full rewrap. Later requests push the start time back; an
    /// in-flight pass is superseded once the new quiet period elapses.
    pub fn request(&mut self, now: Instant) {
        self.requested_at = Some(now);
    }

    /// Drop any pending request and in-flight pass
    pub fn cancel(&mut self) {
        self.requested_at = None;
        self.task = None;
    }

    /// True while a request is waiting or a pass is running
    pub fn is_active(&self) -> bool {
        self.requested_at.is_some() || self.task.is_some()
    }

    /// How long the host should wait before the next [`poll`](Self::poll):
    /// zero while a pass is running, the rest of the quiet period while only
    /// a request is waiting, `None` when idle.
    pub fn next_delay(&self, now: Instant) -> Option<Duration> {
        if self.task.is_some() {
            return Some(Duration::ZERO);
        }
        let waited = now.saturating_duration_since(self.requested_at?);
        Some(self.quiet_period.saturating_sub(waited))
    }

    /// Advance the schedule by one step. Returns true if a chunk was rewrapped.
    pub fn poll(&mut self, now: Instant, document: &mut Document) -> bool {
        if let Some(at) = self.requested_at {
            if now.saturating_duration_since(at) >= self.quiet_period {
                self.requested_at = None;
                if self.task.is_some() {
                    tracing::debug!("superseding in-flight rewrap");
                }
                self.task = Some(RewrapTask::new());
            }
        }

        let Some(task) = self.task.as_mut() else {
            return false;
        };
        task.resync(document);
        if task.is_done(document) {
            self.task = None;
            return false;
        }
        let more = task.step(document);
        if !more {
            tracing::debug!(
                screen_lines = document.screen_line_count(),
                "rewrap complete"
            );
            self.task = None;
        }
        true
    }
}
