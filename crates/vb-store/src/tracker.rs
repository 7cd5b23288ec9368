//! Durable-write diagnostics.

use std::time::Instant;

/// Tracks the outcome of snapshot writes.
///
/// Purely informational: the in-memory state is authoritative whatever this
/// says. `dirty` stays set while the latest change has not reached storage.
#[derive(Debug, Clone, Default)]
pub struct WriteTracker {
    dirty: bool,
    last_change: Option<Instant>,
    last_write: Option<Instant>,
    writes: u64,
    failed_writes: u64,
    last_error: Option<String>,
}

impl WriteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the latest in-memory change is not yet durable.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Successful writes so far.
    #[inline]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Failed writes so far.
    #[inline]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record an in-memory change.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.last_change = Some(Instant::now());
    }

    /// Record a successful write of the current snapshot.
    pub fn write_complete(&mut self) {
        self.dirty = false;
        self.writes += 1;
        self.last_write = Some(Instant::now());
        self.last_error = None;
    }

    /// Record a failed write; the change stays dirty.
    pub fn write_failed(&mut self, error: impl Into<String>) {
        self.failed_writes += 1;
        self.last_error = Some(error.into());
    }

    /// Milliseconds since the last in-memory change.
    pub fn ms_since_last_change(&self) -> Option<u64> {
        self.last_change.map(|t| t.elapsed().as_millis() as u64)
    }

    /// Milliseconds since the last successful write.
    pub fn ms_since_last_write(&self) -> Option<u64> {
        self.last_write.map(|t| t.elapsed().as_millis() as u64)
    }
}
