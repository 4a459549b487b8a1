//! Observability hooks for the health endpoint.

use std::collections::VecDeque;
use std::sync::Mutex;

use order_core::LookupError;

/// One recorded lookup failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// Cache key the failed lookup was for.
    pub key: String,
    /// Stable failure label (see [`LookupError::kind`]).
    pub kind: &'static str,
}

/// Bounded window of recent lookup failures.
///
/// Oldest entries fall off once capacity is reached.
#[derive(Debug)]
pub struct FailureWindow {
    capacity: usize,
    entries: Mutex<VecDeque<FailureRecord>>,
}

impl FailureWindow {
    /// Create a window keeping at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Record one failure.
    pub fn record(&self, key: &str, error: &LookupError) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(FailureRecord {
            key: key.to_string(),
            kind: error.kind(),
        });
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no failures are retained.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the retained records, oldest first.
    pub fn recent(&self) -> Vec<FailureRecord> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<FailureRecord>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
