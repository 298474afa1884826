use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Identifies the row a column reference is read from.
///
/// Every query gets a fresh `SourceId` for its row. Column references carry
/// the id of the row they were taken from, so a correlated subquery can tell
/// an outer-row column from an inner-row column even when both tables use the
/// same column names.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub usize);

impl SourceId {
    /// Allocates a process-unique id. Safe to call concurrently.
    pub fn generate() -> SourceId {
        static NEXT_SOURCE_ID: AtomicUsize = AtomicUsize::new(0);

        SourceId(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "SourceId({})", self.0)
    }
}
