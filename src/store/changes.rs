//! Explicit change tracking for one unit-of-work scope.
//!
//! Mutations never touch the store when staged; they accumulate here until
//! the scope commits, at which point the whole batch is flushed atomically.

use std::sync::{Arc, Mutex};

use super::value::Record;

/// One staged mutation. Inserts carry the row to write (without an id, the
/// store assigns one); updates and deletes address an existing row by id.
#[derive(Debug, Clone, PartialEq)]
pub enum StagedOp {
    Insert {
        table: &'static str,
        record: Record,
    },
    Update {
        table: &'static str,
        id: i64,
        record: Record,
    },
    Delete {
        table: &'static str,
        id: i64,
    },
}

impl StagedOp {
    pub fn table(&self) -> &'static str {
        match self {
            StagedOp::Insert { table, .. }
            | StagedOp::Update { table, .. }
            | StagedOp::Delete { table, .. } => table,
        }
    }
}

/// Result of flushing a batch: store-assigned ids for the inserts, in the
/// order they were staged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitReceipt {
    pub inserted_ids: Vec<i64>,
}

/// The pending-mutation set shared by all repositories of one scope.
///
/// Cloning yields another handle to the same set. The lock is only held for
/// synchronous push/snapshot/drain, never across an await point.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    inner: Arc<Mutex<Vec<StagedOp>>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self, op: StagedOp) {
        self.lock().push(op);
    }

    /// Snapshot of the staged operations, in staging order.
    pub fn pending(&self) -> Vec<StagedOp> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Takes every staged operation, leaving the set empty.
    pub fn drain(&self) -> Vec<StagedOp> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StagedOp>> {
        // A poisoned lock only means another thread panicked mid-push; the
        // Vec itself is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
