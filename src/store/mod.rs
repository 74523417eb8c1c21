//! Store adapter boundary.
//!
//! Everything the data-access core needs from a relational store is behind
//! the [`Store`] trait: counting and fetching composed read queries, and
//! flushing a staged batch of mutations atomically. The production
//! implementation is [`MySqlStore`]; tests provide an in-memory one.

pub mod changes;
pub mod mysql;
pub mod select;
pub mod value;

pub use changes::{ChangeSet, CommitReceipt, StagedOp};
pub use mysql::MySqlStore;
pub use select::{ColumnSpec, Direction, Filter, Op, OrderBy, SelectQuery};
pub use value::{Record, Value, ValueKind};

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::Result;

/// Contract the data-access core consumes.
#[async_trait]
pub trait Store: Send + Sync {
    /// Number of rows matching the query's filters. Ordering, skip and take
    /// are ignored.
    async fn count(&self, query: &SelectQuery) -> Result<u64>;

    /// Execute the query with ordering, skip and take applied.
    async fn fetch(&self, query: &SelectQuery) -> Result<Vec<Record>>;

    /// Flush a batch of staged mutations as one atomic unit.
    ///
    /// All-or-nothing: if any operation fails (absent update/delete target,
    /// constraint violation, connectivity), the whole batch is rolled back
    /// and the error propagates. Returns the ids assigned to inserts, in
    /// batch order.
    async fn apply(&self, batch: Vec<StagedOp>) -> Result<CommitReceipt>;
}

/// Shared handle to a store, cloned into every unit-of-work scope.
pub type StoreHandle = Arc<dyn Store>;
