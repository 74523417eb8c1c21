//! The transaction boundary of one logical operation.

use std::sync::OnceLock;

use crate::core::error::Result;
use crate::modules::categories::CategoryRepository;
use crate::modules::products::ProductRepository;
use crate::store::{ChangeSet, CommitReceipt, StagedOp, StoreHandle};

/// Owns the specialized repositories for the lifetime of one logical
/// operation (one inbound request) and the single commit that flushes
/// everything they staged.
///
/// A scope must not be shared across concurrent operations; create one per
/// operation and drop it at the end. Dropping before commit discards all
/// pending mutations.
pub struct UnitOfWork {
    store: StoreHandle,
    changes: ChangeSet,
    categories: OnceLock<CategoryRepository>,
    products: OnceLock<ProductRepository>,
}

impl UnitOfWork {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            store,
            changes: ChangeSet::new(),
            categories: OnceLock::new(),
            products: OnceLock::new(),
        }
    }

    /// The category repository, constructed on first access and reused for
    /// the rest of the scope.
    pub fn categories(&self) -> &CategoryRepository {
        self.categories
            .get_or_init(|| CategoryRepository::new(self.store.clone(), self.changes.clone()))
    }

    /// The product repository, constructed on first access and reused for
    /// the rest of the scope.
    pub fn products(&self) -> &ProductRepository {
        self.products
            .get_or_init(|| ProductRepository::new(self.store.clone(), self.changes.clone()))
    }

    /// Snapshot of the mutations staged so far, across all repositories of
    /// this scope.
    pub fn pending(&self) -> Vec<StagedOp> {
        self.changes.pending()
    }

    /// Flush every staged mutation as one atomic batch.
    ///
    /// With nothing staged this is a no-op success without a store
    /// round-trip. On store rejection the error propagates and the store is
    /// left without partial effects.
    pub async fn commit(&self) -> Result<CommitReceipt> {
        if self.changes.is_empty() {
            return Ok(CommitReceipt::default());
        }
        let batch = self.changes.drain();
        self.store.apply(batch).await
    }
}
