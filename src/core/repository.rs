//! Generic repository: the type-safe CRUD surface over one entity type.
//!
//! Reads execute against the store immediately; writes are only staged into
//! the scope's change set and take effect at the unit-of-work commit.

use std::marker::PhantomData;

use crate::core::entity::Entity;
use crate::core::error::{AppError, Result};
use crate::core::pagination::{PagedList, PageParameters};
use crate::core::query::{OrderedQuery, Query};
use crate::store::{ChangeSet, Direction, Op, StagedOp, StoreHandle};

pub struct Repository<E: Entity> {
    store: StoreHandle,
    changes: ChangeSet,
    _entity: PhantomData<E>,
}

impl<E: Entity> Repository<E> {
    pub fn new(store: StoreHandle, changes: ChangeSet) -> Self {
        Self {
            store,
            changes,
            _entity: PhantomData,
        }
    }

    /// A repository whose staged writes can never reach a commit; used for
    /// projection reads.
    pub fn read_only(store: StoreHandle) -> Self {
        Self::new(store, ChangeSet::new())
    }

    /// A fresh query handle over all rows of the entity's table. No side
    /// effects, no I/O until consumed.
    pub fn query(&self) -> Query<E> {
        Query::new()
    }

    /// Execute an ordered query and decode every row.
    pub async fn fetch_all(&self, query: OrderedQuery<E>) -> Result<Vec<E>> {
        let records = self.store.fetch(&query.to_select()).await?;
        records.iter().map(E::from_record).collect()
    }

    /// Rows matching the query's filters.
    pub async fn count(&self, query: &Query<E>) -> Result<u64> {
        self.store.count(&query.to_select()).await
    }

    /// Execute a filtered query expected to match at most one row.
    ///
    /// Returns `None` when nothing matches. When several rows match, the
    /// lowest id wins, so the result is deterministic regardless of store
    /// ordering.
    pub async fn find_one(&self, query: Query<E>) -> Result<Option<E>> {
        let query = query
            .order_by(E::id_field(), Direction::Ascending)
            .take(1);
        Ok(self.fetch_all(query).await?.into_iter().next())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<E>> {
        self.find_one(self.query().filter(E::id_field(), Op::Eq, id))
            .await
    }

    /// Stage the entity for insertion. It must not already carry a
    /// persisted id.
    pub fn add(&self, entity: &E) -> Result<()> {
        if entity.id().is_some() {
            return Err(AppError::validation(format!(
                "cannot insert into {}: entity already carries a persisted id",
                E::table()
            )));
        }
        self.changes.stage(StagedOp::Insert {
            table: E::table(),
            record: entity.to_record(),
        });
        Ok(())
    }

    /// Stage the entity as a full replacement of the row with its id. An
    /// absent row surfaces as a NotFound failure at commit.
    pub fn update(&self, entity: &E) -> Result<()> {
        let id = entity.id().ok_or_else(|| {
            AppError::validation(format!(
                "cannot update {}: entity has no persisted id",
                E::table()
            ))
        })?;
        self.changes.stage(StagedOp::Update {
            table: E::table(),
            id,
            record: entity.to_record(),
        });
        Ok(())
    }

    /// Stage removal of the row with the entity's id. Only the id matters;
    /// the other fields need not be populated.
    pub fn delete(&self, entity: &E) -> Result<()> {
        let id = entity.id().ok_or_else(|| {
            AppError::validation(format!(
                "cannot delete from {}: entity has no persisted id",
                E::table()
            ))
        })?;
        self.changes.stage(StagedOp::Delete {
            table: E::table(),
            id,
        });
        Ok(())
    }

    /// Compute one page of an ordered query in exactly two store
    /// round-trips: one count over the filters, one fetch of the page
    /// slice. A page past the end comes back empty rather than failing.
    pub async fn fetch_page(
        &self,
        query: OrderedQuery<E>,
        params: PageParameters,
    ) -> Result<PagedList<E>> {
        let total_count = self.store.count(&query.to_count_select()).await?;

        let page_query = query.skip(params.offset()).take(params.page_size());
        let records = self.store.fetch(&page_query.to_select()).await?;
        let items = records
            .iter()
            .map(E::from_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(PagedList::new(items, total_count, params))
    }
}
