//! Typed, lazily-evaluated query construction.
//!
//! [`Query`] composes filters; calling `order_by` turns it into an
//! [`OrderedQuery`], and only that type offers `skip`/`take`. Pagination
//! over an unordered result set is therefore unrepresentable.
//!
//! Building a query performs no I/O; execution happens when a repository
//! consumes it.

use std::marker::PhantomData;

use crate::core::entity::{Entity, Field};
use crate::store::{Direction, Filter, Op, OrderBy, SelectQuery, Value};

/// A filtered, unordered query over all rows of an entity's table.
#[derive(Clone)]
pub struct Query<E: Entity> {
    filters: Vec<Filter>,
    _entity: PhantomData<E>,
}

impl<E: Entity> Query<E> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Restrict to rows whose `field` compares to `value` under `op`.
    pub fn filter(mut self, field: E::Field, op: Op, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: field.column(),
            op,
            value: value.into(),
        });
        self
    }

    /// Fix the result order. Required before skip/take or paging.
    pub fn order_by(self, field: E::Field, direction: Direction) -> OrderedQuery<E> {
        OrderedQuery {
            filters: self.filters,
            order: OrderBy {
                column: field.column(),
                direction,
            },
            skip: None,
            take: None,
            _entity: PhantomData,
        }
    }

    /// Lowering used for counting: filters only.
    pub(crate) fn to_select(&self) -> SelectQuery {
        SelectQuery {
            table: E::table(),
            columns: E::fields().iter().map(|f| f.spec()).collect(),
            filters: self.filters.clone(),
            order_by: None,
            skip: None,
            take: None,
        }
    }
}

impl<E: Entity> Default for Query<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// A query with a fixed order, ready for skip/take composition.
#[derive(Clone)]
pub struct OrderedQuery<E: Entity> {
    filters: Vec<Filter>,
    order: OrderBy,
    skip: Option<u64>,
    take: Option<u64>,
    _entity: PhantomData<E>,
}

impl<E: Entity> OrderedQuery<E> {
    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    pub fn take(mut self, n: u64) -> Self {
        self.take = Some(n);
        self
    }

    /// Lowering used for counting: filters only, order and page dropped.
    pub(crate) fn to_count_select(&self) -> SelectQuery {
        SelectQuery {
            table: E::table(),
            columns: E::fields().iter().map(|f| f.spec()).collect(),
            filters: self.filters.clone(),
            order_by: None,
            skip: None,
            take: None,
        }
    }

    pub(crate) fn to_select(&self) -> SelectQuery {
        SelectQuery {
            table: E::table(),
            columns: E::fields().iter().map(|f| f.spec()).collect(),
            filters: self.filters.clone(),
            order_by: Some(self.order),
            skip: self.skip,
            take: self.take,
        }
    }
}
