//! The untyped, store-facing form of a read query.
//!
//! Built by the typed query layer in `core::query` and consumed by `Store`
//! implementations. Ordering is optional here, but skip/take are only ever
//! populated together with an order by the typed layer.

use super::value::{Value, ValueKind};

/// One column of the SELECT list, with the type to decode it as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ValueKind,
}

/// Comparison operators available to filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    pub fn sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "<>",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
        }
    }
}

/// A single column comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub op: Op,
    pub value: Value,
}

impl Filter {
    /// Whether `value` (a row's column value) satisfies this filter.
    /// Values of different kinds never match.
    pub fn matches(&self, value: &Value) -> bool {
        let Some(ordering) = value.partial_cmp(&self.value) else {
            return false;
        };
        match self.op {
            Op::Eq => ordering.is_eq(),
            Op::Ne => ordering.is_ne(),
            Op::Lt => ordering.is_lt(),
            Op::Le => ordering.is_le(),
            Op::Gt => ordering.is_gt(),
            Op::Ge => ordering.is_ge(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn sql(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: Direction,
}

/// A read query against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub table: &'static str,
    pub columns: Vec<ColumnSpec>,
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
}
