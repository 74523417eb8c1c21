//! Entity metadata consumed by the generic repository and query builder.

use crate::core::error::Result;
use crate::store::{ColumnSpec, Record, ValueKind};

/// A typed reference to one column of an entity's table.
///
/// Field enums give queries compile-time-checked column references; there is
/// no predicate construction from strings or reflection anywhere.
pub trait Field: Copy + Send + Sync + 'static {
    fn column(self) -> &'static str;
    fn kind(self) -> ValueKind;

    fn spec(self) -> ColumnSpec {
        ColumnSpec {
            name: self.column(),
            kind: self.kind(),
        }
    }
}

/// A domain record stored in one table, with a store-assigned numeric id.
pub trait Entity: Clone + Send + Sync + 'static {
    type Field: Field;

    fn table() -> &'static str;

    /// All columns of the table, id included, in SELECT order.
    fn fields() -> &'static [Self::Field];

    /// The identifier column.
    fn id_field() -> Self::Field;

    /// `None` until the store assigns an id at commit; immutable afterwards.
    fn id(&self) -> Option<i64>;

    /// The entity's data columns (everything except the id), as written on
    /// insert or update.
    fn to_record(&self) -> Record;

    /// Decode a fetched row. The id column is always present in store rows.
    fn from_record(record: &Record) -> Result<Self>;
}
