//! MySQL implementation of the store contract, over an sqlx pool.
//!
//! SQL is composed at runtime from [`SelectQuery`] and [`StagedOp`]; only
//! values are bound as parameters. Table and column names come from
//! `&'static str` entity metadata, never from input.

use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlArguments, MySqlRow};
use sqlx::{MySqlPool, Row};

use crate::core::error::{AppError, Result};

use super::changes::{CommitReceipt, StagedOp};
use super::select::{ColumnSpec, SelectQuery};
use super::value::{Record, Value, ValueKind};
use super::Store;

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn count(&self, query: &SelectQuery) -> Result<u64> {
        let sql = build_count_sql(query);

        let mut q = sqlx::query(&sql);
        for filter in &query.filters {
            q = bind_value(q, &filter.value);
        }

        let row = q.fetch_one(&self.pool).await?;
        let count: i64 = row.try_get(0)?;
        Ok(count as u64)
    }

    async fn fetch(&self, query: &SelectQuery) -> Result<Vec<Record>> {
        let sql = build_select_sql(query);

        let mut q = sqlx::query(&sql);
        for filter in &query.filters {
            q = bind_value(q, &filter.value);
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| decode_row(row, &query.columns))
            .collect()
    }

    async fn apply(&self, batch: Vec<StagedOp>) -> Result<CommitReceipt> {
        let mut tx = self.pool.begin().await?;
        let mut receipt = CommitReceipt::default();

        // Any early return drops the transaction, which rolls it back.
        for op in &batch {
            match op {
                StagedOp::Insert { table, record } => {
                    let sql = build_insert_sql(table, record);
                    let mut q = sqlx::query(&sql);
                    for (_, value) in record.iter() {
                        q = bind_value(q, value);
                    }
                    let result = q.execute(&mut *tx).await?;
                    receipt.inserted_ids.push(result.last_insert_id() as i64);
                }
                StagedOp::Update { table, id, record } => {
                    let sql = build_update_sql(table, record);
                    let mut q = sqlx::query(&sql);
                    for (_, value) in record.iter() {
                        q = bind_value(q, value);
                    }
                    q = q.bind(*id);
                    let result = q.execute(&mut *tx).await?;
                    if result.rows_affected() == 0 {
                        return Err(AppError::not_found(format!(
                            "{} row {} does not exist",
                            table, id
                        )));
                    }
                }
                StagedOp::Delete { table, id } => {
                    let sql = format!("DELETE FROM {} WHERE id = ?", table);
                    let result = sqlx::query(&sql).bind(*id).execute(&mut *tx).await?;
                    if result.rows_affected() == 0 {
                        return Err(AppError::not_found(format!(
                            "{} row {} does not exist",
                            table, id
                        )));
                    }
                }
            }
        }

        tx.commit().await?;
        Ok(receipt)
    }
}

fn build_count_sql(query: &SelectQuery) -> String {
    format!(
        "SELECT COUNT(*) FROM {}{}",
        query.table,
        where_clause(query)
    )
}

fn build_select_sql(query: &SelectQuery) -> String {
    let columns = query
        .columns
        .iter()
        .map(|spec| spec.name)
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!("SELECT {} FROM {}", columns, query.table);
    sql.push_str(&where_clause(query));

    if let Some(order) = &query.order_by {
        sql.push_str(&format!(
            " ORDER BY {} {}",
            order.column,
            order.direction.sql()
        ));
    }

    // MySQL has no OFFSET without LIMIT; a skip on its own gets the
    // documented all-remaining-rows limit.
    match (query.skip, query.take) {
        (None, None) => {}
        (None, Some(take)) => sql.push_str(&format!(" LIMIT {}", take)),
        (Some(skip), Some(take)) => sql.push_str(&format!(" LIMIT {} OFFSET {}", take, skip)),
        (Some(skip), None) => {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", u64::MAX, skip));
        }
    }

    sql
}

fn where_clause(query: &SelectQuery) -> String {
    if query.filters.is_empty() {
        return String::new();
    }
    let predicates = query
        .filters
        .iter()
        .map(|f| format!("{} {} ?", f.column, f.op.sql()))
        .collect::<Vec<_>>()
        .join(" AND ");
    format!(" WHERE {}", predicates)
}

fn build_insert_sql(table: &str, record: &Record) -> String {
    let columns: Vec<&str> = record.iter().map(|(c, _)| c).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}

fn build_update_sql(table: &str, record: &Record) -> String {
    let assignments = record
        .iter()
        .map(|(c, _)| format!("{} = ?", c))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE {} SET {} WHERE id = ?", table, assignments)
}

fn bind_value<'q>(
    query: sqlx::query::Query<'q, MySql, MySqlArguments>,
    value: &Value,
) -> sqlx::query::Query<'q, MySql, MySqlArguments> {
    match value {
        Value::Int(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.clone()),
        Value::Decimal(v) => query.bind(*v),
        Value::Timestamp(v) => query.bind(*v),
    }
}

fn decode_row(row: &MySqlRow, columns: &[ColumnSpec]) -> Result<Record> {
    let mut record = Record::new();
    for spec in columns {
        let value = match spec.kind {
            ValueKind::Int => Value::Int(row.try_get::<i64, _>(spec.name)?),
            ValueKind::Float => Value::Float(row.try_get::<f64, _>(spec.name)?),
            ValueKind::Text => Value::Text(row.try_get::<String, _>(spec.name)?),
            ValueKind::Decimal => Value::Decimal(row.try_get(spec.name)?),
            ValueKind::Timestamp => Value::Timestamp(row.try_get(spec.name)?),
        };
        record.insert(spec.name, value);
    }
    Ok(record)
}
