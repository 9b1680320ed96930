//! Postgres implementation of [`OrderLookup`].
//!
//! Every orderable table stores its position in a `sort_order` column. The
//! lookup runs on a borrowed connection so it can share the caller's
//! transaction (and the parent-row lock taken there).

use educa_core::ordering::{LookupError, Order, OrderLookup, OrderScope, ScopeValue};
use sqlx::PgConnection;

/// Column holding the position on every orderable table.
pub const ORDER_COLUMN: &str = "sort_order";

/// SQLSTATE `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

/// Finds the largest `sort_order` in a scope on a borrowed connection.
pub struct PgOrderLookup<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgOrderLookup<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

/// Build the `MAX(sort_order)` query for a table and scope.
///
/// NULL scope values become `IS NULL` tests and take no bind slot, so
/// placeholders are numbered over the non-NULL values only.
pub(crate) fn max_order_sql(table: &str, scope: &OrderScope) -> String {
    let mut sql = format!("SELECT MAX({ORDER_COLUMN}) FROM {table}");
    let mut param = 0;
    for (i, (field, value)) in scope.fields().iter().enumerate() {
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        match value {
            ScopeValue::Null => sql.push_str(&format!("{field} IS NULL")),
            ScopeValue::Int(_) | ScopeValue::Text(_) => {
                param += 1;
                sql.push_str(&format!("{field} = ${param}"));
            }
        }
    }
    sql
}

impl OrderLookup for PgOrderLookup<'_> {
    type Error = sqlx::Error;

    async fn find_max_order(
        &mut self,
        record_type: &'static str,
        scope: &OrderScope,
    ) -> Result<Option<Order>, LookupError<sqlx::Error>> {
        let sql = max_order_sql(record_type, scope);

        let mut query = sqlx::query_scalar::<_, Option<Order>>(&sql);
        for (_, value) in scope.fields() {
            query = match value {
                ScopeValue::Int(v) => query.bind(*v),
                ScopeValue::Text(v) => query.bind(v.clone()),
                ScopeValue::Null => query,
            };
        }

        match query.fetch_one(&mut *self.conn).await {
            Ok(max) => Ok(max),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNDEFINED_TABLE) =>
            {
                tracing::warn!(table = record_type, "Orderable table missing, starting at 0");
                Err(LookupError::Unprovisioned(record_type))
            }
            Err(err) => Err(LookupError::Store(err)),
        }
    }
}

/// Lock the parent row a scope hangs off so concurrent appends serialize.
///
/// Returns [`sqlx::Error::RowNotFound`] when the parent does not exist.
pub(crate) async fn lock_parent(
    conn: &mut PgConnection,
    table: &'static str,
    id: educa_core::types::DbId,
) -> Result<(), sqlx::Error> {
    let query = format!("SELECT id FROM {table} WHERE id = $1 FOR UPDATE");
    sqlx::query_scalar::<_, educa_core::types::DbId>(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .map(|_| ())
        .ok_or(sqlx::Error::RowNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscoped_query_has_no_where() {
        assert_eq!(
            max_order_sql("modules", &OrderScope::unscoped()),
            "SELECT MAX(sort_order) FROM modules"
        );
    }

    #[test]
    fn scoped_query_numbers_placeholders() {
        let scope = OrderScope::unscoped()
            .with("course_id", 1_i64)
            .with("kind", "text");
        assert_eq!(
            max_order_sql("contents", &scope),
            "SELECT MAX(sort_order) FROM contents WHERE course_id = $1 AND kind = $2"
        );
    }

    #[test]
    fn null_values_use_is_null_without_a_slot() {
        let scope = OrderScope::unscoped()
            .with("category", Option::<String>::None)
            .with("course_id", 7_i64);
        assert_eq!(
            max_order_sql("probes", &scope),
            "SELECT MAX(sort_order) FROM probes WHERE category IS NULL AND course_id = $1"
        );
    }
}
