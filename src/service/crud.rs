//! Generic CRUD execution against MySQL.

use crate::error::ApiError;
use crate::registry::TableDescriptor;
use crate::sql::{self, MySqlBindValue, QueryBuf};
use serde_json::{Map, Value};
use sqlx::mysql::{MySqlQueryResult, MySqlRow};
use sqlx::{Connection, MySqlConnection};

pub struct CrudService;

impl CrudService {
    /// Fetch the whole table as JSON rows.
    pub async fn list(
        conn: &mut MySqlConnection,
        table: &TableDescriptor,
    ) -> Result<Vec<Value>, ApiError> {
        let q = sql::select_all(table);
        Self::fetch_all(conn, &q)
            .await
            .map_err(|e| ApiError::query(format!("Failed to fetch {}", table.name), e))
    }

    /// Fetch one row by primary key. Returns None when no row matches.
    pub async fn read(
        conn: &mut MySqlConnection,
        table: &TableDescriptor,
        id: i64,
    ) -> Result<Option<Value>, ApiError> {
        let q = sql::select_by_id(table, id);
        Self::fetch_optional(conn, &q)
            .await
            .map_err(|e| ApiError::query(format!("Failed to fetch {} with id {}", table.name, id), e))
    }

    /// Insert one row and commit. Returns the auto-generated id.
    pub async fn create(
        conn: &mut MySqlConnection,
        table: &TableDescriptor,
        body: &Map<String, Value>,
    ) -> Result<u64, ApiError> {
        let q = sql::insert(table, body);
        let context = || format!("Failed to create {}", table.name);
        let mut tx = conn.begin().await.map_err(|e| ApiError::query(context(), e))?;
        let result = Self::execute(&mut tx, &q)
            .await
            .map_err(|e| ApiError::query(context(), e))?;
        tx.commit().await.map_err(|e| ApiError::query(context(), e))?;
        let id = result.last_insert_id();
        tracing::info!(table = table.name, id, "record created");
        Ok(id)
    }

    /// Update one row by primary key and commit. Returns None when the body
    /// holds no writable field (nothing is executed), otherwise the affected
    /// row count. MySQL reports changed rows here, not matched rows, so an
    /// update that rewrites identical values counts as zero.
    pub async fn update(
        conn: &mut MySqlConnection,
        table: &TableDescriptor,
        id: i64,
        body: &Map<String, Value>,
    ) -> Result<Option<u64>, ApiError> {
        let Some(q) = sql::update(table, id, body) else {
            return Ok(None);
        };
        let context = || format!("Failed to update {}", table.name);
        let mut tx = conn.begin().await.map_err(|e| ApiError::query(context(), e))?;
        let result = Self::execute(&mut tx, &q)
            .await
            .map_err(|e| ApiError::query(context(), e))?;
        tx.commit().await.map_err(|e| ApiError::query(context(), e))?;
        if result.rows_affected() > 0 {
            tracing::info!(table = table.name, id, "record updated");
        }
        Ok(Some(result.rows_affected()))
    }

    /// Delete one row by primary key and commit. Returns the affected row count.
    pub async fn delete(
        conn: &mut MySqlConnection,
        table: &TableDescriptor,
        id: i64,
    ) -> Result<u64, ApiError> {
        let q = sql::delete(table, id);
        let context = || format!("Failed to delete {}", table.name);
        let mut tx = conn.begin().await.map_err(|e| ApiError::query(context(), e))?;
        let result = Self::execute(&mut tx, &q)
            .await
            .map_err(|e| ApiError::query(context(), e))?;
        tx.commit().await.map_err(|e| ApiError::query(context(), e))?;
        if result.rows_affected() > 0 {
            tracing::info!(table = table.name, id, "record deleted");
        }
        Ok(result.rows_affected())
    }

    async fn fetch_all(conn: &mut MySqlConnection, q: &QueryBuf) -> Result<Vec<Value>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(MySqlBindValue::from_json(p));
        }
        let rows = query.fetch_all(&mut *conn).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn fetch_optional(
        conn: &mut MySqlConnection,
        q: &QueryBuf,
    ) -> Result<Option<Value>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(MySqlBindValue::from_json(p));
        }
        let row = query.fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(row_to_json))
    }

    async fn execute(
        conn: &mut MySqlConnection,
        q: &QueryBuf,
    ) -> Result<MySqlQueryResult, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(MySqlBindValue::from_json(p));
        }
        query.execute(&mut *conn).await
    }
}

fn row_to_json(row: &MySqlRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &MySqlRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<u64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}
