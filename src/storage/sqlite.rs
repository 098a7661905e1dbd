//! SQLite storage helper over `sqlx`.
//!
//! A thin parameterized SQL builder, not an ORM: every value is bound as a
//! parameter, and table/column names (which SQL cannot bind) are validated
//! and quoted. Each statement runs on its own and is committed when the call
//! returns.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};

use super::{Fields, Storage};
use crate::domain::market::PRICES_TABLE;
use crate::domain::request::REQUESTS_TABLE;
use crate::error::StorageError;

/// Column layout of the request journal.
const REQUESTS_LAYOUT: [(&str, &str); 3] = [
    ("id", "integer primary key"),
    ("type", "text not null"),
    ("time", "text not null"),
];

/// Column layout of the price history. `price` is TEXT so the decimal's
/// digits and scale come back exactly as written.
const PRICES_LAYOUT: [(&str, &str); 4] = [
    ("id", "integer primary key"),
    ("asset", "text not null"),
    ("price", "text not null"),
    ("time", "text not null"),
];

/// Ordering for [`SqliteStore::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A value read back from SQLite, by storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

/// One selected row: column name → value.
pub type Record = std::collections::BTreeMap<String, SqlValue>;

/// SQLite-backed [`Storage`] with create/insert/select/update/delete helpers.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) a database from a `sqlite:` URL.
    pub async fn open(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        Self::connect(options).await
    }

    /// Open (creating if missing) a database file.
    pub async fn open_path(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options).await
    }

    /// A private in-memory database, gone when the store is dropped.
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::open("sqlite::memory:").await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self, StorageError> {
        // One long-lived connection: an in-memory database lives and dies with
        // its connection, and a single writer keeps inserts strictly ordered.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create the `requests` and `prices` tables if they do not exist.
    pub async fn bootstrap(&self) -> Result<(), StorageError> {
        self.create_table(REQUESTS_TABLE, &REQUESTS_LAYOUT).await?;
        self.create_table(PRICES_TABLE, &PRICES_LAYOUT).await
    }

    /// `CREATE TABLE IF NOT EXISTS`. Column definitions are trusted SQL
    /// fragments (`"text not null"`); only the names are validated.
    pub async fn create_table(
        &self,
        name: &str,
        layout: &[(&str, &str)],
    ) -> Result<(), StorageError> {
        if layout.is_empty() {
            return Err(StorageError::Empty("create_table"));
        }
        let columns = layout
            .iter()
            .map(|(column, definition)| Ok(format!("{} {definition}", quote(column)?)))
            .collect::<Result<Vec<_>, StorageError>>()?;
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote(name)?,
            columns.join(", ")
        );

        sqlx::query(&sql).execute(&self.pool).await?;
        tracing::debug!(table = name, "Table ready");
        Ok(())
    }

    /// Insert one row and return its row id.
    pub async fn insert(&self, table: &str, fields: &Fields) -> Result<i64, StorageError> {
        if fields.is_empty() {
            return Err(StorageError::Empty("insert"));
        }
        let columns = fields
            .keys()
            .map(|column| quote(column))
            .collect::<Result<Vec<_>, _>>()?;
        let placeholders = vec!["?"; fields.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            quote(table)?,
            columns.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for value in fields.values() {
            query = query.bind(value.as_str());
        }
        let id = query.execute(&self.pool).await?.last_insert_rowid();
        tracing::debug!(table, id, "Row inserted");
        Ok(id)
    }

    /// `SELECT` with a column list (empty selects `*`), `AND`-ed equality
    /// criteria, ordering and row limit.
    pub async fn select(
        &self,
        table: &str,
        columns: &[&str],
        criteria: &Fields,
        order: &[(&str, SortOrder)],
        limit: Option<u32>,
    ) -> Result<Vec<Record>, StorageError> {
        let projection = if columns.is_empty() {
            "*".to_string()
        } else {
            columns
                .iter()
                .map(|column| quote(column))
                .collect::<Result<Vec<_>, _>>()?
                .join(", ")
        };
        let mut sql = format!("SELECT {projection} FROM {}", quote(table)?);
        sql.push_str(&where_clause(criteria)?);
        if !order.is_empty() {
            let terms = order
                .iter()
                .map(|(column, direction)| Ok(format!("{} {}", quote(column)?, direction.as_sql())))
                .collect::<Result<Vec<_>, StorageError>>()?;
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut query = sqlx::query(&sql);
        for value in criteria.values() {
            query = query.bind(value.as_str());
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    /// Update rows matching `criteria`; returns the number changed.
    /// Empty criteria are rejected rather than touching every row.
    pub async fn update(
        &self,
        table: &str,
        content: &Fields,
        criteria: &Fields,
    ) -> Result<u64, StorageError> {
        if content.is_empty() {
            return Err(StorageError::Empty("update"));
        }
        if criteria.is_empty() {
            return Err(StorageError::Empty("update criteria"));
        }
        let assignments = content
            .keys()
            .map(|column| Ok(format!("{} = ?", quote(column)?)))
            .collect::<Result<Vec<_>, StorageError>>()?;
        let sql = format!(
            "UPDATE {} SET {}{}",
            quote(table)?,
            assignments.join(", "),
            where_clause(criteria)?
        );

        let mut query = sqlx::query(&sql);
        for value in content.values().chain(criteria.values()) {
            query = query.bind(value.as_str());
        }
        let changed = query.execute(&self.pool).await?.rows_affected();
        tracing::debug!(table, changed, "Rows updated");
        Ok(changed)
    }

    /// Delete rows matching `criteria`; returns the number removed.
    /// Empty criteria are rejected rather than emptying the table.
    pub async fn delete(&self, table: &str, criteria: &Fields) -> Result<u64, StorageError> {
        if criteria.is_empty() {
            return Err(StorageError::Empty("delete criteria"));
        }
        let sql = format!("DELETE FROM {}{}", quote(table)?, where_clause(criteria)?);

        let mut query = sqlx::query(&sql);
        for value in criteria.values() {
            query = query.bind(value.as_str());
        }
        let removed = query.execute(&self.pool).await?.rows_affected();
        tracing::debug!(table, removed, "Rows deleted");
        Ok(removed)
    }
}

#[async_trait]
impl Storage for SqliteStore {
    async fn insert(&self, table: &str, fields: &Fields) -> Result<i64, StorageError> {
        SqliteStore::insert(self, table, fields).await
    }
}

/// Accept `[A-Za-z_][A-Za-z0-9_]*` and wrap it in double quotes.
fn quote(name: &str) -> Result<String, StorageError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(format!("\"{name}\""))
    } else {
        Err(StorageError::InvalidIdentifier(name.to_string()))
    }
}

fn where_clause(criteria: &Fields) -> Result<String, StorageError> {
    if criteria.is_empty() {
        return Ok(String::new());
    }
    let terms = criteria
        .keys()
        .map(|column| Ok(format!("{} = ?", quote(column)?)))
        .collect::<Result<Vec<_>, StorageError>>()?;
    Ok(format!(" WHERE {}", terms.join(" AND ")))
}

fn decode_row(row: &SqliteRow) -> Result<Record, StorageError> {
    let mut record = Record::new();
    for (index, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => SqlValue::Integer(row.try_get(index)?),
                "REAL" => SqlValue::Real(row.try_get(index)?),
                "BLOB" => SqlValue::Blob(row.try_get(index)?),
                _ => SqlValue::Text(row.try_get(index)?),
            }
        };
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}
