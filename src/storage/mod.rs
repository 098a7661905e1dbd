//! Storage seam for request journaling.
//!
//! The relay only ever calls [`Storage::insert`]. The SQLite helper in
//! [`sqlite`] implements it along with the rest of a small parameterized
//! CRUD surface.

#[cfg(feature = "sqlite")]
pub mod sqlite;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::StorageError;

/// Column name → value. Ordered so generated SQL is stable.
pub type Fields = BTreeMap<String, String>;

/// Anything that can persist a row.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert `fields` into `table`, committing before returning. Returns the
    /// assigned row id.
    async fn insert(&self, table: &str, fields: &Fields) -> Result<i64, StorageError>;
}
