//! Common ledger trait
//!
//! A ledger is a keyed collection persisted as a single serialized record in
//! the key-value store. This trait gives every repository the same two-step
//! access pattern: load the whole record (or its default when absent or
//! corrupted), mutate it in memory, persist it back.

use super::KvStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait for repositories whose state is one JSON record under a fixed key.
///
/// # Associated items
/// * `Table` - In-memory shape of the record (map or list of entities)
/// * `KEY` - Fixed store key the record lives under
pub trait Ledger {
    type Table: Default + Serialize + DeserializeOwned + Send;

    const KEY: &'static str;

    fn store(&self) -> &KvStore;

    /// Loads the full record, falling back to `Table::default()` when the key
    /// is absent.
    ///
    /// # Returns
    /// * `Ok(Table)` - Stored record, or the default
    /// * `Err(sqlx::Error)` - Error while reading the store
    async fn load(&self) -> Result<Self::Table, sqlx::Error> {
        Ok(self
            .store()
            .read_json::<Self::Table>(Self::KEY)
            .await?
            .unwrap_or_default())
    }

    /// Persists the full record, replacing whatever was stored before.
    ///
    /// # Returns
    /// * `Ok(())` - Record written
    /// * `Err(sqlx::Error)` - Error while writing the store
    async fn persist(&self, table: &Self::Table) -> Result<(), sqlx::Error> {
        self.store().write_json(Self::KEY, table).await
    }
}
