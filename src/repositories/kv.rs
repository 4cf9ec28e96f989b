//! KvStore - Lo store chiave-valore locale
//!
//! L'equivalente su disco dello storage del dispositivo: una sola tabella
//! `kv (key TEXT PRIMARY KEY, value TEXT)` su SQLite. Le tre operazioni
//! del collaboratore esterno sono `get`, `set`, `remove`; sopra ci sono
//! due helper tipizzati che fanno il giro JSON con serde.

use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use tracing::warn;

#[derive(Clone)]
pub struct KvStore {
    pool: SqlitePool,
}

impl KvStore {
    pub fn new(pool: SqlitePool) -> KvStore {
        Self { pool }
    }

    /// Legge il testo JSON memorizzato sotto `key`, se presente.
    pub async fn get(&self, key: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
    }

    /// Scrive (o sovrascrive) il testo JSON sotto `key`.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Rimuove la chiave. Nessun errore se la chiave non esiste.
    pub async fn remove(&self, key: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Legge e deserializza il record sotto `key`.
    ///
    /// Un record corrotto viene trattato come assente: il ledger riparte dal
    /// default e la prossima scrittura lo rimpiazza (last-write-wins).
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, sqlx::Error> {
        let Some(raw) = self.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding corrupted record under key {}: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Serializza e scrive il record sotto `key`.
    pub async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), sqlx::Error> {
        let raw = serde_json::to_string(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        self.set(key, &raw).await
    }
}
