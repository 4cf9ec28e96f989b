//! SessionRepository - Il record dell'utente corrente
//!
//! Non è un ledger: un solo record sotto `companion_session`, creato al
//! sign-in, sovrascritto da un sign-in successivo e rimosso al sign-out.

use super::KvStore;
use crate::entities::User;

pub const SESSION_KEY: &str = "companion_session";

#[derive(Clone)]
pub struct SessionRepository {
    store: KvStore,
}

impl SessionRepository {
    pub fn new(store: KvStore) -> SessionRepository {
        Self { store }
    }

    /// L'utente autenticato, se presente.
    pub async fn current(&self) -> Result<Option<User>, sqlx::Error> {
        self.store.read_json(SESSION_KEY).await
    }

    /// Scrive il record di sessione (sovrascrive quello precedente).
    pub async fn set(&self, user: &User) -> Result<(), sqlx::Error> {
        self.store.write_json(SESSION_KEY, user).await
    }

    /// Cancella il record di sessione: torna anonimo.
    pub async fn clear(&self) -> Result<(), sqlx::Error> {
        self.store.remove(SESSION_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::SqlitePool;

    #[sqlx::test]
    async fn session_lifecycle(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = SessionRepository::new(KvStore::new(pool));
        assert!(repo.current().await?.is_none());

        let user = User {
            id: "1".to_string(),
            email: "wolverine@umich.edu".to_string(),
            created_at: Utc::now(),
            last_sign_in_at: Utc::now(),
        };
        repo.set(&user).await?;
        assert_eq!(repo.current().await?, Some(user));

        repo.clear().await?;
        assert!(repo.current().await?.is_none());
        Ok(())
    }
}
