//! LikesRepository - Ledger dei like per messaggio
//!
//! Mappa message_id -> LikeRecord sotto `companion_message_likes`. I record
//! nascono pigramente (seed casuale per i messaggi che non ne hanno) e non
//! vengono mai cancellati, nemmeno quando il messaggio sparisce col rollover.

use super::traits::Ledger;
use super::KvStore;
use crate::entities::{ChatMessage, LikeRecord, MOCK_IDENTITIES, MockIdentity};
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

pub const LIKES_KEY: &str = "companion_message_likes";

pub type LikesTable = HashMap<String, LikeRecord>;

#[derive(Clone)]
pub struct LikesRepository {
    store: KvStore,
}

impl LikesRepository {
    pub fn new(store: KvStore) -> LikesRepository {
        Self { store }
    }

    /// L'intera tabella dei like.
    pub async fn all(&self) -> Result<LikesTable, sqlx::Error> {
        self.load().await
    }

    /// Il record di un singolo messaggio, zero se non esiste.
    pub async fn for_message(&self, message_id: &str) -> Result<LikeRecord, sqlx::Error> {
        let mut table = self.load().await?;
        Ok(table.remove(message_id).unwrap_or_default())
    }

    /// Inverte l'appartenenza dell'utente all'insieme dei liker del messaggio,
    /// aggiornando il contatore di conseguenza (mai sotto zero).
    ///
    /// # Returns
    /// * `Ok((liked, count))` - lo stato risultante e il nuovo contatore
    pub async fn toggle(&self, message_id: &str, user_id: &str) -> Result<(bool, u32), sqlx::Error> {
        let mut table = self.load().await?;
        let record = table.entry(message_id.to_string()).or_default();

        let liked = if record.is_liked_by(user_id) {
            record.liked_by.retain(|id| id != user_id);
            record.count = record.count.saturating_sub(1);
            false
        } else {
            record.liked_by.push(user_id.to_string());
            record.count += 1;
            true
        };
        let count = record.count;

        self.persist(&table).await?;
        Ok((liked, count))
    }

    /// Crea un record iniziale per ogni messaggio che non ne ha: contatore
    /// casuale in [0, 7] e un sottoinsieme di identità mock distinte della
    /// stessa dimensione. Persiste in un'unica scrittura, e solo se qualcosa
    /// è stato aggiunto.
    pub async fn seed_missing<R: Rng>(
        &self,
        messages: &[ChatMessage],
        rng: &mut R,
    ) -> Result<LikesTable, sqlx::Error> {
        let mut table = self.load().await?;
        let mut updated = false;

        for message in messages {
            if table.contains_key(&message.id) {
                continue;
            }

            let target = rng.random_range(0..8usize);
            let mut available: Vec<&MockIdentity> = MOCK_IDENTITIES.iter().collect();
            let mut liked_by = Vec::with_capacity(target);
            for _ in 0..target {
                if available.is_empty() {
                    break;
                }
                let index = rng.random_range(0..available.len());
                liked_by.push(available.swap_remove(index).id.to_string());
            }

            // il contatore segue l'insieme, anche quando il pool si esaurisce
            let count = liked_by.len() as u32;
            table.insert(message.id.clone(), LikeRecord { count, liked_by });
            updated = true;
        }

        if updated {
            debug!("Seeded like records for new messages");
            self.persist(&table).await?;
        }
        Ok(table)
    }
}

impl Ledger for LikesRepository {
    type Table = LikesTable;

    const KEY: &'static str = LIKES_KEY;

    fn store(&self) -> &KvStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sqlx::SqlitePool;

    fn message(id: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            message: "hello".to_string(),
            user_id: "u1".to_string(),
            user_email: "u1@umich.edu".to_string(),
            user_name: "u1".to_string(),
            timestamp: Utc::now(),
            is_current_user: true,
        }
    }

    #[sqlx::test]
    async fn count_always_matches_liker_set(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = LikesRepository::new(KvStore::new(pool));

        let (liked, count) = repo.toggle("m1", "u1").await?;
        assert!(liked);
        assert_eq!(count, 1);

        repo.toggle("m1", "u2").await?;
        repo.toggle("m1", "u3").await?;
        repo.toggle("m1", "u2").await?; // u2 ci ripensa

        let record = repo.for_message("m1").await?;
        assert_eq!(record.count, 2);
        assert_eq!(record.count as usize, record.liked_by.len());
        assert!(record.is_liked_by("u1"));
        assert!(!record.is_liked_by("u2"));
        Ok(())
    }

    #[sqlx::test]
    async fn unliking_never_goes_negative(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = LikesRepository::new(KvStore::new(pool));

        repo.toggle("m1", "u1").await?;
        let (liked, count) = repo.toggle("m1", "u1").await?;
        assert!(!liked);
        assert_eq!(count, 0);

        // il record resta, a zero, anche dopo l'ultimo unlike
        let record = repo.for_message("m1").await?;
        assert_eq!(record.count, 0);
        assert!(record.liked_by.is_empty());
        Ok(())
    }

    #[sqlx::test]
    async fn seeding_only_touches_missing_records(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = LikesRepository::new(KvStore::new(pool));
        let mut rng = StdRng::seed_from_u64(42);

        repo.toggle("m1", "u1").await?;

        let table = repo
            .seed_missing(&[message("m1"), message("m2"), message("m3")], &mut rng)
            .await?;

        // il record esistente non viene toccato
        assert_eq!(table.get("m1").map(|r| r.count), Some(1));

        for id in ["m2", "m3"] {
            let record = table.get(id).expect("seeded record");
            assert!(record.count <= 7);
            assert_eq!(record.count as usize, record.liked_by.len());

            // liker tutti distinti e presi dal pool mock
            let mut likers = record.liked_by.clone();
            likers.sort();
            likers.dedup();
            assert_eq!(likers.len(), record.liked_by.len());
            assert!(
                record
                    .liked_by
                    .iter()
                    .all(|id| MOCK_IDENTITIES.iter().any(|mock| mock.id == id))
            );
        }
        Ok(())
    }
}
