//! ChatRepository - Il log della chat giornaliera
//!
//! Un solo log condiviso sotto `companion_chat`, azzerato una volta per
//! giornata di calendario: la chiave `companion_chat_date` ricorda la data
//! (locale al dispositivo, nessuna normalizzazione di timezone) dell'ultimo
//! seeding. Al primo accesso di un giorno nuovo il log precedente viene
//! scartato e rimpiazzato da 3-7 messaggi sintetici del pool mock.

use super::traits::Ledger;
use super::KvStore;
use crate::entities::{ChatMessage, MOCK_IDENTITIES, MockIdentity};
use chrono::{Duration, Local, Utc};
use rand::Rng;
use tracing::{debug, info};

pub const CHAT_KEY: &str = "companion_chat";
pub const CHAT_DATE_KEY: &str = "companion_chat_date";

/// Frasi campione per i messaggi sintetici.
pub const SAMPLE_PHRASES: [&str; 10] = [
    "The food at Markley is amazing today! 🍽️",
    "Anyone know what time North Quad closes?",
    "The pizza at South Quad is really good right now",
    "Bursley has fresh sushi today! 🍣",
    "The salad bar at East Quad looks great",
    "Hill dining hall has the best desserts",
    "Just tried the new sandwich at West Quad - highly recommend!",
    "The stir fry at Mosher-Jordan is perfect today",
    "Oxford has really good pasta today 🍝",
    "The grill station at Stockwell is on point!",
];

/// Quanti messaggi in coda vengono confrontati per evitare frasi duplicate.
const DUPLICATE_WINDOW: usize = 5;

const TWELVE_HOURS_MS: i64 = 12 * 60 * 60 * 1000;

#[derive(Clone)]
pub struct ChatRepository {
    store: KvStore,
}

impl ChatRepository {
    pub fn new(store: KvStore) -> ChatRepository {
        Self { store }
    }

    /// La stringa-data usata come marcatore di rollover (calendario locale).
    pub fn today_string() -> String {
        Local::now().date_naive().to_string()
    }

    /// Legge il log per la giornata indicata.
    ///
    /// Se il marcatore memorizzato non coincide con `today` il log precedente
    /// viene scartato, ne viene seminato uno nuovo e il marcatore avanza.
    /// Il seeding avviene una sola volta per giornata, mai parzialmente.
    pub async fn read_for_date<R: Rng>(
        &self,
        today: &str,
        rng: &mut R,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let last_reset: Option<String> = self.store.read_json(CHAT_DATE_KEY).await?;
        if last_reset.as_deref() != Some(today) {
            info!("Chat day rollover, reseeding log for {}", today);
            return self.seed_for_date(today, rng).await;
        }

        self.load().await
    }

    /// Il marcatore dell'ultimo seeding, se presente.
    pub async fn last_reset_date(&self) -> Result<Option<String>, sqlx::Error> {
        self.store.read_json(CHAT_DATE_KEY).await
    }

    /// Appende un messaggio al log memorizzato, qualunque esso sia al momento
    /// della scrittura (last-write-wins rispetto a un rollover concorrente).
    pub async fn append(&self, message: ChatMessage) -> Result<(), sqlx::Error> {
        let mut messages = self.load().await?;
        messages.push(message);
        self.persist(&messages).await
    }

    /// Appende la risposta sintetica ritardata, saltandola se la frase duplica
    /// uno degli ultimi messaggi.
    ///
    /// # Returns
    /// * `Ok(true)` - messaggio inserito
    /// * `Ok(false)` - frase duplicata, inserimento saltato
    pub async fn append_synthetic(
        &self,
        identity: &MockIdentity,
        phrase: &str,
        nonce: u32,
    ) -> Result<bool, sqlx::Error> {
        let mut messages = self.load().await?;

        let is_duplicate = messages
            .iter()
            .rev()
            .take(DUPLICATE_WINDOW)
            .any(|msg| msg.message == phrase);
        if is_duplicate {
            debug!("Skipping synthetic reply, phrase duplicates a recent message");
            return Ok(false);
        }

        let now = Utc::now();
        messages.push(ChatMessage {
            id: format!("mock_{}_{}", now.timestamp_millis(), nonce),
            message: phrase.to_string(),
            user_id: identity.id.to_string(),
            user_email: identity.email.to_string(),
            user_name: identity.name.to_string(),
            timestamp: now,
            is_current_user: false,
        });
        self.persist(&messages).await?;
        Ok(true)
    }

    /// Rimuove il messaggio solo se id e autore coincidono entrambi con la
    /// richiesta. In ogni altro caso il log resta invariato: no-op idempotente.
    pub async fn delete(&self, message_id: &str, user_id: &str) -> Result<(), sqlx::Error> {
        let mut messages = self.load().await?;
        let before = messages.len();
        messages.retain(|msg| !(msg.id == message_id && msg.user_id == user_id));

        if messages.len() != before {
            debug!("Deleted message {} for user {}", message_id, user_id);
            self.persist(&messages).await?;
        }
        Ok(())
    }

    /// Semina il log di una giornata nuova: 3-7 messaggi dal pool mock con
    /// timestamp casuali nelle ultime 12 ore, ordinati per timestamp crescente.
    async fn seed_for_date<R: Rng>(
        &self,
        today: &str,
        rng: &mut R,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let count = rng.random_range(3..=7);
        let now = Utc::now();

        let mut messages = Vec::with_capacity(count);
        for i in 0..count {
            let identity = &MOCK_IDENTITIES[rng.random_range(0..MOCK_IDENTITIES.len())];
            let phrase = SAMPLE_PHRASES[rng.random_range(0..SAMPLE_PHRASES.len())];
            let offset = Duration::milliseconds(rng.random_range(0..TWELVE_HOURS_MS));

            messages.push(ChatMessage {
                id: format!("mock_{}_{}", now.timestamp_millis(), i),
                message: phrase.to_string(),
                user_id: identity.id.to_string(),
                user_email: identity.email.to_string(),
                user_name: identity.name.to_string(),
                timestamp: now - offset,
                is_current_user: false,
            });
        }
        messages.sort_by_key(|msg| msg.timestamp);

        self.persist(&messages).await?;
        self.store.write_json(CHAT_DATE_KEY, today).await?;
        Ok(messages)
    }
}

impl Ledger for ChatRepository {
    type Table = Vec<ChatMessage>;

    const KEY: &'static str = CHAT_KEY;

    fn store(&self) -> &KvStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sqlx::SqlitePool;

    fn current_user_message(id: &str, user_id: &str, text: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            message: text.to_string(),
            user_id: user_id.to_string(),
            user_email: format!("{}@umich.edu", user_id),
            user_name: user_id.to_string(),
            timestamp: Utc::now(),
            is_current_user: true,
        }
    }

    #[sqlx::test]
    async fn seed_happens_once_per_day(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = ChatRepository::new(KvStore::new(pool));
        let mut rng = StdRng::seed_from_u64(7);

        let seeded = repo.read_for_date("2025-09-12", &mut rng).await?;
        assert!((3..=7).contains(&seeded.len()));
        assert!(seeded.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(seeded.iter().all(|msg| !msg.is_current_user));

        // stessa giornata: stesso log, stessi id, stesso ordine
        let again = repo.read_for_date("2025-09-12", &mut rng).await?;
        let ids: Vec<&str> = seeded.iter().map(|m| m.id.as_str()).collect();
        let ids_again: Vec<&str> = again.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ids_again);
        assert_eq!(repo.last_reset_date().await?.as_deref(), Some("2025-09-12"));
        Ok(())
    }

    #[sqlx::test]
    async fn rollover_discards_log_and_advances_marker(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = ChatRepository::new(KvStore::new(pool));
        let mut rng = StdRng::seed_from_u64(7);

        repo.read_for_date("2025-09-12", &mut rng).await?;
        repo.append(current_user_message("u1_1", "u1", "see you at lunch"))
            .await?;

        let next_day = repo.read_for_date("2025-09-13", &mut rng).await?;
        assert!(next_day.iter().all(|msg| msg.id != "u1_1"));
        assert!(next_day.iter().all(|msg| !msg.is_current_user));
        assert_eq!(repo.last_reset_date().await?.as_deref(), Some("2025-09-13"));
        Ok(())
    }

    #[sqlx::test]
    async fn delete_requires_matching_author(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = ChatRepository::new(KvStore::new(pool));
        let mut rng = StdRng::seed_from_u64(7);

        repo.read_for_date("2025-09-12", &mut rng).await?;
        repo.append(current_user_message("u1_1", "u1", "hello")).await?;
        let before = repo.load().await?;

        // autore diverso: il log resta invariato
        repo.delete("u1_1", "u2").await?;
        assert_eq!(repo.load().await?.len(), before.len());

        // id inesistente: no-op idempotente
        repo.delete("nope", "u1").await?;
        assert_eq!(repo.load().await?.len(), before.len());

        repo.delete("u1_1", "u1").await?;
        assert_eq!(repo.load().await?.len(), before.len() - 1);
        Ok(())
    }

    #[sqlx::test]
    async fn synthetic_reply_skips_recent_duplicates(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = ChatRepository::new(KvStore::new(pool));
        let identity = &MOCK_IDENTITIES[0];

        repo.append(current_user_message("u1_1", "u1", SAMPLE_PHRASES[0]))
            .await?;
        assert!(!repo.append_synthetic(identity, SAMPLE_PHRASES[0], 0).await?);
        assert_eq!(repo.load().await?.len(), 1);

        assert!(repo.append_synthetic(identity, SAMPLE_PHRASES[1], 1).await?);
        let log = repo.load().await?;
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|m| m.user_id.as_str()), Some("1"));
        Ok(())
    }
}
