//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, il documento menu, la sorgente di casualità
//! condivisa e i parametri di simulazione della demo.

use crate::entities::MenuDocument;
use crate::repositories::{
    ChatRepository, FavoritesRepository, KvStore, LikesRepository, SessionRepository,
};
use crate::watch::SessionWatcher;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::SqlitePool;
use std::time::Duration;
use tokio::sync::Mutex;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Ledger dei piatti preferiti
    pub favorites: FavoritesRepository,

    /// Log della chat giornaliera
    pub chat: ChatRepository,

    /// Ledger dei like per messaggio
    pub likes: LikesRepository,

    /// Record dell'utente corrente
    pub session: SessionRepository,

    /// Notificatore a polling dei cambi di sessione
    pub watch: SessionWatcher,

    /// Documento menu caricato all'avvio
    pub menu: MenuDocument,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Sorgente di casualità per il seeding sintetico. Mutex async: i metodi
    /// dei repository la tengono attraverso gli await dello store.
    pub rng: Mutex<StdRng>,

    /// Ritardo simulato della rete al sign-in
    pub sign_in_delay: Duration,

    /// Finestra (min, max) in secondi della risposta sintetica ritardata
    pub reply_delay_secs: (u64, u64),
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// sullo stesso store chiave-valore.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite dello store locale
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    /// * `menu` - Documento menu da servire
    pub fn new(pool: SqlitePool, jwt_secret: String, menu: MenuDocument) -> Self {
        let store = KvStore::new(pool);
        let session = SessionRepository::new(store.clone());
        Self {
            favorites: FavoritesRepository::new(store.clone()),
            chat: ChatRepository::new(store.clone()),
            likes: LikesRepository::new(store),
            watch: SessionWatcher::new(session.clone(), Duration::from_millis(1000)),
            session,
            menu,
            jwt_secret,
            rng: Mutex::new(StdRng::from_os_rng()),
            sign_in_delay: Duration::from_millis(1000),
            reply_delay_secs: (10, 40),
        }
    }

    /// Sostituisce il ritardo simulato del sign-in (i test usano zero).
    pub fn with_sign_in_delay(mut self, delay: Duration) -> Self {
        self.sign_in_delay = delay;
        self
    }

    /// Sostituisce la finestra della risposta sintetica ritardata.
    pub fn with_reply_delay_secs(mut self, min: u64, max: u64) -> Self {
        self.reply_delay_secs = (min, max);
        self
    }

    /// Sostituisce la cadenza di polling del watcher di sessione.
    pub fn with_session_poll_interval(mut self, interval: Duration) -> Self {
        self.watch = SessionWatcher::new(self.session.clone(), interval);
        self
    }
}
