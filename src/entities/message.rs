//! Message entity - Messaggio della chat giornaliera

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Messaggio del log giornaliero. Può provenire dall'utente autenticato
/// (`is_current_user = true`) oppure dal seeding sintetico delle identità mock.
/// L'intero log viene distrutto e ricreato al primo accesso di ogni nuova
/// giornata di calendario.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub message: String,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    // stringa ISO 8601 lato store, DateTime<Utc> in memoria: la conversione
    // la fa serde con la feature chrono/serde
    pub timestamp: DateTime<Utc>,
    pub is_current_user: bool,
}
