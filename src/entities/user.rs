//! User entity - Il record di sessione dell'utente corrente

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identità creata al sign-in e cancellata al sign-out. È l'unico record
/// di sessione: esiste al più un utente autenticato per dispositivo.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_sign_in_at: DateTime<Utc>,
}

impl User {
    /// Nome visualizzato in chat: la parte locale dell'email.
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_local_part_of_email() {
        let user = User {
            id: "1".to_string(),
            email: "wolverine@umich.edu".to_string(),
            created_at: Utc::now(),
            last_sign_in_at: Utc::now(),
        };
        assert_eq!(user.display_name(), "wolverine");
    }
}
