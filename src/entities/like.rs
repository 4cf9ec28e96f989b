//! Like entity - Contatore di like per messaggio

use serde::{Deserialize, Serialize};

/// Record dei like di un singolo messaggio: contatore più insieme degli id
/// di chi ha messo like. Invariante: `count == liked_by.len()`, mai negativo.
/// Creato pigramente al primo accesso e mai cancellato.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LikeRecord {
    pub count: u32,
    pub liked_by: Vec<String>,
}

impl LikeRecord {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }
}
