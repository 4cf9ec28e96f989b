//! Favorite entity - Voce del ledger dei preferiti

use super::menu::NutritionFacts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot di un piatto salvato tra i preferiti. Viene creato al toggle-on e
/// rimosso al toggle-off, mai modificato. L'unicità è garantita dalla coppia
/// (nome piatto, dining hall) all'interno della lista di un utente.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    pub id: String,
    pub name: String,
    pub dining_hall: String,
    pub station: String,
    pub nutrition: NutritionFacts,
    pub allergens: Vec<String>,
    // il client storico usa lo snake_case solo per questo campo
    #[serde(rename = "dietary_tags")]
    pub dietary_tags: Vec<String>,
    pub added_at: DateTime<Utc>,
}

impl FavoriteItem {
    /// Confronto di identità usato dal toggle: stesso piatto nella stessa hall.
    pub fn matches(&self, name: &str, dining_hall: &str) -> bool {
        self.name == name && self.dining_hall == dining_hall
    }
}
