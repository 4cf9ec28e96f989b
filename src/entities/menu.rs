//! Menu entities - Schema del documento menu delle dining hall
//!
//! Il documento arriva dallo scraper come JSON statico: una mappa
//! hall -> stazioni -> lista ordinata di piatti, ciascuno con il proprio
//! sotto-record nutrizionale, gli allergeni e i tag dietetici.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Documento menu completo servito da `GET /menu`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MenuDocument {
    pub last_updated: String,
    pub halls: BTreeMap<String, DiningHall>,
    #[serde(default)]
    pub total_halls: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DiningHall {
    pub name: String,
    pub stations: BTreeMap<String, Vec<MenuItem>>,
    pub item_count: u32,
    pub items_with_nutrition: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MenuItem {
    pub name: String,
    pub nutrition: NutritionFacts,
    pub allergens: Vec<String>,
    pub dietary_tags: Vec<String>,
}

/// Valori nutrizionali di un piatto. Tutti opzionali: lo scraper non sempre
/// trova la tabella, nel qual caso `has_nutrition_data` resta false.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NutritionFacts {
    pub calories: Option<i64>,
    pub total_fat_g: Option<f64>,
    pub saturated_fat_g: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub total_carbs_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub protein_g: Option<f64>,
    pub serving_size: Option<String>,
    #[serde(default)]
    pub has_nutrition_data: bool,
}

impl MenuDocument {
    /// Carica il documento menu: dal path configurato se presente, altrimenti
    /// dal fixture impacchettato nel binario.
    pub fn load(path: Option<&str>) -> Result<Self, String> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| format!("Cannot read menu document at {}: {}", path, e))?;
                serde_json::from_str(&raw)
                    .map_err(|e| format!("Invalid menu document at {}: {}", path, e))
            }
            None => Self::bundled(),
        }
    }

    /// Il fixture statico incluso nel binario.
    pub fn bundled() -> Result<Self, String> {
        serde_json::from_str(include_str!("../../assets/menu_data.json"))
            .map_err(|e| format!("Invalid bundled menu document: {}", e))
    }
}
