//! Favorite DTOs - Data Transfer Objects per il ledger dei preferiti

use crate::entities::{FavoriteItem, NutritionFacts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body del toggle: lo snapshot del piatto così come il client lo ha letto
/// dal menu. Lo station serve solo alla voce creata, non all'identità.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteDTO {
    #[validate(length(min = 1, max = 120, message = "Item name must be between 1 and 120 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 80, message = "Dining hall must be between 1 and 80 characters"))]
    pub dining_hall: String,

    pub station: String,

    #[serde(default)]
    pub nutrition: NutritionFacts,

    #[serde(default)]
    pub allergens: Vec<String>,

    #[serde(rename = "dietary_tags", default)]
    pub dietary_tags: Vec<String>,
}

/// Esito del toggle: lo stato risultante, non l'azione eseguita.
#[derive(Serialize, Deserialize, Debug)]
pub struct ToggleResultDTO {
    pub favorited: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDTO {
    pub id: String,
    pub name: String,
    pub dining_hall: String,
    pub station: String,
    pub nutrition: NutritionFacts,
    pub allergens: Vec<String>,
    #[serde(rename = "dietary_tags")]
    pub dietary_tags: Vec<String>,
    pub added_at: DateTime<Utc>,
}

impl From<FavoriteItem> for FavoriteDTO {
    fn from(value: FavoriteItem) -> Self {
        Self {
            id: value.id,
            name: value.name,
            dining_hall: value.dining_hall,
            station: value.station,
            nutrition: value.nutrition,
            allergens: value.allergens,
            dietary_tags: value.dietary_tags,
            added_at: value.added_at,
        }
    }
}
