//! FavoritesRepository - Ledger dei piatti preferiti
//!
//! Un'unica mappa user_id -> lista di preferiti sotto la chiave
//! `companion_favorites`. L'identità di una voce è la coppia
//! (nome piatto, dining hall): mai duplicati per lo stesso utente.

use super::traits::Ledger;
use super::KvStore;
use crate::dtos::ToggleFavoriteDTO;
use crate::entities::{FavoriteItem, User};
use chrono::Utc;
use std::collections::HashMap;

pub const FAVORITES_KEY: &str = "companion_favorites";

type FavoritesTable = HashMap<String, Vec<FavoriteItem>>;

#[derive(Clone)]
pub struct FavoritesRepository {
    store: KvStore,
}

impl FavoritesRepository {
    pub fn new(store: KvStore) -> FavoritesRepository {
        Self { store }
    }

    /// Inverte lo stato di preferito per (utente, piatto, hall).
    ///
    /// # Returns
    /// * `Ok(true)` - la voce è stata inserita (ora preferito)
    /// * `Ok(false)` - la voce esisteva ed è stata rimossa
    pub async fn toggle(&self, user: &User, item: &ToggleFavoriteDTO) -> Result<bool, sqlx::Error> {
        let mut table = self.load().await?;
        let entries = table.entry(user.id.clone()).or_default();

        let favorited = match entries
            .iter()
            .position(|fav| fav.matches(&item.name, &item.dining_hall))
        {
            Some(index) => {
                entries.remove(index);
                false
            }
            None => {
                entries.push(FavoriteItem {
                    id: Utc::now().timestamp_millis().to_string(),
                    name: item.name.clone(),
                    dining_hall: item.dining_hall.clone(),
                    station: item.station.clone(),
                    nutrition: item.nutrition.clone(),
                    allergens: item.allergens.clone(),
                    dietary_tags: item.dietary_tags.clone(),
                    added_at: Utc::now(),
                });
                true
            }
        };

        self.persist(&table).await?;
        Ok(favorited)
    }

    /// Tutti i preferiti dell'utente, in ordine di inserimento.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<FavoriteItem>, sqlx::Error> {
        let mut table = self.load().await?;
        Ok(table.remove(user_id).unwrap_or_default())
    }

    /// True se (piatto, hall) è già tra i preferiti dell'utente.
    pub async fn contains(
        &self,
        user_id: &str,
        name: &str,
        dining_hall: &str,
    ) -> Result<bool, sqlx::Error> {
        let favorites = self.list_for_user(user_id).await?;
        Ok(favorites.iter().any(|fav| fav.matches(name, dining_hall)))
    }
}

impl Ledger for FavoritesRepository {
    type Table = FavoritesTable;

    const KEY: &'static str = FAVORITES_KEY;

    fn store(&self) -> &KvStore {
        &self.store
    }
}
