//! Favorites services - Gestione del ledger dei preferiti

use crate::core::{AppError, AppState, Viewer};
use crate::dtos::{FavoriteDTO, ToggleFavoriteDTO, ToggleResultDTO};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, viewer))]
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(Viewer(viewer)): Extension<Viewer>,
) -> Json<Vec<FavoriteDTO>> {
    // lettura consentita anche in anonimo: lista vuota
    let Some(user) = viewer else {
        debug!("Anonymous favorites read, returning empty list");
        return Json(Vec::new());
    };

    let favorites = state
        .favorites
        .list_for_user(&user.id)
        .await
        .unwrap_or_else(|e| {
            warn!("Favorites read failed, degrading to empty list: {:?}", e);
            Vec::new()
        });

    debug!("User has {} favorites", favorites.len());
    Json(favorites.into_iter().map(FavoriteDTO::from).collect())
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, item = %body.name))]
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<ToggleFavoriteDTO>,
) -> Result<Json<ToggleResultDTO>, AppError> {
    // 1. Validare lo snapshot del piatto nel body
    // 2. Invertire lo stato nel ledger per (utente, piatto, hall)
    // 3. Ritornare lo stato risultante

    body.validate()?;

    let favorited = state.favorites.toggle(&current_user, &body).await?;

    info!(
        "Item '{}' at {} is now {}",
        body.name,
        body.dining_hall,
        if favorited { "favorited" } else { "unfavorited" }
    );
    Ok(Json(ToggleResultDTO { favorited }))
}
