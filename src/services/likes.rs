//! Likes services - Toggle dei like sui messaggi

use crate::core::{AppError, AppState};
use crate::dtos::LikeStateDTO;
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{info, instrument};

#[instrument(skip(state, current_user), fields(user_id = %current_user.id, message_id = %message_id))]
pub async fn toggle_message_like(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(message_id): Path<String>,
) -> Result<Json<LikeStateDTO>, AppError> {
    let (liked, count) = state.likes.toggle(&message_id, &current_user.id).await?;

    info!(
        "Message {} is now {} (count {})",
        message_id,
        if liked { "liked" } else { "unliked" },
        count
    );
    Ok(Json(LikeStateDTO { liked, count }))
}
