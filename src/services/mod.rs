//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una
//! migliore manutenibilità. Ogni modulo gestisce gli endpoint HTTP per una
//! specifica funzionalità.

pub mod auth;
pub mod chat;
pub mod favorites;
pub mod likes;
pub mod menu;

// Re-exports per facilitare l'import
pub use auth::{get_current_user, sign_in, sign_out};
pub use chat::{delete_message, get_chat_messages, send_message};
pub use favorites::{list_favorites, toggle_favorite};
pub use likes::toggle_message_like;
pub use menu::get_menu;

use crate::core::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
