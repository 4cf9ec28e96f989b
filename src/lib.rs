//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod monitoring;
pub mod repositories;
pub mod services;
pub mod watch;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use crate::services::root;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use crate::services::*;

    Router::new()
        .route("/", get(root))
        .route("/menu", get(get_menu))
        .nest("/auth", configure_auth_routes(state.clone()))
        .nest("/favorites", configure_favorites_routes(state.clone()))
        .nest("/chat", configure_chat_routes(state.clone()))
        .with_state(state)
}

/// Configura le routes di autenticazione (sign-in, sign-out, sessione)
fn configure_auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::services::*;

    let public_routes = Router::new().route("/login", post(sign_in));

    let session_routes = Router::new()
        .route("/logout", post(sign_out))
        .route("/me", get(get_current_user))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    public_routes.merge(session_routes)
}

/// Configura le routes del ledger dei preferiti
fn configure_favorites_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::{authentication_middleware, identification_middleware};
    use crate::services::*;

    // Lettura consentita anche in anonimo (lista vuota)
    let read_routes = Router::new()
        .route("/", get(list_favorites))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identification_middleware,
        ));

    // Il toggle richiede un utente autenticato
    let write_routes = Router::new()
        .route("/toggle", post(toggle_favorite))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    read_routes.merge(write_routes)
}

/// Configura le routes della chat giornaliera e dei like
fn configure_chat_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::{authentication_middleware, identification_middleware};
    use crate::services::*;

    // Lettura consentita anche in anonimo
    let read_routes = Router::new()
        .route("/", get(get_chat_messages))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identification_middleware,
        ));

    // Invio, cancellazione e like richiedono un utente autenticato
    let member_routes = Router::new()
        .route("/", post(send_message))
        .route("/{message_id}", delete(delete_message))
        .route("/{message_id}/like", post(toggle_message_like))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    read_routes.merge(member_routes)
}
