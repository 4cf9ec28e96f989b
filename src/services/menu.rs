//! Menu services - Il documento menu delle dining hall

use crate::core::AppState;
use crate::entities::MenuDocument;
use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Serve il documento caricato all'avvio: il fixture impacchettato oppure il
/// documento configurato, stesso schema in entrambi i casi.
#[instrument(skip(state))]
pub async fn get_menu(State(state): State<Arc<AppState>>) -> Json<MenuDocument> {
    debug!("Serving menu for {} halls", state.menu.halls.len());
    Json(state.menu.clone())
}
