//! Chat services - Lettura, invio e cancellazione nella chat giornaliera

use crate::core::{AppError, AppState, Viewer};
use crate::dtos::{MessageDTO, SendMessageDTO};
use crate::entities::{ChatMessage, MOCK_IDENTITIES, User};
use crate::repositories::chat::SAMPLE_PHRASES;
use crate::repositories::{ChatRepository, LikesTable};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_macros::debug_handler;
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, viewer))]
pub async fn get_chat_messages(
    State(state): State<Arc<AppState>>,
    Extension(Viewer(viewer)): Extension<Viewer>,
) -> Json<Vec<MessageDTO>> {
    // 1. Determinare la giornata corrente e leggere il log (con eventuale rollover)
    // 2. Seminare i record like mancanti per i messaggi appena apparsi
    // 3. Arricchire ogni messaggio con contatore like e stato del viewer

    let today = ChatRepository::today_string();

    let mut rng = state.rng.lock().await;

    let messages = match state.chat.read_for_date(&today, &mut *rng).await {
        Ok(messages) => messages,
        Err(e) => {
            warn!("Chat read failed, degrading to empty log: {:?}", e);
            Vec::new()
        }
    };

    let likes = state
        .likes
        .seed_missing(&messages, &mut *rng)
        .await
        .unwrap_or_else(|e| {
            warn!("Like seeding failed, degrading to zero-count records: {:?}", e);
            LikesTable::default()
        });
    drop(rng);

    debug!("Serving {} chat messages", messages.len());
    let enriched = messages
        .into_iter()
        .map(|message| {
            let record = likes.get(&message.id).cloned().unwrap_or_default();
            MessageDTO::from(message).with_likes(&record, viewer.as_ref())
        })
        .collect();
    Json(enriched)
}

#[debug_handler]
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<SendMessageDTO>,
) -> Result<Json<MessageDTO>, AppError> {
    // 1. Validare la lunghezza del testo e scartare i messaggi vuoti
    // 2. Forzare l'eventuale rollover leggendo il log della giornata
    // 3. Appendere il messaggio con il nome derivato dalla parte locale dell'email
    // 4. Programmare una singola risposta sintetica ritardata (fire-and-forget)

    body.validate()?;
    let text = body.message.trim().to_string();
    if text.is_empty() {
        return Err(AppError::bad_request("Message cannot be empty"));
    }

    let today = ChatRepository::today_string();
    let now = Utc::now();
    let message = ChatMessage {
        id: format!("{}_{}", current_user.id, now.timestamp_millis()),
        message: text,
        user_id: current_user.id.clone(),
        user_email: current_user.email.clone(),
        user_name: current_user.display_name().to_string(),
        timestamp: now,
        is_current_user: true,
    };

    // i valori casuali vanno campionati prima dello spawn: la sorgente
    // condivisa non viaggia dentro il task
    let (delay, identity, phrase, nonce) = {
        let mut rng = state.rng.lock().await;
        state.chat.read_for_date(&today, &mut *rng).await?;

        let (min, max) = state.reply_delay_secs;
        (
            Duration::from_secs(rng.random_range(min..=max)),
            MOCK_IDENTITIES[rng.random_range(0..MOCK_IDENTITIES.len())],
            SAMPLE_PHRASES[rng.random_range(0..SAMPLE_PHRASES.len())],
            rng.random::<u32>(),
        )
    };

    state.chat.append(message.clone()).await?;

    // risposta demo: non blocca il chiamante, non è cancellabile e se nel
    // frattempo il log è cambiato appende a quello che trova
    let chat = state.chat.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        match chat.append_synthetic(&identity, phrase, nonce).await {
            Ok(true) => debug!("Synthetic reply delivered"),
            Ok(false) => debug!("Synthetic reply skipped as duplicate"),
            Err(e) => warn!("Synthetic reply failed: {:?}", e),
        }
    });

    info!("Message appended to daily chat");
    Ok(Json(MessageDTO::from(message)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id, message_id = %message_id))]
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(message_id): Path<String>,
) -> StatusCode {
    // cancellazione idempotente: il log resta invariato se id o autore non
    // coincidono e il client non riceve mai un errore
    if let Err(e) = state.chat.delete(&message_id, &current_user.id).await {
        warn!("Chat delete failed, log left unchanged: {:?}", e);
    }
    StatusCode::NO_CONTENT
}
