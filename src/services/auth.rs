//! Auth services - Sign-in simulato, sign-out e sessione corrente
//!
//! L'autenticazione è una demo: nessun backend di identità, solo il controllo
//! del dominio istituzionale sull'email e un record di sessione nello store.

use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{SignInDTO, UserDTO};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode},
};
use axum_macros::debug_handler;
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

lazy_static! {
    /// Suffisso di dominio accettato al sign-in.
    static ref INSTITUTIONAL_EMAIL: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@umich\.edu$").unwrap();
}

#[debug_handler]
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignInDTO>, // JSON body
) -> Result<(StatusCode, HeaderMap, Json<UserDTO>), AppError> {
    // 1. Validare il formato dell'email con validator
    // 2. Verificare il suffisso di dominio istituzionale, altrimenti InvalidEmail
    // 3. Attendere il ritardo simulato della rete
    // 4. Costruire il record utente con id dal timestamp corrente
    // 5. Scrivere il record di sessione nello store (sovrascrive il precedente)
    // 6. Firmare il token JWT con id ed email
    // 7. Ritornare OK con Set-Cookie, Authorization e il DTO dell'utente

    body.validate()?;

    if !INSTITUTIONAL_EMAIL.is_match(&body.email) {
        warn!("Sign-in rejected, email outside institutional domain");
        return Err(AppError::invalid_email());
    }

    tokio::time::sleep(state.sign_in_delay).await;

    let now = Utc::now();
    let user = User {
        id: now.timestamp_millis().to_string(),
        email: body.email,
        created_at: now,
        last_sign_in_at: now,
    };
    state.session.set(&user).await?;

    let token = encode_jwt(user.email.clone(), user.id.clone(), &state.jwt_secret)?;

    let cookie_value = format!(
        "token={}; HttpOnly; Secure; SameSite=Lax; Max-Age={}",
        token,
        24 * 60 * 60
    );

    let mut headers = HeaderMap::new();
    headers.insert("Set-Cookie", HeaderValue::from_str(&cookie_value).unwrap());
    headers.insert(
        "Authorization",
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    info!("User signed in");
    Ok((StatusCode::OK, headers, Json(UserDTO::from(user))))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Result<StatusCode, AppError> {
    // il sign-out cancella il record: da qui in poi ogni token emesso prima
    // non supera più il middleware di autenticazione
    state.session.clear().await?;
    info!("User signed out");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(current_user), fields(user_id = %current_user.id))]
pub async fn get_current_user(
    Extension(current_user): Extension<User>,
) -> Json<UserDTO> {
    Json(UserDTO::from(current_user))
}
