use crate::core::{AppError, AppState};
use crate::entities::User;
use axum::extract::State;
use axum::{Error, body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: String,
    pub email: String,
}

#[instrument(skip(secret), fields(email = %email, id = %id))]
pub fn encode_jwt(email: String, id: String, secret: &String) -> Result<String, Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire: chrono::TimeDelta = Duration::hours(24);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;
    let claim = Claims {
        iat,
        exp,
        id,
        email,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map(|token| {
        info!("JWT token encoded successfully");
        token
    })
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        Error::new("Error in encoding jwt token")
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: String, secret: &String) -> Result<TokenData<Claims>, Error> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        &jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| {
        info!("JWT token decoded successfully for user: {}", data.claims.email);
        data
    })
    .map_err(|e| {
        error!("Failed to decode JWT token: {:?}", e);
        Error::new("Error in decoding jwt token")
    })
}

/// Middleware per le rotte che richiedono un utente autenticato.
///
/// Oltre a decodificare il token, verifica che il record di sessione nello
/// store esista ancora e appartenga allo stesso utente: il sign-out cancella
/// il record e invalida così tutti i token emessi prima.
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = req.headers_mut().get(http::header::AUTHORIZATION);
    let auth_header = match auth_header {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::forbidden("Empty header is not allowed")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::forbidden(
                "Please add the JWT token to the header",
            ));
        }
    };
    let mut header = auth_header.split_whitespace();
    let (_bearer, token) = (header.next(), header.next());
    let token = match token {
        Some(token) => token,
        None => {
            warn!("Malformed authorization header");
            return Err(AppError::forbidden("Please add the JWT token to the header"));
        }
    };
    let token_data = match decode_jwt(token.to_string(), &state.jwt_secret) {
        Ok(data) => data,
        Err(_) => {
            warn!("Failed to decode JWT token");
            return Err(AppError::unauthorized("Unable to decode token"));
        }
    };

    // Il lookup della sessione degrada a "anonimo" su errore di storage
    let session = state.session.current().await.unwrap_or_else(|e| {
        warn!("Session lookup failed, treating request as anonymous: {:?}", e);
        None
    });

    let current_user = match session {
        Some(user) if user.id == token_data.claims.id => {
            info!("User authenticated: {}", user.email);
            user
        }
        _ => {
            warn!("No active session for token of user {}", token_data.claims.id);
            return Err(AppError::unauthenticated());
        }
    };
    req.extensions_mut().insert(current_user);
    // volendo si può recuperare lo user da extension
    Ok(next.run(req).await)
}

/// Identità opzionale della richiesta, inserita dall'identification middleware
/// sulle rotte che consentono la lettura anonima.
#[derive(Debug, Clone)]
pub struct Viewer(pub Option<User>);

/// Middleware lenient per le letture consentite anche in anonimo: se il token
/// è presente e coincide con la sessione attiva il Viewer porta lo User,
/// altrimenti la richiesta passa senza identità.
#[instrument(skip(state, req, next))]
pub async fn identification_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response<Body> {
    debug!("Running identification middleware");
    let viewer = identify(&state, req.headers()).await;
    if let Some(user) = &viewer {
        debug!("Request identified as user {}", user.id);
    }
    req.extensions_mut().insert(Viewer(viewer));
    next.run(req).await
}

/// Prova a risolvere l'identità della richiesta, senza mai fallire.
async fn identify(state: &AppState, headers: &http::HeaderMap) -> Option<User> {
    let header = headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let token = header.split_whitespace().nth(1)?;
    let token_data = decode_jwt(token.to_string(), &state.jwt_secret).ok()?;

    let session = state.session.current().await.unwrap_or_else(|e| {
        warn!("Session lookup failed, treating request as anonymous: {:?}", e);
        None
    });
    session.filter(|user| user.id == token_data.claims.id)
}
