use axum_test::TestServer;
use serde_json::json;
use server::core::AppState;
use server::entities::MenuDocument;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Crea un AppState per i test
///
/// # Arguments
/// * `pool` - Connection pool SQLite provvisto da `#[sqlx::test]`
///
/// # Returns
/// Arc<AppState> con il menu impacchettato, sign-in istantaneo e polling
/// di sessione accelerato
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    let jwt_secret = "ilmiobellissimosegretochevaassolutamentecambiato";
    let menu = MenuDocument::bundled().expect("bundled menu fixture must parse");
    Arc::new(
        AppState::new(pool, jwt_secret.to_string(), menu)
            .with_sign_in_delay(Duration::ZERO)
            .with_session_poll_interval(Duration::from_millis(25)),
    )
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Esegue il sign-in e ritorna la coppia (user_id, bearer token)
///
/// # Arguments
/// * `server` - TestServer su cui eseguire la richiesta
/// * `email` - Email istituzionale con cui autenticarsi
pub async fn sign_in(server: &TestServer, email: &str) -> (String, String) {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email }))
        .await;
    response.assert_status_ok();

    let token = response
        .headers()
        .get("authorization")
        .expect("Authorization header should be present")
        .to_str()
        .expect("Authorization header should be valid UTF-8")
        .trim_start_matches("Bearer ")
        .to_string();

    let user: server::dtos::UserDTO = response.json();
    (user.id.expect("signed-in user has an id"), token)
}
