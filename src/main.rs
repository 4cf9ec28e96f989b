use server::core::{AppState, Config};
use server::entities::MenuDocument;
use server::watch::AuthChange;
use server::{create_router, monitoring};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inizializza configurazione e logging
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    config.print_info();

    // Lo store locale viene creato al primo avvio
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let menu = MenuDocument::load(config.menu_path.as_deref())?;

    let state = Arc::new(
        AppState::new(pool, config.jwt_secret.clone(), menu)
            .with_sign_in_delay(Duration::from_millis(config.sign_in_delay_ms))
            .with_reply_delay_secs(config.reply_delay_min_secs, config.reply_delay_max_secs)
            .with_session_poll_interval(Duration::from_millis(config.session_poll_interval_ms)),
    );

    // Audit dei cambi di sessione: un'unica subscription per la vita del server
    let (subscription, mut changes) = state.watch.subscribe();
    tokio::spawn(async move {
        // la subscription resta viva qui dentro: il drop fermerebbe il timer
        let _subscription = subscription;
        while let Some(change) = changes.recv().await {
            match change {
                AuthChange::SignedIn(user) => info!("Session change: signed in as {}", user.email),
                AuthChange::SignedOut => info!("Session change: signed out"),
            }
        }
    });

    monitoring::spawn_process_monitor(config.monitor_interval_secs);

    // CORS permissivo: il client mobile gira su origini diverse
    let app = create_router(state).layer(CorsLayer::permissive());

    let addr = SocketAddr::new(config.server_host.parse()?, config.server_port);
    info!("Server listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
