//! Watch module - Notifica dei cambi di sessione via polling
//!
//! Non esiste un canale push: ogni subscription avvia un task che a cadenza
//! fissa rilegge il record di sessione dallo store, lo confronta con l'ultimo
//! valore osservato e classifica la transizione come sign-in o sign-out.
//! Disiscriversi (o lasciar cadere la Subscription) ferma il timer.

use crate::entities::User;
use crate::repositories::SessionRepository;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

/// Transizione osservata sul record di sessione.
#[derive(Debug, Clone)]
pub enum AuthChange {
    SignedIn(User),
    SignedOut,
}

pub struct SessionWatcher {
    session: SessionRepository,
    poll_interval: Duration,
    next_id: AtomicU64,
    /// Subscription attive, per id. Serve solo a contarle e a ripulire la
    /// mappa quando una Subscription viene lasciata cadere.
    active: Arc<DashMap<u64, AbortHandle>>,
}

impl SessionWatcher {
    pub fn new(session: SessionRepository, poll_interval: Duration) -> SessionWatcher {
        Self {
            session,
            poll_interval,
            next_id: AtomicU64::new(0),
            active: Arc::new(DashMap::new()),
        }
    }

    /// Avvia il polling e ritorna la coppia (handle, receiver degli eventi).
    ///
    /// Il primo confronto avviene subito: se esiste già una sessione, il
    /// subscriber riceve immediatamente un `SignedIn`. Su errore di lookup il
    /// tick viene saltato e si riprova al successivo.
    pub fn subscribe(&self) -> (Subscription, UnboundedReceiver<AuthChange>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let repo = self.session.clone();
        let poll_interval = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            let mut last: Option<User> = None;
            loop {
                ticker.tick().await;

                let current = match repo.current().await {
                    Ok(current) => current,
                    Err(e) => {
                        warn!("Session poll failed, retrying next tick: {:?}", e);
                        continue;
                    }
                };

                if current != last {
                    let change = match &current {
                        Some(user) => AuthChange::SignedIn(user.clone()),
                        None => AuthChange::SignedOut,
                    };
                    if tx.send(change).is_err() {
                        // receiver chiuso: il task non serve più
                        break;
                    }
                    last = current;
                }
            }
        });

        self.active.insert(id, handle.abort_handle());
        info!("Session watcher subscription {} started", id);
        (
            Subscription {
                id,
                active: self.active.clone(),
                handle: handle.abort_handle(),
            },
            rx,
        )
    }

    /// Quante subscription hanno un timer attivo.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// Handle di una subscription attiva. Il timer di polling si ferma quando
/// l'handle viene disiscritto o lasciato cadere.
pub struct Subscription {
    id: u64,
    active: Arc<DashMap<u64, AbortHandle>>,
    handle: AbortHandle,
}

impl Subscription {
    /// Ferma il timer di polling. Equivalente a lasciar cadere l'handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
        self.active.remove(&self.id);
        debug!("Session watcher subscription {} stopped", self.id);
    }
}
