//! Modulo per il monitoraggio delle risorse del processo server
//!
//! Campiona a intervalli configurabili CPU e memoria **del processo corrente**
//! tramite `sysinfo` e le logga con `tracing`. Pensato per tenere d'occhio il
//! costo del polling di sessione e dei task sintetici in background.

use std::time::Duration;
use sysinfo::{ProcessesToUpdate, System};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Avvia il task di campionamento. Con `interval_secs == 0` il monitoraggio
/// è disabilitato e non viene avviato nulla.
pub fn spawn_process_monitor(interval_secs: u64) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        return None;
    }

    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(e) => {
            warn!("Process monitor disabled, cannot resolve current pid: {}", e);
            return None;
        }
    };

    Some(tokio::spawn(async move {
        let mut system = System::new();
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));

        // il primo refresh serve solo come baseline per la percentuale di CPU
        ticker.tick().await;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        loop {
            ticker.tick().await;
            system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

            match system.process(pid) {
                Some(process) => {
                    info!(
                        "Process usage: cpu {:.2}% | memory {:.2} MB",
                        process.cpu_usage(),
                        process.memory() as f64 / (1024.0 * 1024.0)
                    );
                }
                None => {
                    warn!("Process {} no longer visible, stopping monitor", pid);
                    break;
                }
            }
        }
    }))
}
