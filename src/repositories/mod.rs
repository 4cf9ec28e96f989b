//! Repositories module - Coordinatore per tutti i ledger del companion
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore
//! manutenibilità. Ogni repository gestisce un ledger: una collezione serializzata
//! come singolo record JSON nello store chiave-valore.
//!
//! Lo store non offre transazioni tra chiavi: ogni operazione è un
//! read-modify-write dell'intero record, con semantica last-write-wins.
//! In un dispositivo singolo utente le operazioni sono serializzate
//! dall'interazione UI, quindi non servono lock.

// Dichiarazione dei sotto-moduli
pub mod chat;
pub mod favorites;
pub mod kv;
pub mod likes;
pub mod session;
pub mod traits;

// Re-esportazione dei trait per facilitare l'import
pub use traits::Ledger;

// Re-esportazione delle struct dei repository per facilitare l'import
pub use chat::ChatRepository;
pub use favorites::FavoritesRepository;
pub use kv::KvStore;
pub use likes::{LikesRepository, LikesTable};
pub use session::SessionRepository;
