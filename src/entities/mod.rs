//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti
//! nello store chiave-valore. Ogni ledger serializza le proprie entità come JSON
//! sotto una chiave fissa.

pub mod favorite;
pub mod like;
pub mod menu;
pub mod message;
pub mod mock;
pub mod user;

// Re-exports per facilitare l'import
pub use favorite::FavoriteItem;
pub use like::LikeRecord;
pub use menu::{DiningHall, MenuDocument, MenuItem, NutritionFacts};
pub use message::ChatMessage;
pub use mock::{MOCK_IDENTITIES, MockIdentity};
pub use user::User;
