//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione
//! interna (entities) e portano le regole di validazione dell'input.

pub mod favorite;
pub mod message;
pub mod user;

// Re-exports per facilitare l'import
pub use favorite::{FavoriteDTO, ToggleFavoriteDTO, ToggleResultDTO};
pub use message::{LikeStateDTO, MessageDTO, SendMessageDTO};
pub use user::{SignInDTO, UserDTO};
