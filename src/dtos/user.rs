//! User DTOs - Data Transfer Objects per sessione e sign-in

use crate::entities::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body del sign-in: solo l'email, il controllo del dominio istituzionale
/// avviene nel service.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SignInDTO {
    #[validate(email(message = "Not a valid email address"))]
    pub email: String,
}

// struct per gestire io col client
#[derive(Serialize, Deserialize, Debug)]
pub struct UserDTO {
    pub id: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: Some(value.id),
            email: Some(value.email),
            created_at: Some(value.created_at),
            last_sign_in_at: Some(value.last_sign_in_at),
        }
    }
}
