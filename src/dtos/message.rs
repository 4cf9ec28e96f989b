//! Message DTOs - Data Transfer Objects per chat e like

use crate::entities::{ChatMessage, LikeRecord, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageDTO {
    pub id: Option<String>,
    pub message: Option<String>,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub is_current_user: Option<bool>,

    // arricchimento dal ledger dei like, presente solo su GET /chat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_by_me: Option<bool>,
}

impl From<ChatMessage> for MessageDTO {
    fn from(value: ChatMessage) -> Self {
        Self {
            id: Some(value.id),
            message: Some(value.message),
            user_id: Some(value.user_id),
            user_email: Some(value.user_email),
            user_name: Some(value.user_name),
            timestamp: Some(value.timestamp),
            is_current_user: Some(value.is_current_user),
            likes: None,
            liked_by_me: None,
        }
    }
}

impl MessageDTO {
    /// Aggancia il record dei like dal punto di vista del viewer corrente.
    pub fn with_likes(mut self, record: &LikeRecord, viewer: Option<&User>) -> Self {
        self.likes = Some(record.count);
        self.liked_by_me = Some(viewer.is_some_and(|user| record.is_liked_by(&user.id)));
        self
    }
}

/// DTO per inviare un nuovo messaggio in chat
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SendMessageDTO {
    #[validate(length(min = 1, max = 200, message = "Message must be between 1 and 200 characters"))]
    pub message: String,
}

/// Stato risultante di un toggle like.
#[derive(Serialize, Deserialize, Debug)]
pub struct LikeStateDTO {
    pub liked: bool,
    pub count: u32,
}
