//! Integration tests per la chat giornaliera
//!
//! Test per:
//! - GET /chat (seeding sintetico e arricchimento like)
//! - POST /chat
//! - DELETE /chat/{message_id}

mod common;

#[cfg(test)]
mod chat_tests {
    use super::common::*;
    use serde_json::json;
    use server::dtos::MessageDTO;
    use sqlx::SqlitePool;

    // ============================================================
    // Test per GET /chat - get_chat_messages
    // ============================================================

    #[sqlx::test]
    async fn test_anonymous_read_seeds_daily_log(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server.get("/chat").await;
        response.assert_status_ok();

        let messages: Vec<MessageDTO> = response.json();
        assert!(
            (3..=7).contains(&messages.len()),
            "seeded log should hold 3-7 messages, got {}",
            messages.len()
        );

        // i messaggi sintetici sono ordinati e arricchiti con i like
        let timestamps: Vec<_> = messages.iter().map(|m| m.timestamp.unwrap()).collect();
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
        for message in &messages {
            assert_eq!(message.is_current_user, Some(false));
            assert!(message.likes.unwrap() <= 7);
            // il viewer è anonimo: non può aver messo like
            assert_eq!(message.liked_by_me, Some(false));
        }
        Ok(())
    }

    #[sqlx::test]
    async fn test_same_day_reads_are_stable(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let first: Vec<MessageDTO> = server.get("/chat").await.json();
        let second: Vec<MessageDTO> = server.get("/chat").await.json();

        let first_ids: Vec<_> = first.iter().map(|m| m.id.clone().unwrap()).collect();
        let second_ids: Vec<_> = second.iter().map(|m| m.id.clone().unwrap()).collect();
        assert_eq!(first_ids, second_ids);
        Ok(())
    }

    // ============================================================
    // Test per POST /chat - send_message
    // ============================================================

    #[sqlx::test]
    async fn test_send_appends_message_for_author(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let (user_id, token) = sign_in(&server, "u1@umich.edu").await;

        let response = server
            .post("/chat")
            .authorization_bearer(&token)
            .json(&json!({ "message": "Hello" }))
            .await;
        response.assert_status_ok();

        let sent: MessageDTO = response.json();
        assert_eq!(sent.message.as_deref(), Some("Hello"));
        assert_eq!(sent.user_id.as_deref(), Some(user_id.as_str()));
        assert_eq!(sent.user_name.as_deref(), Some("u1"));
        assert_eq!(sent.is_current_user, Some(true));

        // l'ultimo messaggio del log è quello appena inviato
        let log: Vec<MessageDTO> = server
            .get("/chat")
            .authorization_bearer(&token)
            .await
            .json();
        let last = log.last().expect("log cannot be empty after send");
        assert_eq!(last.message.as_deref(), Some("Hello"));
        assert_eq!(last.user_id.as_deref(), Some(user_id.as_str()));
        assert_eq!(last.is_current_user, Some(true));
        Ok(())
    }

    #[sqlx::test]
    async fn test_send_trims_whitespace(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let (_user_id, token) = sign_in(&server, "u1@umich.edu").await;

        let response = server
            .post("/chat")
            .authorization_bearer(&token)
            .json(&json!({ "message": "  ciao a tutti  " }))
            .await;
        response.assert_status_ok();

        let sent: MessageDTO = response.json();
        assert_eq!(sent.message.as_deref(), Some("ciao a tutti"));
        Ok(())
    }

    #[sqlx::test]
    async fn test_send_requires_authentication(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server.post("/chat").json(&json!({ "message": "Hello" })).await;
        response.assert_status_forbidden();
        Ok(())
    }

    #[sqlx::test]
    async fn test_send_rejects_oversized_message(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let (_user_id, token) = sign_in(&server, "u1@umich.edu").await;

        let oversized = "x".repeat(201);
        let response = server
            .post("/chat")
            .authorization_bearer(&token)
            .json(&json!({ "message": oversized }))
            .await;
        response.assert_status_bad_request();

        let blank = server
            .post("/chat")
            .authorization_bearer(&token)
            .json(&json!({ "message": "   " }))
            .await;
        blank.assert_status_bad_request();
        Ok(())
    }

    // ============================================================
    // Test per DELETE /chat/{message_id} - delete_message
    // ============================================================

    #[sqlx::test]
    async fn test_delete_leaves_foreign_messages_alone(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let (_user_id, token) = sign_in(&server, "u1@umich.edu").await;

        let log: Vec<MessageDTO> = server.get("/chat").await.json();
        let foreign_id = log[0].id.clone().unwrap();

        // il messaggio è di un'identità mock: la cancellazione è un no-op
        let response = server
            .delete(&format!("/chat/{}", foreign_id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(axum::http::StatusCode::NO_CONTENT);

        let after: Vec<MessageDTO> = server.get("/chat").await.json();
        assert_eq!(after.len(), log.len());
        assert!(after.iter().any(|m| m.id.as_deref() == Some(foreign_id.as_str())));
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_own_message(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let (_user_id, token) = sign_in(&server, "u1@umich.edu").await;

        let sent: MessageDTO = server
            .post("/chat")
            .authorization_bearer(&token)
            .json(&json!({ "message": "delete me" }))
            .await
            .json();
        let message_id = sent.id.unwrap();

        let response = server
            .delete(&format!("/chat/{}", message_id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(axum::http::StatusCode::NO_CONTENT);

        let log: Vec<MessageDTO> = server.get("/chat").await.json();
        assert!(log.iter().all(|m| m.id.as_deref() != Some(message_id.as_str())));
        Ok(())
    }
}
