use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// GET /api/v1/chat
pub async fn handle_get_transcript(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.lock_core().chat.transcript.clone())
}

/// POST /api/v1/chat
///
/// One request/response turn. The transcript is locked to a single in-flight
/// turn; the generation call itself runs between lock windows. A model-side
/// failure is recovered into the transcript rather than bubbled up.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let message = req.message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let history = {
        let mut core = state.lock_core();
        if core.chat.turn_in_flight {
            return Err(AppError::Conflict(
                "a chat turn is already in progress".to_string(),
            ));
        }
        core.chat.begin_turn(&message)
    };

    let reply = state.llm.chat(&history, &message).await;

    let mut core = state.lock_core();
    match reply {
        Ok(text) => core.chat.complete_turn(text),
        Err(e) => {
            tracing::warn!("Chat turn failed: {e}");
            core.chat.fail_turn();
        }
    }
    Ok(Json(core.chat.transcript.clone()))
}
