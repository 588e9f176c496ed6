pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::builder::handlers as builder;
use crate::chat::handlers as chat;
use crate::gate::handlers as gate;
use crate::plans;
use crate::render::handlers as export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pricing
        .route("/api/v1/plans", get(plans::handle_list_plans))
        // Accounts & session
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Gate
        .route("/api/v1/gate", get(gate::handle_gate_status))
        .route("/api/v1/gate/select-plan", post(gate::handle_select_plan))
        .route("/api/v1/gate/navigate", post(gate::handle_navigate))
        .route(
            "/api/v1/gate/auth-prompt/close",
            post(gate::handle_close_auth_prompt),
        )
        // Builder
        .route("/api/v1/builder", get(builder::handle_get_builder))
        .route("/api/v1/builder/resume", put(builder::handle_put_resume))
        .route(
            "/api/v1/builder/cover-letter",
            put(builder::handle_put_cover_letter),
        )
        .route("/api/v1/builder/assist", post(builder::handle_assist))
        // Chat
        .route(
            "/api/v1/chat",
            get(chat::handle_get_transcript).post(chat::handle_send_message),
        )
        // Export
        .route("/api/v1/export/resume", get(export::handle_export_resume))
        .route(
            "/api/v1/export/cover-letter",
            get(export::handle_export_cover_letter),
        )
        .with_state(state)
}
