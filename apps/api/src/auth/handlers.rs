use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::gate::handlers::{current_status, run_effect, GateStatus};
use crate::models::account::Session;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Auth responses carry the gate along: signing in can resolve a parked plan
/// selection all the way through a purchase, and the client needs to land on
/// whatever screen that produced.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub session: Session,
    pub gate: GateStatus,
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::Validation(
            "a valid email address is required".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/auth/register
///
/// Creates the account on the Free tier, signs the new user in, then lets the
/// gate re-resolve any pending selection (which may start a checkout).
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate_email(&req.email)?;
    if req.display_name.trim().is_empty() {
        return Err(AppError::Validation("a display name is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("a password is required".to_string()));
    }

    let (session, effect) = {
        let mut core = state.lock_core();
        let session = core
            .sessions
            .register(req.display_name.trim(), &req.email, &req.password)?;
        let effect = core.gate.auth_succeeded(&session);
        (session, effect)
    };

    run_effect(&state, effect).await?;
    Ok(Json(AuthResponse {
        session,
        gate: current_status(&state),
    }))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate_email(&req.email)?;

    let (session, effect) = {
        let mut core = state.lock_core();
        let session = core.sessions.login(&req.email, &req.password)?;
        let effect = core.gate.auth_succeeded(&session);
        (session, effect)
    };

    run_effect(&state, effect).await?;
    Ok(Json(AuthResponse {
        session,
        gate: current_status(&state),
    }))
}

/// POST /api/v1/auth/logout
///
/// Clears the session and unconditionally forces the gate back to browsing,
/// whatever it was doing.
pub async fn handle_logout(State(state): State<AppState>) -> Result<Json<GateStatus>, AppError> {
    {
        let mut core = state.lock_core();
        core.sessions.logout()?;
        core.gate.session_cleared();
    }
    Ok(Json(current_status(&state)))
}

/// GET /api/v1/auth/me
pub async fn handle_me(State(state): State<AppState>) -> Json<Option<Session>> {
    Json(state.lock_core().sessions.session().cloned())
}
