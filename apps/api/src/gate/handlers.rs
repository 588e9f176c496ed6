use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::gate::{GateEffect, GateRejection, NavTarget, Screen};
use crate::models::account::Session;
use crate::models::plan::PlanTier;
use crate::plans::details_for;
use crate::state::AppState;

/// The gate's externally visible shape: the derived active screen plus what
/// the chrome needs to label itself.
#[derive(Debug, Serialize)]
pub struct GateStatus {
    pub screen: Screen,
    pub purchase_in_progress: bool,
    pub pending_selection: Option<PlanTier>,
    pub active_plan: Option<PlanTier>,
    pub session: Option<Session>,
}

pub fn current_status(state: &AppState) -> GateStatus {
    let core = state.lock_core();
    GateStatus {
        screen: core.gate.active_screen(),
        purchase_in_progress: core.gate.purchase_in_progress(),
        pending_selection: core.gate.pending_selection(),
        active_plan: core.gate.active_tier(),
        session: core.sessions.session().cloned(),
    }
}

fn rejection_to_error(rejection: GateRejection) -> AppError {
    match rejection {
        GateRejection::AuthPromptOpen => {
            AppError::Conflict("a plan selection is already awaiting sign-in".to_string())
        }
        GateRejection::PurchaseInFlight => {
            AppError::Conflict("a purchase is already in progress".to_string())
        }
    }
}

/// Executes the follow-up work a gate transition demanded. Only purchases
/// need anything from this side; the auth prompt is the client's to open.
pub async fn run_effect(state: &AppState, effect: GateEffect) -> Result<(), AppError> {
    match effect {
        GateEffect::Settled | GateEffect::PromptAuth => Ok(()),
        GateEffect::StartPurchase(tier) => run_checkout(state, tier).await,
    }
}

/// Drives one checkout to completion and reports the outcome back to the
/// gate. The gateway call runs without the core lock; by the time the outcome
/// lands, a logout may already have reset the gate, in which case the result
/// is dropped on the floor — the account plan is only ever written while the
/// purchase is still the gate's current business.
async fn run_checkout(state: &AppState, tier: PlanTier) -> Result<(), AppError> {
    let details = details_for(tier);
    let outcome = state.checkout.checkout(&details).await;

    let mut core = state.lock_core();
    match outcome {
        Ok(()) => {
            if core.gate.is_purchasing(tier) {
                if let Err(e) = core.sessions.upgrade_plan(tier) {
                    core.gate.purchase_failed(tier);
                    return Err(AppError::Storage(e));
                }
                core.gate.purchase_succeeded(tier);
                info!("Builder unlocked on the {tier} plan");
            }
            Ok(())
        }
        Err(e) => {
            core.gate.purchase_failed(tier);
            Err(AppError::Purchase(e))
        }
    }
}

/// GET /api/v1/gate
pub async fn handle_gate_status(State(state): State<AppState>) -> Json<GateStatus> {
    Json(current_status(&state))
}

#[derive(Deserialize)]
pub struct SelectPlanRequest {
    pub tier: PlanTier,
}

/// POST /api/v1/gate/select-plan
///
/// The pricing-card click. Resolves entitlement and, when payment is due,
/// runs the checkout before answering — the response carries wherever the
/// gate ended up.
pub async fn handle_select_plan(
    State(state): State<AppState>,
    Json(req): Json<SelectPlanRequest>,
) -> Result<Json<GateStatus>, AppError> {
    let effect = {
        let mut core = state.lock_core();
        let session = core.sessions.session().cloned();
        core.gate
            .select_plan(req.tier, session.as_ref())
            .map_err(rejection_to_error)?
    };

    run_effect(&state, effect).await?;
    Ok(Json(current_status(&state)))
}

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub target: NavTarget,
}

/// POST /api/v1/gate/navigate
pub async fn handle_navigate(
    State(state): State<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Json<GateStatus> {
    state.lock_core().gate.navigate(req.target);
    Json(current_status(&state))
}

/// POST /api/v1/gate/auth-prompt/close
///
/// Dismissing the auth prompt abandons the pending selection; any in-flight
/// network work is unaffected.
pub async fn handle_close_auth_prompt(State(state): State<AppState>) -> Json<GateStatus> {
    state.lock_core().gate.auth_prompt_closed();
    Json(current_status(&state))
}
