#![allow(dead_code)]

//! Gate Controller — sequences "select plan → auth gate → purchase gate →
//! unlock builder" and derives the single active screen from its state.
//!
//! The controller is synchronous and performs no I/O. Every transition is a
//! named method with a deterministic resulting state; transitions that demand
//! follow-up work (open the auth prompt, run a checkout) return a
//! `GateEffect` for the handler layer to execute. The controller exclusively
//! owns the pending selection: at most one is outstanding, and it is consumed
//! the moment it resolves or the auth prompt is dismissed.

pub mod handlers;

use serde::Serialize;

use crate::entitlement::{self, Entitlement};
use crate::models::account::Session;
use crate::models::plan::PlanTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Browsing,
    AwaitingAuth { pending: PlanTier },
    Purchasing { pending: PlanTier },
    BuilderActive { tier: PlanTier },
}

/// Which top-level screen is active — the one value the UI derives its layout
/// from. A purchase in flight keeps the pricing screen up (with its own
/// progress indicator); it is not a screen of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Pricing,
    AuthPrompt,
    Builder,
}

/// Follow-up work a transition demands from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEffect {
    /// The transition fully resolved; nothing further to do.
    Settled,
    /// Open the authentication UI; a selection is now pending on it.
    PromptAuth,
    /// Run the checkout flow for this tier, then report the outcome back
    /// through `purchase_succeeded` / `purchase_failed`.
    StartPurchase(PlanTier),
}

/// A selection that cannot be accepted in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// The auth prompt is open with a selection already pending on it.
    AuthPromptOpen,
    /// A checkout is in flight; it cannot be cancelled or superseded.
    PurchaseInFlight,
}

#[derive(Debug)]
pub struct GateController {
    state: GateState,
}

impl Default for GateController {
    fn default() -> Self {
        Self::new()
    }
}

impl GateController {
    pub fn new() -> Self {
        Self {
            state: GateState::Browsing,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn active_screen(&self) -> Screen {
        match self.state {
            GateState::Browsing | GateState::Purchasing { .. } => Screen::Pricing,
            GateState::AwaitingAuth { .. } => Screen::AuthPrompt,
            GateState::BuilderActive { .. } => Screen::Builder,
        }
    }

    pub fn pending_selection(&self) -> Option<PlanTier> {
        match self.state {
            GateState::AwaitingAuth { pending } | GateState::Purchasing { pending } => {
                Some(pending)
            }
            _ => None,
        }
    }

    pub fn purchase_in_progress(&self) -> bool {
        matches!(self.state, GateState::Purchasing { .. })
    }

    /// The tier whose builder is unlocked, if any.
    pub fn active_tier(&self) -> Option<PlanTier> {
        match self.state {
            GateState::BuilderActive { tier } => Some(tier),
            _ => None,
        }
    }

    pub fn is_purchasing(&self, tier: PlanTier) -> bool {
        self.state == GateState::Purchasing { pending: tier }
    }

    /// A plan card was chosen. Consults the resolver against the current
    /// session and either unlocks the builder, parks the selection behind the
    /// auth prompt, or starts a purchase. Selecting while a detour is already
    /// open is rejected.
    pub fn select_plan(
        &mut self,
        tier: PlanTier,
        session: Option<&Session>,
    ) -> Result<GateEffect, GateRejection> {
        match self.state {
            GateState::AwaitingAuth { .. } => Err(GateRejection::AuthPromptOpen),
            GateState::Purchasing { .. } => Err(GateRejection::PurchaseInFlight),
            GateState::Browsing | GateState::BuilderActive { .. } => Ok(self.resolve(tier, session)),
        }
    }

    /// Login or registration succeeded. Re-runs the selection that was parked
    /// behind the auth prompt against the now-authenticated session; a login
    /// with nothing pending moves nothing.
    pub fn auth_succeeded(&mut self, session: &Session) -> GateEffect {
        match self.state {
            GateState::AwaitingAuth { pending } => self.resolve(pending, Some(session)),
            _ => GateEffect::Settled,
        }
    }

    /// The auth prompt was dismissed without authenticating. Abandons the
    /// pending selection.
    pub fn auth_prompt_closed(&mut self) {
        if let GateState::AwaitingAuth { .. } = self.state {
            self.state = GateState::Browsing;
        }
    }

    /// Checkout confirmed for `tier`. The caller has already written the plan
    /// upgrade; this unlocks the builder. Ignored unless that exact purchase
    /// is still in flight (logout may have reset the gate meanwhile).
    pub fn purchase_succeeded(&mut self, tier: PlanTier) {
        if self.is_purchasing(tier) {
            self.state = GateState::BuilderActive { tier };
        }
    }

    /// Checkout failed for `tier`. Returns to browsing with no plan change.
    pub fn purchase_failed(&mut self, tier: PlanTier) {
        if self.is_purchasing(tier) {
            self.state = GateState::Browsing;
        }
    }

    /// Top-bar navigation. Leaving the builder for home or pricing returns to
    /// browsing; everything else leaves the gate where it is.
    pub fn navigate(&mut self, target: NavTarget) {
        if let GateState::BuilderActive { .. } = self.state {
            match target {
                NavTarget::Home | NavTarget::Pricing => self.state = GateState::Browsing,
                NavTarget::Builder => {}
            }
        }
    }

    /// The session transitioned to Anonymous. Forces browsing from any state,
    /// unconditionally — including mid-purchase.
    pub fn session_cleared(&mut self) {
        self.state = GateState::Browsing;
    }

    fn resolve(&mut self, tier: PlanTier, session: Option<&Session>) -> GateEffect {
        match entitlement::resolve(tier, session) {
            Entitlement::Grant => {
                self.state = GateState::BuilderActive { tier };
                GateEffect::Settled
            }
            Entitlement::RequireAuth => {
                self.state = GateState::AwaitingAuth { pending: tier };
                GateEffect::PromptAuth
            }
            Entitlement::RequirePurchase(pending) => {
                self.state = GateState::Purchasing { pending };
                GateEffect::StartPurchase(pending)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTarget {
    Home,
    Pricing,
    Builder,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SessionManager;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn make_sessions() -> SessionManager {
        let kv = Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>;
        SessionManager::restore(kv).unwrap()
    }

    fn session_with(plan: PlanTier) -> Session {
        Session {
            display_name: "T".to_string(),
            email: "t@x.com".to_string(),
            plan,
        }
    }

    #[test]
    fn test_initial_state_is_browsing_on_pricing_screen() {
        let gate = GateController::new();
        assert_eq!(gate.state(), GateState::Browsing);
        assert_eq!(gate.active_screen(), Screen::Pricing);
        assert!(gate.pending_selection().is_none());
    }

    #[test]
    fn test_anonymous_selection_parks_behind_auth_prompt() {
        let mut gate = GateController::new();
        let effect = gate.select_plan(PlanTier::Basic, None).unwrap();

        assert_eq!(effect, GateEffect::PromptAuth);
        assert_eq!(
            gate.state(),
            GateState::AwaitingAuth {
                pending: PlanTier::Basic
            }
        );
        assert_eq!(gate.active_screen(), Screen::AuthPrompt);
        assert_eq!(gate.pending_selection(), Some(PlanTier::Basic));
    }

    // The end-to-end scenario: anonymous user picks Basic, registers (lands
    // on Free), checkout runs and confirms, builder unlocks on Basic and the
    // stored account reflects the upgrade.
    #[test]
    fn test_register_then_purchase_unlocks_builder() {
        let mut gate = GateController::new();
        let mut sessions = make_sessions();

        gate.select_plan(PlanTier::Basic, None).unwrap();

        let session = sessions.register("A", "a@x.com", "pw").unwrap();
        let effect = gate.auth_succeeded(&session);
        assert_eq!(effect, GateEffect::StartPurchase(PlanTier::Basic));
        assert_eq!(
            gate.state(),
            GateState::Purchasing {
                pending: PlanTier::Basic
            }
        );

        // Checkout confirmed: upgrade first, then unlock.
        sessions.upgrade_plan(PlanTier::Basic).unwrap();
        gate.purchase_succeeded(PlanTier::Basic);

        assert_eq!(
            gate.state(),
            GateState::BuilderActive {
                tier: PlanTier::Basic
            }
        );
        assert_eq!(gate.active_screen(), Screen::Builder);
        let stored = sessions.accounts().find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(stored.plan, PlanTier::Basic);
    }

    #[test]
    fn test_sufficient_tier_grants_without_purchase() {
        let mut gate = GateController::new();
        let session = session_with(PlanTier::Pro);

        let effect = gate.select_plan(PlanTier::Basic, Some(&session)).unwrap();
        assert_eq!(effect, GateEffect::Settled);
        assert_eq!(
            gate.state(),
            GateState::BuilderActive {
                tier: PlanTier::Basic
            }
        );
    }

    #[test]
    fn test_auth_success_with_sufficient_tier_grants_directly() {
        let mut gate = GateController::new();
        gate.select_plan(PlanTier::Basic, None).unwrap();

        let session = session_with(PlanTier::Pro);
        assert_eq!(gate.auth_succeeded(&session), GateEffect::Settled);
        assert_eq!(gate.active_screen(), Screen::Builder);
    }

    #[test]
    fn test_auth_success_without_pending_selection_moves_nothing() {
        let mut gate = GateController::new();
        let session = session_with(PlanTier::Free);
        assert_eq!(gate.auth_succeeded(&session), GateEffect::Settled);
        assert_eq!(gate.state(), GateState::Browsing);
    }

    #[test]
    fn test_closing_auth_prompt_abandons_selection() {
        let mut gate = GateController::new();
        gate.select_plan(PlanTier::Pro, None).unwrap();

        gate.auth_prompt_closed();
        assert_eq!(gate.state(), GateState::Browsing);
        assert!(gate.pending_selection().is_none());
    }

    #[test]
    fn test_purchase_failure_returns_to_browsing_with_plan_untouched() {
        let mut gate = GateController::new();
        let mut sessions = make_sessions();
        sessions.register("A", "a@x.com", "pw").unwrap();

        let session = sessions.session().unwrap().clone();
        let effect = gate.select_plan(PlanTier::Basic, Some(&session)).unwrap();
        assert_eq!(effect, GateEffect::StartPurchase(PlanTier::Basic));

        gate.purchase_failed(PlanTier::Basic);
        assert_eq!(gate.state(), GateState::Browsing);
        let stored = sessions.accounts().find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(stored.plan, PlanTier::Free);
    }

    #[test]
    fn test_selection_rejected_while_purchase_in_flight() {
        let mut gate = GateController::new();
        let session = session_with(PlanTier::Free);
        gate.select_plan(PlanTier::Basic, Some(&session)).unwrap();

        let err = gate.select_plan(PlanTier::Pro, Some(&session)).unwrap_err();
        assert_eq!(err, GateRejection::PurchaseInFlight);
    }

    #[test]
    fn test_selection_rejected_while_auth_prompt_open() {
        let mut gate = GateController::new();
        gate.select_plan(PlanTier::Basic, None).unwrap();

        let err = gate.select_plan(PlanTier::Pro, None).unwrap_err();
        assert_eq!(err, GateRejection::AuthPromptOpen);
    }

    #[test]
    fn test_logout_forces_browsing_from_builder() {
        let mut gate = GateController::new();
        let session = session_with(PlanTier::Pro);
        gate.select_plan(PlanTier::Pro, Some(&session)).unwrap();
        assert_eq!(gate.active_screen(), Screen::Builder);

        gate.session_cleared();
        assert_eq!(gate.state(), GateState::Browsing);
    }

    #[test]
    fn test_logout_mid_purchase_wins_over_late_confirmation() {
        let mut gate = GateController::new();
        let session = session_with(PlanTier::Free);
        gate.select_plan(PlanTier::Pro, Some(&session)).unwrap();
        assert!(gate.purchase_in_progress());

        gate.session_cleared();
        // The confirmation lands after the reset and must not unlock anything.
        gate.purchase_succeeded(PlanTier::Pro);
        assert_eq!(gate.state(), GateState::Browsing);
    }

    #[test]
    fn test_navigate_home_leaves_builder() {
        let mut gate = GateController::new();
        let session = session_with(PlanTier::Basic);
        gate.select_plan(PlanTier::Basic, Some(&session)).unwrap();

        gate.navigate(NavTarget::Home);
        assert_eq!(gate.state(), GateState::Browsing);
    }

    #[test]
    fn test_navigate_builder_keeps_unlocked_builder() {
        let mut gate = GateController::new();
        let session = session_with(PlanTier::Basic);
        gate.select_plan(PlanTier::Basic, Some(&session)).unwrap();

        gate.navigate(NavTarget::Builder);
        assert_eq!(
            gate.state(),
            GateState::BuilderActive {
                tier: PlanTier::Basic
            }
        );
    }

    #[test]
    fn test_navigate_is_noop_outside_builder() {
        let mut gate = GateController::new();
        gate.navigate(NavTarget::Pricing);
        assert_eq!(gate.state(), GateState::Browsing);

        gate.select_plan(PlanTier::Basic, None).unwrap();
        gate.navigate(NavTarget::Home);
        // Dismissing the auth prompt is its own event; navigation ignores it.
        assert_eq!(gate.active_screen(), Screen::AuthPrompt);
    }
}
