//! Entitlement resolution — a pure function of the requested tier and the
//! current session. No I/O, no side effects; the gate acts on the result.

use crate::models::account::Session;
use crate::models::plan::PlanTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entitlement {
    /// The current tier satisfies the request; unlock the builder.
    Grant,
    /// No authenticated identity; the user must sign in first.
    RequireAuth,
    /// Authenticated but under-tiered; payment for the requested tier needed.
    RequirePurchase(PlanTier),
}

pub fn resolve(requested: PlanTier, session: Option<&Session>) -> Entitlement {
    match session {
        None => Entitlement::RequireAuth,
        Some(s) if s.plan >= requested => Entitlement::Grant,
        Some(_) => Entitlement::RequirePurchase(requested),
    }
}
