#![allow(dead_code)]

//! Checkout — the asynchronous payment confirmation step, invoked only when
//! the resolver demands a purchase.
//!
//! The gateway is a trait so tests can swap in a failing processor. The
//! shipped implementation simulates the time a user spends on an external
//! checkout page and then confirms; the signature is fallible regardless, and
//! callers must treat a failure as "nothing happened" — no plan change, no
//! retry.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::plans::PlanDetails;

#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("Payment processor declined: {0}")]
    Declined(String),

    #[error("Payment processor unreachable: {0}")]
    Unreachable(String),
}

/// Carried in `AppState` as `Arc<dyn CheckoutGateway>`.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn checkout(&self, plan: &PlanDetails) -> Result<(), PurchaseError>;
}

/// Stand-in for a real processor redirect/callback: waits a fixed delay, then
/// confirms. Callers must not assume any particular duration beyond
/// "eventually resolves".
pub struct SimulatedCheckout {
    delay: Duration,
}

impl SimulatedCheckout {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CheckoutGateway for SimulatedCheckout {
    async fn checkout(&self, plan: &PlanDetails) -> Result<(), PurchaseError> {
        info!("Simulating checkout for the {} plan", plan.tier);
        tokio::time::sleep(self.delay).await;
        info!("Checkout confirmed for the {} plan", plan.tier);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::PlanTier;
    use crate::plans::details_for;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_checkout_resolves_after_delay() {
        let gateway = SimulatedCheckout::new(Duration::from_millis(1500));
        let result = gateway.checkout(&details_for(PlanTier::Basic)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_zero_delay_checkout_is_immediate() {
        let gateway = SimulatedCheckout::new(Duration::ZERO);
        assert!(gateway.checkout(&details_for(PlanTier::Pro)).await.is_ok());
    }
}
