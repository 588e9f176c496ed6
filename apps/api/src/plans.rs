//! The pricing catalog. Static product data — tiers, prices, feature lists,
//! and the generation model each plan runs on.

use axum::Json;
use serde::Serialize;

use crate::models::plan::PlanTier;

/// Everything the pricing page (and the builder header) needs about one plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanDetails {
    pub tier: PlanTier,
    pub price: &'static str,
    pub features: Vec<&'static str>,
    pub model: &'static str,
    pub cta: &'static str,
}

pub fn pricing_plans() -> Vec<PlanDetails> {
    vec![
        PlanDetails {
            tier: PlanTier::Free,
            price: "$0",
            features: vec![
                "Standard Resume Templates",
                "AI-Powered Suggestions",
                "Cover Letter Generation",
                "Uses Powerful Gemini Pro Model",
            ],
            model: "gemini-2.5-pro",
            cta: "Start for Free",
        },
        PlanDetails {
            tier: PlanTier::Basic,
            price: "$20/month",
            features: vec![
                "Everything in Free",
                "Premium Resume Templates",
                "Advanced AI Analysis",
                "Uses Powerful Gemini Pro Model",
            ],
            model: "gemini-2.5-pro",
            cta: "Get Started",
        },
        PlanDetails {
            tier: PlanTier::Pro,
            price: "$50/month",
            features: vec![
                "Everything in Basic",
                "Priority AI Processing",
                "Multi-language Support",
                "Deep Job Description Analysis",
            ],
            model: "gemini-2.5-pro",
            cta: "Go Pro",
        },
    ]
}

pub fn details_for(tier: PlanTier) -> PlanDetails {
    pricing_plans()
        .into_iter()
        .find(|p| p.tier == tier)
        .expect("every tier has a catalog entry")
}

/// GET /api/v1/plans
pub async fn handle_list_plans() -> Json<Vec<PlanDetails>> {
    Json(pricing_plans())
}
