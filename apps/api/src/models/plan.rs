use serde::{Deserialize, Serialize};

/// Plan tier, totally ordered by entitlement level: `Free < Basic < Pro`.
///
/// Declaration order carries the ordering (`derive(Ord)`), which is what the
/// entitlement resolver compares. Records written before tiers existed carry
/// no plan field and deserialize to `Free`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum PlanTier {
    #[default]
    Free,
    Basic,
    Pro,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Basic => "Basic",
            PlanTier::Pro => "Pro",
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_total_order() {
        assert!(PlanTier::Free < PlanTier::Basic);
        assert!(PlanTier::Basic < PlanTier::Pro);
        assert!(PlanTier::Pro >= PlanTier::Pro);
    }

    #[test]
    fn test_tier_default_is_free() {
        assert_eq!(PlanTier::default(), PlanTier::Free);
    }

    #[test]
    fn test_tier_serde_names_match_display() {
        let json = serde_json::to_string(&PlanTier::Basic).unwrap();
        assert_eq!(json, "\"Basic\"");
        let tier: PlanTier = serde_json::from_str("\"Pro\"").unwrap();
        assert_eq!(tier, PlanTier::Pro);
    }
}
