use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::plan::PlanTier;

/// Persisted account record, keyed by lowercased email in the account set.
///
/// `plan` is the only field mutated after creation (by plan upgrade). Records
/// written before plans existed deserialize with `plan = Free`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub display_name: String,
    pub credential_hash: String,
    #[serde(default)]
    pub plan: PlanTier,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The credential-free view handed to the rest of the application.
    pub fn to_session(&self) -> Session {
        Session {
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            plan: self.plan,
        }
    }
}

/// The currently authenticated identity. Exists if and only if the user is
/// authenticated; consistent with an account record at creation time, kept in
/// sync afterward only through explicit upgrade calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub plan: PlanTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_projection_omits_credential() {
        let account = Account {
            email: "a@x.com".to_string(),
            display_name: "A".to_string(),
            credential_hash: "deadbeef".to_string(),
            plan: PlanTier::Basic,
            created_at: Utc::now(),
        };

        let session = account.to_session();
        assert_eq!(session.email, "a@x.com");
        assert_eq!(session.plan, PlanTier::Basic);
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("deadbeef"));
    }

    #[test]
    fn test_account_missing_plan_defaults_to_free() {
        let raw = serde_json::json!({
            "email": "old@x.com",
            "display_name": "Old",
            "credential_hash": "abc",
            "created_at": "2024-01-01T00:00:00Z"
        });
        let account: Account = serde_json::from_value(raw).unwrap();
        assert_eq!(account.plan, PlanTier::Free);
    }
}
