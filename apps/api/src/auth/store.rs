//! Credential Store — the account record set, persisted as one email-keyed
//! map under a single storage key. Emails are lowercased at this boundary so
//! lookups and duplicate checks are case-insensitive everywhere above it.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::auth::AuthError;
use crate::models::account::Account;
use crate::models::plan::PlanTier;
use crate::storage::{KeyValueStore, StorageError};

const ACCOUNTS_KEY: &str = "accounts";

pub struct CredentialStore {
    kv: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn load(&self) -> Result<BTreeMap<String, Account>, StorageError> {
        match self.kv.get(ACCOUNTS_KEY)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(BTreeMap::new()),
        }
    }

    fn save(&self, accounts: &BTreeMap<String, Account>) -> Result<(), StorageError> {
        self.kv.set(ACCOUNTS_KEY, serde_json::to_value(accounts)?)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorageError> {
        Ok(self.load()?.get(&email.to_lowercase()).cloned())
    }

    /// Inserts a new account. Fails with `DuplicateAccount` if an account with
    /// the same email (case-insensitive) already exists.
    pub fn insert(&self, account: Account) -> Result<(), AuthError> {
        let mut accounts = self.load()?;
        let key = account.email.to_lowercase();
        if accounts.contains_key(&key) {
            return Err(AuthError::DuplicateAccount);
        }
        accounts.insert(key, account);
        self.save(&accounts)?;
        Ok(())
    }

    /// Writes a new plan tier for the given email. No-op if the email is
    /// absent. The caller-supplied tier is authoritative — no downgrade check.
    pub fn update_plan(&self, email: &str, new_tier: PlanTier) -> Result<(), StorageError> {
        let mut accounts = self.load()?;
        if let Some(account) = accounts.get_mut(&email.to_lowercase()) {
            account.plan = new_tier;
            self.save(&accounts)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    fn make_store() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryStore::new()))
    }

    fn make_account(email: &str) -> Account {
        Account {
            email: email.to_lowercase(),
            display_name: "Test".to_string(),
            credential_hash: "hash".to_string(),
            plan: PlanTier::Free,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_then_find() {
        let store = make_store();
        store.insert(make_account("a@x.com")).unwrap();

        let found = store.find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(found.email, "a@x.com");
        assert_eq!(found.plan, PlanTier::Free);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let store = make_store();
        store.insert(make_account("a@x.com")).unwrap();
        assert!(store.find_by_email("A@X.COM").unwrap().is_some());
    }

    #[test]
    fn test_duplicate_email_differing_only_in_case_rejected() {
        let store = make_store();
        store.insert(make_account("a@x.com")).unwrap();

        let mut second = make_account("a@x.com");
        second.email = "A@X.com".to_string();
        let err = store.insert(second).unwrap_err();
        assert!(matches!(err, AuthError::DuplicateAccount));
    }

    #[test]
    fn test_update_plan_persists() {
        let store = make_store();
        store.insert(make_account("a@x.com")).unwrap();
        store.update_plan("a@x.com", PlanTier::Pro).unwrap();

        let found = store.find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(found.plan, PlanTier::Pro);
    }

    #[test]
    fn test_update_plan_absent_email_is_noop() {
        let store = make_store();
        store.update_plan("ghost@x.com", PlanTier::Pro).unwrap();
        assert!(store.find_by_email("ghost@x.com").unwrap().is_none());
    }
}
