//! Session Manager — owns the current authenticated identity for the lifetime
//! of the process and mirrors it into the store so it survives restarts.
//!
//! Two states: Anonymous (`current == None`) and Authenticated. The session
//! projection never carries credential material. This type is the sole writer
//! of the persisted plan field.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::auth::credential::{hash_credential, verify_credential};
use crate::auth::store::CredentialStore;
use crate::auth::AuthError;
use crate::models::account::{Account, Session};
use crate::models::plan::PlanTier;
use crate::storage::{KeyValueStore, StorageError};

const SESSION_KEY: &str = "session";

pub struct SessionManager {
    accounts: CredentialStore,
    kv: Arc<dyn KeyValueStore>,
    current: Option<Session>,
}

impl SessionManager {
    /// Restores any persisted session from the store. A stored record that
    /// predates the plan field deserializes with `plan = Free`.
    pub fn restore(kv: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let current = match kv.get(SESSION_KEY)? {
            Some(value) => match serde_json::from_value::<Session>(value) {
                Ok(session) => {
                    info!("Restored session for {}", session.email);
                    Some(session)
                }
                Err(e) => {
                    warn!("Discarding unreadable persisted session: {e}");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            accounts: CredentialStore::new(Arc::clone(&kv)),
            kv,
            current,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn accounts(&self) -> &CredentialStore {
        &self.accounts
    }

    /// Creates an account on the Free tier and transitions to Authenticated.
    pub fn register(
        &mut self,
        display_name: &str,
        email: &str,
        raw_credential: &str,
    ) -> Result<Session, AuthError> {
        let account = Account {
            email: email.to_lowercase(),
            display_name: display_name.to_string(),
            credential_hash: hash_credential(raw_credential),
            plan: PlanTier::Free,
            created_at: Utc::now(),
        };
        let session = account.to_session();
        self.accounts.insert(account)?;

        info!("Registered account {}", session.email);
        self.set_current(Some(session.clone()))?;
        Ok(session)
    }

    /// Transitions to Authenticated on a correct email/credential pair. Absent
    /// accounts and hash mismatches are indistinguishable to the caller.
    pub fn login(&mut self, email: &str, raw_credential: &str) -> Result<Session, AuthError> {
        let account = self
            .accounts
            .find_by_email(email)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_credential(raw_credential, &account.credential_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let session = account.to_session();
        info!("Login for {}", session.email);
        self.set_current(Some(session.clone()))?;
        Ok(session)
    }

    /// Transitions to Anonymous and clears the persisted session. The stored
    /// account record is untouched.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        if let Some(session) = &self.current {
            info!("Logout for {}", session.email);
        }
        self.set_current(None)
    }

    /// Writes `new_tier` for the current account and updates the session
    /// projection in the same call, so no caller can observe one without the
    /// other. No-op while Anonymous. Any tier value overwrites the previous.
    pub fn upgrade_plan(&mut self, new_tier: PlanTier) -> Result<(), StorageError> {
        let Some(session) = self.current.clone() else {
            return Ok(());
        };

        self.accounts.update_plan(&session.email, new_tier)?;

        let updated = Session {
            plan: new_tier,
            ..session
        };
        info!("Plan for {} is now {new_tier}", updated.email);
        self.set_current(Some(updated))
    }

    fn set_current(&mut self, session: Option<Session>) -> Result<(), StorageError> {
        match &session {
            Some(s) => self.kv.set(SESSION_KEY, serde_json::to_value(s)?)?,
            None => self.kv.delete(SESSION_KEY)?,
        }
        self.current = session;
        Ok(())
    }
}
