use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::auth::session::SessionManager;
use crate::billing::CheckoutGateway;
use crate::chat::ChatState;
use crate::config::Config;
use crate::gate::GateController;
use crate::llm_client::{LlmClient, WebSource};
use crate::models::document::{CoverLetterInfo, ResumeInfo};
use crate::render::DocumentExporter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Everything that mutates in response to UI events, behind one lock so
    /// transitions stay serialized the way a single-threaded event loop would
    /// run them. Never held across an await — checkout and generation calls
    /// happen between lock windows.
    pub core: Arc<Mutex<AppCore>>,
    pub llm: LlmClient,
    /// Pluggable payment confirmation. Default: SimulatedCheckout. Tests swap
    /// in a failing gateway.
    pub checkout: Arc<dyn CheckoutGateway>,
    pub exporter: Arc<dyn DocumentExporter>,
    pub config: Config,
}

impl AppState {
    pub fn lock_core(&self) -> MutexGuard<'_, AppCore> {
        self.core.lock().expect("application core lock poisoned")
    }
}

/// The serialized application core: session, gate, and the documents being
/// edited.
pub struct AppCore {
    pub sessions: SessionManager,
    pub gate: GateController,
    pub resume: ResumeInfo,
    pub cover_letter: CoverLetterInfo,
    /// Citations captured by the last search-grounded cover-letter draft.
    pub cover_letter_sources: Vec<WebSource>,
    /// Slot keys with a generation in flight; one per slot at a time.
    pub assists_in_flight: HashSet<String>,
    pub chat: ChatState,
}

impl AppCore {
    pub fn new(sessions: SessionManager) -> Self {
        Self {
            sessions,
            gate: GateController::new(),
            resume: ResumeInfo::starter(),
            cover_letter: CoverLetterInfo::starter(),
            cover_letter_sources: Vec::new(),
            assists_in_flight: HashSet::new(),
            chat: ChatState::new(),
        }
    }
}
