//! Shared constructors for handler tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::auth::session::SessionManager;
use crate::billing::{CheckoutGateway, SimulatedCheckout};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::LatexExporter;
use crate::state::{AppCore, AppState};
use crate::storage::{KeyValueStore, MemoryStore};

/// Fresh state over an in-memory store, with the checkout gateway of the
/// test's choosing.
pub fn make_state(checkout: Arc<dyn CheckoutGateway>) -> AppState {
    let kv = Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>;
    let sessions = SessionManager::restore(kv).unwrap();
    AppState {
        core: Arc::new(Mutex::new(AppCore::new(sessions))),
        llm: LlmClient::new("test-key".to_string()),
        checkout,
        exporter: Arc::new(LatexExporter),
        config: Config {
            gemini_api_key: "test-key".to_string(),
            data_dir: "./data".into(),
            port: 0,
            rust_log: "info".to_string(),
            checkout_delay_ms: 0,
        },
    }
}

pub fn instant_checkout() -> Arc<dyn CheckoutGateway> {
    Arc::new(SimulatedCheckout::new(Duration::ZERO))
}
