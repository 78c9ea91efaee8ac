use std::sync::Arc;

use tokio::sync::RwLock;

use crate::report::Language;
use crate::session::ScoutingSession;

/// Shared handler state. Clones share the same session.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<ScoutingSession>>,
    /// Report language when a request does not pick one
    pub language: Language,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(session: ScoutingSession, language: Language, cors_origin: impl Into<String>) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            language,
            cors_origin: cors_origin.into(),
        }
    }
}
