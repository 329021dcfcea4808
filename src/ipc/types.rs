use crate::batches::{Batch, BatchDraft};
use crate::catalog::Catalog;
use crate::navigation::NavState;
use crate::session::Session;
use crate::threads::ThreadBoard;
use rusqlite::Connection;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub catalog: Catalog,
    pub session: Session,
    pub nav: NavState,
    pub draft: BatchDraft,
    pub batches: Vec<Batch>,
    pub threads: ThreadBoard,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            workspace: None,
            db: None,
            catalog: Catalog::demo(),
            session: Session::default(),
            nav: NavState::default(),
            draft: BatchDraft::default(),
            batches: Vec::new(),
            threads: ThreadBoard::demo(),
        }
    }

    /// Keeps page and dialog state in step with whoever is signed in. A new
    /// user never inherits the previous one's batch draft.
    pub fn after_session_change(&mut self) {
        let user_id = self.session.user_id();
        let user_changed = self.nav.sync_user(user_id);
        if user_id.is_none() || user_changed {
            self.draft = BatchDraft::default();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
