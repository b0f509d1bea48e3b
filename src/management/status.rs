use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::types::{PlaylistHandle, SearchTerm};

/// Shared, operator-facing view of the session served on `/status`.
pub type StatusBoard = Arc<RwLock<SessionStatus>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub auth_error: Option<String>,
    pub polling: bool,
    pub active_playlist: Option<PlaylistHandle>,
    pub cached_tracks: usize,
    pub cycles: u64,
    pub inserted: u64,
    pub last_track: Option<SearchTerm>,
    pub last_outcome: Option<String>,
    pub last_error: Option<String>,
    pub last_poll_at: Option<String>,
}

pub fn new_status_board() -> StatusBoard {
    Arc::new(RwLock::new(SessionStatus::default()))
}
