//! # Management Module
//!
//! Session state of a running mirror: the Spotify credential, the dedup
//! cache, the active playlist and its rotation, and the poll loop that ties
//! them together.

mod auth;
mod cache;
mod poller;
pub mod resolver;
mod rotation;
mod session;
mod status;

pub use auth::TokenManager;
pub use cache::DedupCache;
pub use poller::{Poller, PollerHandle};
pub use rotation::{PlaylistRotator, handle_from_info};
pub use session::{CycleOutcome, Session};
pub use status::{SessionStatus, StatusBoard, new_status_board};
