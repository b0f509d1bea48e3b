//! # API Module
//!
//! HTTP endpoints of the local radiolist server.
//!
//! ## Endpoints
//!
//! - [`login`] - starts the Spotify authorization-code flow. A random state,
//!   signed with the process secret, is stored in a cookie and passed to
//!   Spotify.
//! - [`callback`] - checks the returned state against the cookie, exchanges
//!   the code and starts the mirroring session.
//! - [`status`] - session health for operators: whether authorization
//!   succeeded, whether the poll loop runs, the active playlist and the
//!   outcome of the last cycle.
//! - [`health`] - liveness and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let app = radiolist::server::router(Arc::new(AppState::new(settings)?));
//! ```

mod callback;
mod health;
mod login;
mod status;

pub use callback::{callback, state_matches};
pub use health::health;
pub use login::login;
pub use status::status;

/// Cookie carrying the signed OAuth state between `/login` and `/callback`.
pub const STATE_COOKIE: &str = "spotify_auth_state";
