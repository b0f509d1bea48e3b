//! # Spotify Integration Module
//!
//! This module is the playlist-provider side of radiolist. It covers the
//! OAuth authorization-code exchange and every Web API call the mirror
//! needs, behind the [`PlaylistService`] trait so the poll loop can be driven
//! by test doubles.
//!
//! ## Architecture
//!
//! ```text
//! Poll loop (management::Session)
//!          ↓
//! PlaylistService trait
//!          ↓
//! SpotifyClient (reqwest, bearer token from TokenManager)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /search?type=track` - catalog lookup used by the resolver
//! - `POST /playlists/{id}/tracks` - insert one track
//! - `GET /playlists/{id}` - authoritative track count for rotation
//! - `GET /playlists/{id}/tracks` - cache seeding, followed across all pages
//! - `GET /me/playlists` - discovery of the active playlist by name prefix
//! - `POST /users/{user_id}/playlists` - successor playlist creation
//! - `POST /api/token` - code exchange and refresh ([`auth`])
//!
//! ## Error Handling
//!
//! No call is retried here. Every failure is returned to the poll loop as an
//! [`crate::error::Error`], and the next scheduled poll is the retry.

pub mod auth;
mod client;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{PlaylistInfo, Track},
};

pub use client::SpotifyClient;

/// The playlist-provider capabilities consumed by the mirror.
#[async_trait]
pub trait PlaylistService: Send + Sync {
    /// Free-text track search, ranked by the provider.
    async fn search(&self, query: &str) -> Result<Vec<Track>>;

    /// Appends one track (by URI) to a playlist.
    async fn add_track(&self, playlist_id: &str, track_uri: &str) -> Result<()>;

    /// Current name and authoritative size of a playlist.
    async fn get_playlist(&self, playlist_id: &str) -> Result<PlaylistInfo>;

    /// Creates an empty playlist owned by the configured user.
    async fn create_playlist(&self, name: &str) -> Result<PlaylistInfo>;

    /// The user's playlists whose name starts with `prefix`.
    async fn list_playlists(&self, prefix: &str) -> Result<Vec<PlaylistInfo>>;

    /// Identifiers of every track in a playlist.
    async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<String>>;
}
