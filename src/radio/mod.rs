//! # Radio Module
//!
//! Broadcast metadata side of the mirror: finds out what the configured
//! channel is airing right now.
//!
//! The [`MetadataSource`] trait is the seam the poll loop depends on;
//! [`RadioClient`] is the HTTP implementation used in production. Tests
//! substitute their own source to script sequences of songs.

mod client;

use async_trait::async_trait;

use crate::{
    error::{Error, Result},
    types::{ChannelMetadataEnvelope, SearchTerm},
};

pub use client::RadioClient;

/// Anything that can report the track currently on air.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Returns the current track, or [`Error::MalformedPayload`] when the
    /// provider answered without a usable current event.
    async fn fetch_current_track(&self) -> Result<SearchTerm>;
}

/// Reduces a raw metadata document to a [`SearchTerm`].
///
/// Artist and song name are mandatory. A missing album becomes an empty
/// string so the resolver goes straight to its artist+track query.
pub fn search_term_from_payload(payload: ChannelMetadataEnvelope) -> Result<SearchTerm> {
    let event = payload
        .channel_metadata_response
        .and_then(|r| r.meta_data)
        .and_then(|m| m.current_event)
        .ok_or_else(|| Error::malformed("response has no current event"))?;

    let artist = event
        .artists
        .and_then(|a| a.name)
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| Error::malformed("current event has no artist name"))?;

    let song = event
        .song
        .ok_or_else(|| Error::malformed("current event has no song"))?;
    let track = song
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| Error::malformed("current event has no song name"))?;
    let album = song.album.and_then(|a| a.name).unwrap_or_default();

    Ok(SearchTerm {
        artist: artist.trim().to_string(),
        album: album.trim().to_string(),
        track: track.trim().to_string(),
    })
}
