use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    spotify::PlaylistService,
    types::{ResolvedTrack, SearchTerm, Track},
};

/// Artist, album and track joined into one query.
pub fn full_query(term: &SearchTerm) -> String {
    [term.artist.as_str(), term.album.as_str(), term.track.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The degraded query without the album.
pub fn fallback_query(term: &SearchTerm) -> String {
    [term.artist.as_str(), term.track.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps a [`SearchTerm`] to a catalog track with a two-tier search.
///
/// The provider's ranking is trusted: the first hit of the first non-empty
/// tier wins. Broadcast album names often differ from catalog naming, so an
/// empty album-qualified search is retried as artist + track.
///
/// # Errors
///
/// [`Error::NotFound`] when both tiers come back empty; search failures are
/// propagated unchanged.
pub async fn resolve(service: &dyn PlaylistService, term: &SearchTerm) -> Result<ResolvedTrack> {
    let primary = full_query(term);
    debug!("Searching catalog for \"{}\"", primary);
    if let Some(track) = service.search(&primary).await?.into_iter().next() {
        return Ok(resolved(track));
    }

    let fallback = fallback_query(term);
    if fallback == primary {
        return Err(Error::NotFound(primary));
    }

    info!(
        "Couldn't find the song. Trying without an album: \"{}\"",
        fallback
    );
    match service.search(&fallback).await?.into_iter().next() {
        Some(track) => Ok(resolved(track)),
        None => Err(Error::NotFound(fallback)),
    }
}

fn resolved(track: Track) -> ResolvedTrack {
    ResolvedTrack {
        id: track.id,
        uri: track.uri,
        name: track.name,
    }
}
