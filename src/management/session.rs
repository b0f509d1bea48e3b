use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    management::{DedupCache, PlaylistRotator, StatusBoard, resolver},
    radio::MetadataSource,
    spotify::PlaylistService,
    types::{PlaylistHandle, SearchTerm},
};

/// How a poll cycle ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The radio is still airing the track seen last cycle.
    SameSong,
    /// A new track was inserted; `rotated` tells whether the next insert
    /// goes to a freshly created playlist.
    Inserted {
        track_id: String,
        playlist_id: String,
        rotated: bool,
    },
}

struct CycleState {
    cache: DedupCache,
    playlist: PlaylistHandle,
    previous: Option<SearchTerm>,
}

/// Everything one mirroring session needs, owned in one place.
///
/// The dedup cache, the active playlist and the last seen track live behind a
/// single mutex held for a whole cycle. Overlapping calls to
/// [`Session::poll_once`] therefore run one after the other, and the cache
/// check and add can never interleave.
pub struct Session {
    source: Arc<dyn MetadataSource>,
    service: Arc<dyn PlaylistService>,
    rotator: PlaylistRotator,
    state: Mutex<CycleState>,
    status: StatusBoard,
}

impl Session {
    pub fn new(
        source: Arc<dyn MetadataSource>,
        service: Arc<dyn PlaylistService>,
        rotator: PlaylistRotator,
        playlist: PlaylistHandle,
        cache: DedupCache,
        status: StatusBoard,
    ) -> Self {
        Self {
            source,
            service,
            rotator,
            state: Mutex::new(CycleState {
                cache,
                playlist,
                previous: None,
            }),
            status,
        }
    }

    /// Picks the active playlist and seeds the dedup cache from its contents.
    pub async fn bootstrap(
        source: Arc<dyn MetadataSource>,
        service: Arc<dyn PlaylistService>,
        rotator: PlaylistRotator,
        explicit_playlist: Option<&str>,
        status: StatusBoard,
    ) -> Result<Self> {
        let playlist = rotator
            .select_active(service.as_ref(), explicit_playlist)
            .await?;

        let mut cache = DedupCache::new();
        cache.seed_from(service.list_tracks(&playlist.id).await?);
        info!(
            "Mirroring into \"{}\" ({} tracks, {} cached ids)",
            playlist.name,
            playlist.track_count,
            cache.len()
        );

        {
            let mut board = status.write().await;
            board.active_playlist = Some(playlist.clone());
            board.cached_tracks = cache.len();
        }

        Ok(Self::new(source, service, rotator, playlist, cache, status))
    }

    pub async fn active_playlist(&self) -> PlaylistHandle {
        self.state.lock().await.playlist.clone()
    }

    pub async fn cached_tracks(&self) -> usize {
        self.state.lock().await.cache.len()
    }

    pub async fn is_cached(&self, track_id: &str) -> bool {
        self.state.lock().await.cache.contains(track_id)
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    /// Runs one fetch, resolve, dedup, insert, rotate cycle.
    ///
    /// Every failure ends only this cycle: it is logged, recorded on the
    /// status board and returned so callers can inspect its kind.
    pub async fn poll_once(&self) -> Result<CycleOutcome> {
        let mut state = self.state.lock().await;
        let result = self.run_cycle(&mut state).await;

        match &result {
            Ok(CycleOutcome::SameSong) => debug!("Song is the same."),
            Ok(CycleOutcome::Inserted {
                track_id, rotated, ..
            }) => info!(track_id = %track_id, rotated = *rotated, "Added song successfully"),
            Err(Error::DuplicateTrack(id)) => info!("Track {} was already added, skipping", id),
            Err(e) => warn!(kind = e.kind(), "Poll cycle failed: {}", e),
        }

        let mut board = self.status.write().await;
        board.cycles += 1;
        board.last_poll_at = Some(Utc::now().to_rfc3339());
        board.active_playlist = Some(state.playlist.clone());
        board.cached_tracks = state.cache.len();
        board.last_track = state.previous.clone();
        match &result {
            Ok(CycleOutcome::SameSong) => {
                board.last_outcome = Some("same_song".to_string());
            }
            Ok(CycleOutcome::Inserted { .. }) => {
                board.inserted += 1;
                board.last_outcome = Some("inserted".to_string());
                board.last_error = None;
            }
            Err(e) => {
                board.last_outcome = Some(e.kind().to_string());
                board.last_error = Some(e.to_string());
            }
        }

        result
    }

    async fn run_cycle(&self, state: &mut CycleState) -> Result<CycleOutcome> {
        let term = self.source.fetch_current_track().await?;

        // artist and album spellings drift between polls of the same song
        if state
            .previous
            .as_ref()
            .is_some_and(|previous| previous.track == term.track)
        {
            return Ok(CycleOutcome::SameSong);
        }

        info!(
            "Current song is: {} - {} - {}",
            term.artist, term.album, term.track
        );
        state.previous = Some(term.clone());

        let track = resolver::resolve(self.service.as_ref(), &term).await?;

        // claimed before the write: a failed insert is not retried
        if !state.cache.insert_if_absent(&track.id) {
            return Err(Error::DuplicateTrack(track.id));
        }

        self.service
            .add_track(&state.playlist.id, &track.uri)
            .await?;
        state.playlist.track_count += 1;
        let playlist_id = state.playlist.id.clone();

        let rotated = match self
            .rotator
            .after_insert(self.service.as_ref(), &state.playlist)
            .await
        {
            Ok(next) => {
                let rotated = next.id != state.playlist.id;
                state.playlist = next;
                rotated
            }
            Err(e) => {
                warn!(kind = e.kind(), "Keeping playlist \"{}\": {}", state.playlist.name, e);
                false
            }
        };

        Ok(CycleOutcome::Inserted {
            track_id: track.id,
            playlist_id,
            rotated,
        })
    }
}
