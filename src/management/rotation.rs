use tracing::info;

use crate::{
    error::{Error, Result},
    spotify::PlaylistService,
    types::{PlaylistHandle, PlaylistInfo},
    utils,
};

/// Builds a handle, parsing the ordinal once from the display name.
pub fn handle_from_info(info: PlaylistInfo) -> PlaylistHandle {
    let ordinal = utils::ordinal_or_default(&info.name);
    PlaylistHandle {
        id: info.id,
        name: info.name,
        track_count: info.track_count,
        ordinal,
    }
}

/// Capacity-based playlist rotation.
///
/// Playlists are named `"{prefix} {ordinal}"`. Once the active one holds
/// `capacity` tracks a successor with the next ordinal is created and becomes
/// the insert target. The ordinal travels on the [`PlaylistHandle`], so the
/// display name is only parsed when a playlist is first discovered.
#[derive(Debug, Clone)]
pub struct PlaylistRotator {
    prefix: String,
    capacity: u32,
}

impl PlaylistRotator {
    pub fn new(prefix: impl Into<String>, capacity: u32) -> Self {
        Self {
            prefix: prefix.into(),
            capacity: capacity.max(1),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the playlist to use for the next insert.
    ///
    /// Re-fetches the authoritative track count of `playlist`; below capacity
    /// the same playlist comes back with the refreshed count, otherwise the
    /// freshly created successor.
    ///
    /// # Errors
    ///
    /// Any failure is wrapped in [`Error::CapacityCheck`]. The caller keeps
    /// its current handle in that case.
    pub async fn after_insert(
        &self,
        service: &dyn PlaylistService,
        playlist: &PlaylistHandle,
    ) -> Result<PlaylistHandle> {
        let current = service
            .get_playlist(&playlist.id)
            .await
            .map_err(Error::capacity)?;

        let refreshed = PlaylistHandle {
            name: current.name,
            track_count: current.track_count,
            ..playlist.clone()
        };
        self.rotate_if_full(service, refreshed).await
    }

    /// Creates the successor when `playlist` is at or above capacity.
    pub async fn rotate_if_full(
        &self,
        service: &dyn PlaylistService,
        playlist: PlaylistHandle,
    ) -> Result<PlaylistHandle> {
        if playlist.track_count < self.capacity {
            return Ok(playlist);
        }

        let ordinal = playlist.ordinal.checked_add(1).ok_or_else(|| {
            Error::capacity(Error::malformed(format!(
                "playlist \"{}\" has no successor ordinal",
                playlist.name
            )))
        })?;
        let name = utils::playlist_name(&self.prefix, ordinal);
        let created = service
            .create_playlist(&name)
            .await
            .map_err(Error::capacity)?;

        info!(
            "Playlist \"{}\" reached {} tracks, continuing in \"{}\"",
            playlist.name, playlist.track_count, created.name
        );

        Ok(PlaylistHandle {
            id: created.id,
            name: created.name,
            track_count: created.track_count,
            ordinal,
        })
    }

    /// Chooses the playlist a new session starts inserting into.
    ///
    /// An explicit id wins. Otherwise the prefixed playlist with the highest
    /// ordinal is used, and `"{prefix} 1"` is created when none exists. A
    /// full playlist is rotated straight away.
    pub async fn select_active(
        &self,
        service: &dyn PlaylistService,
        explicit_id: Option<&str>,
    ) -> Result<PlaylistHandle> {
        let handle = match explicit_id {
            Some(id) => handle_from_info(service.get_playlist(id).await?),
            None => {
                let existing = service
                    .list_playlists(&self.prefix)
                    .await?
                    .into_iter()
                    .map(handle_from_info)
                    .max_by_key(|h| h.ordinal);

                match existing {
                    Some(handle) => handle,
                    None => {
                        let name = utils::playlist_name(&self.prefix, utils::DEFAULT_PLAYLIST_ORDINAL);
                        info!("No playlist named \"{}*\" yet, creating \"{}\"", self.prefix, name);
                        handle_from_info(service.create_playlist(&name).await?)
                    }
                }
            }
        };

        self.rotate_if_full(service, handle).await
    }
}
