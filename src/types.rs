use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// What the radio says is on air, reduced to the fields used for searching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchTerm {
    pub artist: String,
    pub album: String,
    pub track: String,
}

/// A catalog match for a [`SearchTerm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTrack {
    pub id: String,
    pub uri: String,
    pub name: String,
}

/// The playlist currently receiving inserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistHandle {
    pub id: String,
    pub name: String,
    pub track_count: u32,
    pub ordinal: u32,
}

// Broadcast metadata payload. Every level is optional because the provider
// regularly answers with partial documents.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMetadataEnvelope {
    pub channel_metadata_response: Option<ChannelMetadataResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMetadataResponse {
    pub meta_data: Option<MetaData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    pub channel_id: Option<String>,
    pub current_event: Option<CurrentEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentEvent {
    pub artists: Option<EventArtists>,
    pub song: Option<EventSong>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventArtists {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventSong {
    pub name: Option<String>,
    pub album: Option<EventAlbum>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventAlbum {
    pub name: Option<String>,
}

#[derive(Tabled)]
pub struct NowPlayingTableRow {
    pub channel: String,
    pub artist: String,
    pub album: String,
    pub track: String,
}

// Spotify Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Tracks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tracks {
    #[serde(default)]
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: PlaylistTracksRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    #[serde(default)]
    pub items: Vec<Playlist>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistItemTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemTrack {
    pub id: Option<String>,
}

/// Summary of a remote playlist as returned by [`crate::spotify::PlaylistService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistInfo {
    pub id: String,
    pub name: String,
    pub track_count: u32,
}

impl From<Playlist> for PlaylistInfo {
    fn from(p: Playlist) -> Self {
        Self {
            id: p.id,
            name: p.name,
            track_count: p.tracks.total,
        }
    }
}
