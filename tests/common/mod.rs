#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use radiolist::{
    error::{Error, Result},
    management::{DedupCache, PlaylistRotator, Session, new_status_board},
    radio::MetadataSource,
    spotify::PlaylistService,
    types::{PlaylistHandle, PlaylistInfo, SearchTerm, Track},
};

pub fn term(artist: &str, album: &str, track: &str) -> SearchTerm {
    SearchTerm {
        artist: artist.to_string(),
        album: album.to_string(),
        track: track.to_string(),
    }
}

pub fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{id}"),
    }
}

pub fn handle(id: &str, name: &str, track_count: u32, ordinal: u32) -> PlaylistHandle {
    PlaylistHandle {
        id: id.to_string(),
        name: name.to_string(),
        track_count,
        ordinal,
    }
}

/// Metadata source that replays a fixed script, one entry per fetch.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<SearchTerm>>>,
    pub fetches: Mutex<usize>,
}

impl ScriptedSource {
    pub fn new(terms: Vec<SearchTerm>) -> Self {
        Self {
            script: Mutex::new(terms.into_iter().map(Ok).collect()),
            fetches: Mutex::new(0),
        }
    }

    pub fn push(&self, entry: Result<SearchTerm>) {
        self.script.lock().unwrap().push_back(entry);
    }
}

#[async_trait]
impl MetadataSource for ScriptedSource {
    async fn fetch_current_track(&self) -> Result<SearchTerm> {
        *self.fetches.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::malformed("script exhausted")))
    }
}

/// Metadata source whose fetches take a scripted amount of (tokio) time.
/// Every fetch reports an off-air payload; only the timing matters.
pub struct PacedSource {
    delays: Mutex<VecDeque<Duration>>,
    pub started: Mutex<Vec<tokio::time::Instant>>,
}

impl PacedSource {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self {
            delays: Mutex::new(delays.into()),
            started: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MetadataSource for PacedSource {
    async fn fetch_current_track(&self) -> Result<SearchTerm> {
        self.started.lock().unwrap().push(tokio::time::Instant::now());
        let delay = self.delays.lock().unwrap().pop_front().unwrap_or_default();
        tokio::time::sleep(delay).await;
        Err(Error::malformed("off air"))
    }
}

#[derive(Debug, Clone)]
pub struct MockPlaylist {
    pub id: String,
    pub name: String,
    pub track_count: u32,
    pub track_ids: Vec<String>,
}

/// In-memory playlist provider recording every call.
#[derive(Default)]
pub struct MockService {
    pub search_results: Mutex<HashMap<String, Vec<Track>>>,
    pub search_calls: Mutex<Vec<String>>,
    pub add_calls: Mutex<Vec<(String, String)>>,
    pub created: Mutex<Vec<String>>,
    pub playlists: Mutex<Vec<MockPlaylist>>,
    pub fail_add: AtomicBool,
    pub fail_get: AtomicBool,
    pub fail_search: AtomicBool,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(self, query: &str, tracks: Vec<Track>) -> Self {
        self.search_results
            .lock()
            .unwrap()
            .insert(query.to_string(), tracks);
        self
    }

    pub fn with_playlist(self, id: &str, name: &str, track_count: u32, track_ids: &[&str]) -> Self {
        self.playlists.lock().unwrap().push(MockPlaylist {
            id: id.to_string(),
            name: name.to_string(),
            track_count,
            track_ids: track_ids.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn adds(&self) -> Vec<(String, String)> {
        self.add_calls.lock().unwrap().clone()
    }

    pub fn playlist(&self, id: &str) -> Option<MockPlaylist> {
        self.playlists
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn info(p: &MockPlaylist) -> PlaylistInfo {
        PlaylistInfo {
            id: p.id.clone(),
            name: p.name.clone(),
            track_count: p.track_count,
        }
    }
}

#[async_trait]
impl PlaylistService for MockService {
    async fn search(&self, query: &str) -> Result<Vec<Track>> {
        self.search_calls.lock().unwrap().push(query.to_string());
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(Error::Timeout);
        }
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_track(&self, playlist_id: &str, track_uri: &str) -> Result<()> {
        self.add_calls
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), track_uri.to_string()));
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(Error::Timeout);
        }

        let mut playlists = self.playlists.lock().unwrap();
        let playlist = playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| Error::malformed("unknown playlist"))?;
        playlist.track_count += 1;
        playlist
            .track_ids
            .push(track_uri.trim_start_matches("spotify:track:").to_string());
        Ok(())
    }

    async fn get_playlist(&self, playlist_id: &str) -> Result<PlaylistInfo> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Error::Timeout);
        }
        self.playlists
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == playlist_id)
            .map(Self::info)
            .ok_or_else(|| Error::malformed("unknown playlist"))
    }

    async fn create_playlist(&self, name: &str) -> Result<PlaylistInfo> {
        self.created.lock().unwrap().push(name.to_string());
        let mut playlists = self.playlists.lock().unwrap();
        let created = MockPlaylist {
            id: format!("created-{}", playlists.len() + 1),
            name: name.to_string(),
            track_count: 0,
            track_ids: Vec::new(),
        };
        playlists.push(created.clone());
        Ok(Self::info(&created))
    }

    async fn list_playlists(&self, prefix: &str) -> Result<Vec<PlaylistInfo>> {
        Ok(self
            .playlists
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.name.starts_with(prefix))
            .map(Self::info)
            .collect())
    }

    async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<String>> {
        self.playlist(playlist_id)
            .map(|p| p.track_ids)
            .ok_or_else(|| Error::malformed("unknown playlist"))
    }
}

/// Session over the given doubles, targeting `playlist` with an empty cache.
pub fn session_for(
    source: Arc<ScriptedSource>,
    service: Arc<MockService>,
    playlist: PlaylistHandle,
    cache: DedupCache,
) -> Session {
    Session::new(
        source,
        service,
        PlaylistRotator::new("Sirius Real Jazz", 100),
        playlist,
        cache,
        new_status_board(),
    )
}
