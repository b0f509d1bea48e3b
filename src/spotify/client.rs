use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::{Error, Result},
    management::TokenManager,
    spotify::PlaylistService,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        GetUserPlaylistsResponse, Playlist, PlaylistInfo, PlaylistTracksPage, SearchResponse,
        Track,
    },
};

const SEARCH_LIMIT: u32 = 10;
const PLAYLIST_PAGE_LIMIT: u32 = 50;
const TRACK_PAGE_LIMIT: u32 = 100;

/// [`PlaylistService`] backed by the Spotify Web API.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    tokens: TokenManager,
    api_url: String,
    user_id: String,
    timeout: Duration,
}

impl SpotifyClient {
    pub fn new(
        client: Client,
        tokens: TokenManager,
        api_url: impl Into<String>,
        user_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            tokens,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
            timeout,
        }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let token = self.tokens.access_token().await;
        let response = request
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                service: "spotify",
                status,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PlaylistService for SpotifyClient {
    async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let limit = SEARCH_LIMIT.to_string();
        let url = reqwest::Url::parse_with_params(
            &format!("{}/search", self.api_url),
            &[("type", "track"), ("q", query), ("limit", limit.as_str())],
        )
        .map_err(|e| Error::config(format!("invalid SPOTIFY_API_URL: {e}")))?;

        let res: SearchResponse = self.get_json(url.as_str()).await?;
        Ok(res.tracks.map(|t| t.items).unwrap_or_default())
    }

    async fn add_track(&self, playlist_id: &str, track_uri: &str) -> Result<()> {
        let url = format!("{}/playlists/{}/tracks", self.api_url, playlist_id);
        debug!("POST {}", url);

        let body = AddTrackToPlaylistRequest {
            uris: vec![track_uri.to_string()],
        };
        let response = self.send(self.client.post(&url).json(&body)).await?;

        // the write already succeeded; the snapshot id is informational
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<AddTrackToPlaylistResponse>(&body) {
            Ok(ack) => debug!("Playlist {} now at snapshot {}", playlist_id, ack.snapshot_id),
            Err(_) => debug!("Playlist {} updated without a snapshot id", playlist_id),
        }
        Ok(())
    }

    async fn get_playlist(&self, playlist_id: &str) -> Result<PlaylistInfo> {
        let url = format!(
            "{}/playlists/{}?fields=id,name,tracks.total",
            self.api_url, playlist_id
        );
        let playlist: Playlist = self.get_json(&url).await?;
        Ok(playlist.into())
    }

    async fn create_playlist(&self, name: &str) -> Result<PlaylistInfo> {
        let url = format!("{}/users/{}/playlists", self.api_url, self.user_id);
        debug!("POST {}", url);

        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Tracks aired on the radio, collected by radiolist.".to_string(),
            public: false,
            collaborative: false,
        };
        let response = self.send(self.client.post(&url).json(&body)).await?;
        let playlist: Playlist = response.json().await?;
        Ok(playlist.into())
    }

    async fn list_playlists(&self, prefix: &str) -> Result<Vec<PlaylistInfo>> {
        let mut next = Some(format!(
            "{}/me/playlists?limit={}",
            self.api_url, PLAYLIST_PAGE_LIMIT
        ));
        let mut playlists = Vec::new();

        while let Some(url) = next {
            let page: GetUserPlaylistsResponse = self.get_json(&url).await?;
            playlists.extend(
                page.items
                    .into_iter()
                    .filter(|p| p.name.starts_with(prefix))
                    .map(PlaylistInfo::from),
            );
            next = page.next;
        }

        Ok(playlists)
    }

    async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<String>> {
        let mut next = Some(format!(
            "{}/playlists/{}/tracks?fields=items(track(id)),next&limit={}",
            self.api_url, playlist_id, TRACK_PAGE_LIMIT
        ));
        let mut ids = Vec::new();

        while let Some(url) = next {
            let page: PlaylistTracksPage = self.get_json(&url).await?;
            // local files and removed tracks come back without an id
            ids.extend(page.items.into_iter().filter_map(|i| i.track.and_then(|t| t.id)));
            next = page.next;
        }

        Ok(ids)
    }
}
