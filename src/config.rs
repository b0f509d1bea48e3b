//! Configuration management for radiolist.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Spotify credentials are required; everything that
//! shapes the polling behaviour (channel, interval, capacity, timeouts) has a
//! default matching the service's historical behaviour.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::error::{Error, Result};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_SCOPE: &str = "playlist-modify-private playlist-modify-public";
pub const DEFAULT_RADIO_METADATA_URL: &str =
    "https://www.siriusxm.com/metadata/pdt/en-us/json/channels";
pub const DEFAULT_RADIO_CHANNEL: &str = "purejazz";
pub const DEFAULT_RADIO_TIME_OFFSET_HOURS: i64 = 4;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 120;
pub const DEFAULT_PLAYLIST_PREFIX: &str = "Sirius Real Jazz";
pub const DEFAULT_PLAYLIST_CAPACITY: u32 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOKEN_REFRESH_SECS: u64 = 30 * 60;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `radiolist/.env` inside the platform-specific
/// local data directory. A missing file is not an error: every value can also
/// come straight from the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/radiolist/.env`
/// - macOS: `~/Library/Application Support/radiolist/.env`
/// - Windows: `%LOCALAPPDATA%/radiolist/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::config(e.to_string()))?;
    }
    Ok(())
}

/// Location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("radiolist/.env");
    path
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::config(format!("{key} must be set"))),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match optional(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("{key} has an invalid value: {raw}"))),
        None => Ok(default),
    }
}

fn seconds_or(key: &str, default: u64) -> Result<Duration> {
    nonzero_duration(key, parsed_or(key, default)?)
}

/// Turns a number of seconds read from `key` into a [`Duration`].
///
/// # Errors
///
/// Zero is rejected with [`Error::Config`]: intervals and timeouts must be
/// positive.
pub fn nonzero_duration(key: &str, secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(Error::config(format!("{key} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}

/// Address the local HTTP server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Spotify user that owns newly created playlists (`SPOTIFY_USER_ID`).
pub fn spotify_user() -> Result<String> {
    required("SPOTIFY_USER_ID")
}

/// Client ID from the Spotify developer dashboard (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Client secret from the Spotify developer dashboard (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// The secret is only ever sent to the token endpoint and must never be logged.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// OAuth redirect URI registered with Spotify (`SPOTIFY_API_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> Result<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Scopes requested during authorization (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

/// Spotify authorization endpoint (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    or_default("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

/// Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Spotify token exchange endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Credentials and endpoints for the Spotify side.
#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub user_id: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

/// Where and how the broadcast metadata is fetched.
#[derive(Debug, Clone)]
pub struct RadioSettings {
    pub metadata_url: String,
    pub channel: String,
    /// Hours added to the local clock before computing the timestamp bucket.
    pub time_offset_hours: i64,
}

impl Default for RadioSettings {
    fn default() -> Self {
        Self {
            metadata_url: DEFAULT_RADIO_METADATA_URL.to_string(),
            channel: DEFAULT_RADIO_CHANNEL.to_string(),
            time_offset_hours: DEFAULT_RADIO_TIME_OFFSET_HOURS,
        }
    }
}

/// Poll loop and playlist rotation parameters.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub playlist_prefix: String,
    pub playlist_id: Option<String>,
    pub capacity: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            playlist_prefix: DEFAULT_PLAYLIST_PREFIX.to_string(),
            playlist_id: None,
            capacity: DEFAULT_PLAYLIST_CAPACITY,
        }
    }
}

/// Full runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub spotify: SpotifySettings,
    pub radio: RadioSettings,
    pub poll: PollSettings,
    pub request_timeout: Duration,
    pub token_refresh: Duration,
    /// Secret used to sign the OAuth `state` cookie.
    pub state_secret: Option<String>,
}

impl Settings {
    /// Resolves every setting from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a required key is missing, a numeric
    /// key cannot be parsed or a duration is zero.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_addr: server_addr(),
            spotify: Self::spotify_from_env()?,
            radio: Self::radio_from_env()?,
            poll: PollSettings {
                interval: seconds_or("POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?,
                playlist_prefix: or_default("PLAYLIST_PREFIX", DEFAULT_PLAYLIST_PREFIX),
                playlist_id: optional("PLAYLIST_ID"),
                capacity: parsed_or("PLAYLIST_CAPACITY", DEFAULT_PLAYLIST_CAPACITY)?,
            },
            request_timeout: Self::request_timeout_from_env()?,
            token_refresh: seconds_or("TOKEN_REFRESH_SECS", DEFAULT_TOKEN_REFRESH_SECS)?,
            state_secret: optional("STATE_SECRET"),
        })
    }

    /// Resolves only what the unauthenticated `now-playing` command needs.
    pub fn radio_from_env() -> Result<RadioSettings> {
        Ok(RadioSettings {
            metadata_url: or_default("RADIO_METADATA_URL", DEFAULT_RADIO_METADATA_URL),
            channel: or_default("RADIO_CHANNEL", DEFAULT_RADIO_CHANNEL),
            time_offset_hours: parsed_or(
                "RADIO_TIME_OFFSET_HOURS",
                DEFAULT_RADIO_TIME_OFFSET_HOURS,
            )?,
        })
    }

    /// Request timeout applied to every outbound call.
    pub fn request_timeout_from_env() -> Result<Duration> {
        seconds_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    fn spotify_from_env() -> Result<SpotifySettings> {
        Ok(SpotifySettings {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
            redirect_uri: spotify_redirect_uri()?,
            user_id: spotify_user()?,
            scope: spotify_scope(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
        })
    }
}
