use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use reqwest::Client;
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{
    api,
    config::{Settings, SpotifySettings},
    error::{Error, Result},
    management::{
        Poller, PollerHandle, PlaylistRotator, Session, StatusBoard, TokenManager,
        new_status_board,
    },
    radio::RadioClient,
    spotify::{self, SpotifyClient},
    types::PlaylistHandle,
    utils,
};

struct RunningSession {
    poller: PollerHandle,
    refresh_cancel: CancellationToken,
    refresh_task: JoinHandle<()>,
}

impl RunningSession {
    async fn stop(self) {
        self.refresh_cancel.cancel();
        self.poller.stop().await;
        if let Err(e) = self.refresh_task.await {
            if e.is_panic() {
                error!("Token refresh task crashed: {}", e);
            }
        }
    }
}

/// Shared state of the HTTP server and the session it starts.
pub struct AppState {
    settings: Settings,
    spotify: Arc<SpotifySettings>,
    http: Client,
    state_secret: String,
    status: StatusBoard,
    running: Mutex<Option<RunningSession>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let http = Client::builder().timeout(settings.request_timeout).build()?;
        let state_secret = settings
            .state_secret
            .clone()
            .unwrap_or_else(|| utils::generate_random_string(32));

        Ok(Self {
            spotify: Arc::new(settings.spotify.clone()),
            settings,
            http,
            state_secret,
            status: new_status_board(),
            running: Mutex::new(None),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn spotify_settings(&self) -> &SpotifySettings {
        &self.spotify
    }

    pub fn state_secret(&self) -> &str {
        &self.state_secret
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    pub async fn record_auth_error(&self, message: impl Into<String>) {
        let mut board = self.status.write().await;
        board.auth_error = Some(message.into());
    }

    /// Completes authorization and starts mirroring.
    ///
    /// Exchanges `code`, selects the active playlist, seeds the dedup cache
    /// and starts the poll loop and token refresh. A session started by an
    /// earlier callback is stopped first. On failure nothing is started and
    /// the error is kept on the status board.
    pub async fn start_session(&self, code: &str) -> Result<PlaylistHandle> {
        let result = self.try_start_session(code).await;
        if let Err(e) = &result {
            error!("Could not start mirroring session: {}", e);
            self.record_auth_error(e.to_string()).await;
        }
        result
    }

    async fn try_start_session(&self, code: &str) -> Result<PlaylistHandle> {
        let token = spotify::auth::exchange_code(&self.http, &self.spotify, code).await?;
        info!("Authenticated successfully");
        {
            let mut board = self.status.write().await;
            board.authenticated = true;
            board.auth_error = None;
        }

        let tokens = TokenManager::new(token, self.http.clone(), Arc::clone(&self.spotify));
        let service = Arc::new(SpotifyClient::new(
            self.http.clone(),
            tokens.clone(),
            self.spotify.api_url.clone(),
            self.spotify.user_id.clone(),
            self.settings.request_timeout,
        ));
        let source = Arc::new(RadioClient::with_client(
            self.http.clone(),
            self.settings.radio.clone(),
            self.settings.request_timeout,
        ));
        let rotator = PlaylistRotator::new(
            self.settings.poll.playlist_prefix.clone(),
            self.settings.poll.capacity,
        );

        let session = Session::bootstrap(
            source,
            service,
            rotator,
            self.settings.poll.playlist_id.as_deref(),
            Arc::clone(&self.status),
        )
        .await?;
        let playlist = session.active_playlist().await;

        let mut running = self.running.lock().await;
        if let Some(previous) = running.take() {
            info!("Replacing the running session");
            previous.stop().await;
        }

        let refresh_cancel = CancellationToken::new();
        let refresh_task = tokens.spawn_refresh(self.settings.token_refresh, refresh_cancel.clone());
        let poller = Poller::start(Arc::new(session), self.settings.poll.interval);
        *running = Some(RunningSession {
            poller,
            refresh_cancel,
            refresh_task,
        });

        Ok(playlist)
    }

    /// Stops the poll loop and token refresh, if running.
    pub async fn shutdown(&self) {
        if let Some(running) = self.running.lock().await.take() {
            running.stop().await;
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/status", get(api::status))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
}

/// Serves the HTTP endpoints until Ctrl-C, then stops any running session.
pub async fn start_api_server(state: Arc<AppState>) -> Result<()> {
    let addr = SocketAddr::from_str(&state.settings().server_addr)
        .map_err(|e| Error::config(format!("Failed to parse server address: {e}")))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router(Arc::clone(&state)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    state.shutdown().await;
    Ok(())
}
