use std::{sync::Arc, time::Duration};

use reqwest::Client;
use tokio::{sync::RwLock, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{config::SpotifySettings, error::Result, spotify, types::Token};

/// Holds the current Spotify credential for the running session.
///
/// Cloning is cheap and every clone sees the same token. Outbound calls only
/// ever read [`TokenManager::access_token`]; the background task started by
/// [`TokenManager::spawn_refresh`] is the single writer.
#[derive(Clone)]
pub struct TokenManager {
    token: Arc<RwLock<Token>>,
    client: Client,
    settings: Arc<SpotifySettings>,
}

impl TokenManager {
    pub fn new(token: Token, client: Client, settings: Arc<SpotifySettings>) -> Self {
        TokenManager {
            token: Arc::new(RwLock::new(token)),
            client,
            settings,
        }
    }

    pub async fn access_token(&self) -> String {
        self.token.read().await.access_token.clone()
    }

    pub async fn current_token(&self) -> Token {
        self.token.read().await.clone()
    }

    /// Exchanges the stored refresh token for a fresh access token.
    pub async fn refresh(&self) -> Result<()> {
        let refresh = self.token.read().await.refresh_token.clone();
        let new_token = spotify::auth::refresh_token(&self.client, &self.settings, &refresh).await?;
        *self.token.write().await = new_token;
        Ok(())
    }

    /// Refreshes the token every `every` until `cancel` fires.
    ///
    /// A failed refresh is logged and retried on the next tick; the previous
    /// token stays in place meanwhile.
    pub fn spawn_refresh(&self, every: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;

            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        match manager.refresh().await {
                            Ok(()) => info!("Refreshed Spotify access token"),
                            Err(e) => warn!("Failed to refresh Spotify access token: {}", e),
                        }
                    }
                }
            }
        })
    }
}
