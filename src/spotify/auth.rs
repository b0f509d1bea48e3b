use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    config::SpotifySettings,
    error::{Error, Result},
    types::{Token, TokenResponse},
    utils,
};

/// Builds the Spotify authorization URL the `/login` endpoint redirects to.
///
/// Uses the authorization-code grant: the browser comes back to the
/// configured redirect URI with a `code` that [`exchange_code`] turns into a
/// token, and with the same `state` value that was passed in here.
///
/// # Example
///
/// ```
/// let url = authorize_url(&settings.spotify, "abc.sig");
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
/// ```
pub fn authorize_url(settings: &SpotifySettings, state: &str) -> Result<String> {
    let url = reqwest::Url::parse_with_params(
        &settings.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", settings.client_id.as_str()),
            ("scope", settings.scope.as_str()),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| Error::config(format!("invalid SPOTIFY_API_AUTH_URL: {e}")))?;
    Ok(url.into())
}

/// Exchanges an authorization code for an access token.
///
/// Completes the OAuth 2.0 authorization-code flow. The client credentials
/// travel as an HTTP Basic header, so the client secret never appears in a
/// URL or a log line.
///
/// # Errors
///
/// Returns [`Error::Auth`] when Spotify rejects the code (expired, reused,
/// wrong redirect URI) and a network error when the token endpoint cannot
/// be reached.
pub async fn exchange_code(client: &Client, settings: &SpotifySettings, code: &str) -> Result<Token> {
    let res = client
        .post(&settings.token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&settings.client_id, &settings.client_secret),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(Error::Auth(format!("code exchange returned {status}: {body}")));
    }

    let json: TokenResponse = res.json().await?;
    let refresh_token = json
        .refresh_token
        .clone()
        .ok_or_else(|| Error::Auth("token response carried no refresh token".to_string()))?;
    Ok(token_from_response(json, refresh_token))
}

/// Refreshes an access token using a refresh token.
///
/// Spotify may or may not rotate the refresh token. When the response does
/// not carry a new one, `refresh_token` is kept in the returned [`Token`].
pub async fn refresh_token(
    client: &Client,
    settings: &SpotifySettings,
    refresh_token: &str,
) -> Result<Token> {
    let res = client
        .post(&settings.token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&settings.client_id, &settings.client_secret),
        )
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        return Err(Error::Auth(format!("token refresh returned {status}")));
    }

    let json: TokenResponse = res.json().await?;
    let next_refresh = json
        .refresh_token
        .clone()
        .unwrap_or_else(|| refresh_token.to_string());
    Ok(token_from_response(json, next_refresh))
}

fn token_from_response(json: TokenResponse, refresh_token: String) -> Token {
    Token {
        access_token: json.access_token,
        refresh_token,
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}
