use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::post,
};
use radiolist::{
    config::SpotifySettings,
    management::TokenManager,
    spotify::{PlaylistService, SpotifyClient},
    types::Token,
};
use reqwest::Client;
use serde_json::{Value, json};

#[derive(Default)]
struct Recorded {
    bearer: Mutex<Vec<String>>,
    refreshes: Mutex<usize>,
}

async fn add_tracks(State(rec): State<Arc<Recorded>>, headers: HeaderMap) -> StatusCode {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    rec.bearer.lock().unwrap().push(bearer);
    // created, but no snapshot id in the body
    StatusCode::CREATED
}

async fn token(State(rec): State<Arc<Recorded>>) -> Json<Value> {
    *rec.refreshes.lock().unwrap() += 1;
    Json(json!({
        "access_token": "refreshed",
        "token_type": "Bearer",
        "expires_in": 3600
    }))
}

async fn spawn_api(rec: Arc<Recorded>) -> String {
    let app = Router::new()
        .route("/playlists/{id}/tracks", post(add_tracks))
        .route("/api/token", post(token))
        .with_state(rec);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base: &str) -> SpotifyClient {
    let http = Client::new();
    let settings = Arc::new(SpotifySettings {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        redirect_uri: format!("{base}/callback"),
        user_id: "user".to_string(),
        scope: "playlist-modify-private".to_string(),
        auth_url: format!("{base}/authorize"),
        token_url: format!("{base}/api/token"),
        api_url: base.to_string(),
    });
    // long expired, so any refresh-on-read would show up on /api/token
    let stale = Token {
        access_token: "stored".to_string(),
        refresh_token: "refresh".to_string(),
        scope: String::new(),
        expires_in: 0,
        obtained_at: 0,
    };
    let tokens = TokenManager::new(stale, http.clone(), settings);
    SpotifyClient::new(http, tokens, base, "user", Duration::from_secs(5))
}

#[tokio::test]
async fn test_add_track_accepts_success_without_snapshot() {
    let rec = Arc::new(Recorded::default());
    let base = spawn_api(Arc::clone(&rec)).await;
    let client = client_for(&base);

    client.add_track("p1", "spotify:track:autumn").await.unwrap();

    assert_eq!(rec.bearer.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_outbound_calls_only_read_current_token() {
    let rec = Arc::new(Recorded::default());
    let base = spawn_api(Arc::clone(&rec)).await;
    let client = client_for(&base);

    client.add_track("p1", "spotify:track:a").await.unwrap();
    client.add_track("p1", "spotify:track:b").await.unwrap();

    assert_eq!(
        *rec.bearer.lock().unwrap(),
        vec!["Bearer stored".to_string(), "Bearer stored".to_string()]
    );
    assert_eq!(*rec.refreshes.lock().unwrap(), 0);
}
