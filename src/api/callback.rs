use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::{
        HeaderMap,
        header::{COOKIE, SET_COOKIE},
    },
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::{api::STATE_COOKIE, server::AppState, utils};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// True when the returned state equals the cookie and carries our signature.
pub fn state_matches(returned: Option<&str>, stored: Option<&str>, secret: &str) -> bool {
    match (returned, stored) {
        (Some(returned), Some(stored)) => {
            returned == stored && utils::verify_signed_state(returned, secret)
        }
        _ => false,
    }
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    headers: HeaderMap,
    Extension(app): Extension<Arc<AppState>>,
) -> Response {
    let stored = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| utils::cookie_value(raw, STATE_COOKIE));

    if !state_matches(params.state.as_deref(), stored.as_deref(), app.state_secret()) {
        warn!("Rejected callback with mismatched state");
        return Redirect::to("/#error=state_mismatch").into_response();
    }

    let clear_cookie = [(SET_COOKIE, format!("{STATE_COOKIE}=; Path=/; Max-Age=0"))];

    if let Some(error) = params.error {
        warn!("Authorization was denied: {}", error);
        app.record_auth_error(format!("authorization denied: {error}"))
            .await;
        return (clear_cookie, Html("<h4>Authorization denied.</h4>")).into_response();
    }

    let Some(code) = params.code else {
        app.record_auth_error("callback carried no authorization code")
            .await;
        return (clear_cookie, Html("<h4>Missing authorization code.</h4>")).into_response();
    };

    match app.start_session(&code).await {
        Ok(_) => (
            clear_cookie,
            Html("<h2>Authentication successful.</h2><p>Mirroring has started, see /status.</p>"),
        )
            .into_response(),
        Err(_) => (
            clear_cookie,
            Html("<h4>Login failed.</h4><p>See /status for details.</p>"),
        )
            .into_response(),
    }
}
