use std::sync::Arc;

use axum::{
    Extension,
    http::{StatusCode, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::{api::STATE_COOKIE, server::AppState, spotify, utils};

pub async fn login(Extension(app): Extension<Arc<AppState>>) -> Response {
    let state = utils::sign_state(&utils::generate_random_string(16), app.state_secret());

    match spotify::auth::authorize_url(app.spotify_settings(), &state) {
        Ok(url) => {
            let cookie = format!("{STATE_COOKIE}={state}; Path=/; HttpOnly; SameSite=Lax");
            ([(SET_COOKIE, cookie)], Redirect::to(&url)).into_response()
        }
        Err(e) => {
            warn!("Cannot build authorization URL: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h4>Login is not configured.</h4>"),
            )
                .into_response()
        }
    }
}
