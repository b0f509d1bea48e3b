use std::sync::Arc;

use axum::{Extension, response::Json};

use crate::{management::SessionStatus, server::AppState};

pub async fn status(Extension(app): Extension<Arc<AppState>>) -> Json<SessionStatus> {
    Json(app.status().read().await.clone())
}
