use std::sync::Arc;

use crate::{
    config::Settings,
    error,
    server::{self, AppState},
    info, warning,
};

/// Runs the HTTP server until Ctrl-C.
///
/// Nothing is polled until someone completes the `/login` flow; with `open`
/// set the login page is opened in the default browser right away.
pub async fn serve(open: bool) {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    let login_url = format!("http://{}/login", settings.server_addr);
    let state = match AppState::new(settings) {
        Ok(state) => Arc::new(state),
        Err(e) => error!("Cannot initialize server: {}", e),
    };

    info!("Authorize at {} to start mirroring", login_url);
    if open && webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    if let Err(e) = server::start_api_server(state).await {
        error!("Server stopped: {}", e);
    }
}
