use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Settings,
    error,
    radio::{MetadataSource, RadioClient},
    types::NowPlayingTableRow,
    warning,
};

/// Prints what the configured channel is airing. Needs no authorization.
pub async fn now_playing() {
    let (radio, timeout) = match (
        Settings::radio_from_env(),
        Settings::request_timeout_from_env(),
    ) {
        (Ok(radio), Ok(timeout)) => (radio, timeout),
        (Err(e), _) | (_, Err(e)) => error!("{}", e),
    };
    let client = RadioClient::new(radio, timeout);

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Asking {} what is on air...", client.channel()));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = client.fetch_current_track().await;
    pb.finish_and_clear();

    match result {
        Ok(term) => {
            let table = Table::new(vec![NowPlayingTableRow {
                channel: client.channel().to_string(),
                artist: term.artist,
                album: term.album,
                track: term.track,
            }]);
            println!("{}", table);
        }
        Err(e) => warning!("Could not get the current track: {}", e),
    }
}
