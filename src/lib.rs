//! radiolist library
//!
//! Mirrors the tracks a satellite radio channel airs into Spotify playlists.
//! A poll loop asks the channel's metadata endpoint what is on air, resolves
//! the song in the Spotify catalog, skips anything already mirrored and
//! appends the rest to the active playlist, rolling over to a new playlist
//! once the active one is full.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints (login, OAuth callback, status, health)
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by every poll stage
//! - `management` - Session state: token, dedup cache, rotation, poll loop
//! - `radio` - Broadcast metadata fetcher
//! - `server` - Local HTTP server and session bootstrap
//! - `spotify` - Spotify Web API client and OAuth exchange
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod radio;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Installs the global `tracing` subscriber.
///
/// Honours `RUST_LOG` and falls back to `info` for this crate. Calling it
/// twice is harmless; the second installation is ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("radiolist=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Prints an informational message with a blue bullet point.
///
/// Console output for interactive commands; the long-running server logs
/// through `tracing` instead.
///
/// # Example
///
/// ```
/// info!("Open {} to authorize", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable startup errors such as missing configuration.
/// Code after this macro does not run.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
