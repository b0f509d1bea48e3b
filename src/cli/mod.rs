//! # CLI Module
//!
//! Command implementations behind the `radiolist` binary.
//!
//! - [`serve`] - runs the local server; mirroring starts after `/login`
//! - [`now_playing`] - one-shot look at what the channel is airing
//!
//! ## Usage Patterns
//!
//! ```bash
//! radiolist serve --open          # authorize in the browser and start mirroring
//! radiolist now-playing           # check the metadata endpoint works
//! radiolist completions zsh       # shell completions
//! ```

mod now_playing;
mod serve;

pub use now_playing::now_playing;
pub use serve::serve;
