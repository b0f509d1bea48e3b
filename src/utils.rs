use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use chrono::{Duration, NaiveDateTime};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Ordinal assumed for a playlist whose name carries no trailing number.
pub const DEFAULT_PLAYLIST_ORDINAL: u32 = 1;

pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

fn state_signature(state: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b":");
    hasher.update(state.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Returns `state.signature`, the opaque value sent as OAuth `state` and cookie.
pub fn sign_state(state: &str, secret: &str) -> String {
    format!("{}.{}", state, state_signature(state, secret))
}

/// Checks that a value produced by [`sign_state`] was signed with `secret`.
pub fn verify_signed_state(signed: &str, secret: &str) -> bool {
    match signed.rsplit_once('.') {
        Some((state, signature)) if !state.is_empty() => {
            state_signature(state, secret) == signature
        }
        _ => false,
    }
}

pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// Extracts a cookie value from a raw `Cookie` header.
pub fn cookie_value(header: &str, key: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == key).then(|| value.to_string())
    })
}

/// Formats the metadata endpoint's minute bucket (`MM-DD-HH:mm:00`).
pub fn timestamp_bucket(now: NaiveDateTime, offset_hours: i64) -> String {
    (now + Duration::hours(offset_hours))
        .format("%m-%d-%H:%M:00")
        .to_string()
}

/// Parses the trailing integer of a playlist name, e.g. `"Real Jazz 7"` -> `7`.
///
/// Numbers too large for `u32` saturate to `u32::MAX`.
pub fn parse_trailing_ordinal(name: &str) -> Option<u32> {
    let trimmed = name.trim_end();
    let digits_start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    Some(trimmed[digits_start..].parse().unwrap_or(u32::MAX))
}

pub fn ordinal_or_default(name: &str) -> u32 {
    parse_trailing_ordinal(name).unwrap_or(DEFAULT_PLAYLIST_ORDINAL)
}

pub fn playlist_name(prefix: &str, ordinal: u32) -> String {
    format!("{} {}", prefix.trim_end(), ordinal)
}
