use chrono::NaiveDate;
use radiolist::{
    radio::search_term_from_payload,
    types::ChannelMetadataEnvelope,
    utils::timestamp_bucket,
};
use serde_json::json;

fn parse(value: serde_json::Value) -> ChannelMetadataEnvelope {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_full_payload_becomes_search_term() {
    let payload = parse(json!({
        "channelMetadataResponse": {
            "messages": { "code": 100 },
            "metaData": {
                "channelId": "purejazz",
                "currentEvent": {
                    "artists": { "name": "Bill Evans" },
                    "song": {
                        "name": "Autumn Leaves",
                        "album": { "name": "Portrait in Jazz" }
                    }
                }
            }
        }
    }));

    let term = search_term_from_payload(payload).unwrap();

    assert_eq!(term.artist, "Bill Evans");
    assert_eq!(term.album, "Portrait in Jazz");
    assert_eq!(term.track, "Autumn Leaves");
}

#[test]
fn test_missing_album_is_empty() {
    let payload = parse(json!({
        "channelMetadataResponse": { "metaData": { "currentEvent": {
            "artists": { "name": " Bill Evans " },
            "song": { "name": "Peace Piece" }
        }}}
    }));

    let term = search_term_from_payload(payload).unwrap();

    assert_eq!(term.artist, "Bill Evans");
    assert_eq!(term.album, "");
}

#[test]
fn test_missing_current_event_is_malformed() {
    for value in [
        json!({}),
        json!({ "channelMetadataResponse": {} }),
        json!({ "channelMetadataResponse": { "metaData": {} } }),
    ] {
        let err = search_term_from_payload(parse(value)).unwrap_err();
        assert_eq!(err.kind(), "malformed_upstream_payload");
        assert!(!err.is_transient());
    }
}

#[test]
fn test_missing_artist_or_song_is_malformed() {
    let no_artist = parse(json!({
        "channelMetadataResponse": { "metaData": { "currentEvent": {
            "song": { "name": "Peace Piece" }
        }}}
    }));
    assert!(search_term_from_payload(no_artist).is_err());

    let blank_song = parse(json!({
        "channelMetadataResponse": { "metaData": { "currentEvent": {
            "artists": { "name": "Bill Evans" },
            "song": { "name": "  " }
        }}}
    }));
    assert!(search_term_from_payload(blank_song).is_err());
}

#[test]
fn test_timestamp_bucket_applies_offset() {
    let now = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(14, 37, 52)
        .unwrap();

    assert_eq!(timestamp_bucket(now, 4), "03-09-18:37:00");
    assert_eq!(timestamp_bucket(now, 0), "03-09-14:37:00");
}

#[test]
fn test_timestamp_bucket_crosses_midnight() {
    let now = NaiveDate::from_ymd_opt(2024, 12, 31)
        .unwrap()
        .and_hms_opt(22, 5, 1)
        .unwrap();

    assert_eq!(timestamp_bucket(now, 4), "01-01-02:05:00");
}
