mod common;

use std::sync::atomic::Ordering;

use common::{MockService, handle};
use radiolist::{
    error::Error,
    management::{PlaylistRotator, handle_from_info},
    types::PlaylistInfo,
};

#[tokio::test]
async fn test_full_playlist_rotates_to_next_ordinal() {
    let service = MockService::new().with_playlist("p7", "Sirius Real Jazz 7", 100, &[]);
    let rotator = PlaylistRotator::new("Sirius Real Jazz", 100);

    let next = rotator
        .after_insert(&service, &handle("p7", "Sirius Real Jazz 7", 100, 7))
        .await
        .unwrap();

    assert_ne!(next.id, "p7");
    assert!(next.name.ends_with('8'));
    assert_eq!(next.name, "Sirius Real Jazz 8");
    assert_eq!(next.ordinal, 8);
    assert_eq!(next.track_count, 0);
    assert_eq!(*service.created.lock().unwrap(), vec!["Sirius Real Jazz 8".to_string()]);
}

#[tokio::test]
async fn test_below_capacity_keeps_playlist_with_authoritative_count() {
    let service = MockService::new().with_playlist("p1", "Sirius Real Jazz 1", 43, &[]);
    let rotator = PlaylistRotator::new("Sirius Real Jazz", 100);

    // local count is stale on purpose
    let next = rotator
        .after_insert(&service, &handle("p1", "Sirius Real Jazz 1", 40, 1))
        .await
        .unwrap();

    assert_eq!(next.id, "p1");
    assert_eq!(next.track_count, 43);
    assert!(service.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_rotation_uses_stored_ordinal_not_name() {
    let service = MockService::new().with_playlist("p", "Renamed by hand", 5, &[]);
    let rotator = PlaylistRotator::new("Sirius Real Jazz", 5);

    let next = rotator
        .after_insert(&service, &handle("p", "Renamed by hand", 5, 3))
        .await
        .unwrap();

    assert_eq!(next.name, "Sirius Real Jazz 4");
}

#[tokio::test]
async fn test_capacity_check_failure_is_reported() {
    let service = MockService::new().with_playlist("p1", "Sirius Real Jazz 1", 100, &[]);
    service.fail_get.store(true, Ordering::SeqCst);
    let rotator = PlaylistRotator::new("Sirius Real Jazz", 100);

    let err = rotator
        .after_insert(&service, &handle("p1", "Sirius Real Jazz 1", 100, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::CapacityCheck(_)));
    assert_eq!(err.kind(), "capacity_check_failure");
    assert!(err.is_transient());
    assert!(service.created.lock().unwrap().is_empty());
}

#[test]
fn test_name_without_ordinal_defaults_to_one() {
    let h = handle_from_info(PlaylistInfo {
        id: "x".to_string(),
        name: "Sirius Real Jazz".to_string(),
        track_count: 0,
    });
    assert_eq!(h.ordinal, 1);

    let h = handle_from_info(PlaylistInfo {
        id: "y".to_string(),
        name: "Sirius Real Jazz 12".to_string(),
        track_count: 0,
    });
    assert_eq!(h.ordinal, 12);
}

#[tokio::test]
async fn test_select_active_prefers_highest_ordinal() {
    let service = MockService::new()
        .with_playlist("p2", "Sirius Real Jazz 2", 100, &[])
        .with_playlist("p10", "Sirius Real Jazz 10", 12, &[])
        .with_playlist("p3", "Sirius Real Jazz 3", 100, &[])
        .with_playlist("other", "Road Trip 99", 1, &[]);
    let rotator = PlaylistRotator::new("Sirius Real Jazz", 100);

    let active = rotator.select_active(&service, None).await.unwrap();

    assert_eq!(active.id, "p10");
    assert_eq!(active.ordinal, 10);
    assert_eq!(active.track_count, 12);
}

#[tokio::test]
async fn test_select_active_creates_first_playlist() {
    let service = MockService::new();
    let rotator = PlaylistRotator::new("Sirius Real Jazz", 100);

    let active = rotator.select_active(&service, None).await.unwrap();

    assert_eq!(active.name, "Sirius Real Jazz 1");
    assert_eq!(active.ordinal, 1);
    assert_eq!(active.track_count, 0);
}

#[tokio::test]
async fn test_select_active_explicit_full_playlist_rotates() {
    let service = MockService::new().with_playlist("mine", "Sirius Real Jazz 4", 100, &[]);
    let rotator = PlaylistRotator::new("Sirius Real Jazz", 100);

    let active = rotator.select_active(&service, Some("mine")).await.unwrap();

    assert_eq!(active.name, "Sirius Real Jazz 5");
    assert_eq!(active.ordinal, 5);
}

#[tokio::test]
async fn test_full_playlist_at_max_ordinal_reports_capacity_failure() {
    let service =
        MockService::new().with_playlist("last", "Sirius Real Jazz 4294967295", 100, &[]);
    let rotator = PlaylistRotator::new("Sirius Real Jazz", 100);

    let err = rotator.select_active(&service, None).await.unwrap_err();

    assert!(matches!(err, Error::CapacityCheck(_)));
    assert!(service.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_ordinal_saturates_instead_of_restarting() {
    let service = MockService::new()
        .with_playlist("huge", "Sirius Real Jazz 99999999999999", 3, &[])
        .with_playlist("p2", "Sirius Real Jazz 2", 100, &[]);
    let rotator = PlaylistRotator::new("Sirius Real Jazz", 100);

    let active = rotator.select_active(&service, None).await.unwrap();

    assert_eq!(active.id, "huge");
    assert_eq!(active.ordinal, u32::MAX);
    assert!(service.created.lock().unwrap().is_empty());
}
