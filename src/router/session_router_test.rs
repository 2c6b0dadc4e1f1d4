use std::sync::Arc;

use super::*;
use crate::storage::{MemoryStorage, TOKEN_KEY};

fn store_over(storage: MemoryStorage) -> SessionStore {
    SessionStore::new(Arc::new(storage))
}

#[tokio::test]
async fn starts_in_loading() {
    let store = store_over(MemoryStorage::new());
    let mut router = SessionRouter::attach(&store);
    assert_eq!(router.route(), Route::Loading);
    assert_eq!(router.current(), None);
}

#[tokio::test]
async fn changed_reports_route_after_initialize() {
    let store = store_over(MemoryStorage::with_entries([(TOKEN_KEY, "abc123")]));
    let mut router = SessionRouter::attach(&store);

    let background = store.clone();
    tokio::spawn(async move { background.initialize().await });

    assert_eq!(router.changed().await, Some(Route::Authenticated));
    assert_eq!(router.current(), Some(Screen::Feed));
}

#[tokio::test]
async fn accessors_never_lag_session() {
    let store = store_over(MemoryStorage::new());
    let mut router = SessionRouter::attach(&store);
    store.initialize().await;
    assert_eq!(router.route(), Route::Unauthenticated);

    router.navigate(Screen::Otp).unwrap();
    store.set_token(Some("abc123".into()));
    assert_eq!(router.route(), Route::Authenticated);
    assert_eq!(router.stack(), &[Screen::Feed]);

    router.navigate(Screen::ReviewForm).unwrap();
    store.logout().await;
    assert_eq!(router.current(), Some(Screen::Auth));

    store.set_token(Some(String::new()));
    assert_eq!(router.route(), Route::Unauthenticated);
    store.flush().await;
}

#[tokio::test]
async fn navigate_applies_pending_change_first() {
    let store = store_over(MemoryStorage::new());
    let mut router = SessionRouter::attach(&store);
    store.initialize().await;
    store.set_token(Some("abc123".into()));

    router.navigate(Screen::ReviewForm).unwrap();
    assert!(router.navigate(Screen::Otp).is_err());
    assert!(router.go_back());
    assert!(!router.go_back());
    store.flush().await;
}

#[tokio::test]
async fn changed_ends_when_store_dropped() {
    let store = store_over(MemoryStorage::new());
    let mut router = SessionRouter::attach(&store);
    drop(store);
    assert_eq!(router.changed().await, None);
}

#[tokio::test]
async fn last_session_applies_after_store_dropped() {
    let store = store_over(MemoryStorage::new());
    let mut router = SessionRouter::attach(&store);
    store.initialize().await;
    drop(store);

    assert_eq!(router.route(), Route::Unauthenticated);
    assert_eq!(router.current(), Some(Screen::Auth));
}

#[tokio::test]
async fn changed_applies_final_value_before_ending() {
    let store = store_over(MemoryStorage::with_entries([(TOKEN_KEY, "abc123")]));
    let mut router = SessionRouter::attach(&store);
    store.initialize().await;
    drop(store);

    let reported = router.changed().await;
    assert!(matches!(reported, Some(Route::Authenticated) | None));
    assert_eq!(router.route(), Route::Authenticated);
    assert_eq!(router.changed().await, None);
}
