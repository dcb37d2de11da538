//! Integration tests for the file-backed session store.

use serde_json::json;
use storefront_signin::providers::{AuthStatus, FileSessionStore, SessionPersister};
use storefront_signin::state::{SessionToken, UserProfile};
use storefront_signin::SignInError;
use storefront_testing::test_clock;
use storefront_core::environment::Clock;

#[tokio::test]
async fn test_persist_and_load() -> Result<(), SignInError> {
    let dir = tempfile::tempdir().map_err(|e| SignInError::SessionStorage(e.to_string()))?;
    let store = FileSessionStore::with_clock(dir.path().join("nested/session.json"), test_clock());

    assert!(!store.is_authenticated().await);
    assert_eq!(store.load().await?, None);

    store
        .persist(&SessionToken::new("tok"), &UserProfile::new(json!({ "id": 1 })))
        .await?;

    let stored = store.load().await?;
    assert!(store.is_authenticated().await);
    match stored {
        Some(stored) => {
            assert_eq!(stored.token.as_str(), "tok");
            assert_eq!(stored.user.as_value(), &json!({ "id": 1 }));
            assert_eq!(stored.stored_at, test_clock().now());
        },
        None => unreachable!("session should have been stored"),
    }
    Ok(())
}

#[tokio::test]
async fn test_clear_signs_out() -> Result<(), SignInError> {
    let dir = tempfile::tempdir().map_err(|e| SignInError::SessionStorage(e.to_string()))?;
    let store = FileSessionStore::new(dir.path().join("session.json"));

    store
        .persist(&SessionToken::new("tok"), &UserProfile::new(json!({})))
        .await?;
    store.clear().await?;

    assert!(!store.is_authenticated().await);
    // Clearing twice is fine
    store.clear().await
}

#[tokio::test]
async fn test_empty_token_is_not_authenticated() -> Result<(), SignInError> {
    let dir = tempfile::tempdir().map_err(|e| SignInError::SessionStorage(e.to_string()))?;
    let store = FileSessionStore::new(dir.path().join("session.json"));

    store
        .persist(&SessionToken::new(""), &UserProfile::new(json!({})))
        .await?;

    assert!(!store.is_authenticated().await);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file() -> Result<(), SignInError> {
    let dir = tempfile::tempdir().map_err(|e| SignInError::SessionStorage(e.to_string()))?;
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").map_err(|e| SignInError::SessionStorage(e.to_string()))?;
    let store = FileSessionStore::new(path);

    assert!(matches!(store.load().await, Err(SignInError::Serialization(_))));
    assert!(!store.is_authenticated().await);
    Ok(())
}
