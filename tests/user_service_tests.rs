//! UserService tests

use std::sync::Arc;

use linklister::config::DatabaseConfig;
use linklister::errors::LinklisterError;
use linklister::services::UserService;
use linklister::storage::{NewLink, SeaOrmStorage, StorageFactory};
use tempfile::TempDir;

async fn create_service() -> (UserService, Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("user_service_test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..Default::default()
    };
    let storage = StorageFactory::create(&config)
        .await
        .expect("Failed to create storage");
    (UserService::new(storage.clone()), storage, temp_dir)
}

#[tokio::test]
async fn test_create_and_authenticate() {
    let (users, _storage, _dir) = create_service().await;

    let alice = users.create_user("alice", "s3cret").await.unwrap();
    assert!(alice.is_active);
    assert_ne!(alice.password_hash, "s3cret");

    let authed = users.authenticate("alice", "s3cret").await.unwrap();
    assert_eq!(authed.id, alice.id);
    assert_eq!(users.get_user(alice.id).await.unwrap().username, "alice");

    for (username, password) in [("alice", "wrong"), ("alice", ""), ("nobody", "s3cret")] {
        let err = users.authenticate(username, password).await.unwrap_err();
        assert!(
            matches!(err, LinklisterError::AuthFailed(ref msg) if msg == "Invalid username or password"),
            "{} gave {:?}",
            username,
            err
        );
    }
}

#[tokio::test]
async fn test_create_user_rejects_bad_input() {
    let (users, _storage, _dir) = create_service().await;

    for username in ["", "has space", "semi;colon"] {
        let err = users.create_user(username, "pw").await.unwrap_err();
        assert!(matches!(err, LinklisterError::Validation(_)), "{:?}", username);
    }

    let err = users.create_user("alice", "").await.unwrap_err();
    assert!(matches!(err, LinklisterError::Validation(_)));

    users.create_user("alice", "pw").await.unwrap();
    let err = users.create_user("alice", "pw2").await.unwrap_err();
    assert!(matches!(err, LinklisterError::DuplicateKey(_)));

    assert_eq!(users.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_owner_cannot_be_removed() {
    let (users, storage, _dir) = create_service().await;

    let alice = users.create_user("alice", "pw").await.unwrap();
    let link = storage
        .create_link(NewLink {
            short_path: "/owned".to_string(),
            target_url: "https://example.com".to_string(),
            created_by: alice.id,
        })
        .await
        .unwrap();
    assert_eq!(users.owned_link_count(alice.id).await.unwrap(), 1);

    let err = users.delete_user("alice").await.unwrap_err();
    assert!(matches!(err, LinklisterError::Protected(_)));
    assert_eq!(users.find_user("alice").await.unwrap().id, alice.id);

    storage.delete_link(link.id).await.unwrap();
    assert_eq!(users.owned_link_count(alice.id).await.unwrap(), 0);
    users.delete_user("alice").await.unwrap();

    let err = users.find_user("alice").await.unwrap_err();
    assert!(matches!(err, LinklisterError::NotFound(_)));
}
