//! LinkService tests
//!
//! Link management operations against a temporary SQLite database.

use std::sync::Arc;

use linklister::config::DatabaseConfig;
use linklister::errors::LinklisterError;
use linklister::services::{
    AddLinkOutcome, AddLinkRequest, LinkService, MAX_SHORT_PATH_LEN, UserService,
};
use linklister::storage::{Actor, NewUsageStat, SeaOrmStorage, StorageFactory};
use tempfile::TempDir;

const PREFIX: &str = "https://go.example.org";

struct TestEnv {
    storage: Arc<SeaOrmStorage>,
    links: LinkService,
    alice: Actor,
    bob: Actor,
    _dir: TempDir,
}

async fn create_test_env() -> TestEnv {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("link_service_test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..Default::default()
    };
    let storage = StorageFactory::create(&config)
        .await
        .expect("Failed to create storage");

    let users = UserService::new(storage.clone());
    let alice = users.create_user("alice", "password-a").await.unwrap();
    let bob = users.create_user("bob", "password-b").await.unwrap();

    TestEnv {
        links: LinkService::new(storage.clone(), PREFIX),
        storage,
        alice: Actor::from(&alice),
        bob: Actor::from(&bob),
        _dir: temp_dir,
    }
}

fn request(short_path: &str, target_url: &str) -> AddLinkRequest {
    AddLinkRequest {
        short_path: short_path.to_string(),
        target_url: target_url.to_string(),
    }
}

#[tokio::test]
async fn test_add_link_normalizes_path() {
    let env = create_test_env().await;

    let outcome = env
        .links
        .add_link(&env.alice, request("lib/", "https://library.example.org"))
        .await
        .unwrap();

    let AddLinkOutcome::Created(listed) = &outcome else {
        panic!("expected a new link, got {:?}", outcome);
    };
    assert_eq!(listed.link.short_path, "/lib");
    assert_eq!(listed.link.created_by, env.alice.user_id);
    assert_eq!(listed.short_link, "https://go.example.org/lib");
    assert_eq!(outcome.notice(), "Your link was saved.");
}

#[tokio::test]
async fn test_add_existing_path_is_a_notice() {
    let env = create_test_env().await;

    env.links
        .add_link(&env.alice, request("/x", "https://a.example.com"))
        .await
        .unwrap();
    // "/x/" normalizes to the same key
    let outcome = env
        .links
        .add_link(&env.bob, request("/x/", "https://b.example.com"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        AddLinkOutcome::AlreadyExists {
            short_path: "/x".to_string()
        }
    );
    assert_eq!(outcome.notice(), "Short path /x already exists!");

    let stored = env.storage.find_link("/x").await.unwrap().unwrap();
    assert_eq!(stored.target_url, "https://a.example.com");
    assert_eq!(stored.created_by, env.alice.user_id);
}

#[tokio::test]
async fn test_add_link_validation() {
    let env = create_test_env().await;

    for (path, url) in [
        ("", "https://example.com"),
        ("///", "https://example.com"),
        ("/ok", ""),
        ("/ok", "not a url"),
        ("/ok", "javascript:alert(1)"),
    ] {
        let err = env
            .links
            .add_link(&env.alice, request(path, url))
            .await
            .unwrap_err();
        assert!(
            matches!(err, LinklisterError::Validation(_)),
            "{:?} / {:?} gave {:?}",
            path,
            url,
            err
        );
    }

    assert!(env.links.all_links().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_mine_and_list_all() {
    let env = create_test_env().await;

    for (actor, path) in [(&env.alice, "/a1"), (&env.bob, "/b1"), (&env.alice, "/a2")] {
        env.links
            .add_link(actor, request(path, "https://example.com"))
            .await
            .unwrap();
    }

    let mine: Vec<String> = env
        .links
        .list_mine(&env.alice)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.link.short_path)
        .collect();
    assert_eq!(mine, vec!["/a2", "/a1"]);

    let all = env.links.list_all(&env.bob).await.unwrap();
    assert_eq!(
        all.iter().map(|l| l.link.short_path.as_str()).collect::<Vec<_>>(),
        vec!["/a2", "/b1", "/a1"]
    );
    assert!(all.iter().all(|l| l.short_link.starts_with(PREFIX)));
}

#[tokio::test]
async fn test_delete_by_any_actor() {
    let env = create_test_env().await;

    let AddLinkOutcome::Created(listed) = env
        .links
        .add_link(&env.alice, request("/shared", "https://example.com"))
        .await
        .unwrap()
    else {
        panic!("expected a new link");
    };

    env.storage
        .record_usage(NewUsageStat {
            link_id: listed.link.id,
            ..Default::default()
        })
        .await
        .unwrap();

    let deleted = env.links.delete_link(&env.bob, listed.link.id).await.unwrap();
    assert_eq!(deleted.short_path, "/shared");
    assert!(env.links.list_mine(&env.alice).await.unwrap().is_empty());
    assert_eq!(env.storage.count_usage(listed.link.id).await.unwrap(), 0);

    let err = env
        .links
        .delete_link(&env.bob, listed.link.id)
        .await
        .unwrap_err();
    assert!(matches!(err, LinklisterError::NotFound(_)));
}

#[tokio::test]
async fn test_show_usage() {
    let env = create_test_env().await;

    let AddLinkOutcome::Created(listed) = env
        .links
        .add_link(&env.alice, request("/stats", "https://example.com"))
        .await
        .unwrap()
    else {
        panic!("expected a new link");
    };

    let empty = env.links.show_usage(&env.bob, listed.link.id).await.unwrap();
    assert!(empty.usage.is_empty());
    assert_eq!(empty.link.short_link, "https://go.example.org/stats");

    env.storage
        .record_usage(NewUsageStat {
            link_id: listed.link.id,
            ip_address: Some("198.51.100.4".to_string()),
            query_string: "ref=mail".to_string(),
            referrer: String::new(),
            user_agent: "Mozilla/5.0".to_string(),
        })
        .await
        .unwrap();

    let usage = env.links.show_usage(&env.alice, listed.link.id).await.unwrap();
    assert_eq!(usage.usage.len(), 1);
    assert_eq!(usage.usage[0].ip_address.as_deref(), Some("198.51.100.4"));
    assert_eq!(usage.usage[0].query_string, "ref=mail");

    let err = env.links.show_usage(&env.alice, 4242).await.unwrap_err();
    assert!(matches!(err, LinklisterError::NotFound(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_of_one_path() {
    let env = create_test_env().await;

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let links = env.links.clone();
            let actor = if i % 2 == 0 {
                env.alice.clone()
            } else {
                env.bob.clone()
            };
            tokio::spawn(async move {
                links
                    .add_link(&actor, request("race", &format!("https://example.com/{}", i)))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut existing = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(AddLinkOutcome::Created(_)) => created += 1,
            Ok(AddLinkOutcome::AlreadyExists { short_path }) => {
                assert_eq!(short_path, "/race");
                existing += 1;
            }
            Err(e) => panic!("concurrent add failed: {:?}", e),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(existing, 15);
    assert_eq!(env.links.all_links().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_overlong_short_path_is_rejected() {
    let env = create_test_env().await;
    let path = format!("/{}", "x".repeat(MAX_SHORT_PATH_LEN));

    let err = env
        .links
        .add_link(&env.alice, request(&path, "https://example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, LinklisterError::Validation(_)));
    assert!(env.storage.find_link(&path).await.unwrap().is_none());
}
