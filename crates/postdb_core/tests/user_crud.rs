use chrono::{DateTime, Utc};
use postdb_core::{Store, StoreError};
use std::fs;
use tempfile::TempDir;

fn initialized_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("db.json"));
    store.ensure_initialized().unwrap();
    (dir, store)
}

#[test]
fn create_and_get_roundtrip() {
    let (_dir, store) = initialized_store();
    let before = Utc::now();

    let created = store.create_user("a@x.com", "p", "A", 30).unwrap();
    let loaded = store.get_user("a@x.com").unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.email, "a@x.com");
    assert_eq!(loaded.password, "p");
    assert_eq!(loaded.name, "A");
    assert_eq!(loaded.age, 30);
    assert!(loaded.created_at >= before);
    assert!(loaded.created_at <= Utc::now());
}

#[test]
fn created_at_is_stored_as_parseable_rfc3339() {
    let (_dir, store) = initialized_store();
    let created = store.create_user("a@x.com", "p", "A", 30).unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
    let stamp = raw["users"]["a@x.com"]["createdAt"].as_str().unwrap();

    assert!(!stamp.is_empty());
    let parsed = DateTime::parse_from_rfc3339(stamp).unwrap();
    assert_eq!(parsed.with_timezone(&Utc), created.created_at);
}

#[test]
fn create_existing_email_overwrites_silently() {
    let (_dir, store) = initialized_store();

    store.create_user("a@x.com", "p", "A", 30).unwrap();
    store.create_user("a@x.com", "q", "Alice", 31).unwrap();

    let loaded = store.get_user("a@x.com").unwrap();
    assert_eq!(loaded.password, "q");
    assert_eq!(loaded.name, "Alice");
    assert_eq!(loaded.age, 31);
}

#[test]
fn update_preserves_email_and_created_at() {
    let (_dir, store) = initialized_store();
    let created = store.create_user("a@x.com", "p", "A", 30).unwrap();

    let updated = store.update_user("a@x.com", "new-pass", "Alice", 41).unwrap();

    assert_eq!(updated.email, created.email);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.password, "new-pass");
    assert_eq!(updated.name, "Alice");
    assert_eq!(updated.age, 41);
    assert_eq!(store.get_user("a@x.com").unwrap(), updated);
}

#[test]
fn update_missing_user_returns_not_found_and_leaves_file() {
    let (_dir, store) = initialized_store();
    store.create_user("a@x.com", "p", "A", 30).unwrap();
    let before = fs::read(store.path()).unwrap();

    let err = store.update_user("ghost@x.com", "p", "G", 1).unwrap_err();

    assert!(matches!(&err, StoreError::UserNotFound(email) if email == "ghost@x.com"));
    assert!(err.is_not_found());
    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn get_missing_user_returns_not_found() {
    let (_dir, store) = initialized_store();

    let err = store.get_user("ghost@x.com").unwrap_err();

    assert!(matches!(err, StoreError::UserNotFound(_)));
    assert_eq!(err.to_string(), "user not found: ghost@x.com");
}

#[test]
fn email_lookup_is_case_sensitive() {
    let (_dir, store) = initialized_store();
    store.create_user("a@x.com", "p", "A", 30).unwrap();

    assert!(store.get_user("A@X.COM").unwrap_err().is_not_found());
}

#[test]
fn delete_user_removes_record() {
    let (_dir, store) = initialized_store();
    store.create_user("a@x.com", "p", "A", 30).unwrap();
    store.create_user("b@x.com", "p", "B", 40).unwrap();

    store.delete_user("a@x.com").unwrap();

    assert!(store.get_user("a@x.com").unwrap_err().is_not_found());
    assert_eq!(store.get_user("b@x.com").unwrap().name, "B");
}

#[test]
fn delete_missing_user_is_noop() {
    let (_dir, store) = initialized_store();
    store.create_user("a@x.com", "p", "A", 30).unwrap();
    let post = store.create_post("a@x.com", "hello").unwrap();
    let before: serde_json::Value =
        serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();

    store.delete_user("missing@x.com").unwrap();

    let after: serde_json::Value =
        serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
    assert_eq!(after, before);
    assert_eq!(after["users"].as_object().unwrap().len(), 1);
    assert!(after["posts"].get(&post.id).is_some());
}

#[test]
fn delete_user_keeps_their_posts() {
    let (_dir, store) = initialized_store();
    store.create_user("a@x.com", "p", "A", 30).unwrap();
    let post = store.create_post("a@x.com", "still here").unwrap();

    store.delete_user("a@x.com").unwrap();

    let posts = store.get_posts("a@x.com").unwrap();
    assert_eq!(posts, vec![post]);
}
