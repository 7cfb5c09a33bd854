use std::{fs, sync::Arc};

use marketgenius_studio::{
    store::{FAVORITES_KEY, USER_KEY},
    FavoritesRepository, FileStore, KeyValueStore, StudioError, User, UserRepository,
};

fn open(path: &std::path::Path) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::open(path).unwrap())
}

#[test]
fn user_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let users = UserRepository::new(open(&path));
    assert_eq!(users.current().unwrap(), None);
    users.login("Ada", "ada@example.com").unwrap();

    let reopened = UserRepository::new(open(&path));
    assert_eq!(
        reopened.current().unwrap(),
        Some(User {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
    );

    reopened.logout().unwrap();
    assert_eq!(UserRepository::new(open(&path)).current().unwrap(), None);
}

#[test]
fn favorites_persist_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let favorites = FavoritesRepository::new(open(&path));
    favorites.toggle(302).unwrap();
    favorites.toggle(1).unwrap();
    favorites.toggle(45).unwrap();
    assert_eq!(favorites.toggle(1).unwrap(), vec![302, 45]);

    let reopened = FavoritesRepository::new(open(&path));
    assert_eq!(reopened.list().unwrap(), vec![302, 45]);
    assert!(reopened.is_favorite(45).unwrap());
    assert!(!reopened.is_favorite(1).unwrap());

    let raw = fs::read_to_string(&path).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(entries[FAVORITES_KEY], "[302,45]");
}

#[test]
fn corrupt_store_file_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        FileStore::open(&path),
        Err(StudioError::Storage(_))
    ));
}

#[test]
fn empty_or_missing_file_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let missing = FileStore::open(dir.path().join("missing.json")).unwrap();
    assert_eq!(missing.get(USER_KEY).unwrap(), None);

    let empty_path = dir.path().join("empty.json");
    fs::write(&empty_path, "\n").unwrap();
    let empty = FileStore::open(&empty_path).unwrap();
    assert_eq!(empty.get(USER_KEY).unwrap(), None);
}

#[test]
fn first_write_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profiles").join("default").join("store.json");

    let store = FileStore::open(&path).unwrap();
    assert!(!path.exists());
    store.set("k", "v").unwrap();

    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
    assert_eq!(
        FileStore::open(&path).unwrap().get("k").unwrap().as_deref(),
        Some("v")
    );
}

#[test]
fn unreadable_user_entry_is_cleared_on_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = open(&path);
    store.set(USER_KEY, "not a user").unwrap();

    let users = UserRepository::new(store.clone());
    assert_eq!(users.current().unwrap(), None);
    assert_eq!(open(&path).get(USER_KEY).unwrap(), None);
}
