use super::*;
use serde::Deserialize;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Draft {
    title: String,
    minutes: u32,
}

#[test]
fn profile_key_prefixes_user_id() {
    assert_eq!(profile_key("42"), "profile_42");
}

#[test]
fn memory_storage_set_get_remove() {
    let store = MemoryStorage::new();
    assert_eq!(store.get(AUTH_TOKEN_KEY), None);

    store.set(AUTH_TOKEN_KEY, "tok").unwrap();
    assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("tok"));
    assert!(store.contains(AUTH_TOKEN_KEY));

    store.remove(AUTH_TOKEN_KEY);
    assert!(!store.contains(AUTH_TOKEN_KEY));
}

#[test]
fn memory_storage_last_write_wins() {
    let store = MemoryStorage::new();
    store.set(USER_ID_KEY, "a").unwrap();
    store.set(USER_ID_KEY, "b").unwrap();
    assert_eq!(store.get(USER_ID_KEY).as_deref(), Some("b"));
}

#[test]
fn json_helpers_store_and_load_values() {
    let store = MemoryStorage::new();
    let draft = Draft { title: "Morning ride".to_owned(), minutes: 45 };
    save_json(&store, "draft", &draft).unwrap();
    assert_eq!(load_json::<Draft>(&store, "draft"), Some(draft));
}

#[test]
fn load_json_treats_garbage_as_missing() {
    let store = MemoryStorage::new();
    store.set("draft", "{not json").unwrap();
    assert_eq!(load_json::<Draft>(&store, "draft"), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_unavailable_outside_the_browser() {
    let store = BrowserStorage;
    assert_eq!(store.get(AUTH_TOKEN_KEY), None);
    assert!(matches!(store.set(AUTH_TOKEN_KEY, "x"), Err(StorageError::Unavailable)));
    store.remove(AUTH_TOKEN_KEY);
}
