use super::*;
use crate::util::storage::MemoryStorage;

#[test]
fn read_preference_defaults_to_false() {
    assert!(!read_preference(&MemoryStorage::new()));
}

#[test]
fn save_then_read_round_trips_flag() {
    let store = MemoryStorage::new();
    save_preference(&store, true);
    assert!(read_preference(&store));
    save_preference(&store, false);
    assert!(!read_preference(&store));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_noop_in_non_hydrate_tests() {
    let store = crate::util::storage::BrowserStorage;
    save_preference(&store, true);
    assert!(!read_preference(&store));
}
