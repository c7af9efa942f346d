//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

use cardgame_frontend_rs::{USER_ID_KEY, user::UserIdStore};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn local_storage() -> web_sys::Storage {
    web_sys::window().unwrap().local_storage().unwrap().unwrap()
}

#[wasm_bindgen_test]
fn set_user_id_writes_through_to_local_storage() {
    local_storage().remove_item(USER_ID_KEY).unwrap();
    let store = UserIdStore::new().unwrap();

    store.set_user_id(Some("  player-one ".to_string())).unwrap();
    assert_eq!(store.get_user_id(), "player-one");
    assert_eq!(
        local_storage().get_item(USER_ID_KEY).unwrap().as_deref(),
        Some("player-one")
    );

    store.set_user_id(None).unwrap();
    assert_eq!(store.get_user_id(), "");
    assert_eq!(local_storage().get_item(USER_ID_KEY).unwrap(), None);
}

#[wasm_bindgen_test]
fn new_store_reads_existing_value() {
    local_storage().set_item(USER_ID_KEY, "returning").unwrap();
    let store = UserIdStore::new().unwrap();
    assert_eq!(store.get_user_id(), "returning");
    local_storage().remove_item(USER_ID_KEY).unwrap();
}

#[wasm_bindgen_test]
fn resolve_route_redirects_root() {
    let matched = cardgame_frontend_rs::resolve("/");
    assert_eq!(matched.path, "/login");
}
