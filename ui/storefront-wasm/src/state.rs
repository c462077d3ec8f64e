//! Store singleton and browser storage plumbing.
//!
//! The store lives in `RefCell`-wrapped `thread_local!` storage (WASM is
//! single-threaded). Event handlers mutate through `with_mut`; render
//! code works from the document a listener receives, never by re-entering
//! the store from inside a notification.

use anyhow::{Result, anyhow};
use np_store::{Clock, StateBackend, Store};
use np_types::StateDocument;
use std::cell::RefCell;

/// The one `localStorage` key holding the whole serialized document.
pub const STORAGE_KEY: &str = "nextplay_state_v1";

pub struct LocalStorageBackend;

fn storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| anyhow!("localStorage unavailable"))
}

impl StateBackend for LocalStorageBackend {
    fn read(&self) -> Result<Option<String>> {
        storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| anyhow!("localStorage read: {e:?}"))
    }

    fn write(&self, raw: &str) -> Result<()> {
        storage()?
            .set_item(STORAGE_KEY, raw)
            .map_err(|e| anyhow!("localStorage write: {e:?}"))
    }
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_epoch_ms(&self) -> u128 {
        js_sys::Date::now() as u128
    }
}

pub type AppStore = Store<LocalStorageBackend, BrowserClock>;

thread_local! {
    static STORE: RefCell<AppStore> =
        RefCell::new(Store::with_clock(LocalStorageBackend, BrowserClock));
}

/// Run a closure with read access to the store.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppStore) -> R,
{
    STORE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the store.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppStore) -> R,
{
    STORE.with(|s| f(&mut s.borrow_mut()))
}

/// Owned copy of the current document, for initial page renders.
pub fn snapshot() -> StateDocument {
    with(|s| s.document().clone())
}
