//! Cross-tab synchronization.
//!
//! Two mechanisms run concurrently: the platform `storage` event fired
//! when another tab writes our key, and a fixed-interval poll catching
//! writes the event missed. Both funnel into `Store::refresh`, which
//! adopts external changes wholesale and notifies subscribers. No merge:
//! whichever tab writes last wins.

use crate::{dom, state};
use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

const POLL_MS: u32 = 1_000;

pub fn start() {
    let cb = Closure::wrap(Box::new(move |event: web_sys::StorageEvent| {
        if event.key().as_deref() == Some(state::STORAGE_KEY) {
            refresh();
        }
    }) as Box<dyn FnMut(_)>);
    dom::window()
        .add_event_listener_with_callback("storage", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();

    Interval::new(POLL_MS, refresh).forget();
}

fn refresh() {
    if state::with_mut(|s| s.refresh()) {
        gloo_console::debug!("state refreshed from another tab");
    }
}
