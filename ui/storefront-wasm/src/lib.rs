//! NextPlay storefront WASM frontend.
//!
//! Pure Rust + WASM frontend for the wallet-backed game-currency shop.
//! One module per page/widget; every `init` bails out when its page
//! elements are absent, so the same bundle serves the whole site.

pub mod auth;
pub mod dom;
pub mod format;
pub mod layout;
pub mod orders;
pub mod packs;
pub mod profile;
pub mod shop;
pub mod state;
pub mod sync;
pub mod wallet;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init();
}

/// Main initialisation sequence (runs once per page load).
fn init() {
    let doc = state::snapshot();

    layout::init(&doc);
    auth::init();
    profile::init(&doc);
    wallet::init(&doc);
    shop::init();
    packs::init_all();
    orders::init(&doc);

    // Re-render the shared views whenever the store commits or adopts an
    // external change. Renderers read only the document they are handed.
    state::with_mut(|s| {
        s.subscribe(|doc| {
            layout::render_header(doc);
            wallet::render(doc);
            orders::render(doc);
        });
    });

    sync::start();
}
