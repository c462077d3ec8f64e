//! Shared page chrome: sidebar toggle and the header wallet/auth slots.

use crate::{dom, format};
use np_types::StateDocument;

pub fn init(doc: &StateDocument) {
    if let Some(toggle) = dom::query("[data-menu-toggle]") {
        if let Some(sidebar) = dom::query(".sidebar") {
            dom::on_click(&toggle, move |_| dom::toggle_class(&sidebar, "open"));
        }
    }
    render_header(doc);
}

/// Refresh every header wallet amount and auth link on the page.
pub fn render_header(doc: &StateDocument) {
    let user = doc.current_user();

    let amount = user.map(|u| u.wallet).unwrap_or(0);
    for el in dom::query_all("[data-wallet-amount]") {
        dom::set_text(&el, &format::format_htg(amount));
    }

    for el in dom::query_all("[data-auth-link]") {
        match user {
            Some(user) => {
                let first = user
                    .full_name
                    .split_whitespace()
                    .next()
                    .unwrap_or(&user.full_name);
                dom::set_text(&el, &format!("Bonjour, {first}"));
                let _ = el.set_attribute("href", "profile.html");
            }
            None => {
                dom::set_text(&el, "Se connecter");
                let _ = el.set_attribute("href", "auth.html");
            }
        }
    }
}
