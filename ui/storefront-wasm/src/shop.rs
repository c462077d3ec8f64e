//! Catalog page: one buy button per seeded product.

use crate::{dom, state};
use np_store::StoreError;

pub fn init() {
    for btn in dom::query_all("[data-buy-product]") {
        let Some(product_id) = btn.get_attribute("data-buy-product") else {
            continue;
        };
        dom::on_click(&btn, move |_| on_buy(&product_id));
    }
}

fn on_buy(product_id: &str) {
    let snapshot = state::snapshot();
    let Some(product) = snapshot.products.iter().find(|p| p.id == product_id) else {
        return;
    };
    if snapshot.current_user().is_none() {
        dom::redirect("auth.html");
        return;
    }

    match state::with_mut(|s| s.purchase(&product.name, product.price)) {
        Ok(()) => dom::alert("Commande validée et payée avec wallet ✅"),
        Err(StoreError::InsufficientFunds { .. }) => {
            dom::alert("Solde insuffisant. Merci de recharger votre wallet.");
        }
        Err(StoreError::NotSignedIn) => dom::redirect("auth.html"),
        Err(e) => {
            gloo_console::error!(e.to_string());
            dom::alert("Commande impossible. Réessayez.");
        }
    }
}
