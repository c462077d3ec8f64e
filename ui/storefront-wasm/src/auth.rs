//! Registration and login forms (auth page).

use crate::{dom, state};
use np_store::StoreError;
use web_sys::Element;

pub fn init() {
    if let Some(form) = dom::query("[data-register-form]") {
        let form2 = form.clone();
        dom::on_submit(&form, move || on_register(&form2));
    }

    if let Some(form) = dom::query("[data-login-form]") {
        let form2 = form.clone();
        dom::on_submit(&form, move || on_login(&form2));
    }
}

fn on_register(form: &Element) {
    let full_name = dom::form_value(form, "fullName");
    let email = dom::form_value(form, "email");
    let password = dom::form_value_raw(form, "password");

    match state::with_mut(|s| s.register(&full_name, &email, &password)) {
        Ok(()) => dom::redirect("profile.html"),
        Err(StoreError::DuplicateEmail) => dom::alert("Cet email est déjà utilisé."),
        Err(e) => {
            gloo_console::error!(e.to_string());
            dom::alert("Inscription impossible. Réessayez.");
        }
    }
}

fn on_login(form: &Element) {
    let email = dom::form_value(form, "email");
    let password = dom::form_value_raw(form, "password");

    match state::with_mut(|s| s.login(&email, &password)) {
        Ok(()) => dom::redirect("profile.html"),
        // One generic notice: unknown email and wrong password read the same.
        Err(_) => dom::alert("Email ou mot de passe invalide."),
    }
}
