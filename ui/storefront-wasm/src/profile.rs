//! Profile page: identity card, edit form, logout.

use crate::{dom, format, state};
use np_types::{StateDocument, User};
use web_sys::Element;

pub fn init(doc: &StateDocument) {
    let Some(name_el) = dom::query("[data-profile-name]") else {
        return;
    };
    let Some(email_el) = dom::query("[data-profile-email]") else {
        return;
    };
    let Some(wallet_el) = dom::query("[data-profile-wallet]") else {
        return;
    };

    let Some(user) = doc.current_user() else {
        dom::redirect("auth.html");
        return;
    };

    render(&name_el, &email_el, &wallet_el, user);

    if let Some(form) = dom::query("[data-profile-form]") {
        if let Some(input) = dom::form_input(&form, "fullName") {
            input.set_value(&user.full_name);
        }
        if let Some(input) = dom::form_input(&form, "email") {
            input.set_value(&user.email);
        }

        let form2 = form.clone();
        let name2 = name_el.clone();
        let email2 = email_el.clone();
        let wallet2 = wallet_el.clone();
        dom::on_submit(&form, move || {
            let full_name = dom::form_value(&form2, "fullName");
            let email = dom::form_value(&form2, "email");

            match state::with_mut(|s| s.update_profile(&full_name, &email)) {
                Ok(()) => {
                    let snapshot = state::snapshot();
                    if let Some(user) = snapshot.current_user() {
                        render(&name2, &email2, &wallet2, user);
                    }
                    dom::alert("Profil mis à jour.");
                }
                Err(e) => {
                    gloo_console::error!(e.to_string());
                    dom::alert("Mise à jour impossible. Réessayez.");
                }
            }
        });
    }

    if let Some(btn) = dom::query("[data-logout]") {
        dom::on_click(&btn, move |_| {
            if let Err(e) = state::with_mut(|s| s.logout()) {
                gloo_console::error!(e.to_string());
            }
            dom::redirect("auth.html");
        });
    }
}

fn render(name_el: &Element, email_el: &Element, wallet_el: &Element, user: &User) {
    dom::set_text(name_el, &user.full_name);
    dom::set_text(email_el, &user.email);
    dom::set_text(wallet_el, &format::format_htg(user.wallet));
}
