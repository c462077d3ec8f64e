//! Per-game product pages (Free Fire, FC points, PUBG UC, eFootball,
//! Netflix) driven by one descriptor per page.
//!
//! Every page is the same widget: a pack `<select>` whose options carry
//! the price as value and a `data-label`, optional required contact
//! fields, live price/summary labels, a warning line, and a buy button.
//! To add a game, add a [`PackPage`] entry and the matching markup.

use crate::{dom, format, state};
use np_store::StoreError;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

struct PackPage {
    /// `data-*` attribute prefix: `ff` binds `[data-ff-pack]` and friends.
    prefix: &'static str,
    /// Leads the recorded product name: `"{title} {pack label}"`.
    title: &'static str,
    /// Required contact inputs (attribute suffixes). All must be filled.
    contact_fields: &'static [&'static str],
    /// Contact field appended to the product name after ` - `.
    name_suffix_field: Option<&'static str>,
    /// Optional extra `<select>` appended to the name after ` + `.
    extra_select: Option<&'static str>,
    /// Input cleared after a successful purchase (account passwords).
    clear_on_success: Option<&'static str>,
    /// Attribute suffix of the summary label slot, when the page has one.
    summary_label_attr: Option<&'static str>,
    /// Page shows a promotion line fed by `data-original` pricing.
    promo: bool,
    selected_notice: &'static str,
    idle_warning: &'static str,
    select_warning: &'static str,
    /// Required when `contact_fields` is non-empty.
    missing_contact_warning: Option<&'static str>,
    success_notice: &'static str,
}

static PACK_PAGES: [PackPage; 5] = [
    PackPage {
        prefix: "ff",
        title: "Free Fire",
        contact_fields: &[],
        name_suffix_field: None,
        extra_select: Some("other"),
        clear_on_success: None,
        summary_label_attr: None,
        promo: false,
        selected_notice: "✅ Pack sélectionné, vous pouvez ajouter au panier.",
        idle_warning: "⚠️ Veuillez sélectionner un pack ci-dessus",
        select_warning: "⚠️ Veuillez sélectionner un pack ci-dessus",
        missing_contact_warning: None,
        success_notice: "✅ Produit ajouté et payé avec votre wallet.",
    },
    PackPage {
        prefix: "fc",
        title: "FC26",
        contact_fields: &["email", "pass", "whatsapp"],
        name_suffix_field: Some("whatsapp"),
        extra_select: None,
        clear_on_success: Some("pass"),
        summary_label_attr: None,
        promo: false,
        selected_notice: "✅ Pack sélectionné.",
        idle_warning: "⚠️ Veuillez sélectionner un pack de points.",
        select_warning: "⚠️ Veuillez sélectionner un pack de points.",
        missing_contact_warning: Some("⚠️ Renseignez les informations du compte."),
        success_notice: "✅ FC Points ajoutés avec succès.",
    },
    PackPage {
        prefix: "pubg",
        title: "PUBG UC",
        contact_fields: &["player"],
        name_suffix_field: Some("player"),
        extra_select: None,
        clear_on_success: None,
        summary_label_attr: None,
        promo: false,
        selected_notice: "✅ Pack sélectionné.",
        idle_warning: "⚠️ Sélectionnez un pack et renseignez votre compte.",
        select_warning: "⚠️ Veuillez sélectionner un pack UC.",
        missing_contact_warning: Some("⚠️ Veuillez entrer votre email ou ID joueur."),
        success_notice: "✅ Recharge PUBG traitée avec succès.",
    },
    PackPage {
        prefix: "efootball",
        title: "eFootball",
        contact_fields: &["email", "pass", "whatsapp"],
        name_suffix_field: Some("whatsapp"),
        extra_select: None,
        clear_on_success: Some("pass"),
        summary_label_attr: Some("summary-pack"),
        promo: false,
        selected_notice: "✅ Pack sélectionné.",
        idle_warning: "⚠️ Sélectionnez un pack et remplissez les informations du compte.",
        select_warning: "⚠️ Veuillez sélectionner un pack eFootball.",
        missing_contact_warning: Some("⚠️ Renseignez les informations du compte."),
        success_notice: "✅ Recharge eFootball traitée avec succès.",
    },
    PackPage {
        prefix: "netflix",
        title: "Netflix Premium",
        contact_fields: &["email", "whatsapp"],
        name_suffix_field: Some("whatsapp"),
        extra_select: None,
        clear_on_success: None,
        summary_label_attr: Some("summary-duration"),
        promo: true,
        selected_notice: "✅ Forfait sélectionné.",
        idle_warning: "⚠️ Sélectionnez un forfait et remplissez vos informations.",
        select_warning: "⚠️ Veuillez sélectionner une durée d’abonnement.",
        missing_contact_warning: Some("⚠️ Renseignez votre email Netflix et WhatsApp."),
        success_notice: "✅ Abonnement Netflix ajouté avec succès.",
    },
];

pub fn init_all() {
    for page in &PACK_PAGES {
        init_page(page);
    }
}

fn init_page(page: &'static PackPage) {
    let Some(pack_select) = pack_select(page) else {
        return;
    };
    let Some(buy_btn) = query(page, "buy") else {
        return;
    };
    if query(page, "warning").is_none() {
        return;
    }

    update_selection(page);
    dom::on_event(pack_select.as_ref(), "change", move |_| {
        update_selection(page);
    });
    dom::on_click(&buy_btn, move |_| on_buy(page));
}

/// Reflect the selected pack into the price/summary/warning slots.
fn update_selection(page: &'static PackPage) {
    let Some(warning) = query(page, "warning") else {
        return;
    };

    match selection(page) {
        Some((amount, label)) => {
            if let Some(price_el) = query(page, "price") {
                dom::set_text(&price_el, &format!("Prix: {}", format::format_htg(amount)));
            }
            if let Some(attr) = page.summary_label_attr {
                if let Some(el) = query(page, attr) {
                    dom::set_text(&el, &label);
                }
            }
            if let Some(el) = query(page, "summary-price") {
                dom::set_text(&el, &format::format_htg(amount));
            }
            if page.promo {
                if let Some(el) = query(page, "promo") {
                    dom::set_text(&el, &promo_text(page, amount));
                }
            }
            set_ok(&warning, page.selected_notice);
        }
        None => {
            if let Some(price_el) = query(page, "price") {
                dom::set_text(&price_el, "Prix: --");
            }
            if let Some(attr) = page.summary_label_attr {
                if let Some(el) = query(page, attr) {
                    dom::set_text(&el, "--");
                }
            }
            if let Some(el) = query(page, "summary-price") {
                dom::set_text(&el, "--");
            }
            if let Some(el) = query(page, "promo") {
                dom::set_text(&el, "Promotion: --");
            }
            set_warn(&warning, page.idle_warning);
        }
    }
}

fn on_buy(page: &'static PackPage) {
    let Some(warning) = query(page, "warning") else {
        return;
    };

    if state::snapshot().current_user().is_none() {
        dom::redirect("auth.html");
        return;
    }

    let Some((amount, label)) = selection(page) else {
        set_warn(&warning, page.select_warning);
        return;
    };

    let mut contact = Vec::new();
    for field in page.contact_fields {
        let value = field_value(page, field);
        if value.is_empty() {
            let text = page.missing_contact_warning.unwrap_or(page.select_warning);
            set_warn(&warning, text);
            return;
        }
        contact.push((*field, value));
    }

    let mut name = format!("{} {label}", page.title);
    if let Some(extra) = page.extra_select {
        let value = field_value(page, extra);
        if !value.is_empty() {
            name.push_str(&format!(" + {value}"));
        }
    }
    if let Some(suffix) = page.name_suffix_field {
        if let Some((_, value)) = contact.iter().find(|(field, _)| *field == suffix) {
            name.push_str(&format!(" - {value}"));
        }
    }

    match state::with_mut(|s| s.purchase(&name, amount)) {
        Ok(()) => {
            set_ok(&warning, page.success_notice);
            if let Some(field) = page.clear_on_success {
                if let Some(input) = field_input(page, field) {
                    input.set_value("");
                }
            }
        }
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

// ── Element and value plumbing ──

fn attr(page: &PackPage, suffix: &str) -> String {
    format!("[data-{}-{suffix}]", page.prefix)
}

fn query(page: &PackPage, suffix: &str) -> Option<Element> {
    dom::query(&attr(page, suffix))
}

fn pack_select(page: &PackPage) -> Option<HtmlSelectElement> {
    dom::query_typed(&attr(page, "pack"))
}

/// Selected pack as `(price, label)`. `None` on the placeholder option.
fn selection(page: &PackPage) -> Option<(u128, String)> {
    let sel = pack_select(page)?;
    let option = dom::selected_option(&sel)?;
    let amount: u128 = option.value().parse().ok().filter(|a| *a > 0)?;
    let label = option.get_attribute("data-label")?;
    Some((amount, label))
}

fn promo_text(page: &PackPage, amount: u128) -> String {
    let original: u128 = pack_select(page)
        .and_then(|sel| dom::selected_option(&sel))
        .and_then(|o| o.get_attribute("data-original"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    if original > amount {
        format!(
            "Promotion: {} → {}",
            format::format_htg(original),
            format::format_htg(amount)
        )
    } else {
        "Promotion: Prix standard".to_owned()
    }
}

fn field_input(page: &PackPage, suffix: &str) -> Option<HtmlInputElement> {
    dom::query_typed(&attr(page, suffix))
}

/// Trimmed value of a page field (input or select).
fn field_value(page: &PackPage, suffix: &str) -> String {
    if let Some(input) = field_input(page, suffix) {
        return input.value().trim().to_owned();
    }
    if let Some(sel) = dom::query_typed::<HtmlSelectElement>(&attr(page, suffix)) {
        return dom::get_select_value(&sel);
    }
    String::new()
}

fn set_ok(el: &Element, text: &str) {
    dom::set_text(el, text);
    dom::remove_class(el, "warn");
    dom::add_class(el, "ok");
}

fn set_warn(el: &Element, text: &str) {
    dom::set_text(el, text);
    dom::remove_class(el, "ok");
    dom::add_class(el, "warn");
}
