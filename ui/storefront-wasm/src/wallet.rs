//! Wallet page: balance, top-up form, payment-method info, proof upload,
//! and the recent-transactions table.
//!
//! Amount and proof validation happen here; the store records whatever
//! this page accepted.

use crate::{dom, format, state};
use np_types::{StateDocument, TxKind};
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

/// How many ledger entries the table shows.
const RECENT_TX: usize = 8;

struct PaymentAccount {
    method: &'static str,
    number: &'static str,
    holder: &'static str,
}

const PAYMENT_ACCOUNTS: &[PaymentAccount] = &[
    PaymentAccount {
        method: "MonCash",
        number: "34186164",
        holder: "Juvens Mervil",
    },
    PaymentAccount {
        method: "NatCash",
        number: "42219380",
        holder: "Mervil Celicien",
    },
];

pub fn init(doc: &StateDocument) {
    let Some(balance_el) = dom::query("[data-balance]") else {
        return;
    };

    if doc.current_user().is_none() {
        dom::set_text(&balance_el, "Connectez-vous pour gérer votre wallet");
        return;
    }

    render(doc);
    render_method_info();

    if let Some(select) = dom::query_typed::<HtmlSelectElement>("[data-payment-method]") {
        dom::on_event(select.as_ref(), "change", move |_| render_method_info());
    }

    if let Some(proof) = dom::query_typed::<HtmlInputElement>("[data-proof-upload]") {
        let proof2 = proof.clone();
        dom::on_event(proof.as_ref(), "change", move |_| {
            let Some(status) = dom::query("[data-proof-status]") else {
                return;
            };
            match proof_file_name(&proof2) {
                Some(name) => {
                    dom::set_text(&status, &format!("Photo sélectionnée: {name}"));
                    dom::add_class(&status, "ok");
                }
                None => {
                    dom::set_text(&status, "Aucune photo sélectionnée.");
                    dom::remove_class(&status, "ok");
                }
            }
        });
    }

    if let Some(form) = dom::query("[data-add-funds]") {
        let form2 = form.clone();
        dom::on_submit(&form, move || on_add_funds(&form2));
    }
}

/// Re-render balance and transactions from the given document. No-op on
/// pages without the wallet widgets or with no user signed in.
pub fn render(doc: &StateDocument) {
    let Some(balance_el) = dom::query("[data-balance]") else {
        return;
    };
    let Some(user) = doc.current_user() else {
        return;
    };

    dom::set_text(&balance_el, &format::format_htg(user.wallet));

    let Some(tx_body) = dom::query("[data-transactions]") else {
        return;
    };
    let rows: Vec<String> = doc
        .transactions
        .iter()
        .filter(|t| t.user_id == user.id)
        .take(RECENT_TX)
        .map(|t| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                format::format_datetime(t.at_epoch_ms),
                t.label,
                kind_label(t.kind),
                format::format_htg(t.amount),
            )
        })
        .collect();

    if rows.is_empty() {
        dom::set_inner_html(
            &tx_body,
            r#"<tr><td colspan="4">Aucune transaction pour le moment.</td></tr>"#,
        );
    } else {
        dom::set_inner_html(&tx_body, &rows.join(""));
    }
}

fn on_add_funds(form: &Element) {
    let amount: u128 = dom::form_value(form, "amount").parse().unwrap_or(0);
    if amount == 0 {
        return;
    }
    let method = dom::form_value(form, "method");

    let proof = dom::query_typed::<HtmlInputElement>("[data-proof-upload]");
    let file_name = proof.as_ref().and_then(proof_file_name);
    let status = dom::query("[data-proof-status]");

    let Some(file_name) = file_name else {
        if let Some(status) = &status {
            dom::set_text(status, "⚠️ Veuillez uploader une photo de preuve.");
            dom::remove_class(status, "ok");
        }
        return;
    };

    // Payment proof is a filename only: there is no processor behind this.
    let label = format!("Recharge via {method} (preuve: {file_name})");
    match state::with_mut(|s| s.top_up(amount, &label)) {
        Ok(()) => {
            dom::reset_form(form);
            render_method_info();
            if let Some(status) = &status {
                dom::set_text(status, "Aucune photo sélectionnée.");
                dom::remove_class(status, "ok");
            }
        }
        Err(e) => {
            gloo_console::error!(e.to_string());
            dom::alert("Recharge impossible. Réessayez.");
        }
    }
}

fn render_method_info() {
    let Some(select) = dom::query_typed::<HtmlSelectElement>("[data-payment-method]") else {
        return;
    };
    let Some(info) = dom::query("[data-payment-info]") else {
        return;
    };

    let method = dom::get_select_value(&select);
    let Some(account) = PAYMENT_ACCOUNTS.iter().find(|a| a.method == method) else {
        return;
    };

    dom::set_inner_html(
        &info,
        &format!(
            "<p><strong>{} :</strong> {}</p><p><strong>Nom :</strong> {}</p>",
            account.method, account.number, account.holder
        ),
    );
}

fn proof_file_name(input: &HtmlInputElement) -> Option<String> {
    let file = input.files()?.get(0)?;
    Some(file.name())
}

fn kind_label(kind: TxKind) -> &'static str {
    match kind {
        TxKind::Credit => "Crédit",
        TxKind::Debit => "Débit",
    }
}
