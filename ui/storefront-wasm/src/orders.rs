//! Orders page: the signed-in user's purchase history.

use crate::{dom, format};
use np_types::{OrderStatus, StateDocument};

pub fn init(doc: &StateDocument) {
    render(doc);
}

pub fn render(doc: &StateDocument) {
    let Some(body) = dom::query("[data-orders]") else {
        return;
    };

    let Some(user) = doc.current_user() else {
        dom::set_inner_html(
            &body,
            r#"<tr><td colspan="5">Veuillez vous connecter pour voir vos commandes.</td></tr>"#,
        );
        return;
    };

    let rows: Vec<String> = doc
        .orders
        .iter()
        .filter(|o| o.user_id == user.id)
        .map(|o| {
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><span class="badge success">{}</span></td></tr>"#,
                o.id,
                o.product,
                format::format_htg(o.amount),
                format::format_date(o.at_epoch_ms),
                status_label(o.status),
            )
        })
        .collect();

    if rows.is_empty() {
        dom::set_inner_html(
            &body,
            r#"<tr><td colspan="5">Aucune commande pour le moment.</td></tr>"#,
        );
    } else {
        dom::set_inner_html(&body, &rows.join(""));
    }
}

fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Delivered => "Livré",
    }
}
