//! fr-FR money and date formatting.

use wasm_bindgen::JsValue;

/// HTG amount with fr-FR digit grouping (narrow no-break space).
pub fn format_htg(amount: u128) -> String {
    format!("{} HTG", group_thousands(amount))
}

fn group_thousands(amount: u128) -> String {
    let digits = amount.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('\u{202f}');
        }
        out.push(ch);
    }
    out
}

/// fr-FR date + time via the browser locale machinery.
pub fn format_datetime(epoch_ms: u128) -> String {
    js_date(epoch_ms)
        .to_locale_string("fr-FR", &JsValue::UNDEFINED)
        .into()
}

/// fr-FR date only.
pub fn format_date(epoch_ms: u128) -> String {
    js_date(epoch_ms)
        .to_locale_date_string("fr-FR", &JsValue::UNDEFINED)
        .into()
}

fn js_date(epoch_ms: u128) -> js_sys::Date {
    js_sys::Date::new(&JsValue::from_f64(epoch_ms as f64))
}
