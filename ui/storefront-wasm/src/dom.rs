//! DOM helpers.
//!
//! Pages locate their widgets by `data-*` attribute selectors and bail
//! out when a selector finds nothing (multi-page site; every page loads
//! the same bundle). Listener helpers wrap `Closure` + `forget`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, HtmlOptionElement, HtmlSelectElement};

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

pub fn query(selector: &str) -> Option<Element> {
    doc().query_selector(selector).ok()?
}

pub fn query_typed<T: JsCast>(selector: &str) -> Option<T> {
    query(selector).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let nl = doc().query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str) {
    let _ = el.class_list().toggle(cls);
}

pub fn get_select_value(el: &HtmlSelectElement) -> String {
    el.value()
}

/// The currently selected `<option>`, if any.
pub fn selected_option(sel: &HtmlSelectElement) -> Option<HtmlOptionElement> {
    let index = sel.selected_index();
    if index < 0 {
        return None;
    }
    sel.options()
        .item(index as u32)
        .and_then(|o| o.dyn_into::<HtmlOptionElement>().ok())
}

// ── Form field access ──

pub fn form_input(form: &Element, name: &str) -> Option<HtmlInputElement> {
    form.query_selector(&format!("[name='{name}']"))
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
}

/// Trimmed value of a named form field (input or select).
pub fn form_value(form: &Element, name: &str) -> String {
    let Some(el) = form.query_selector(&format!("[name='{name}']")).ok().flatten() else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value().trim().to_owned();
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return select.value();
    }
    String::new()
}

/// Untrimmed value of a named input (passwords keep their whitespace).
pub fn form_value_raw(form: &Element, name: &str) -> String {
    form_input(form, name).map(|i| i.value()).unwrap_or_default()
}

pub fn reset_form(form: &Element) {
    if let Some(form) = form.dyn_ref::<web_sys::HtmlFormElement>() {
        form.reset();
    }
}

// ── Listeners ──

pub fn on_click(el: &Element, f: impl FnMut(web_sys::MouseEvent) + 'static) {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

pub fn on_event(el: &Element, kind: &str, f: impl FnMut(web_sys::Event) + 'static) {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

/// Attach a submit handler; the default form submission is suppressed.
pub fn on_submit(form: &Element, mut f: impl FnMut() + 'static) {
    let cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
        e.prevent_default();
        f();
    }) as Box<dyn FnMut(_)>);
    form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

// ── Navigation and notices ──

pub fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

pub fn redirect(url: &str) {
    let _ = window().location().set_href(url);
}
