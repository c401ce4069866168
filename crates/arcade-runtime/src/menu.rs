pub const TOGGLE_SELECTOR: &str = "[data-testid=\"button-menu-toggle\"]";
pub const MENU_ID: &str = "site-header-mobile-menu";
pub const MENU_CLASS: &str = "md:hidden py-4 space-y-2";
pub const LINK_CLASS: &str = "block px-3 py-2 rounded-md";

/// Desktop nav links copied into the mobile menu: (source test id, copy test id).
pub const MOBILE_LINKS: [(&str, &str); 2] = [
    ("link-browse", "link-browse-mobile"),
    ("link-categories", "link-categories-mobile"),
];

/// Display value after a toggle click on an existing menu.
pub fn next_display(current: &str) -> &'static str {
    if current == "block" { "none" } else { "block" }
}

/// Header menu button: builds the mobile menu on first click, then toggles it.
#[cfg(target_family = "wasm")]
pub(crate) fn mount(document: &web_sys::Document) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    let Some(toggle) = document.query_selector(TOGGLE_SELECTOR).ok().flatten() else {
        return;
    };
    let doc = document.clone();
    let header = toggle.closest("header").ok().flatten();
    let closure = Closure::<dyn FnMut()>::new(move || {
        if let Some(menu) = doc
            .get_element_by_id(MENU_ID)
            .and_then(|m| m.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let style = menu.style();
            let current = style.get_property_value("display").unwrap_or_default();
            let _ = style.set_property("display", next_display(&current));
            return;
        }
        let Some(header) = &header else {
            return;
        };
        if let Err(e) = build_menu(&doc, header) {
            crate::diag::console_warn!("mobile menu failed: {e:?}");
        }
    });
    let _ = toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[cfg(target_family = "wasm")]
fn build_menu(
    document: &web_sys::Document,
    header: &web_sys::Element,
) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let menu: web_sys::HtmlElement = document.create_element("div")?.unchecked_into();
    menu.set_id(MENU_ID);
    menu.set_class_name(MENU_CLASS);
    for (source, testid) in MOBILE_LINKS {
        let Some(link) = document
            .query_selector(&format!("[data-testid=\"{source}\"]"))?
        else {
            continue;
        };
        let copy = document.create_element("a")?;
        copy.set_attribute("href", &link.get_attribute("href").unwrap_or_default())?;
        copy.set_text_content(Some(&link.text_content().unwrap_or_default()));
        copy.set_class_name(LINK_CLASS);
        copy.set_attribute("data-testid", testid)?;
        menu.append_child(&copy)?;
    }
    header.append_child(&menu)?;
    menu.style().set_property("display", "block")
}
