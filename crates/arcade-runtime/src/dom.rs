//! Small web-sys helpers shared by the page components. WASM only.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Anything with `querySelectorAll`.
pub(crate) trait Queryable {
    fn select_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue>;
}

impl Queryable for web_sys::Document {
    fn select_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl Queryable for web_sys::Element {
    fn select_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

pub(crate) fn query_all(root: &impl Queryable, selector: &str) -> Vec<web_sys::Element> {
    let Ok(list) = root.select_all(selector) else {
        crate::diag::console_warn!("bad selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

pub(crate) fn set_display(root: &impl Queryable, selector: &str, value: &str) {
    for el in query_all(root, selector) {
        if let Some(el) = el.dyn_ref::<web_sys::HtmlElement>() {
            let _ = el.style().set_property("display", value);
        }
    }
}

/// Run `f` once after `ms`. Returns the timer handle for cancellation.
pub(crate) fn set_timeout(ms: i32, f: impl FnOnce() + 'static) -> Option<i32> {
    let window = web_sys::window()?;
    let callback = Closure::once_into_js(f);
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        ms,
    ) {
        Ok(handle) => Some(handle),
        Err(e) => {
            crate::diag::console_warn!("setTimeout failed: {e:?}");
            None
        },
    }
}

/// Call `target[name](arg)` if it is a function. A returned promise is
/// awaited in the background; `on_fulfilled` runs only when it resolves.
pub(crate) fn call_method(
    target: &JsValue,
    name: &str,
    arg: &JsValue,
    on_fulfilled: impl FnOnce() + 'static,
) -> bool {
    let Ok(val) = js_sys::Reflect::get(target, &JsValue::from_str(name)) else {
        return false;
    };
    if !val.is_function() {
        return false;
    }
    let func: js_sys::Function = val.unchecked_into();
    let result = match func.call1(target, arg) {
        Ok(result) => result,
        Err(e) => {
            crate::diag::console_warn!("{name} failed: {e:?}");
            return true;
        },
    };
    match result.dyn_into::<js_sys::Promise>() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if wasm_bindgen_futures::JsFuture::from(promise).await.is_ok() {
                on_fulfilled();
            }
        }),
        Err(_) => on_fulfilled(),
    }
    true
}

/// `navigator[name](arg)`; false when the API is missing.
pub(crate) fn call_navigator_fn(name: &str, arg: &JsValue) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    call_method(&window.navigator(), name, arg, || {})
}

/// `navigator.clipboard.writeText(text)`, then `on_copied` once it succeeds.
pub(crate) fn write_clipboard(text: String, on_copied: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
        .unwrap_or(JsValue::UNDEFINED);
    if clipboard.is_undefined()
        || !call_method(&clipboard, "writeText", &JsValue::from_str(&text), on_copied)
    {
        crate::diag::console_warn!("clipboard unavailable");
    }
}

/// Current page path, used to key per-page storage.
pub(crate) fn page_path(window: &web_sys::Window) -> String {
    window.location().pathname().unwrap_or_else(|_| "/".to_string())
}
