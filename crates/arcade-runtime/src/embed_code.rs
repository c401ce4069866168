pub const COPIED_LABEL: &str = "Copied!";
pub const COPIED_CLASS: &str = "copied";
pub const FEEDBACK_MS: i32 = 2000;

/// Copies the embed snippet textarea and flashes the button label.
#[cfg(target_family = "wasm")]
pub(crate) fn mount(document: &web_sys::Document) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    let (Some(button), Some(textarea)) = (
        document.get_element_by_id("copyEmbed"),
        document
            .get_element_by_id("embedCode")
            .and_then(|e| e.dyn_into::<web_sys::HtmlTextAreaElement>().ok()),
    ) else {
        return;
    };

    let target = button.clone();
    let closure = Closure::<dyn FnMut()>::new(move || {
        let button = target.clone();
        crate::dom::write_clipboard(textarea.value(), move || {
            let original = button.text_content().unwrap_or_default();
            button.set_text_content(Some(COPIED_LABEL));
            let _ = button.class_list().add_1(COPIED_CLASS);
            crate::dom::set_timeout(FEEDBACK_MS, move || {
                button.set_text_content(Some(&original));
                let _ = button.class_list().remove_1(COPIED_CLASS);
            });
        });
    });
    let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
