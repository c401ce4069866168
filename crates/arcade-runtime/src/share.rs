/// Popup window features used for network share dialogs.
pub const POPUP_FEATURES: &str = "width=600,height=400,noopener,noreferrer";

/// Shown in the copy button for two seconds after a successful copy.
pub const COPIED_ICON: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" fill=\"none\" viewBox=\"0 0 24 24\" stroke=\"currentColor\"><path stroke-linecap=\"round\" stroke-linejoin=\"round\" stroke-width=\"2\" d=\"M5 13l4 4L19 7\"/></svg>";

pub const COPIED_FEEDBACK_MS: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Facebook,
    Twitter,
    WhatsApp,
    Telegram,
    Copy,
    Native,
}

impl ShareTarget {
    /// Map a `data-share` attribute value.
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "facebook" => ShareTarget::Facebook,
            "twitter" => ShareTarget::Twitter,
            "whatsapp" => ShareTarget::WhatsApp,
            "telegram" => ShareTarget::Telegram,
            "copy" => ShareTarget::Copy,
            "native" => ShareTarget::Native,
            _ => return None,
        })
    }

    /// Share dialog URL for network targets; `None` for copy and native.
    pub fn popup_url(self, page_url: &str, title: &str) -> Option<String> {
        let url = encode_uri_component(page_url);
        let title = encode_uri_component(title);
        match self {
            ShareTarget::Facebook => Some(format!(
                "https://www.facebook.com/sharer/sharer.php?u={url}"
            )),
            ShareTarget::Twitter => Some(format!(
                "https://twitter.com/intent/tweet?url={url}&text={title}"
            )),
            ShareTarget::WhatsApp => Some(format!("https://wa.me/?text={title}%20{url}")),
            ShareTarget::Telegram => Some(format!(
                "https://t.me/share/url?url={url}&text={title}"
            )),
            ShareTarget::Copy | ShareTarget::Native => None,
        }
    }
}

/// Percent-encode a URL component with the browser's `encodeURIComponent`.
#[cfg(target_family = "wasm")]
pub fn encode_uri_component(input: &str) -> String {
    String::from(js_sys::encode_uri_component(input))
}

/// Native builds have no JS engine. Everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` becomes uppercase `%XX` UTF-8 bytes, as
/// `encodeURIComponent` does.
#[cfg(not(target_family = "wasm"))]
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(target_family = "wasm")]
pub(crate) fn mount(document: &web_sys::Document) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    for button in crate::dom::query_all(document, ".share-btn") {
        let Some(target) = button
            .get_attribute("data-share")
            .as_deref()
            .and_then(ShareTarget::from_key)
        else {
            continue;
        };
        let closure = Closure::<dyn FnMut()>::new(move || share(target));
        let _ = button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_family = "wasm")]
fn share(target: ShareTarget) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let href = window.location().href().unwrap_or_default();
    match target {
        ShareTarget::Copy => copy_link(&document, href),
        ShareTarget::Native => {
            let data = js_sys::Object::new();
            let _ = js_sys::Reflect::set(&data, &"title".into(), &document.title().into());
            let _ = js_sys::Reflect::set(&data, &"url".into(), &href.clone().into());
            // Rejections (user cancelled) are ignored; a missing API falls back to copy.
            if !crate::dom::call_navigator_fn("share", &data.into()) {
                copy_link(&document, href);
            }
        }
        _ => {
            if let Some(url) = target.popup_url(&href, &document.title())
                && let Err(e) = window.open_with_url_and_target_and_features(
                    &url,
                    "_blank",
                    POPUP_FEATURES,
                )
            {
                crate::diag::console_warn!("share popup blocked: {e:?}");
            }
        }
    }
}

#[cfg(target_family = "wasm")]
fn copy_link(document: &web_sys::Document, href: String) {
    let button = document.query_selector("[data-share=\"copy\"]").ok().flatten();
    crate::dom::write_clipboard(href, move || {
        if let Some(button) = button {
            let original = button.inner_html();
            button.set_inner_html(COPIED_ICON);
            crate::dom::set_timeout(COPIED_FEEDBACK_MS, move || button.set_inner_html(&original));
        }
    });
}
