/// Load the comments script this far before the section scrolls into view.
pub const ROOT_MARGIN_PX: f64 = 300.0;

/// Scroll fallback check for browsers without `IntersectionObserver`.
pub fn should_load(rect_top: f64, viewport_height: f64) -> bool {
    rect_top < viewport_height + ROOT_MARGIN_PX
}

/// Hands out the comments script source exactly once.
#[derive(Debug)]
pub struct CommentLoader {
    src: String,
    loaded: bool,
}

impl CommentLoader {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The script to inject, or `None` when it has already been requested.
    pub fn begin_load(&mut self) -> Option<&str> {
        if self.loaded || self.src.is_empty() {
            return None;
        }
        self.loaded = true;
        Some(&self.src)
    }
}

#[cfg(target_family = "wasm")]
pub(crate) fn mount(document: &web_sys::Document) {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    let (Some(wrapper), Some(_thread)) = (
        document.get_element_by_id("comments-wrapper"),
        document.get_element_by_id("disqus_thread"),
    ) else {
        return;
    };
    let Some(src) = wrapper.get_attribute("data-embed-src") else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    let loader = Rc::new(RefCell::new(CommentLoader::new(src)));
    let load = {
        let document = document.clone();
        let loader = Rc::clone(&loader);
        move || {
            if let Some(src) = loader.borrow_mut().begin_load() {
                inject_script(&document, src);
            }
        }
    };

    let has_observer = js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false);
    if has_observer {
        let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                let visible = entries.iter().any(|e| {
                    e.dyn_into::<web_sys::IntersectionObserverEntry>()
                        .is_ok_and(|e| e.is_intersecting())
                });
                if visible {
                    load();
                    observer.disconnect();
                }
            },
        );
        let options = web_sys::IntersectionObserverInit::new();
        options.set_root_margin(&format!("{ROOT_MARGIN_PX}px"));
        match web_sys::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => observer.observe(&wrapper),
            Err(e) => crate::diag::console_warn!("IntersectionObserver failed: {e:?}"),
        }
        callback.forget();
        return;
    }

    // Fallback: check on scroll, at most once per animation frame.
    let load = Rc::new(load);
    let ticking = Rc::new(Cell::new(false));
    let check = {
        let wrapper = wrapper.clone();
        let window = window.clone();
        let ticking = Rc::clone(&ticking);
        let load = Rc::clone(&load);
        move || {
            ticking.set(false);
            let height = window
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);
            if should_load(wrapper.get_bounding_client_rect().top(), height) {
                load();
            }
        }
    };
    let check = Rc::new(check);
    let on_scroll = {
        let window = window.clone();
        let check = Rc::clone(&check);
        let loader = Rc::clone(&loader);
        Closure::<dyn FnMut()>::new(move || {
            if ticking.get() || loader.borrow().is_loaded() {
                return;
            }
            ticking.set(true);
            let check = Rc::clone(&check);
            let frame = Closure::once_into_js(move || check());
            let _ = window.request_animation_frame(frame.unchecked_ref());
        })
    };
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(true);
    let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        on_scroll.as_ref().unchecked_ref(),
        &options,
    );
    on_scroll.forget();
    check();
}

#[cfg(target_family = "wasm")]
fn inject_script(document: &web_sys::Document, src: &str) {
    let Ok(script) = document.create_element("script") else {
        return;
    };
    let _ = script.set_attribute("src", src);
    let _ = script.set_attribute("data-timestamp", &js_sys::Date::now().to_string());
    let _ = script.set_attribute("async", "");
    let parent: Option<web_sys::Node> = match document.head() {
        Some(head) => Some(head.into()),
        None => document.body().map(Into::into),
    };
    if let Some(parent) = parent
        && let Err(e) = parent.append_child(&script)
    {
        crate::diag::console_warn!("comments script injection failed: {e:?}");
    }
}
