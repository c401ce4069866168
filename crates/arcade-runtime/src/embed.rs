/// What a play activation should do to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// First activation: load the iframe from this source.
    Load { src: String },
    /// Already loaded, or the page has nothing to load.
    Ignored,
}

/// Loads the embedded game on the first play activation only.
#[derive(Debug, Default)]
pub struct GameLoader {
    src: Option<String>,
    loaded: bool,
}

impl GameLoader {
    pub fn new(src: Option<String>) -> Self {
        Self {
            src: src.filter(|s| !s.trim().is_empty()),
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn activate(&mut self) -> Activation {
        if self.loaded {
            return Activation::Ignored;
        }
        match &self.src {
            Some(src) => {
                self.loaded = true;
                Activation::Load { src: src.clone() }
            }
            None => Activation::Ignored,
        }
    }
}

/// Play button and overlay wiring. Each first activation loads the iframe and
/// counts one play.
#[cfg(target_family = "wasm")]
pub(crate) fn mount(document: &web_sys::Document, path: &str) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use crate::counter::{PlayCounter, parse_seed};
    use crate::storage::LocalStorage;

    let count_el = document.get_element_by_id("playCount");
    let seed = parse_seed(
        count_el
            .as_ref()
            .and_then(|el| el.get_attribute("data-plays"))
            .as_deref(),
    );
    let counter = PlayCounter::load(LocalStorage, path, seed);
    if let Some(el) = &count_el {
        el.set_text_content(Some(&counter.display()));
    }

    let Some(iframe) = document.get_element_by_id("gameIframe") else {
        return;
    };
    let overlay = document.get_element_by_id("playOverlay");
    let fullscreen = document.get_element_by_id("fullscreenBtn");
    let loader = Rc::new(RefCell::new(GameLoader::new(iframe.get_attribute("data-src"))));
    let counter = Rc::new(RefCell::new(counter));

    let play = {
        let overlay = overlay.clone();
        Rc::new(move || {
            let Activation::Load { src } = loader.borrow_mut().activate() else {
                return;
            };
            let _ = iframe.set_attribute("src", &src);
            if let Some(overlay) = &overlay {
                let _ = overlay.class_list().add_1("hidden");
            }
            if let Some(fullscreen) = &fullscreen {
                let _ = fullscreen.set_attribute("href", &src);
                let _ = fullscreen.class_list().add_1("visible");
            }
            let mut counter = counter.borrow_mut();
            counter.increment();
            if let Some(el) = &count_el {
                el.set_text_content(Some(&counter.display()));
            }
        })
    };

    if let Some(button) = document.get_element_by_id("playBtn") {
        let play = Rc::clone(&play);
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
            e.stop_propagation();
            play();
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    if let Some(overlay) = overlay {
        let target = overlay.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
            // Only clicks on the overlay backdrop itself.
            let on_overlay = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .is_some_and(|t| t == target);
            if on_overlay {
                play();
            }
        });
        let _ = overlay.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_activation_is_ignored() {
        let mut loader = GameLoader::new(Some("https://embed.example/snake".into()));
        assert_eq!(
            loader.activate(),
            Activation::Load {
                src: "https://embed.example/snake".into()
            }
        );
        assert!(loader.is_loaded());
        assert_eq!(loader.activate(), Activation::Ignored);
    }

    #[test]
    fn missing_source_never_loads() {
        let mut loader = GameLoader::new(Some("  ".into()));
        assert_eq!(loader.activate(), Activation::Ignored);
        assert!(!loader.is_loaded());
        assert_eq!(GameLoader::new(None).activate(), Activation::Ignored);
    }
}
