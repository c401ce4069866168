use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Parse a stored value. Anything unrecognised falls back to dark.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Whether the sun icon is visible. The moon icon shows otherwise.
    pub fn shows_sun(self) -> bool {
        self == Theme::Light
    }
}

/// Current theme plus its persistence. DOM updates are applied by the caller
/// after each change.
pub struct ThemeManager<S: KeyValueStore> {
    store: S,
    current: Theme,
}

impl<S: KeyValueStore> ThemeManager<S> {
    pub fn load(store: S) -> Self {
        let current = Theme::from_stored(store.get(THEME_KEY).as_deref());
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.store.set(THEME_KEY, self.current.as_str());
        self.current
    }
}

#[cfg(target_family = "wasm")]
pub(crate) fn mount(document: &web_sys::Document) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    let manager = ThemeManager::load(crate::storage::LocalStorage);
    apply(document, manager.current());

    let Some(toggle) = document.get_element_by_id("themeToggle") else {
        return;
    };
    let manager = Rc::new(RefCell::new(manager));
    let doc = document.clone();
    let closure = Closure::<dyn FnMut()>::new(move || {
        let theme = manager.borrow_mut().toggle();
        apply(&doc, theme);
    });
    let _ = toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[cfg(target_family = "wasm")]
fn apply(document: &web_sys::Document, theme: Theme) {
    if let Some(body) = document.body() {
        let classes = body.class_list();
        let _ = classes.remove_1(theme.toggled().as_str());
        let _ = classes.add_1(theme.as_str());
    }
    let (shown, hidden) = if theme.shows_sun() {
        (".sun-icon", ".moon-icon")
    } else {
        (".moon-icon", ".sun-icon")
    };
    crate::dom::set_display(document, shown, "block");
    crate::dom::set_display(document, hidden, "none");
}
