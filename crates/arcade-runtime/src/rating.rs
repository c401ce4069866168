use crate::storage::{KeyValueStore, rating_key};

pub const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarState {
    Empty,
    Filled,
    Hovered,
}

impl StarState {
    pub fn class(self) -> Option<&'static str> {
        match self {
            StarState::Empty => None,
            StarState::Filled => Some("filled"),
            StarState::Hovered => Some("hovered"),
        }
    }
}

/// Star states for `rating`; stars below it take `state`, the rest are empty.
pub fn star_states(rating: u8, state: StarState) -> [StarState; MAX_STARS as usize] {
    std::array::from_fn(|i| {
        if (i as u8) < rating {
            state
        } else {
            StarState::Empty
        }
    })
}

/// Per-page 1..=5 rating. Hovering previews without persisting.
pub struct RatingWidget<S: KeyValueStore> {
    store: S,
    key: String,
    rating: u8,
}

impl<S: KeyValueStore> RatingWidget<S> {
    pub fn load(store: S, path: &str) -> Self {
        let key = rating_key(path);
        let rating = store
            .get(&key)
            .and_then(|v| v.trim().parse::<u8>().ok())
            .map_or(0, |r| r.min(MAX_STARS));
        Self { store, key, rating }
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// States while the pointer is over star `index` (0-based).
    pub fn hover(&self, index: usize) -> [StarState; MAX_STARS as usize] {
        star_states(star_value(index), StarState::Hovered)
    }

    /// States after the pointer leaves the widget.
    pub fn current(&self) -> [StarState; MAX_STARS as usize] {
        star_states(self.rating, StarState::Filled)
    }

    /// Persist a click on star `index` (0-based). Last write wins.
    pub fn select(&mut self, index: usize) -> [StarState; MAX_STARS as usize] {
        self.rating = star_value(index);
        self.store.set(&self.key, &self.rating.to_string());
        self.current()
    }
}

#[cfg(target_family = "wasm")]
pub(crate) fn mount(document: &web_sys::Document, path: &str) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    let Some(container) = document.get_element_by_id("ratingStars") else {
        return;
    };
    let stars = Rc::new(crate::dom::query_all(&container, ".star"));
    let widget = Rc::new(RefCell::new(RatingWidget::load(
        crate::storage::LocalStorage,
        path,
    )));
    paint(&stars, &widget.borrow().current());

    for (index, star) in stars.iter().enumerate() {
        for event in ["mouseenter", "mouseleave", "click"] {
            let stars = Rc::clone(&stars);
            let widget = Rc::clone(&widget);
            let closure = Closure::<dyn FnMut()>::new(move || {
                let states = match event {
                    "mouseenter" => widget.borrow().hover(index),
                    "click" => widget.borrow_mut().select(index),
                    _ => widget.borrow().current(),
                };
                paint(&stars, &states);
            });
            let _ = star.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_family = "wasm")]
fn paint(stars: &[web_sys::Element], states: &[StarState]) {
    for (star, state) in stars.iter().zip(states) {
        let classes = star.class_list();
        let _ = classes.remove_2("filled", "hovered");
        if let Some(class) = state.class() {
            let _ = classes.add_1(class);
        }
    }
}

fn star_value(index: usize) -> u8 {
    (index.min(MAX_STARS as usize - 1) + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use StarState::{Empty, Filled, Hovered};

    #[test]
    fn hover_does_not_persist() {
        let store = MemoryStore::default();
        let widget = RatingWidget::load(&store, "/snake/");
        assert_eq!(widget.hover(2), [Hovered, Hovered, Hovered, Empty, Empty]);
        assert_eq!(widget.current(), [Empty; 5]);
        assert_eq!(store.get("rating_/snake/"), None);
    }

    #[test]
    fn last_click_wins() {
        let store = MemoryStore::default();
        let mut widget = RatingWidget::load(&store, "/snake/");
        widget.select(4);
        assert_eq!(widget.select(1), [Filled, Filled, Empty, Empty, Empty]);
        assert_eq!(store.get("rating_/snake/").as_deref(), Some("2"));
        assert_eq!(RatingWidget::load(&store, "/snake/").rating(), 2);
    }

    #[test]
    fn out_of_range_values_clamp() {
        let store = MemoryStore::default();
        store.set("rating_/pong/", "9");
        let mut widget = RatingWidget::load(&store, "/pong/");
        assert_eq!(widget.rating(), 5);
        widget.select(12);
        assert_eq!(widget.rating(), 5);
    }
}
