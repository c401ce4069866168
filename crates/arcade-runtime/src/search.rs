pub const DEBOUNCE_MS: i32 = 200;

/// Searchable text of one card, lowercased once at mount.
#[derive(Debug, Clone)]
struct Entry {
    title: String,
    category: String,
}

/// Result of filtering the card grid against a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Normalised query (lowercased, trimmed).
    pub query: String,
    /// Per-card visibility, in card order.
    pub visible: Vec<bool>,
    pub count: usize,
}

impl FilterOutcome {
    /// The "N results for ..." line is shown only while searching.
    pub fn show_info(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn show_no_results(&self) -> bool {
        self.count == 0 && !self.query.is_empty()
    }
}

/// Substring filter over card titles and categories.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    entries: Vec<Entry>,
}

impl SearchFilter {
    pub fn new<'a>(cards: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = cards
            .into_iter()
            .map(|(title, category)| Entry {
                title: title.to_lowercase(),
                category: category.to_lowercase(),
            })
            .collect();
        Self { entries }
    }

    pub fn filter(&self, raw_query: &str) -> FilterOutcome {
        let query = raw_query.to_lowercase().trim().to_string();
        let visible: Vec<bool> = self
            .entries
            .iter()
            .map(|e| query.is_empty() || e.title.contains(&query) || e.category.contains(&query))
            .collect();
        let count = visible.iter().filter(|v| **v).count();
        FilterOutcome {
            query,
            visible,
            count,
        }
    }
}

#[cfg(target_family = "wasm")]
pub(crate) fn mount(document: &web_sys::Document) {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    let (Some(input), Some(grid)) = (
        document
            .get_element_by_id("searchInput")
            .and_then(|e| e.dyn_into::<web_sys::HtmlInputElement>().ok()),
        document.get_element_by_id("gamesGrid"),
    ) else {
        return;
    };

    let cards = crate::dom::query_all(&grid, ".game-card");
    let attrs: Vec<(String, String)> = cards
        .iter()
        .map(|c| {
            (
                c.get_attribute("data-title").unwrap_or_default(),
                c.get_attribute("data-category").unwrap_or_default(),
            )
        })
        .collect();
    let filter = Rc::new(SearchFilter::new(
        attrs.iter().map(|(t, c)| (t.as_str(), c.as_str())),
    ));
    let cards = Rc::new(cards);
    let document = document.clone();
    let pending = Rc::new(Cell::new(None::<i32>));
    let target = input.clone();

    let closure = Closure::<dyn FnMut()>::new(move || {
        if let Some(handle) = pending.take()
            && let Some(window) = web_sys::window()
        {
            window.clear_timeout_with_handle(handle);
        }
        let input = input.clone();
        let filter = Rc::clone(&filter);
        let cards = Rc::clone(&cards);
        let document = document.clone();
        let handle = crate::dom::set_timeout(DEBOUNCE_MS, move || {
            apply(&document, &cards, &filter.filter(&input.value()));
        });
        pending.set(handle);
    });
    let _ = target.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[cfg(target_family = "wasm")]
fn apply(document: &web_sys::Document, cards: &[web_sys::Element], outcome: &FilterOutcome) {
    for (card, visible) in cards.iter().zip(&outcome.visible) {
        let _ = card.class_list().toggle_with_force("hidden", !visible);
    }
    if let Some(info) = document.get_element_by_id("searchResultsInfo") {
        if outcome.show_info() {
            if let Some(count) = document.get_element_by_id("resultCount") {
                count.set_text_content(Some(&outcome.count.to_string()));
            }
            if let Some(term) = document.get_element_by_id("searchTerm") {
                term.set_text_content(Some(&outcome.query));
            }
            let _ = info.class_list().add_1("visible");
        } else {
            let _ = info.class_list().remove_1("visible");
        }
    }
    if let Some(empty) = document.get_element_by_id("noResults") {
        let _ = empty
            .class_list()
            .toggle_with_force("visible", outcome.show_no_results());
    }
}
