//! Page wiring: every component looks for its own elements and stays inert
//! when they are absent, so one bundle serves all generated pages.

pub struct Page;

impl Page {
    pub fn mount() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let path = crate::dom::page_path(&window);

        crate::theme::mount(&document);
        crate::menu::mount(&document);
        crate::embed::mount(&document, &path);
        crate::rating::mount(&document, &path);
        crate::share::mount(&document);
        crate::embed_code::mount(&document);
        crate::search::mount(&document);
        crate::comments::mount(&document);
    }
}
