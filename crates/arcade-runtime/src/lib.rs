//! Browser behaviour for generated site pages: theme, play counter, game
//! loading, ratings, sharing, search, lazy comments and the mobile menu.

pub mod comments;
pub mod counter;
mod diag;
pub mod embed;
pub mod embed_code;
pub mod menu;
pub mod rating;
pub mod search;
pub mod share;
pub mod storage;
pub mod theme;

#[cfg(target_family = "wasm")]
mod dom;
#[cfg(target_family = "wasm")]
mod page;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        page::Page::mount();
    }
}
