//! Reusable fragments: game cards and tag/category chips.

use super::escape;
use crate::catalog::Game;
use crate::format::format_count;
use crate::settings::SiteSettings;
use crate::slug::slugify;

const PLAY_ICON: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"24\" height=\"24\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\" class=\"lucide lucide-play h-4 w-4\"><polygon points=\"6 3 20 12 6 21 6 3\"></polygon></svg>";

/// Which chip family to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipKind {
    Tag,
    Category,
}

impl ChipKind {
    fn route(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Category => "category",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Tag => "bg-secondary text-secondary-foreground",
            Self::Category => "bg-primary text-primary-foreground",
        }
    }
}

/// Large square card used in the related games grid.
pub fn game_card(game: &Game, settings: &SiteSettings) -> String {
    let slug = escape(&game.slug);
    let title = escape(&game.title);
    format!(
        "<a href=\"/{slug}/\"><div class=\"group relative aspect-square rounded-lg overflow-hidden bg-card border border-card-border hover-elevate transition-all duration-200 hover:scale-105\" data-testid=\"game-card-{slug}\">\
         <img src=\"{icon}\" alt=\"{title}\" class=\"w-full h-full object-contain bg-muted\" loading=\"lazy\" />\
         <div class=\"absolute inset-0 bg-gradient-to-t from-black/80 via-black/20 to-transparent\"></div>\
         <div class=\"absolute bottom-0 left-0 right-0 p-4\"><h3 class=\"font-heading text-lg font-semibold text-white mb-2 line-clamp-2\">{title}</h3>\
         <div class=\"flex items-center gap-1 text-sm text-white/80\">{PLAY_ICON}<span>{plays}</span></div></div></div></a>",
        icon = escape(&settings.icon_url(&game.icon)),
        plays = format_count(game.plays),
    )
}

/// Compact row used in the popular games sidebar. Falls back to the share
/// image when the game has no icon.
pub fn popular_item(game: &Game, settings: &SiteSettings) -> String {
    let slug = escape(&game.slug);
    let title = escape(&game.title);
    let icon = if game.icon.is_empty() {
        &game.image
    } else {
        &game.icon
    };
    format!(
        "<a href=\"/{slug}/\"><div class=\"flex gap-3 p-3 rounded-md border bg-card hover-elevate cursor-pointer transition-colors\" data-testid=\"popular-game-{slug}\">\
         <img src=\"{icon}\" alt=\"{title}\" class=\"w-16 h-16 object-cover rounded\" />\
         <div class=\"flex-1 min-w-0\"><h4 class=\"font-semibold text-sm truncate\">{title}</h4>\
         <div class=\"flex items-center gap-1 text-xs text-muted-foreground mt-1\">{PLAY_ICON}<span>{plays}</span></div></div></div></a>",
        icon = escape(&settings.icon_url(icon)),
        plays = format_count(game.plays),
    )
}

/// Grid card for list pages and the homepage. Carries the data attributes the
/// search filter matches against.
pub fn simple_card(game: &Game, settings: &SiteSettings) -> String {
    let title = escape(&game.title);
    format!(
        "<a class=\"game-card group bg-card rounded-lg overflow-hidden hover-elevate\" href=\"/{slug}/\" data-title=\"{title}\" data-category=\"{category}\">\
         <div class=\"aspect-square\"><img src=\"{icon}\" alt=\"{title}\" class=\"w-full h-full object-contain bg-muted\" loading=\"lazy\" /></div>\
         <div class=\"p-3\"><h3 class=\"font-heading font-semibold truncate\">{title}</h3>\
         <p class=\"text-sm text-muted-foreground\">{plays} plays</p></div></a>",
        slug = escape(&game.slug),
        category = escape(&game.categories.join(" ")),
        icon = escape(&settings.icon_url(&game.icon)),
        plays = format_count(game.plays),
    )
}

/// Linked chip for each name, routed to `/tag/<slug>` or `/category/<slug>`.
pub fn chips(names: &[String], kind: ChipKind) -> String {
    names
        .iter()
        .map(|name| {
            let slug = slugify(name);
            format!(
                "<a href=\"/{route}/{slug}\"><div class=\"whitespace-nowrap inline-flex items-center rounded-md border px-2.5 py-0.5 text-xs font-semibold transition-colors hover-elevate border-transparent {class} cursor-pointer\" data-testid=\"game-{route}-{slug}\">{name}</div></a>",
                route = kind.route(),
                class = kind.class(),
                name = escape(name),
            )
        })
        .collect()
}
