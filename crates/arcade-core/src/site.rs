//! The set of pages making up the generated site.
//!
//! Planning renders every page to memory; writing (and merging with what is
//! already on disk) is left to the caller.

use serde::Serialize;

use crate::catalog::Game;
use crate::listing::{
    created_timestamp, distinct_by_slug, games_in_category, games_tagged, sort_by_created_desc,
    sort_by_plays_desc,
};
use crate::render::RenderContext;
use crate::render::detail::game_page;
use crate::render::home::homepage;
use crate::render::listing::{ListPage, categories_index, list_page, tags_index};

pub const POPULAR_GRID: &str = "popular-grid";
pub const NEW_GRID: &str = "new-grid";
pub const LIST_GRID: &str = "list-grid";
pub const TAGS_GRID: &str = "tags-grid";
pub const CATEGORIES_GRID: &str = "categories-grid";

/// One rendered file of the site tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitePage {
    /// Path relative to the site root, e.g. `tag/puzzle/index.html`.
    pub path: String,
    #[serde(skip)]
    pub html: String,
    /// Region ids to splice into an existing file. Empty means the file is
    /// replaced wholesale.
    pub regions: Vec<&'static str>,
}

impl SitePage {
    fn new(path: impl Into<String>, html: String, regions: Vec<&'static str>) -> Self {
        Self {
            path: path.into(),
            html,
            regions,
        }
    }
}

fn index_path(dir: &str) -> String {
    format!("{}/index.html", dir.trim_matches('/'))
}

pub fn plan_game_page(ctx: &RenderContext<'_>, game: &Game) -> SitePage {
    SitePage::new(index_path(&game.slug), game_page(ctx, game), Vec::new())
}

pub fn plan_homepage(ctx: &RenderContext<'_>) -> SitePage {
    let limit = ctx.settings.homepage_limit;
    let games = &ctx.catalog.games;
    let popular: Vec<&Game> = sort_by_plays_desc(games).into_iter().take(limit).collect();
    let newest: Vec<&Game> = sort_by_created_desc(games).into_iter().take(limit).collect();
    SitePage::new(
        "index.html",
        homepage(ctx, &popular, &newest),
        vec![POPULAR_GRID, NEW_GRID],
    )
}

fn sorted_by_created(mut games: Vec<&Game>) -> Vec<&Game> {
    games.sort_by_key(|g| std::cmp::Reverse(created_timestamp(&g.created_at)));
    games
}

/// Browse, new, popular, the tag and category indexes, then one page per
/// distinct tag and per distinct category.
pub fn plan_list_pages(ctx: &RenderContext<'_>) -> Vec<SitePage> {
    let catalog = ctx.catalog;
    let games = &catalog.games;
    let mut pages = Vec::new();

    let fixed = [
        (
            ListPage::new("Browse Games", "Browse all unblocked games.", "browse"),
            sort_by_created_desc(games),
        ),
        (
            ListPage::new(
                "New Games - Unblocked Games 6x",
                "Play the latest unblocked games added to the site.",
                "new-games",
            ),
            sort_by_created_desc(games),
        ),
        (
            ListPage::new(
                "Popular Games - Unblocked Games 6x",
                "Play the most popular unblocked games.",
                "popular-games",
            ),
            sort_by_plays_desc(games),
        ),
    ];
    for (page, list) in fixed {
        pages.push(SitePage::new(
            index_path(&page.path),
            list_page(ctx, &page, &list),
            vec![LIST_GRID],
        ));
    }

    pages.push(SitePage::new(index_path("tags"), tags_index(ctx), vec![TAGS_GRID]));
    pages.push(SitePage::new(
        index_path("categories"),
        categories_index(ctx),
        vec![CATEGORIES_GRID],
    ));

    for (tag, slug) in distinct_by_slug(&catalog.tags) {
        let page = ListPage::new(
            format!("Tag: {tag}"),
            format!("Games tagged {tag}."),
            format!("tag/{slug}"),
        );
        let list = sorted_by_created(games_tagged(games, tag));
        pages.push(SitePage::new(
            index_path(&page.path),
            list_page(ctx, &page, &list),
            vec![LIST_GRID],
        ));
    }

    for (category, slug) in distinct_by_slug(&catalog.categories) {
        let page = ListPage::new(
            format!("Category: {category}"),
            format!("Games in category {category}."),
            format!("category/{slug}"),
        );
        let list = sorted_by_created(games_in_category(games, category));
        pages.push(SitePage::new(
            index_path(&page.path),
            list_page(ctx, &page, &list),
            vec![LIST_GRID],
        ));
    }

    tracing::debug!(count = pages.len(), "Planned list pages");
    pages
}

/// Homepage, list pages and every game page.
pub fn plan_site(ctx: &RenderContext<'_>) -> Vec<SitePage> {
    let mut pages = vec![plan_homepage(ctx)];
    pages.extend(plan_list_pages(ctx));
    pages.extend(ctx.catalog.games.iter().map(|g| plan_game_page(ctx, g)));
    pages
}
