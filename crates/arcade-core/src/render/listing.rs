use super::cards::simple_card;
use super::{Head, RenderContext, document_end, document_start, escape, site_header};
use crate::catalog::Game;
use crate::listing::distinct_by_slug;

/// Identity of a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    pub title: String,
    pub description: String,
    /// Site-relative path without slashes, e.g. `"tag/puzzle"`.
    pub path: String,
}

impl ListPage {
    pub fn new(title: impl Into<String>, description: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            path: path.into(),
        }
    }

    /// Directory depth of the page's `index.html` below the site root.
    pub fn depth(&self) -> usize {
        self.path.trim_matches('/').split('/').filter(|s| !s.is_empty()).count()
    }
}

fn search_box() -> &'static str {
    "<div class=\"mb-6\"><input id=\"searchInput\" type=\"search\" placeholder=\"Search games...\" \
     class=\"w-full md:w-96 border rounded-md px-3 py-2 bg-background\" aria-label=\"Search games\" />\
     <p id=\"searchResultsInfo\" class=\"search-results-info text-sm text-muted-foreground mt-2\">\
     <span id=\"resultCount\">0</span> results for \"<span id=\"searchTerm\"></span>\"</p></div>"
}

/// Grid page listing `games` in the given order.
pub fn list_page(ctx: &RenderContext<'_>, page: &ListPage, games: &[&Game]) -> String {
    let depth = page.depth();
    let canonical = ctx.canonical(&page.path);
    let mut html = document_start(&Head {
        title: &page.title,
        description: &page.description,
        keywords: "",
        canonical: &canonical,
        image: None,
        depth,
    });
    html.push_str("<div class=\"min-h-screen\">");
    html.push_str(&site_header(ctx.settings));
    html.push_str(&format!(
        "<main class=\"container mx-auto px-4 md:px-6 lg:px-8 py-8\">\
         <h1 class=\"text-3xl font-heading font-bold mb-6\">{}</h1>",
        escape(&page.title)
    ));
    html.push_str(search_box());
    html.push_str(
        "<div id=\"gamesGrid\"><div id=\"list-grid\" class=\"grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4\">",
    );
    for game in games {
        html.push_str(&simple_card(game, ctx.settings));
    }
    html.push_str(
        "</div></div><p id=\"noResults\" class=\"no-results text-center text-muted-foreground py-12\">No games found.</p></main></div>",
    );
    html.push_str(&document_end(ctx.settings, depth));
    html
}

/// Chip index linking to one page per distinct name.
fn chip_index(
    ctx: &RenderContext<'_>,
    names: &[String],
    title: &str,
    path: &str,
    route: &str,
    chip_class: &str,
) -> String {
    const DEPTH: usize = 1;
    let description = format!("Browse games by {}.", title.to_lowercase());
    let canonical = ctx.canonical(path);
    let mut html = document_start(&Head {
        title,
        description: &description,
        keywords: "",
        canonical: &canonical,
        image: None,
        depth: DEPTH,
    });
    html.push_str("<div class=\"min-h-screen\">");
    html.push_str(&site_header(ctx.settings));
    html.push_str(&format!(
        "<main class=\"container mx-auto px-4 md:px-6 lg:px-8 py-8\">\
         <h1 class=\"text-3xl font-heading font-bold mb-6\">{title}</h1>\
         <div id=\"{path}-grid\" class=\"flex flex-wrap gap-2\">"
    ));
    for (name, slug) in distinct_by_slug(names) {
        html.push_str(&format!(
            "<a href=\"/{route}/{slug}\"><div class=\"inline-flex items-center rounded-md border px-2.5 py-0.5 text-xs font-semibold transition-colors border-transparent {chip_class} cursor-pointer\">{}</div></a>",
            escape(name)
        ));
    }
    html.push_str("</div></main></div>");
    html.push_str(&document_end(ctx.settings, DEPTH));
    html
}

/// `tags/index.html`: one chip per distinct tag in the catalog tag list.
pub fn tags_index(ctx: &RenderContext<'_>) -> String {
    chip_index(
        ctx,
        &ctx.catalog.tags,
        "Tags",
        "tags",
        "tag",
        "bg-secondary text-secondary-foreground",
    )
}

/// `categories/index.html`: one chip per distinct catalog category.
pub fn categories_index(ctx: &RenderContext<'_>) -> String {
    chip_index(
        ctx,
        &ctx.catalog.categories,
        "Categories",
        "categories",
        "category",
        "bg-primary text-primary-foreground",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::settings::SiteSettings;

    fn catalog() -> Catalog {
        Catalog {
            base_url: "https://games.example.com".to_string(),
            tags: vec![
                "Two Player".to_string(),
                "Puzzle".to_string(),
                "puzzle".to_string(),
                "IO Games".to_string(),
            ],
            categories: vec!["Racing".to_string(), "Board".to_string()],
            games: vec![
                Game {
                    title: "Alpha".to_string(),
                    slug: "alpha".to_string(),
                    tags: vec!["Retro".to_string()],
                    categories: vec!["Strategy".to_string()],
                    ..Game::default()
                },
                Game {
                    title: "Beta".to_string(),
                    slug: "beta".to_string(),
                    ..Game::default()
                },
            ],
        }
    }

    #[test]
    fn tag_index_one_chip_per_distinct_tag() {
        let catalog = catalog();
        let settings = SiteSettings::default();
        let ctx = RenderContext::new(&catalog, None, &settings);
        let html = tags_index(&ctx);
        assert_eq!(html.matches("<a href=\"/tag/").count(), 3);
        assert!(html.contains("<a href=\"/tag/two-player\">"));
        assert!(html.contains("<a href=\"/tag/puzzle\">"));
        assert!(html.contains("<a href=\"/tag/io-games\">"));
        // Tags used only on games get no chip.
        assert!(!html.contains("/tag/retro"));
        assert!(html.contains("id=\"tags-grid\""));
        assert!(html.contains("href=\"https://games.example.com/tags\""));
    }

    #[test]
    fn category_index_links() {
        let catalog = catalog();
        let settings = SiteSettings::default();
        let ctx = RenderContext::new(&catalog, None, &settings);
        let html = categories_index(&ctx);
        assert_eq!(html.matches("<a href=\"/category/").count(), 2);
        assert!(!html.contains("/category/strategy"));
        assert!(html.contains("id=\"categories-grid\""));
        assert!(html.contains("href=\"../assets/site.css\""));
    }

    #[test]
    fn list_page_grid_and_depth() {
        let catalog = catalog();
        let settings = SiteSettings::default();
        let ctx = RenderContext::new(&catalog, None, &settings);
        let page = ListPage::new("Tag: Puzzle", "Games tagged Puzzle.", "tag/puzzle");
        assert_eq!(page.depth(), 2);
        let games: Vec<&Game> = catalog.games.iter().rev().collect();
        let html = list_page(&ctx, &page, &games);
        assert!(html.contains("href=\"../../assets/site.css\""));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://games.example.com/tag/puzzle\" />"));
        assert!(html.contains("<div id=\"list-grid\""));
        let beta = html.find("href=\"/beta/\"").unwrap();
        let alpha = html.find("href=\"/alpha/\"").unwrap();
        assert!(beta < alpha);
        assert!(html.contains("id=\"searchInput\""));
        assert!(html.contains("id=\"noResults\""));
    }

    #[test]
    fn empty_list_page_still_has_grid() {
        let catalog = Catalog::default();
        let settings = SiteSettings::default();
        let ctx = RenderContext::new(&catalog, None, &settings);
        let html = list_page(&ctx, &ListPage::new("Browse Games", "All.", "browse"), &[]);
        assert!(html.contains("<div id=\"list-grid\" class=\"grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4\"></div>"));
    }
}
