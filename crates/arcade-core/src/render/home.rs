use super::cards::simple_card;
use super::{Head, RenderContext, document_end, document_start, escape, site_header};
use crate::catalog::Game;

fn grid(id: &str, games: &[&Game], ctx: &RenderContext<'_>) -> String {
    let mut html = format!(
        "<div id=\"{id}\" class=\"grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4\">"
    );
    for game in games {
        html.push_str(&simple_card(game, ctx.settings));
    }
    html.push_str("</div>");
    html
}

fn load_more(testid: &str, href: &str) -> String {
    format!(
        "<div class=\"mt-6 flex items-center justify-center\"><a data-testid=\"{testid}\" \
         class=\"inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium \
         bg-primary text-primary-foreground border border-primary-border min-h-9 px-4 py-2\" href=\"{href}\">Load More</a></div>"
    )
}

/// Site homepage with the popular and new game grids.
pub fn homepage(ctx: &RenderContext<'_>, popular: &[&Game], newest: &[&Game]) -> String {
    let settings = ctx.settings;
    // Bare base URL, no trailing slash.
    let canonical = ctx.base_url.to_string();
    let mut html = document_start(&Head {
        title: &settings.site_name,
        description: &settings.site_description,
        keywords: &settings.site_keywords,
        canonical: &canonical,
        image: None,
        depth: 0,
    });
    html.push_str("<div class=\"min-h-screen\">");
    html.push_str(&site_header(settings));
    html.push_str(&format!(
        "<main class=\"container mx-auto px-4 md:px-6 lg:px-8 py-8 space-y-12\">\
         <section class=\"text-center py-8\"><h1 class=\"text-4xl md:text-5xl font-heading font-bold mb-4\">{}</h1>\
         <p class=\"text-lg text-muted-foreground\">{}</p></section>",
        escape(&settings.site_name),
        escape(&settings.site_description),
    ));
    html.push_str("<section><h2 class=\"text-3xl font-heading font-bold mb-6\">Popular Games</h2>");
    html.push_str(&grid("popular-grid", popular, ctx));
    html.push_str(&load_more("link-popular-more", "/popular-games/"));
    html.push_str("</section><section><h2 class=\"text-3xl font-heading font-bold mb-6\">New Games</h2>");
    html.push_str(&grid("new-grid", newest, ctx));
    html.push_str(&load_more("link-new-more", "/new-games/"));
    html.push_str("</section></main></div>");
    html.push_str(&document_end(settings, 0));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::settings::SiteSettings;

    #[test]
    fn homepage_regions_and_links() {
        let catalog = Catalog {
            base_url: "https://games.example.com".to_string(),
            ..Catalog::default()
        };
        let settings = SiteSettings::default();
        let ctx = RenderContext::new(&catalog, None, &settings);
        let hot = Game {
            title: "Hot".to_string(),
            slug: "hot".to_string(),
            plays: 9000,
            ..Game::default()
        };
        let fresh = Game {
            title: "Fresh".to_string(),
            slug: "fresh".to_string(),
            ..Game::default()
        };
        let html = homepage(&ctx, &[&hot], &[&fresh]);
        assert!(html.contains("id=\"popular-grid\""));
        assert!(html.contains("id=\"new-grid\""));
        let popular_at = html.find("id=\"popular-grid\"").unwrap();
        let new_at = html.find("id=\"new-grid\"").unwrap();
        let hot_at = html.find("href=\"/hot/\"").unwrap();
        let fresh_at = html.find("href=\"/fresh/\"").unwrap();
        assert!(popular_at < hot_at && hot_at < new_at && new_at < fresh_at);
        assert!(html.contains("href=\"/popular-games/\">Load More"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://games.example.com\" />"));
        assert!(html.contains("href=\"assets/site.css\""));
    }
}
