//! HTML templates for the generated site.
//!
//! Every template is a pure function of a [`RenderContext`] and its explicit
//! arguments; nothing reads ambient state.

pub mod cards;
pub mod detail;
pub mod home;
pub mod listing;

use crate::catalog::Catalog;
use crate::settings::SiteSettings;

/// Everything a template may read besides its direct arguments.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub catalog: &'a Catalog,
    /// Site origin without a trailing slash.
    pub base_url: &'a str,
    pub settings: &'a SiteSettings,
}

impl<'a> RenderContext<'a> {
    /// Uses `base_url` when non-empty, else the catalog's own base URL.
    pub fn new(catalog: &'a Catalog, base_url: Option<&'a str>, settings: &'a SiteSettings) -> Self {
        let base = base_url
            .filter(|b| !b.trim().is_empty())
            .unwrap_or(&catalog.base_url);
        Self {
            catalog,
            base_url: base.trim().trim_end_matches('/'),
            settings,
        }
    }

    /// Absolute URL for a site-relative path (`"tag/puzzle"`).
    pub fn canonical(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_matches('/'))
    }
}

/// Escape text for use in HTML content and double- or single-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Relative prefix from a page `depth` directories below the root back to it.
pub fn asset_prefix(depth: usize) -> String {
    "../".repeat(depth)
}

/// Metadata for the `<head>` of a page.
pub(crate) struct Head<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub keywords: &'a str,
    pub canonical: &'a str,
    pub image: Option<String>,
    pub depth: usize,
}

pub(crate) fn document_start(head: &Head<'_>) -> String {
    let prefix = asset_prefix(head.depth);
    let title = escape(head.title);
    let description = escape(head.description);
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html class=\"dark\" lang=\"en\"><head>");
    html.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{prefix}assets/site.css\">\
         <meta charset=\"utf-8\" />\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\
         <title>{title}</title>\
         <meta name=\"description\" content=\"{description}\" />\
         <meta name=\"robots\" content=\"index, follow\" />"
    ));
    if !head.keywords.is_empty() {
        html.push_str(&format!(
            "<meta name=\"keywords\" content=\"{}\" />",
            escape(head.keywords)
        ));
    }
    html.push_str(&format!(
        "<link rel=\"canonical\" href=\"{canonical}\" />\
         <meta property=\"og:title\" content=\"{title}\" />\
         <meta property=\"og:description\" content=\"{description}\" />\
         <meta property=\"og:type\" content=\"website\" />\
         <meta name=\"twitter:card\" content=\"summary_large_image\" />\
         <meta name=\"twitter:title\" content=\"{title}\" />\
         <meta name=\"twitter:description\" content=\"{description}\" />",
        canonical = escape(head.canonical),
    ));
    if let Some(image) = &head.image {
        let image = escape(image);
        html.push_str(&format!(
            "<meta property=\"og:image\" content=\"{image}\" />\
             <meta name=\"twitter:image\" content=\"{image}\" />"
        ));
    }
    html.push_str("<link rel=\"icon\" href=\"/favicon.png\" type=\"image/png\" /></head>");
    html.push_str("<body class=\"flex flex-col min-h-screen dark\"><div class=\"flex-1\">");
    html
}

pub(crate) fn site_header(settings: &SiteSettings) -> String {
    format!(
        "<header class=\"border-b bg-background\"><div class=\"container mx-auto px-4\">\
         <div class=\"flex items-center justify-between h-16\">\
         <a class=\"text-xl md:text-2xl font-heading font-bold\" href=\"/\">{name}</a>\
         <nav class=\"hidden md:flex items-center gap-6\">\
         <a class=\"hover-elevate px-3 py-2 rounded-md\" href=\"/browse/\" data-testid=\"link-browse\">Browse</a>\
         <a class=\"hover-elevate px-3 py-2 rounded-md\" href=\"/categories/\" data-testid=\"link-categories\">Categories</a>\
         </nav>\
         <div class=\"flex items-center gap-2\">\
         <button id=\"themeToggle\" class=\"theme-toggle rounded-md p-2\" aria-label=\"Toggle theme\">\
         <svg class=\"sun-icon h-5 w-5\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"><circle cx=\"12\" cy=\"12\" r=\"4\"></circle></svg>\
         <svg class=\"moon-icon h-5 w-5\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"><path d=\"M12 3a6 6 0 0 0 9 9 9 9 0 1 1-9-9Z\"></path></svg>\
         </button>\
         <button class=\"md:hidden rounded-md p-2\" data-testid=\"button-menu-toggle\" aria-label=\"Menu\">\
         <svg class=\"h-5 w-5\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"><path d=\"M4 6h16M4 12h16M4 18h16\"></path></svg>\
         </button></div></div></div></header>",
        name = escape(&settings.site_name),
    )
}

pub(crate) fn site_footer(settings: &SiteSettings) -> String {
    format!(
        "<footer class=\"border-t bg-card mt-24\"><div class=\"container mx-auto px-4 md:px-6 lg:px-8 py-12\">\
         <div class=\"grid grid-cols-1 md:grid-cols-3 gap-8\"><div>\
         <div class=\"flex items-center gap-2 font-heading text-xl font-bold mb-4\">{name}</div>\
         <p class=\"text-sm text-muted-foreground\">Your ultimate destination for free online games. \
         Play instantly in your browser, no downloads required.</p></div>\
         <div><h3 class=\"font-semibold mb-4\">Explore</h3><ul class=\"space-y-2 text-sm\">\
         <li><a href=\"/new-games/\">New Games</a></li><li><a href=\"/popular-games/\">Popular Games</a></li>\
         <li><a href=\"/tags/\">Tags</a></li><li><a href=\"/categories/\">Categories</a></li></ul></div></div>\
         <div class=\"mt-8 text-center text-sm text-muted-foreground\"><p>{notice}</p></div></div></footer>",
        name = escape(&settings.site_name),
        notice = escape(&settings.footer_notice),
    )
}

/// Close the page shell and load the runtime.
pub(crate) fn document_end(settings: &SiteSettings, depth: usize) -> String {
    let prefix = asset_prefix(depth);
    format!(
        "</div>{footer}<script type=\"module\">import init from \"./{prefix}assets/app.js\"; init();</script></body></html>",
        footer = site_footer(settings),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn prefix_by_depth() {
        assert_eq!(asset_prefix(0), "");
        assert_eq!(asset_prefix(1), "../");
        assert_eq!(asset_prefix(2), "../../");
    }

    #[test]
    fn explicit_base_url_wins() {
        let catalog = Catalog {
            base_url: "https://catalog.example/".to_string(),
            ..Catalog::default()
        };
        let settings = SiteSettings::default();
        let ctx = RenderContext::new(&catalog, Some("https://override.example//"), &settings);
        assert_eq!(ctx.base_url, "https://override.example");
        let ctx = RenderContext::new(&catalog, Some("  "), &settings);
        assert_eq!(ctx.base_url, "https://catalog.example");
        assert_eq!(ctx.canonical("/tag/puzzle/"), "https://catalog.example/tag/puzzle");
    }

    #[test]
    fn head_omits_empty_keywords() {
        let head = Head {
            title: "T",
            description: "D",
            keywords: "",
            canonical: "https://x/",
            image: None,
            depth: 1,
        };
        let html = document_start(&head);
        assert!(!html.contains("name=\"keywords\""));
        assert!(html.contains("href=\"../assets/site.css\""));
        assert!(!html.contains("og:image"));
    }
}
