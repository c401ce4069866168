use super::cards::{ChipKind, chips, game_card, popular_item};
use super::{Head, RenderContext, document_end, document_start, escape, site_header};
use crate::catalog::Game;
use crate::format::format_count;
use crate::listing::resolve_refs;

/// Game pages live one directory below the site root.
const DEPTH: usize = 1;

const STAR: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\" class=\"star h-6 w-6 cursor-pointer\" fill=\"currentColor\"><path d=\"M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z\"></path></svg>";

const SHARE_TARGETS: [(&str, &str); 6] = [
    ("facebook", "Facebook"),
    ("twitter", "Twitter"),
    ("whatsapp", "WhatsApp"),
    ("telegram", "Telegram"),
    ("copy", "Copy Link"),
    ("native", "Share"),
];

/// Full detail page for one game.
pub fn game_page(ctx: &RenderContext<'_>, game: &Game) -> String {
    let settings = ctx.settings;
    let canonical = format!("{}/", ctx.canonical(&game.slug));
    let image = (!game.image.is_empty()).then(|| settings.image_url(&game.image));
    let mut html = document_start(&Head {
        title: &game.title,
        description: &game.description,
        keywords: &game.keywords,
        canonical: &canonical,
        image,
        depth: DEPTH,
    });

    let title = escape(&game.title);
    let embed = escape(&game.embed_url);

    html.push_str("<div class=\"min-h-screen flex flex-col\">");
    html.push_str(&site_header(settings));
    html.push_str(
        "<main class=\"flex-1\"><div class=\"container mx-auto px-4 md:px-6 lg:px-8 py-8\">\
         <div class=\"grid grid-cols-1 lg:grid-cols-3 gap-8\"><div class=\"lg:col-span-2\">",
    );

    // Play area: the iframe stays empty until the runtime copies data-src.
    html.push_str(&format!(
        "<div class=\"mb-6\"><div class=\"relative aspect-video rounded-lg overflow-hidden bg-card border\">\
         <iframe id=\"gameIframe\" data-src=\"{embed}\" title=\"{title}\" class=\"absolute inset-0 w-full h-full\" \
         allowfullscreen sandbox=\"allow-scripts allow-same-origin allow-forms\"></iframe>\
         <div id=\"playOverlay\" class=\"play-overlay absolute inset-0 flex flex-col items-center justify-center gap-4 bg-card\" data-testid=\"ad-preplay\">\
         <img src=\"{icon}\" alt=\"{title}\" class=\"w-24 h-24 object-contain rounded\" />\
         <button id=\"playBtn\" class=\"inline-flex items-center justify-center gap-2 bg-primary text-primary-foreground rounded-md px-6 py-3 text-lg\" \
         data-testid=\"button-play-game\" aria-label=\"Play game\">Play Game</button></div></div>\
         <a id=\"fullscreenBtn\" class=\"fullscreen-btn inline-flex items-center border rounded-md px-4 py-2 text-sm mt-4\" href=\"{embed}\" \
         target=\"_blank\" rel=\"noopener\" data-testid=\"button-play-fullscreen\">Play Fullscreen</a></div>",
        icon = escape(&settings.icon_url(&game.icon)),
    ));

    html.push_str(&format!(
        "<div class=\"flex items-start gap-4 mb-4\"><img src=\"{icon}\" alt=\"{title}\" \
         class=\"w-24 h-32 object-cover rounded border flex-shrink-0\" data-testid=\"game-thumbnail\" />\
         <h1 class=\"font-heading text-4xl md:text-5xl font-bold flex-1\" data-testid=\"game-title\">{title}</h1></div>\
         <div class=\"flex flex-wrap gap-2 mb-6\">{categories}{tags}</div>",
        icon = escape(&settings.icon_url(&game.icon)),
        categories = chips(&game.categories, ChipKind::Category),
        tags = chips(&game.tags, ChipKind::Tag),
    ));

    html.push_str(&format!(
        "<div class=\"flex flex-wrap items-center gap-4 mb-6 text-sm text-muted-foreground\">\
         <div class=\"flex items-center gap-1\" data-testid=\"game-play-count\"><span id=\"playCount\" data-plays=\"{plays_raw}\">{plays}</span><span>plays</span></div>\
         <div class=\"flex items-center gap-1\" data-testid=\"game-created-at\"><span>{created}</span></div>\
         <div id=\"ratingStars\" class=\"rating-stars flex items-center gap-1\" data-testid=\"game-rating\">{stars}</div></div>",
        plays_raw = game.plays,
        plays = format_count(game.plays),
        created = escape(&game.created_at),
        stars = STAR.repeat(5),
    ));

    html.push_str(&format!(
        "<div class=\"mb-8\"><h2 class=\"font-heading text-2xl font-bold mb-4\">About this Game</h2>\
         <div class=\"max-w-none max-h-64 overflow-y-auto border border-border rounded-md p-4 bg-card text-foreground mb-4\">\
         <div class=\"mt-4 whitespace-pre-wrap\">{long}</div></div>",
        long = escape(&game.long_description),
    ));

    html.push_str(
        "<div><h3 class=\"font-heading text-lg font-semibold mb-2\">Share this game</h3><div class=\"flex flex-wrap gap-2\">",
    );
    for (key, label) in SHARE_TARGETS {
        html.push_str(&format!(
            "<button class=\"share-btn inline-flex items-center border rounded-md px-3 py-2 text-sm\" data-share=\"{key}\" data-testid=\"button-share-{key}\">{label}</button>"
        ));
    }
    html.push_str("</div></div>");

    let embed_snippet = format!(
        "<iframe src=\"{}\" width=\"800\" height=\"600\" frameborder=\"0\" allowfullscreen></iframe>",
        game.embed_url
    );
    html.push_str(&format!(
        "<div class=\"mt-6\"><h3 class=\"font-heading text-lg font-semibold mb-2\">Embed this game</h3>\
         <textarea id=\"embedCode\" class=\"w-full border rounded-md p-2 text-xs\" rows=\"3\" readonly>{}</textarea>\
         <button id=\"copyEmbed\" class=\"mt-2 inline-flex items-center border rounded-md px-3 py-2 text-sm\">Copy Embed Code</button></div></div>",
        escape(&embed_snippet),
    ));

    let related = resolve_refs(ctx.catalog, &game.related);
    html.push_str(
        "<div><h2 class=\"font-heading text-2xl font-bold mb-4\">Related Games</h2>\
         <div id=\"related-grid\" class=\"grid grid-cols-2 md:grid-cols-3 gap-4\">",
    );
    for g in &related {
        html.push_str(&game_card(g, settings));
    }
    html.push_str("</div></div>");

    if let Some(src) = &settings.comments_embed_url {
        html.push_str(&format!(
            "<section id=\"comments-wrapper\" class=\"mt-12\" data-embed-src=\"{}\">\
             <h2 class=\"font-heading text-2xl font-bold mb-4\">Comments</h2><div id=\"disqus_thread\"></div></section>",
            escape(src)
        ));
    }
    html.push_str("</div>");

    let popular = resolve_refs(ctx.catalog, &game.popular);
    html.push_str(
        "<div class=\"space-y-6\"><div class=\"sticky top-24\" data-testid=\"popular-games-section\">\
         <h3 class=\"font-heading text-xl font-bold mb-4\" data-testid=\"heading-popular-games\">Popular Games</h3>\
         <div class=\"space-y-4\">",
    );
    for g in &popular {
        html.push_str(&popular_item(g, settings));
    }
    html.push_str("</div></div></div></div></div></main></div>");
    html.push_str(&document_end(settings, DEPTH));
    html
}
