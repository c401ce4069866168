use serde::{Deserialize, Serialize};

/// Site-wide presentation settings shared by every template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Brand name used in titles, headers and footers.
    pub site_name: String,
    /// Homepage meta description.
    pub site_description: String,
    /// Homepage meta keywords.
    pub site_keywords: String,
    /// Host serving game icons (`<host>/icon/<file>`) and share images
    /// (`<host>/img/<file>`).
    pub asset_host: String,
    /// Number of games in each homepage grid.
    pub homepage_limit: usize,
    /// Comment widget script; the comments region is omitted when unset.
    pub comments_embed_url: Option<String>,
    pub footer_notice: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Unblocked6xGames | Play Free Games Online".to_string(),
            site_description: "Play popular unblocked games online with us, we are providing \
                               access to a variety of games that are typically restricted in \
                               school or work"
                .to_string(),
            site_keywords: "unblocked6xgames,unblocked games,free online games".to_string(),
            asset_host: "https://p2o.io/assets".to_string(),
            homepage_limit: 8,
            comments_embed_url: None,
            footer_notice: "© 2025 P2O.io Unblocked Games | Play Free Games Online. All rights \
                            reserved."
                .to_string(),
        }
    }
}

impl SiteSettings {
    pub fn icon_url(&self, file: &str) -> String {
        format!("{}/icon/{file}", self.asset_host.trim_end_matches('/'))
    }

    pub fn image_url(&self, file: &str) -> String {
        format!("{}/img/{file}", self.asset_host.trim_end_matches('/'))
    }
}
