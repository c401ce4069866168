use std::sync::Arc;
use tokio::sync::RwLock;

use arcade_core::render::RenderContext;

use crate::auth::AuthConfig;
use crate::config::AdminConfig;
use crate::store::CatalogStore;
use crate::writer::SiteWriter;

pub type SharedCatalogStore = Arc<RwLock<CatalogStore>>;

#[derive(Clone)]
pub struct AppState {
    /// Single operator; the write lock serialises edits and site writes.
    pub store: SharedCatalogStore,
    pub writer: Arc<SiteWriter>,
    pub auth: AuthConfig,
    pub config: Arc<AdminConfig>,
}

impl AppState {
    pub fn new(config: AdminConfig, store: CatalogStore) -> Self {
        let auth = AuthConfig {
            bearer_token: config.auth.bearer_token.clone(),
        };
        let store = store.with_base_url_override(config.base_url.clone());
        Self {
            store: Arc::new(RwLock::new(store)),
            writer: Arc::new(SiteWriter::new(config.site_root.clone())),
            auth,
            config: Arc::new(config),
        }
    }

    /// Template context over the store's catalog, honouring a configured
    /// base URL until the operator edits it.
    pub fn render_context<'a>(&'a self, store: &'a CatalogStore) -> RenderContext<'a> {
        RenderContext::new(store.catalog(), store.base_url_override(), &self.config.site)
    }
}
