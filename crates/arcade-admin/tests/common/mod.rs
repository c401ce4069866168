use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arcade_admin::build_app;
use arcade_admin::config::{AdminConfig, AuthFileConfig};
use arcade_admin::store::CatalogStore;
use arcade_core::test_helpers::sample_catalog_json;

pub struct TestServer {
    pub addr: SocketAddr,
    /// Holds the catalog file and the site tree; removed on drop.
    pub dir: tempfile::TempDir,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with no auth over the sample catalog.
    pub async fn new() -> Self {
        Self::from_auth(AuthFileConfig::default()).await
    }

    /// Start a test server that requires `token`.
    pub async fn with_auth(token: &str) -> Self {
        Self::from_auth(AuthFileConfig {
            bearer_token: Some(token.to_string()),
        })
        .await
    }

    async fn from_auth(auth: AuthFileConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("games.json");
        std::fs::write(&catalog_path, sample_catalog_json()).unwrap();

        let config = AdminConfig {
            catalog_path: catalog_path.clone(),
            site_root: dir.path().join("site"),
            auth,
            ..AdminConfig::default()
        };
        let store = CatalogStore::load(&catalog_path).await.unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (app, _state) = build_app(config, store);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            dir,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api(&self, path: &str) -> String {
        format!("http://{}/api/v1{path}", self.addr)
    }

    pub fn site_root(&self) -> PathBuf {
        self.dir.path().join("site")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.dir.path().join("games.json")
    }
}

/// Read a file below `root`, panicking with the path on failure.
pub fn read(root: &Path, relative: &str) -> String {
    let path = root.join(relative);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

/// Upsert body for a new game titled `title`.
pub fn new_game_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "form": {
            "title": title,
            "description": format!("{title} description."),
            "embed_url": "https://embed.example/new",
            "plays": "1,500",
            "tags": ["Puzzle"],
            "categories": ["Arcade"],
            "related": ["snake", "missing-slug"],
        }
    })
}
