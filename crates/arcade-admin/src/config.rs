use std::path::{Path, PathBuf};

use serde::Deserialize;

use arcade_core::settings::SiteSettings;

pub const DEFAULT_CONFIG_FILE: &str = "arcade.toml";

/// Top-level admin configuration, loaded from `arcade.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub listen_addr: String,
    /// The catalog JSON file edited by the API.
    pub catalog_path: PathBuf,
    /// Root of the generated site tree. Also served as the preview.
    pub site_root: PathBuf,
    /// Overrides the catalog's own `baseUrl` when set.
    pub base_url: Option<String>,
    pub auth: AuthFileConfig,
    pub site: SiteSettings,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8090".to_string(),
            catalog_path: PathBuf::from("games.json"),
            site_root: PathBuf::from("site"),
            base_url: None,
            auth: AuthFileConfig::default(),
            site: SiteSettings::default(),
        }
    }
}

/// Auth section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthFileConfig {
    /// Bearer token for the REST API. None = auth disabled.
    pub bearer_token: Option<String>,
}

impl AdminConfig {
    /// Problems that make the config unusable. Empty when valid.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            problems.push(format!(
                "listen_addr '{}' is not a valid socket address",
                self.listen_addr
            ));
        }
        if self.site.homepage_limit == 0 {
            problems.push("site.homepage_limit must be > 0".to_string());
        }
        if self.catalog_path.as_os_str().is_empty() {
            problems.push("catalog_path must not be empty".to_string());
        }
        if self.site_root.as_os_str().is_empty() {
            problems.push("site_root must not be empty".to_string());
        }
        if self.auth.bearer_token.is_some() {
            tracing::warn!(
                "bearer_token is set in config file, prefer the ARCADE_API_TOKEN env var"
            );
        }
        problems
    }

    /// Load config from `path` if it exists, then apply env var overrides.
    pub fn load(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AdminConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to parse config: {e}, using defaults");
                    AdminConfig::default()
                },
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                AdminConfig::default()
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply `ARCADE_*` overrides; empty values are ignored.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| var(key).filter(|v| !v.is_empty());
        if let Some(addr) = var("ARCADE_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Some(path) = var("ARCADE_CATALOG_PATH") {
            self.catalog_path = PathBuf::from(path);
        }
        if let Some(root) = var("ARCADE_SITE_ROOT") {
            self.site_root = PathBuf::from(root);
        }
        if let Some(token) = var("ARCADE_API_TOKEN") {
            self.auth.bearer_token = Some(token);
        }
        if let Some(url) = var("ARCADE_BASE_URL") {
            self.base_url = Some(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = AdminConfig::default();
        assert_eq!(cfg.listen_addr, "127.0.0.1:8090");
        assert_eq!(cfg.catalog_path, PathBuf::from("games.json"));
        assert_eq!(cfg.site_root, PathBuf::from("site"));
        assert!(cfg.auth.bearer_token.is_none());
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
listen_addr = "0.0.0.0:3000"
catalog_path = "data/games.json"
site_root = "/var/www/arcade"
base_url = "https://arcade.example"

[auth]
bearer_token = "secret123"

[site]
site_name = "Arcade"
homepage_limit = 12
comments_embed_url = "https://arcade.disqus.com/embed.js"
"#;
        let cfg: AdminConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
        assert_eq!(cfg.catalog_path, PathBuf::from("data/games.json"));
        assert_eq!(cfg.base_url.as_deref(), Some("https://arcade.example"));
        assert_eq!(cfg.auth.bearer_token.as_deref(), Some("secret123"));
        assert_eq!(cfg.site.site_name, "Arcade");
        assert_eq!(cfg.site.homepage_limit, 12);
        assert_eq!(cfg.site.asset_host, "https://p2o.io/assets");
    }

    #[test]
    fn validate_reports_problems() {
        let mut cfg = AdminConfig {
            listen_addr: "not-an-address".to_string(),
            ..AdminConfig::default()
        };
        cfg.site.homepage_limit = 0;
        let problems = cfg.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("listen_addr"));
        assert!(problems[1].contains("homepage_limit"));
    }

    #[test]
    fn env_overrides() {
        let mut cfg = AdminConfig::default();
        cfg.apply_env(|key| match key {
            "ARCADE_LISTEN_ADDR" => Some("0.0.0.0:9000".to_string()),
            "ARCADE_API_TOKEN" => Some("tok".to_string()),
            "ARCADE_SITE_ROOT" => Some(String::new()),
            _ => None,
        });
        assert_eq!(cfg.listen_addr, "0.0.0.0:9000");
        assert_eq!(cfg.auth.bearer_token.as_deref(), Some("tok"));
        assert_eq!(cfg.site_root, PathBuf::from("site"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AdminConfig::load(&dir.path().join("absent.toml"));
        assert_eq!(cfg.site.homepage_limit, 8);
    }

    #[test]
    fn malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arcade.toml");
        std::fs::write(&path, "listen_addr = [").unwrap();
        let cfg = AdminConfig::load(&path);
        assert_eq!(cfg.catalog_path, PathBuf::from("games.json"));
    }
}
