use std::path::{Path, PathBuf};

use arcade_core::catalog::Catalog;

/// Failure loading or persisting the catalog file.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        message: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, message } => write!(f, "{}: {message}", path.display()),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

/// The in-memory catalog and the JSON file it is persisted to.
///
/// A configured base URL (`ARCADE_BASE_URL` / `base_url`) takes precedence
/// over the catalog's `baseUrl` until the operator edits the base URL through
/// [`CatalogStore::set_base_url`]; from then on the catalog value is used.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    catalog: Catalog,
    base_url_override: Option<String>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            path: path.into(),
            catalog,
            base_url_override: None,
        }
    }

    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        self.base_url_override = base_url.filter(|b| !b.trim().is_empty());
        self
    }

    /// The configured override still in effect, if any.
    pub fn base_url_override(&self) -> Option<&str> {
        self.base_url_override.as_deref()
    }

    /// Set the catalog base URL. Drops any configured override so the new
    /// value is what pages render with.
    pub fn set_base_url(&mut self, base_url: String) {
        if let Some(previous) = self.base_url_override.take() {
            tracing::info!(
                previous = %previous,
                base_url = %base_url,
                "Catalog base URL edited; configured override no longer applies"
            );
        }
        self.catalog.set_base_url(base_url);
    }

    /// Read and parse the catalog. A missing or malformed file is an error.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        let catalog = Catalog::from_json(&text).map_err(|e| StoreError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), games = catalog.games.len(), "Loaded catalog");
        Ok(Self::new(path, catalog))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Write the catalog as pretty JSON, creating parent directories.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        tokio::fs::write(&self.path, self.catalog.to_pretty_json())
            .await
            .map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), "Saved catalog");
        Ok(())
    }
}
