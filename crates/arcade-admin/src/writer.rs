//! Writes planned pages into the site tree.
//!
//! Pages with regions are merged into whatever is already on disk; pages
//! without regions replace the file. Content identical to the existing file
//! is not rewritten. Every report entry carries the SHA-256 of the content
//! now on disk so a deploy can be checked against it.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use arcade_core::merge::merge_regions;
use arcade_core::site::SitePage;

/// I/O failure for one file of the site tree.
#[derive(Debug)]
pub struct WriteError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
    Created,
    Merged {
        replaced: Vec<String>,
        missing: Vec<String>,
    },
    Replaced,
    Unchanged,
    Failed {
        reason: String,
    },
}

impl FileStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Merged { .. } => "merged",
            Self::Replaced => "replaced",
            Self::Unchanged => "unchanged",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub status: FileStatus,
    /// Hex SHA-256 of the file content after the write; absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Result of writing one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWrite {
    pub status: FileStatus,
    pub sha256: String,
}

/// Outcome of a batch of writes, one entry per file in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub files: Vec<FileReport>,
}

impl WriteReport {
    pub fn push(&mut self, path: impl Into<String>, status: FileStatus) {
        self.files.push(FileReport {
            path: path.into(),
            status,
            sha256: None,
        });
    }

    pub fn record(&mut self, path: impl Into<String>, write: PageWrite) {
        self.files.push(FileReport {
            path: path.into(),
            status: write.status,
            sha256: Some(write.sha256),
        });
    }

    /// Record the outcome of a single page write, logging failures.
    pub fn record_result(&mut self, path: impl Into<String>, result: Result<PageWrite, WriteError>) {
        let path = path.into();
        match result {
            Ok(write) => self.record(path, write),
            Err(e) => {
                tracing::error!(path = %path, "Failed to write page: {e}");
                self.push(
                    path,
                    FileStatus::Failed {
                        reason: e.source.to_string(),
                    },
                );
            },
        }
    }

    pub fn extend(&mut self, other: WriteReport) {
        self.files.extend(other.files);
    }

    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Failed { .. }))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// One-line summary, e.g. `"Updated 4 files: 1 created, 2 merged, 1 unchanged"`.
    pub fn summary(&self) -> String {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for file in &self.files {
            let label = file.status.label();
            match counts.iter_mut().find(|(l, _)| *l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label, 1)),
            }
        }
        let detail = counts
            .iter()
            .map(|(label, n)| format!("{n} {label}"))
            .collect::<Vec<_>>()
            .join(", ");
        let noun = if self.files.len() == 1 { "file" } else { "files" };
        if self.is_success() {
            format!("Updated {} {noun}: {detail}", self.files.len())
        } else {
            format!(
                "Error updating files ({} of {} failed): {detail}",
                self.failed(),
                self.files.len()
            )
        }
    }
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Writes pages below a site root directory.
#[derive(Debug, Clone)]
pub struct SiteWriter {
    root: PathBuf,
}

impl SiteWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a site-relative path, refusing anything that would escape the
    /// root.
    fn resolve(&self, relative: &str) -> Result<PathBuf, WriteError> {
        let rel = Path::new(relative);
        let clean = !relative.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !clean {
            return Err(WriteError {
                path: self.root.join(rel),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "page path must stay inside the site root",
                ),
            });
        }
        Ok(self.root.join(rel))
    }

    pub async fn write_page(&self, page: &SitePage) -> Result<PageWrite, WriteError> {
        let target = self.resolve(&page.path)?;
        let io_err = |source| WriteError {
            path: target.clone(),
            source,
        };

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let existing = match tokio::fs::read(&target).await {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(io_err(e)),
        };

        let mut merge = None;
        let content = match existing.as_deref().map(std::str::from_utf8) {
            Some(Ok(old)) if !page.regions.is_empty() => {
                let outcome = merge_regions(old, &page.html, &page.regions);
                if !outcome.missing.is_empty() {
                    tracing::warn!(
                        path = %page.path,
                        missing = ?outcome.missing,
                        "Regions not found in existing page"
                    );
                }
                let html = outcome.html.clone();
                if outcome.merged() {
                    merge = Some(outcome);
                }
                html
            },
            _ => page.html.clone(),
        };

        let sha256 = sha256_hex(content.as_bytes());
        if existing.as_deref() == Some(content.as_bytes()) {
            tracing::debug!(path = %page.path, "Unchanged, skipping write");
            return Ok(PageWrite {
                status: FileStatus::Unchanged,
                sha256,
            });
        }

        tokio::fs::write(&target, content.as_bytes())
            .await
            .map_err(io_err)?;

        let status = match (existing, merge) {
            (None, _) => FileStatus::Created,
            (Some(_), Some(outcome)) => FileStatus::Merged {
                replaced: outcome.replaced,
                missing: outcome.missing,
            },
            (Some(_), None) => FileStatus::Replaced,
        };
        tracing::info!(path = %page.path, status = status.label(), "Wrote page");
        Ok(PageWrite { status, sha256 })
    }

    /// Write pages one at a time. A failed page is recorded and the rest are
    /// still written.
    pub async fn write_all(&self, pages: &[SitePage]) -> WriteReport {
        let mut report = WriteReport::default();
        for page in pages {
            report.record_result(page.path.clone(), self.write_page(page).await);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::render::RenderContext;
    use arcade_core::settings::SiteSettings;
    use arcade_core::site::plan_homepage;
    use arcade_core::test_helpers::{make_game, sample_catalog};

    fn page(path: &str, html: &str, regions: Vec<&'static str>) -> SitePage {
        SitePage {
            path: path.to_string(),
            html: html.to_string(),
            regions,
        }
    }

    #[tokio::test]
    async fn create_then_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path());
        let p = page("space-race/index.html", "<p>hi</p>", vec![]);

        let first = writer.write_page(&p).await.unwrap();
        assert_eq!(first.status, FileStatus::Created);
        let second = writer.write_page(&p).await.unwrap();
        assert_eq!(second.status, FileStatus::Unchanged);
        assert_eq!(second.sha256, first.sha256);
        assert_eq!(first.sha256, sha256_hex(b"<p>hi</p>"));
        let written = std::fs::read_to_string(dir.path().join("space-race/index.html")).unwrap();
        assert_eq!(written, "<p>hi</p>");
    }

    #[tokio::test]
    async fn pages_without_regions_are_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path());
        writer.write_page(&page("a/index.html", "old", vec![])).await.unwrap();
        let write = writer
            .write_page(&page("a/index.html", "new", vec![]))
            .await
            .unwrap();
        assert_eq!(write.status, FileStatus::Replaced);
        assert_eq!(write.sha256, sha256_hex(b"new"));
    }

    #[tokio::test]
    async fn region_pages_keep_outside_edits() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("browse")).unwrap();
        std::fs::write(
            dir.path().join("browse/index.html"),
            "<h1>Mine</h1><div id=\"list-grid\">old</div>",
        )
        .unwrap();

        let writer = SiteWriter::new(dir.path());
        let write = writer
            .write_page(&page(
                "browse/index.html",
                "<h1>Generated</h1><div id=\"list-grid\">fresh</div>",
                vec!["list-grid"],
            ))
            .await
            .unwrap();
        assert_eq!(
            write.status,
            FileStatus::Merged {
                replaced: vec!["list-grid".to_string()],
                missing: vec![],
            }
        );
        let written = std::fs::read_to_string(dir.path().join("browse/index.html")).unwrap();
        assert_eq!(written, "<h1>Mine</h1><div id=\"list-grid\">fresh</div>");
    }

    #[tokio::test]
    async fn homepage_merge_then_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path());
        let mut catalog = sample_catalog();
        let settings = SiteSettings::default();

        let first = plan_homepage(&RenderContext::new(&catalog, None, &settings));
        assert_eq!(writer.write_page(&first).await.unwrap().status, FileStatus::Created);

        catalog.games.push(make_game("breakout", "2026-03-01", 5));
        let second = plan_homepage(&RenderContext::new(&catalog, None, &settings));
        assert!(matches!(
            writer.write_page(&second).await.unwrap().status,
            FileStatus::Merged { .. }
        ));
        assert_eq!(
            writer.write_page(&second).await.unwrap().status,
            FileStatus::Unchanged
        );
    }

    #[tokio::test]
    async fn escaping_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path().join("site"));
        let err = writer
            .write_page(&page("../outside.html", "x", vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.source.kind(), std::io::ErrorKind::InvalidInput);
        assert!(!dir.path().join("outside.html").exists());
    }

    #[tokio::test]
    async fn batch_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A file where a directory is needed makes the first page fail.
        std::fs::write(dir.path().join("blocked"), "file").unwrap();
        let writer = SiteWriter::new(dir.path());
        let report = writer
            .write_all(&[
                page("blocked/index.html", "x", vec![]),
                page("ok/index.html", "y", vec![]),
            ])
            .await;
        assert_eq!(report.files.len(), 2);
        assert!(matches!(report.files[0].status, FileStatus::Failed { .. }));
        assert_eq!(report.files[0].sha256, None);
        assert_eq!(report.files[1].status, FileStatus::Created);
        assert_eq!(report.files[1].sha256.as_deref(), Some(sha256_hex(b"y").as_str()));
        assert_eq!(report.failed(), 1);
        assert!(report.summary().starts_with("Error updating files (1 of 2 failed)"));
        assert!(dir.path().join("ok/index.html").exists());
    }

    #[test]
    fn summary_counts_statuses() {
        let mut report = WriteReport::default();
        report.push("a", FileStatus::Created);
        report.push("b", FileStatus::Unchanged);
        report.push("c", FileStatus::Created);
        assert_eq!(report.summary(), "Updated 3 files: 2 created, 1 unchanged");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["status"], "created");
        assert_eq!(json["files"][0]["path"], "a");
        assert!(json["files"][0].get("sha256").is_none());
    }

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
