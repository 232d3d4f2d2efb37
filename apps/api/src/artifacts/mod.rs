//! Generated-artifact store, a flat directory of `<uuid>.docx` / `<uuid>.pdf` files.
//!
//! Append-only: every request allocates a fresh v4 identifier, so concurrent
//! requests never touch each other's files and no locking is needed.
//! Nothing here ever deletes a finished artifact.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::render::DocumentFormat;

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

/// The pair of files produced for one successful optimization.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub id: Uuid,
    pub docx_path: PathBuf,
    pub pdf_path: PathBuf,
}

/// Relative download URLs returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadLinks {
    pub docx: String,
    pub pdf: String,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the output directory if absent. Called once at startup.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                self.root.display()
            )
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reserves a fresh identifier and derives both target paths. Writes nothing.
    pub fn allocate(&self) -> GeneratedArtifact {
        let id = Uuid::new_v4();
        GeneratedArtifact {
            id,
            docx_path: self.root.join(file_name(id, DocumentFormat::Docx)),
            pdf_path: self.root.join(file_name(id, DocumentFormat::Pdf)),
        }
    }

    /// Maps a client-supplied file name to a path inside the store.
    ///
    /// Returns `None` unless the name is a single plain component naming an
    /// existing file, so lookups can never escape the output directory.
    pub async fn resolve(&self, requested: &str) -> Option<PathBuf> {
        let mut components = Path::new(requested).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == requested => {}
            _ => return None,
        }

        let path = self.root.join(requested);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(path),
            _ => None,
        }
    }
}

impl GeneratedArtifact {
    pub fn path(&self, format: DocumentFormat) -> &Path {
        match format {
            DocumentFormat::Docx => &self.docx_path,
            DocumentFormat::Pdf => &self.pdf_path,
        }
    }

    pub fn download_links(&self) -> DownloadLinks {
        DownloadLinks {
            docx: download_url(self.id, DocumentFormat::Docx),
            pdf: download_url(self.id, DocumentFormat::Pdf),
        }
    }
}

fn file_name(id: Uuid, format: DocumentFormat) -> String {
    format!("{id}.{}", format.extension())
}

fn download_url(id: Uuid, format: DocumentFormat) -> String {
    format!(
        "/api/download/{}/{}",
        format.extension(),
        file_name(id, format)
    )
}
