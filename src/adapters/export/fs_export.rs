//! Implements ExportPort. Writes artifacts under a root directory.

use crate::domain::DomainError;
use crate::ports::ExportPort;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// File-system exporter rooted at `base_dir`.
pub struct FsExporter {
    base_dir: PathBuf,
}

impl FsExporter {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }
}

/// Only plain relative components are allowed; accession input ends up in paths.
fn check_relative(relative: &Path) -> Result<(), DomainError> {
    let ok = relative.components().count() > 0
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if ok {
        Ok(())
    } else {
        Err(DomainError::Export(format!(
            "refusing to write outside export dir: {}",
            relative.display()
        )))
    }
}

#[async_trait::async_trait]
impl ExportPort for FsExporter {
    async fn write_file(&self, relative: &Path, bytes: &[u8]) -> Result<PathBuf, DomainError> {
        check_relative(relative)?;
        let path = self.base_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Export(format!("create {}: {}", parent.display(), e)))?;
        }
        let mut f = fs::File::create(&path)
            .await
            .map_err(|e| DomainError::Export(format!("create {}: {}", path.display(), e)))?;
        f.write_all(bytes)
            .await
            .map_err(|e| DomainError::Export(format!("write {}: {}", path.display(), e)))?;
        f.flush()
            .await
            .map_err(|e| DomainError::Export(format!("flush {}: {}", path.display(), e)))?;

        info!(path = %path.display(), len = bytes.len(), "exported file");
        Ok(path)
    }
}
