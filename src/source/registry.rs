use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::{ManifestResponse, PackageHandle, PackageInfo, PackageLog, Traffic};

use super::PackageSource;

/// Reads API response documents laid out as
/// `<root>/<owner>/<name>/{package,manifest,log,traffic}.json`.
pub struct RegistryDir {
    root: PathBuf,
}

impl RegistryDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, handle: &PackageHandle, document: &str) -> PathBuf {
        self.root
            .join(&handle.owner)
            .join(&handle.name)
            .join(format!("{document}.json"))
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        handle: &PackageHandle,
        document: &str,
    ) -> Result<T> {
        let path = self.document_path(handle, document);
        debug!(path = %path.display(), "reading {document} document");

        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;

        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[async_trait]
impl PackageSource for RegistryDir {
    async fn package(&self, handle: &PackageHandle) -> Result<PackageInfo> {
        self.read_document(handle, "package").await
    }

    async fn manifest(&self, handle: &PackageHandle) -> Result<ManifestResponse> {
        self.read_document(handle, "manifest").await
    }

    async fn log(&self, handle: &PackageHandle) -> Result<PackageLog> {
        self.read_document(handle, "log").await
    }

    async fn traffic(&self, handle: &PackageHandle) -> Result<Traffic> {
        self.read_document(handle, "traffic").await
    }
}
