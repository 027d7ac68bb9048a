mod registry;

#[cfg(test)]
mod mock;

pub use registry::RegistryDir;

#[cfg(test)]
pub use mock::MockSource;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ManifestResponse, PackageHandle, PackageInfo, PackageLog, Traffic};

/// Where package page data comes from.
#[async_trait]
pub trait PackageSource: Send + Sync {
    async fn package(&self, handle: &PackageHandle) -> Result<PackageInfo>;
    async fn manifest(&self, handle: &PackageHandle) -> Result<ManifestResponse>;
    async fn log(&self, handle: &PackageHandle) -> Result<PackageLog>;
    async fn traffic(&self, handle: &PackageHandle) -> Result<Traffic>;
}
