use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::{ManifestResponse, PackageHandle, PackageInfo, PackageLog, Traffic};

use super::PackageSource;

#[derive(Clone, Debug)]
enum Response<T> {
    Ok(T),
    Err(String),
}

impl<T: Clone> Response<T> {
    fn get(&self) -> Result<T> {
        match self {
            Response::Ok(value) => Ok(value.clone()),
            Response::Err(message) => Err(anyhow!("{message}")),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockSource {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    packages: HashMap<PackageHandle, Response<PackageInfo>>,
    manifests: HashMap<PackageHandle, Response<ManifestResponse>>,
    logs: HashMap<PackageHandle, Response<PackageLog>>,
    traffic: HashMap<PackageHandle, Response<Traffic>>,
    calls: Vec<String>,
}

impl MockSource {
    pub fn set_package(&self, handle: &PackageHandle, package: PackageInfo) {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner.packages.insert(handle.clone(), Response::Ok(package));
    }

    pub fn set_package_error(&self, handle: &PackageHandle, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner
            .packages
            .insert(handle.clone(), Response::Err(message.into()));
    }

    pub fn set_manifest(&self, handle: &PackageHandle, manifest: ManifestResponse) {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner.manifests.insert(handle.clone(), Response::Ok(manifest));
    }

    pub fn set_manifest_error(&self, handle: &PackageHandle, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner
            .manifests
            .insert(handle.clone(), Response::Err(message.into()));
    }

    pub fn set_log(&self, handle: &PackageHandle, log: PackageLog) {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner.logs.insert(handle.clone(), Response::Ok(log));
    }

    pub fn set_traffic(&self, handle: &PackageHandle, traffic: Traffic) {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner.traffic.insert(handle.clone(), Response::Ok(traffic));
    }

    /// Calls made so far, as `<kind> <owner/name>`.
    pub fn calls(&self) -> Vec<String> {
        let inner = self.inner.lock().expect("mock source lock");
        inner.calls.clone()
    }
}

fn lookup<T: Clone>(
    responses: &HashMap<PackageHandle, Response<T>>,
    handle: &PackageHandle,
    kind: &str,
) -> Result<T> {
    match responses.get(handle) {
        Some(response) => response.get(),
        None => Err(anyhow!("no mock {kind} for {handle}")),
    }
}

#[async_trait]
impl PackageSource for MockSource {
    async fn package(&self, handle: &PackageHandle) -> Result<PackageInfo> {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner.calls.push(format!("package {handle}"));
        lookup(&inner.packages, handle, "package")
    }

    async fn manifest(&self, handle: &PackageHandle) -> Result<ManifestResponse> {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner.calls.push(format!("manifest {handle}"));
        lookup(&inner.manifests, handle, "manifest")
    }

    async fn log(&self, handle: &PackageHandle) -> Result<PackageLog> {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner.calls.push(format!("log {handle}"));
        lookup(&inner.logs, handle, "log")
    }

    async fn traffic(&self, handle: &PackageHandle) -> Result<Traffic> {
        let mut inner = self.inner.lock().expect("mock source lock");
        inner.calls.push(format!("traffic {handle}"));
        lookup(&inner.traffic, handle, "traffic")
    }
}
