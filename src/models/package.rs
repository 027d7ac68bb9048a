use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::anyhow;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Manifest;

static HANDLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w-]+)/(\w+)$").expect("package handle pattern is valid")
});

/// `owner/name` identifier of a package.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PackageHandle {
    pub owner: String,
    pub name: String,
}

impl FromStr for PackageHandle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let captures = HANDLE_PATTERN
            .captures(s)
            .ok_or_else(|| anyhow!("invalid package handle '{s}', expected owner/name"))?;

        Ok(Self {
            owner: captures[1].to_owned(),
            name: captures[2].to_owned(),
        })
    }
}

impl fmt::Display for PackageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Identifying parameters of a package page. A change in any of them
/// refreshes the package info.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageKey {
    pub handle: PackageHandle,
    pub user: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PackageInfo {
    #[serde(default)]
    pub hash: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_team: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ManifestResponse {
    #[serde(default)]
    pub preview: Option<Manifest>,
    #[serde(default)]
    pub readme_preview: Option<String>,
    #[serde(default)]
    pub log_count: Option<u64>,
    #[serde(default)]
    pub file_types: Option<BTreeMap<String, u64>>,
    #[serde(default)]
    pub total_size_uncompressed: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PackageLog {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct LogEntry {
    pub hash: String,
    pub author: String,
    /// Unix seconds.
    pub created: i64,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub versions: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TrafficCount {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub week: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Traffic {
    #[serde(default)]
    pub installs: Option<TrafficCount>,
    #[serde(default)]
    pub views: Option<TrafficCount>,
}

/// Error payload attached to a failed request, shown as-is.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.message.is_empty()) {
            (Some(status), true) => write!(f, "request failed with status {status}"),
            (Some(status), false) => write!(f, "{} (status {status})", self.message),
            (None, true) => f.write_str("request failed"),
            (None, false) => f.write_str(&self.message),
        }
    }
}
