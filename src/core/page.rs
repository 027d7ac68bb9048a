use chrono::{DateTime, SecondsFormat};
use tracing::{debug, info, warn};

use crate::core::render::render_manifest;
use crate::core::status::FetchState;
use crate::models::{
    ApiError, LogEntry, ManifestResponse, PackageInfo, PackageLog, PageKey, Traffic, TrafficCount,
    TreeNode,
};
use crate::source::PackageSource;

pub const LOADING: &str = "Loading...";
pub const NO_README: &str = "No README";

/// Every section of a package detail page together with the key it was
/// fetched for.
#[derive(Clone, Debug)]
pub struct PackagePage {
    key: PageKey,
    pub package: FetchState<PackageInfo>,
    pub manifest: FetchState<ManifestResponse>,
    pub log: FetchState<PackageLog>,
    pub traffic: FetchState<Traffic>,
}

impl PackagePage {
    pub fn new(key: PageKey) -> Self {
        Self {
            key,
            package: FetchState::Pending,
            manifest: FetchState::Pending,
            log: FetchState::Pending,
            traffic: FetchState::Pending,
        }
    }

    pub fn key(&self) -> &PageKey {
        &self.key
    }

    /// Fetch every section concurrently.
    pub async fn load<S: PackageSource + ?Sized>(&mut self, source: &S) {
        let handle = &self.key.handle;
        info!(package = %handle, "loading package page");

        let (package, manifest, log, traffic) = tokio::join!(
            source.package(handle),
            source.manifest(handle),
            source.log(handle),
            source.traffic(handle),
        );

        self.package = section("package", package);
        self.manifest = section("manifest", manifest);
        if let Some(preview) = self.manifest.ready().and_then(|m| m.preview.as_deref()) {
            let nodes: usize = preview.iter().map(TreeNode::node_count).sum();
            debug!(package = %self.key.handle, nodes, "manifest loaded");
        }
        self.log = section("log", log);
        self.traffic = section("traffic", traffic);
    }

    /// Switch to `key`. A new package reloads every section; a new user
    /// only refetches the package info. Returns whether anything was fetched.
    pub async fn update<S: PackageSource + ?Sized>(&mut self, source: &S, key: PageKey) -> bool {
        if key == self.key {
            debug!(package = %key.handle, "page key unchanged");
            return false;
        }

        if key.handle != self.key.handle {
            info!(from = %self.key.handle, to = %key.handle, "package changed, reloading page");
            *self = Self::new(key);
            self.load(source).await;
            return true;
        }

        info!(package = %key.handle, "user changed, refetching package");
        self.key = key;
        let package = source.package(&self.key.handle).await;
        self.package = section("package", package);
        true
    }

    /// Manifest tree text, empty until a manifest with a preview is ready.
    pub fn contents(&self) -> String {
        self.manifest
            .ready()
            .and_then(|manifest| manifest.preview.as_deref())
            .map(render_manifest)
            .unwrap_or_default()
    }

    /// Revision count shown in the log heading; never below one.
    pub fn revision_count(&self) -> u64 {
        self.manifest
            .ready()
            .and_then(|manifest| manifest.log_count)
            .filter(|&count| count > 0)
            .unwrap_or(1)
    }

    pub fn render(&self) -> String {
        let package = match &self.package {
            FetchState::Pending => return format!("{LOADING}\n"),
            FetchState::Error(err) => return format!("{}\n", error_line(err)),
            FetchState::Ready(package) => package,
        };

        let mut out = Vec::new();

        out.push(format!("{} ({})", self.key.handle, visibility(package)));
        out.push(String::new());

        out.push("Readme".to_owned());
        out.push(self.manifest.render_with(
            || LOADING.to_owned(),
            error_line,
            |manifest| match manifest.readme_preview.as_deref() {
                Some(readme) if !readme.is_empty() => readme.trim_end().to_owned(),
                _ => NO_README.to_owned(),
            },
        ));
        out.push(String::new());

        let count = self.revision_count();
        let noun = if count == 1 { "revision" } else { "revisions" };
        out.push(format!("{count} {noun}"));
        out.extend(self.log.render_with(
            || vec![LOADING.to_owned()],
            |err| vec![error_line(err)],
            |log| log.logs.iter().map(log_line).collect(),
        ));
        out.push(String::new());

        out.push("Install".to_owned());
        out.push(format!("quilt install {}", self.key.handle));
        out.push(String::new());

        out.push("Traffic".to_owned());
        out.extend(self.traffic.render_with(
            || vec![LOADING.to_owned()],
            |err| vec![error_line(err)],
            traffic_lines,
        ));
        out.push(String::new());

        out.push("Update info".to_owned());
        out.extend(update_info_lines(package, self.manifest.ready()));
        out.push(String::new());

        out.push("Contents".to_owned());

        let mut text = out.join("\n");
        text.push('\n');
        text.push_str(&self.contents());
        text
    }
}

fn section<T>(name: &str, result: anyhow::Result<T>) -> FetchState<T> {
    if let Err(err) = &result {
        warn!("{name} request failed: {err:#}");
    }
    FetchState::from(result)
}

fn error_line(err: &ApiError) -> String {
    format!("Error: {err}")
}

fn visibility(package: &PackageInfo) -> &'static str {
    if package.is_public {
        "public"
    } else if package.is_team {
        "team"
    } else {
        "private"
    }
}

fn format_time(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| seconds.to_string())
}

fn log_line(entry: &LogEntry) -> String {
    let short_hash = entry.hash.get(..8).unwrap_or(&entry.hash);
    let mut line = format!(
        "{short_hash}  {}  {}",
        entry.author,
        format_time(entry.created)
    );

    if let Some(versions) = entry.versions.as_ref().filter(|v| !v.is_empty()) {
        line.push_str(&format!("  versions: {}", versions.join(", ")));
    }
    if let Some(tags) = entry.tags.as_ref().filter(|t| !t.is_empty()) {
        line.push_str(&format!("  tags: {}", tags.join(", ")));
    }

    line
}

fn traffic_lines(traffic: &Traffic) -> Vec<String> {
    let count_line = |label: &str, count: Option<TrafficCount>| {
        let count = count.unwrap_or_default();
        format!("{label}: {} total, {} this week", count.total, count.week)
    };

    vec![
        count_line("installs", traffic.installs),
        count_line("views", traffic.views),
    ]
}

fn update_info_lines(package: &PackageInfo, manifest: Option<&ManifestResponse>) -> Vec<String> {
    let mut lines = Vec::new();

    match (&package.updated_by, package.updated_at) {
        (Some(author), Some(at)) => lines.push(format!("updated by {author} at {}", format_time(at))),
        (Some(author), None) => lines.push(format!("updated by {author}")),
        (None, Some(at)) => lines.push(format!("updated at {}", format_time(at))),
        (None, None) => {}
    }

    if let Some(manifest) = manifest {
        if let Some(file_types) = manifest.file_types.as_ref().filter(|t| !t.is_empty()) {
            let types: Vec<String> = file_types
                .iter()
                .map(|(ext, count)| format!("{ext} ({count})"))
                .collect();
            lines.push(format!("file types: {}", types.join(", ")));
        }
        if let Some(size) = manifest.total_size_uncompressed {
            lines.push(format!("size: {}", human_size(size)));
        }
    }

    if let Some(hash) = &package.hash {
        lines.push(format!("version: {hash}"));
    }

    lines
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let rounded = |value: f64| (value * 10.0).round() / 10.0;

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while rounded(value) >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
