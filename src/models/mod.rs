mod package;
mod tree;

pub use package::{
    ApiError, LogEntry, ManifestResponse, PackageHandle, PackageInfo, PackageLog, PageKey,
    Traffic, TrafficCount,
};
pub use tree::{Manifest, TreeNode};
