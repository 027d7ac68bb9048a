pub mod page;
pub mod render;
pub mod status;

pub use page::PackagePage;
pub use render::{manifest_lines, render_manifest, write_manifest};
pub use status::{ApiStatus, FetchState, RequestRecord};
