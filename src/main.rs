use std::process::ExitCode;

use clap::Parser as _;
use tracing::debug;

use pkgtree::cli::{Cli, LogLevel};
use pkgtree::core::PackagePage;
use pkgtree::models::PageKey;
use pkgtree::source::RegistryDir;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.log_level);
    debug!(?cli, "parsed arguments");

    let source = RegistryDir::new(&cli.registry);
    debug!(registry = %source.root().display(), "using registry directory");
    let mut page = PackagePage::new(PageKey {
        handle: cli.handle.clone(),
        user: cli.user.clone(),
    });
    page.load(&source).await;

    // The tree only depends on the manifest; the full page is gated on the
    // package info.
    let (text, failure) = if cli.tree {
        (page.contents(), page.manifest.error())
    } else {
        (page.render(), page.package.error())
    };

    print!("{text}");

    if let Some(err) = failure {
        eprintln!("pkgtree: {}: {err}", page.key().handle);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn setup_tracing(log_level: LogLevel) {
    if let Some(level) = log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}
