use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::models::PackageHandle;

#[derive(Parser, Debug)]
#[command(name = "pkgtree")]
#[command(about = "Print the detail page of a data package as text", long_about = None)]
pub struct Cli {
    /// Package to show, as owner/name
    pub handle: PackageHandle,

    /// Registry directory holding <owner>/<name>/*.json documents
    #[arg(short, long, default_value = ".")]
    pub registry: PathBuf,

    /// User viewing the page
    #[arg(short, long)]
    pub user: Option<String>,

    /// Print only the contents tree
    #[arg(short, long)]
    pub tree: bool,

    /// Diagnostic output on stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}
