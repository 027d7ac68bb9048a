pub mod cli;
pub mod core;
pub mod models;
pub mod source;
