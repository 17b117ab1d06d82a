pub mod changelog;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod file_loader;
pub mod forge;
pub mod output;
pub mod repo;

pub use cli::Args;
pub use error::{GhReleaserError, Result};
