pub mod auth;
pub mod config;
pub mod error;
pub mod remover;
pub mod window;
pub mod wordpress;

pub use config::{AppConfig, SiteConfig};
pub use error::{Error, Result};
pub use remover::{purge_sites, PostRemover, RunSummary, SiteReport};
pub use window::{DateWindow, RetentionPolicy};
