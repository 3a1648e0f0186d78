pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CrtShSource, LocalStorage, SecurityTrailsSource};
pub use config::{ScanSettings, TomlConfig};
pub use core::{merge::merge_subdomains, scan::ScanEngine};
pub use domain::model::{ScanReport, SubdomainSet};
pub use utils::error::{Result, ScanError};
