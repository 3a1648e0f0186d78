pub mod merge;
pub mod scan;

pub use crate::domain::model::{ScanReport, SubdomainSet};
pub use crate::domain::ports::{ConfigProvider, Storage, SubdomainSource};
pub use crate::utils::error::Result;
