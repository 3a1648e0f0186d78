// Adapters layer: concrete implementations for external systems (HTTP sources, local files).

pub mod crtsh;
pub mod http;
pub mod securitytrails;
pub mod storage;

pub use crtsh::CrtShSource;
pub use securitytrails::SecurityTrailsSource;
pub use storage::LocalStorage;
