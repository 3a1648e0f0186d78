use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// One upstream service that can list names under a domain.
#[async_trait]
pub trait SubdomainSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch(&self, domain: &str) -> Result<Vec<String>>;
}

pub trait Storage: Send + Sync {
    /// Create (or truncate) `path` and write `data` to it.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn domain(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn concurrent_fetch(&self) -> bool;
    fn crtsh_enabled(&self) -> bool;
    fn strict_suffix(&self) -> bool;
    fn securitytrails_enabled(&self) -> bool;
    fn securitytrails_api_key(&self) -> Option<&str>;
}
