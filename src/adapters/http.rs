use crate::utils::error::{Result, ScanError};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("subspotx/", env!("CARGO_PKG_VERSION"));

/// 兩個來源共用同一個 client，逾時套用在整個請求 (連線到讀完 body)
pub fn build_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    tracing::debug!("Building HTTP client (timeout: {:?}, user agent: {})", timeout, user_agent);

    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| ScanError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        assert!(build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS), DEFAULT_USER_AGENT).is_ok());
    }
}
