use crate::domain::model::SubdomainListing;
use crate::domain::ports::SubdomainSource;
use crate::utils::error::{Result, ScanError};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const SECURITYTRAILS_BASE_URL: &str = "https://api.securitytrails.com/v1/";
pub const API_KEY_HEADER: &str = "APIKEY";
const SOURCE_NAME: &str = "SecurityTrails";

pub struct SecurityTrailsSource {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl SecurityTrailsSource {
    pub fn new(client: Client, timeout: Duration, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: SECURITYTRAILS_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout,
        }
    }

    pub fn with_base_url(
        client: Client,
        timeout: Duration,
        api_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self> {
        validate_url("securitytrails.base_url", base_url)?;
        Ok(Self {
            base_url: base_url.to_string(),
            ..Self::new(client, timeout, api_key)
        })
    }

    fn listing_url(&self, domain: &str) -> Result<Url> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(&format!("domain/{}/subdomains", domain)))
            .map_err(|e| ScanError::ConfigError {
                message: format!("Invalid SecurityTrails URL for {}: {}", domain, e),
            })
    }
}

#[async_trait]
impl SubdomainSource for SecurityTrailsSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch(&self, domain: &str) -> Result<Vec<String>> {
        let url = self.listing_url(domain)?;
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| ScanError::from_reqwest(SOURCE_NAME, e, self.timeout))?;

        let status = response.status();
        tracing::debug!("SecurityTrails response status: {}", status);

        if !status.is_success() {
            return Err(ScanError::UnexpectedStatusError {
                source_name: SOURCE_NAME.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScanError::from_reqwest(SOURCE_NAME, e, self.timeout))?;

        let listing: SubdomainListing = serde_json::from_str::<Option<SubdomainListing>>(&body)
            .map_err(|e| ScanError::DecodeError {
                source_name: SOURCE_NAME.to_string(),
                message: e.to_string(),
            })?
            .unwrap_or_default();

        tracing::debug!("SecurityTrails returned {} labels", listing.subdomains.len());
        Ok(qualify_labels(listing.subdomains, domain))
    }
}

/// `mail` + `example.com` -> `mail.example.com`. Duplicates are kept.
pub fn qualify_labels(labels: Vec<String>, domain: &str) -> Vec<String> {
    labels
        .into_iter()
        .map(|label| format!("{}.{}", label, domain))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn source(server: &MockServer, api_key: &str) -> SecurityTrailsSource {
        let timeout = Duration::from_secs(5);
        let client = Client::builder().timeout(timeout).build().unwrap();
        SecurityTrailsSource::with_base_url(client, timeout, api_key, &server.url("/v1/")).unwrap()
    }

    #[test]
    fn test_qualify_labels_keeps_duplicates() {
        let labels = vec!["mail".to_string(), "www".to_string(), "www".to_string()];
        assert_eq!(
            qualify_labels(labels, "example.com"),
            vec!["mail.example.com", "www.example.com", "www.example.com"]
        );
    }

    #[test]
    fn test_listing_url() {
        let source = SecurityTrailsSource::new(Client::new(), Duration::from_secs(5), "key");
        assert_eq!(
            source.listing_url("example.com").unwrap().as_str(),
            "https://api.securitytrails.com/v1/domain/example.com/subdomains"
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_api_key_and_qualifies_labels() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/domain/example.com/subdomains")
                .header("APIKEY", "secret-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "endpoint": "/v1/domain/example.com/subdomains",
                    "subdomains": ["mail", "www"]
                }));
        });

        let names = source(&server, "secret-key").fetch("example.com").await.unwrap();

        api_mock.assert();
        assert_eq!(names, vec!["mail.example.com", "www.example.com"]);
    }

    #[tokio::test]
    async fn test_fetch_rejected_key() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/domain/example.com/subdomains");
            then.status(403)
                .json_body(serde_json::json!({"message": "Invalid authentication credentials"}));
        });

        let result = source(&server, "wrong").fetch("example.com").await;
        assert!(matches!(
            result,
            Err(ScanError::UnexpectedStatusError { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_null_listing_yields_no_results() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/domain/example.com/subdomains");
            then.status(200).body(r#"{"subdomains": null}"#);
        });
        let names = source(&server, "secret-key").fetch("example.com").await.unwrap();
        assert!(names.is_empty());

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/domain/example.com/subdomains");
            then.status(200).body("null");
        });
        let names = source(&server, "secret-key").fetch("example.com").await.unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/domain/example.com/subdomains");
            then.status(200).body("subdomains: mail, www");
        });

        let result = source(&server, "secret-key").fetch("example.com").await;
        assert!(matches!(result, Err(ScanError::DecodeError { .. })));
    }
}
