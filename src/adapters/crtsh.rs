use crate::domain::model::{CertificateEntry, SubdomainSet};
use crate::domain::ports::SubdomainSource;
use crate::utils::error::{Result, ScanError};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const CRTSH_BASE_URL: &str = "https://crt.sh/";
const SOURCE_NAME: &str = "crt.sh";

/// Certificate transparency search on crt.sh.
pub struct CrtShSource {
    client: Client,
    base_url: String,
    timeout: Duration,
    strict_suffix: bool,
}

impl CrtShSource {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            base_url: CRTSH_BASE_URL.to_string(),
            timeout,
            strict_suffix: false,
        }
    }

    pub fn with_base_url(client: Client, timeout: Duration, base_url: &str) -> Result<Self> {
        validate_url("crtsh.base_url", base_url)?;
        Ok(Self {
            base_url: base_url.to_string(),
            ..Self::new(client, timeout)
        })
    }

    /// Require a `.` boundary before the domain instead of a raw suffix match.
    pub fn strict_suffix(mut self, strict: bool) -> Self {
        self.strict_suffix = strict;
        self
    }

    fn query_url(&self, domain: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ScanError::ConfigError {
            message: format!("Invalid crt.sh URL {}: {}", self.base_url, e),
        })?;
        // `%` 會被編碼成 %25，與 crt.sh 網頁上的萬用字元查詢相同
        url.query_pairs_mut()
            .append_pair("q", &format!("%.{}", domain))
            .append_pair("output", "json");
        Ok(url)
    }
}

#[async_trait]
impl SubdomainSource for CrtShSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch(&self, domain: &str) -> Result<Vec<String>> {
        let url = self.query_url(domain)?;
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScanError::from_reqwest(SOURCE_NAME, e, self.timeout))?;

        let status = response.status();
        tracing::debug!("crt.sh response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| ScanError::from_reqwest(SOURCE_NAME, e, self.timeout))?;

        // 被限流或出錯時 crt.sh 回傳 HTML 頁面，視為沒有結果
        if is_html(&body) {
            tracing::debug!("crt.sh returned an HTML page, treating it as zero results");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            return Err(ScanError::UnexpectedStatusError {
                source_name: SOURCE_NAME.to_string(),
                status: status.as_u16(),
            });
        }

        let entries: Vec<CertificateEntry> = serde_json::from_str::<Option<Vec<_>>>(&body)
            .map_err(|e| ScanError::DecodeError {
                source_name: SOURCE_NAME.to_string(),
                message: e.to_string(),
            })?
            .unwrap_or_default();

        tracing::debug!("crt.sh returned {} certificate entries", entries.len());
        Ok(extract_subdomains(&entries, domain, self.strict_suffix))
    }
}

fn is_html(body: &str) -> bool {
    body.to_ascii_lowercase().contains("<html")
}

/// Split every entry's `name_value`, keep names under `domain`, deduplicate.
pub fn extract_subdomains(entries: &[CertificateEntry], domain: &str, strict: bool) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| entry.names())
        .filter(|name| matches_domain(name, domain, strict))
        .map(str::to_string)
        .collect::<SubdomainSet>()
        .into_vec()
}

/// Without `strict` this is a plain suffix test, so `evilexample.com`
/// matches `example.com`.
pub fn matches_domain(name: &str, domain: &str, strict: bool) -> bool {
    if !strict {
        return name.ends_with(domain);
    }
    name == domain
        || name
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn entry(name_value: &str) -> CertificateEntry {
        CertificateEntry {
            common_name: None,
            name_value: Some(name_value.to_string()),
        }
    }

    fn source(server: &MockServer, timeout: Duration) -> CrtShSource {
        let client = Client::builder().timeout(timeout).build().unwrap();
        CrtShSource::with_base_url(client, timeout, &server.url("/")).unwrap()
    }

    #[test]
    fn test_extract_splits_multi_name_entries() {
        let entries = vec![
            entry("www.example.com\napi.example.com"),
            entry(" mail.example.com \nwww.example.com"),
        ];
        let names = extract_subdomains(&entries, "example.com", false);
        assert_eq!(
            names,
            vec!["api.example.com", "mail.example.com", "www.example.com"]
        );
    }

    #[test]
    fn test_extract_keeps_only_names_under_domain() {
        let entries = vec![entry("www.example.com\nwww.other.org\ncdn.example.net")];
        let names = extract_subdomains(&entries, "example.com", false);
        assert_eq!(names, vec!["www.example.com"]);
        assert!(names.iter().all(|n| n.ends_with("example.com")));
    }

    #[test]
    fn test_raw_suffix_match_accepts_lookalike_domain() {
        assert!(matches_domain("evilexample.com", "example.com", false));
        assert!(!matches_domain("evilexample.com", "example.com", true));
        assert!(matches_domain("a.b.example.com", "example.com", true));
        assert!(matches_domain("example.com", "example.com", true));
        assert!(matches_domain("*.example.com", "example.com", true));
    }

    #[test]
    fn test_query_url_encodes_wildcard() {
        let client = Client::new();
        let source = CrtShSource::new(client, Duration::from_secs(5));
        let url = source.query_url("example.com").unwrap();
        assert_eq!(url.as_str(), "https://crt.sh/?q=%25.example.com&output=json");
    }

    #[tokio::test]
    async fn test_fetch_parses_json_entries() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/")
                .query_param("q", "%.example.com")
                .query_param("output", "json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"common_name": "www.example.com", "name_value": "www.example.com\napi.example.com"},
                    {"common_name": "other.org", "name_value": "other.org"}
                ]));
        });

        let names = source(&server, Duration::from_secs(5))
            .fetch("example.com")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(names, vec!["api.example.com", "www.example.com"]);
    }

    #[tokio::test]
    async fn test_fetch_html_page_yields_no_results() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(429)
                .header("Content-Type", "text/html")
                .body("<!DOCTYPE html>\n<HTML><body>Too many requests</body></HTML>");
        });

        let names = source(&server, Duration::from_secs(5))
            .fetch("example.com")
            .await
            .unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_null_body_yields_no_results() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).header("Content-Type", "application/json").body("null");
        });

        let names = source(&server, Duration::from_secs(5))
            .fetch("example.com")
            .await
            .unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("{\"not\": \"an array\"}");
        });

        let result = source(&server, Duration::from_secs(5)).fetch("example.com").await;
        assert!(matches!(result, Err(ScanError::DecodeError { .. })));
    }

    #[tokio::test]
    async fn test_fetch_server_error_without_html() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(502).body("bad gateway");
        });

        let result = source(&server, Duration::from_secs(5)).fetch("example.com").await;
        assert!(matches!(
            result,
            Err(ScanError::UnexpectedStatusError { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(serde_json::json!([]));
        });

        let result = source(&server, Duration::from_millis(300)).fetch("example.com").await;
        assert!(matches!(result, Err(ScanError::TimeoutError { .. })));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        let timeout = Duration::from_secs(2);
        let client = Client::builder().timeout(timeout).build().unwrap();
        let source = CrtShSource::with_base_url(client, timeout, "http://127.0.0.1:1/").unwrap();

        let result = source.fetch("example.com").await;
        assert!(matches!(result, Err(ScanError::NetworkError { .. })));
    }
}
