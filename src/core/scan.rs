use crate::adapters::http::build_client;
use crate::adapters::{CrtShSource, SecurityTrailsSource};
use crate::core::merge::merge_all;
use crate::domain::model::{ScanReport, SourceSummary};
use crate::domain::ports::{ConfigProvider, SubdomainSource};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use futures::future::join_all;

/// Runs every configured source against one domain and merges the answers.
pub struct ScanEngine {
    sources: Vec<Box<dyn SubdomainSource>>,
    concurrent: bool,
}

impl ScanEngine {
    pub fn new(sources: Vec<Box<dyn SubdomainSource>>) -> Self {
        Self {
            sources,
            concurrent: false,
        }
    }

    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// crt.sh first, then SecurityTrails. A missing API key disables SecurityTrails.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let timeout = config.request_timeout();
        let client = build_client(timeout, config.user_agent())?;
        let mut sources: Vec<Box<dyn SubdomainSource>> = Vec::new();

        if config.crtsh_enabled() {
            sources.push(Box::new(
                CrtShSource::new(client.clone(), timeout).strict_suffix(config.strict_suffix()),
            ));
        }

        if config.securitytrails_enabled() {
            let api_key = config.securitytrails_api_key();
            match validate_required_field("sources.securitytrails.api_key", &api_key) {
                Ok(api_key) => sources.push(Box::new(SecurityTrailsSource::new(
                    client.clone(),
                    timeout,
                    *api_key,
                ))),
                Err(e) => {
                    tracing::warn!("{}; skipping SecurityTrails", e);
                    tracing::warn!("💡 Set SECURITYTRAILS_API_KEY or pass --securitytrails-key");
                }
            }
        }

        if sources.is_empty() {
            tracing::warn!("No subdomain sources are enabled");
        }

        Ok(Self::new(sources).with_concurrency(config.concurrent_fetch()))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Source failures are logged and counted, never returned.
    pub async fn run(&self, domain: &str) -> ScanReport {
        tracing::info!("Scanning {} with {} source(s)", domain, self.sources.len());

        let results = if self.concurrent {
            join_all(self.sources.iter().map(|source| source.fetch(domain))).await
        } else {
            let mut results = Vec::with_capacity(self.sources.len());
            for source in &self.sources {
                results.push(source.fetch(domain).await);
            }
            results
        };

        let mut summaries = Vec::with_capacity(results.len());
        let mut found = Vec::new();

        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(names) => {
                    tracing::info!("{} returned {} name(s)", source.name(), names.len());
                    summaries.push(SourceSummary::succeeded(source.name(), names.len()));
                    found.push(names);
                }
                Err(e) => {
                    if e.is_fatal() {
                        tracing::error!("{} is misconfigured: {}", source.name(), e);
                    } else {
                        tracing::warn!("Error getting subdomains from {}: {}", source.name(), e);
                    }
                    tracing::debug!("💡 {}", e.recovery_suggestion());
                    summaries.push(SourceSummary::failed(source.name(), e.to_string()));
                }
            }
        }

        let subdomains = merge_all(found);
        tracing::debug!("Merged {} unique name(s)", subdomains.len());

        ScanReport {
            domain: domain.to_string(),
            subdomains,
            sources: summaries,
        }
    }
}
