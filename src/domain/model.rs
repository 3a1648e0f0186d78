use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// crt.sh 的單筆憑證記錄，name_value 可能包含多個以換行分隔的名稱 (SAN)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateEntry {
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub name_value: Option<String>,
}

impl CertificateEntry {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.name_value
            .as_deref()
            .unwrap_or_default()
            .split('\n')
            .map(str::trim)
    }
}

/// SecurityTrails `/domain/{domain}/subdomains` 回應，標籤不含父網域
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubdomainListing {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subdomains: Vec<String>,
}

/// JSON `null` decodes to an empty list instead of failing.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deduplicating set of discovered names.
///
/// Names are compared by exact string equality (no case folding, no trailing
/// dot removal). Iteration is sorted so output is identical across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubdomainSet {
    names: BTreeSet<String>,
}

impl SubdomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the name was not present yet.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names.into_iter().collect()
    }
}

impl Extend<String> for SubdomainSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.names.extend(iter);
    }
}

impl FromIterator<String> for SubdomainSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub name: String,
    pub found: usize,
    pub error: Option<String>,
}

impl SourceSummary {
    pub fn succeeded(name: &str, found: usize) -> Self {
        Self {
            name: name.to_string(),
            found,
            error: None,
        }
    }

    pub fn failed(name: &str, error: String) -> Self {
        Self {
            name: name.to_string(),
            found: 0,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub domain: String,
    pub subdomains: SubdomainSet,
    pub sources: Vec<SourceSummary>,
}

impl ScanReport {
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceSummary> {
        self.sources.iter().filter(|s| !s.is_success())
    }
}
