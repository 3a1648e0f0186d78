use crate::adapters::http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::config::toml_config::{TomlConfig, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ScanError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use std::fmt;
use std::time::Duration;

#[cfg(feature = "cli")]
use crate::config::CliConfig;

/// Settings for one scan after merging flags, the TOML file and defaults.
#[derive(Clone)]
pub struct ScanSettings {
    pub domain: String,
    pub output_path: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
    pub concurrent: bool,
    pub crtsh_enabled: bool,
    pub strict_suffix: bool,
    pub securitytrails_enabled: bool,
    pub securitytrails_api_key: Option<String>,
}

impl ScanSettings {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            output_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrent: false,
            crtsh_enabled: true,
            strict_suffix: false,
            securitytrails_enabled: true,
            securitytrails_api_key: None,
        }
    }

    /// Layer the TOML file over the defaults.
    pub fn with_file(mut self, file: &TomlConfig) -> Self {
        if let Some(secs) = file.http.timeout_seconds {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(user_agent) = &file.http.user_agent {
            self.user_agent = user_agent.clone();
        }
        if let Some(concurrent) = file.scan.concurrent {
            self.concurrent = concurrent;
        }
        if let Some(enabled) = file.sources.crtsh.enabled {
            self.crtsh_enabled = enabled;
        }
        if let Some(strict) = file.sources.crtsh.strict_suffix {
            self.strict_suffix = strict;
        }
        if let Some(enabled) = file.sources.securitytrails.enabled {
            self.securitytrails_enabled = enabled;
        }
        if let Some(key) = file.securitytrails_api_key() {
            self.securitytrails_api_key = Some(key.to_string());
        }
        if let Some(path) = &file.output.path {
            self.output_path = Some(path.clone());
        }
        self
    }

    /// 命令列參數優先於設定檔
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file: Option<&TomlConfig>) -> Result<Self> {
        let domain = cli.domain.as_deref().ok_or_else(|| ScanError::MissingConfigError {
            field: "domain".to_string(),
        })?;

        let mut settings = Self::new(domain.trim());
        if let Some(file) = file {
            settings = settings.with_file(file);
        }

        // 空字串的 -o 等同未指定輸出檔
        if let Some(path) = cli.output.as_deref().filter(|p| !p.is_empty()) {
            settings.output_path = Some(path.to_string());
        }
        if let Some(secs) = cli.timeout {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(key) = cli.securitytrails_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                settings.securitytrails_api_key = Some(key.to_string());
            }
        }
        if cli.concurrent {
            settings.concurrent = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for ScanSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("domain", &self.domain)?;
        validate_range(
            "timeout",
            self.timeout.as_secs(),
            MIN_TIMEOUT_SECS,
            MAX_TIMEOUT_SECS,
        )?;
        validate_non_empty_string("user_agent", &self.user_agent)?;
        if let Some(path) = &self.output_path {
            validate_path("output", path)?;
        }
        Ok(())
    }
}

// API key 不可出現在日誌中
impl fmt::Debug for ScanSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanSettings")
            .field("domain", &self.domain)
            .field("output_path", &self.output_path)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("concurrent", &self.concurrent)
            .field("crtsh_enabled", &self.crtsh_enabled)
            .field("strict_suffix", &self.strict_suffix)
            .field("securitytrails_enabled", &self.securitytrails_enabled)
            .field(
                "securitytrails_api_key",
                &self.securitytrails_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl ConfigProvider for ScanSettings {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn request_timeout(&self) -> Duration {
        self.timeout
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn concurrent_fetch(&self) -> bool {
        self.concurrent
    }

    fn crtsh_enabled(&self) -> bool {
        self.crtsh_enabled
    }

    fn strict_suffix(&self) -> bool {
        self.strict_suffix
    }

    fn securitytrails_enabled(&self) -> bool {
        self.securitytrails_enabled
    }

    fn securitytrails_api_key(&self) -> Option<&str> {
        self.securitytrails_api_key.as_deref()
    }
}
